//! Hardware address parsing. Accepts EUI-48 and EUI-64 in colon, hyphen,
//! Cisco dot or bare hex notation and reduces them to their OUI.

use std::fmt;
use std::str::FromStr;

use crate::error::LookupError;

/// Number of octets in an OUI prefix
pub const OUI_LEN: usize = 3;

/// The 24-bit organizationally unique identifier, the lookup key of the table.
/// Displays as six lowercase hex digits without separators (`3cd92b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oui([u8; OUI_LEN]);

impl Oui {
    pub const fn new(octets: [u8; OUI_LEN]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; OUI_LEN] {
        self.0
    }

    /// Build a key from the first six hex digits of `hex`. Anything beyond six
    /// digits is ignored, so 28- and 36-bit block identifiers collapse onto
    /// their 24-bit prefix.
    pub fn from_hex_prefix(hex: &str) -> Option<Self> {
        let prefix = hex.get(..OUI_LEN * 2).filter(|p| p.is_ascii())?;
        let mut octets = [0u8; OUI_LEN];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = hex_octet(&prefix[i * 2..i * 2 + 2])?;
        }
        Some(Self(octets))
    }

    /// Parse a key that must be exactly six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != OUI_LEN * 2 {
            return None;
        }
        Self::from_hex_prefix(hex)
    }
}

impl fmt::Display for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// A syntactically valid hardware address of 6 (EUI-48) or 8 (EUI-64) octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacAddr {
    octets: Vec<u8>,
}

impl MacAddr {
    pub fn octets(&self) -> &[u8] {
        &self.octets
    }

    pub fn oui(&self) -> Oui {
        Oui([self.octets[0], self.octets[1], self.octets[2]])
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, octet) in self.octets.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

impl FromStr for MacAddr {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let octets = if !input.is_ascii() {
            None
        } else if input.contains(':') {
            parse_separated(input, ':')
        } else if input.contains('-') {
            parse_separated(input, '-')
        } else if input.contains('.') {
            parse_dotted(input)
        } else {
            parse_bare(input)
        };

        match octets {
            Some(octets) if matches!(octets.len(), 6 | 8) => Ok(Self { octets }),
            _ => Err(LookupError::InvalidAddress(s.to_string())),
        }
    }
}

/// Two hex digits, nothing else. `u8::from_str_radix` alone would accept a sign.
fn hex_octet(s: &str) -> Option<u8> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(s, 16).ok()
}

/// `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`
fn parse_separated(input: &str, sep: char) -> Option<Vec<u8>> {
    input.split(sep).map(hex_octet).collect()
}

/// Cisco notation: `aabb.ccdd.eeff`
fn parse_dotted(input: &str) -> Option<Vec<u8>> {
    let mut octets = Vec::new();
    for group in input.split('.') {
        if group.len() != 4 {
            return None;
        }
        octets.push(hex_octet(&group[..2])?);
        octets.push(hex_octet(&group[2..])?);
    }
    Some(octets)
}

/// `aabbccddeeff`
fn parse_bare(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }
    (0..input.len())
        .step_by(2)
        .map(|i| hex_octet(&input[i..i + 2]))
        .collect()
}
