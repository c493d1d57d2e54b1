use std::collections::HashMap;

use crate::error::LookupError;

use super::{MacAddr, Oui};

/// Immutable OUI to vendor mapping. Built once from the cache and then only
/// read, so a shared reference can be handed to any number of request handlers.
#[derive(Debug, Default, Clone)]
pub struct LookupTable {
    vendors: HashMap<Oui, String>,
}

impl LookupTable {
    /// Resolve free-form address text to its registered vendor.
    ///
    /// Malformed input is `InvalidAddress`; a well-formed address with an
    /// unregistered prefix is `NotFound`. Callers rely on the distinction.
    pub fn lookup(&self, address: &str) -> Result<&str, LookupError> {
        let mac: MacAddr = address.parse()?;
        self.query(&mac)
            .ok_or_else(|| LookupError::NotFound(mac.oui()))
    }

    /// Resolve an already parsed address
    pub fn query(&self, mac: &MacAddr) -> Option<&str> {
        self.get(&mac.oui())
    }

    pub fn get(&self, oui: &Oui) -> Option<&str> {
        self.vendors.get(oui).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Oui, &str)> {
        self.vendors.iter().map(|(oui, vendor)| (oui, vendor.as_str()))
    }
}

/// Later pairs replace earlier ones with the same prefix.
impl FromIterator<(Oui, String)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (Oui, String)>>(iter: I) -> Self {
        Self {
            vendors: iter.into_iter().collect(),
        }
    }
}
