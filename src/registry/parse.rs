use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::cache::write_record;
use crate::error::LoadError;
use crate::oui::Oui;

use super::staging_file;

// `0050C2     (base 16)		Acme Corp`
static RECORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn record_pattern() -> &'static Regex {
    RECORD_PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([0-9A-Fa-f]{6,})\s*\(base 16\)(.*)$").expect("record pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The cache already existed; the raw registry was not read
    AlreadyPresent,
    Written { records: usize },
}

/// Extract the key and vendor from one registry line, or `None` if the line
/// is not a `(base 16)` record. Identifiers longer than six digits are
/// truncated to their 24-bit prefix.
pub fn parse_line(line: &str) -> Option<(Oui, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = record_pattern().captures(line)?;
    let vendor = caps.get(2)?.as_str().trim();
    if vendor.is_empty() {
        return None;
    }
    let oui = Oui::from_hex_prefix(caps.get(1)?.as_str())?;
    Some((oui, vendor))
}

/// Transform the raw registry at `raw_path` into the cache at `cache_path`,
/// unless the cache already exists.
///
/// Records are streamed to a temporary sibling of the cache, which only
/// replaces `cache_path` after the input has been read to the end.
pub fn parse(raw_path: &Path, cache_path: &Path) -> Result<ParseOutcome, LoadError> {
    if cache_path.exists() {
        log::debug!("{} already present, skipping parse", cache_path.display());
        return Ok(ParseOutcome::AlreadyPresent);
    }

    log::info!("Transforming {} into {}", raw_path.display(), cache_path.display());
    let read_err = |source| LoadError::Parse {
        path: raw_path.to_path_buf(),
        source,
    };
    let write_err = |source| LoadError::Parse {
        path: cache_path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(raw_path).map_err(read_err)?);
    let mut writer = BufWriter::new(staging_file(cache_path).map_err(write_err)?);

    let mut records = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(read_err)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some((oui, vendor)) = parse_line(&line) {
            write_record(&mut writer, &oui, vendor).map_err(write_err)?;
            records += 1;
        }
    }

    writer.flush().map_err(write_err)?;
    let staged = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    staged.persist(cache_path).map_err(|e| write_err(e.error))?;

    if records == 0 {
        log::warn!(
            "No registry records found in {}; every lookup will report not found",
            raw_path.display()
        );
    } else {
        log::info!("Wrote {} records to {}", records, cache_path.display());
    }
    Ok(ParseOutcome::Written { records })
}
