//! Tab-delimited on-disk form of the lookup table, one `<oui>\t<vendor>` per line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str;

use crate::error::LoadError;
use crate::oui::{LookupTable, Oui};

const DELIMITER: char = '\t';

/// Write one cache record.
pub fn write_record<W: Write>(writer: &mut W, oui: &Oui, vendor: &str) -> io::Result<()> {
    writeln!(writer, "{}{}{}", oui, DELIMITER, vendor)
}

/// Load the whole cache into a table.
///
/// A structurally invalid line aborts the load instead of being skipped, so a
/// corrupt cache never presents a partial table.
pub fn read_cache(path: &Path) -> Result<LookupTable, LoadError> {
    let read_err = |source| LoadError::CacheRead {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;

    let mut reader = BufReader::new(file);
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(read_err)? == 0 {
            break;
        }
        line_no += 1;
        let format_err = |reason: &str| LoadError::CacheFormat {
            path: path.to_path_buf(),
            line: line_no,
            reason: reason.to_string(),
        };

        let line = str::from_utf8(&buf).map_err(|_| format_err("not valid UTF-8"))?;
        let line = line.trim_end_matches(['\r', '\n']);
        let (oui, vendor) = parse_record(line).map_err(format_err)?;
        entries.push((oui, vendor.to_string()));
    }

    let table: LookupTable = entries.into_iter().collect();
    log::info!("Loaded {} vendor prefixes from {}", table.len(), path.display());
    Ok(table)
}

fn parse_record(line: &str) -> Result<(Oui, &str), &'static str> {
    let (key, vendor) = line
        .split_once(DELIMITER)
        .ok_or("missing tab separator")?;
    if key.is_empty() {
        return Err("empty key");
    }
    let oui = Oui::from_hex(key).ok_or("key is not six hex digits")?;
    Ok((oui, vendor.trim_end()))
}
