//! Acquisition of the raw IEEE registry and its transformation into the cache.
//! Both steps are idempotent on their output file and publish it with an
//! atomic rename, so an existing file is always a complete one.

mod fetch;
mod parse;

use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

pub use fetch::{FetchOutcome, Fetcher};
pub use parse::{ParseOutcome, parse, parse_line};

/// Create a temporary file next to `destination` so it can later be renamed onto it.
fn staging_file(destination: &Path) -> io::Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    NamedTempFile::new_in(dir)
}
