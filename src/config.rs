//! Settings read from the environment, each with a built-in default.
//! Command line flags take precedence over these.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "https://standards-oui.ieee.org/oui/oui.txt";
pub const DEFAULT_CACHE_FILE: &str = "mac2vnd.dat";
const DEFAULT_RAW_FILE: &str = "oui.txt";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 300;
const DEFAULT_PORT: u16 = 9000;

pub fn registry_url() -> String {
    env::var("MAC2VENDOR_URL").unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string())
}

pub fn cache_path() -> PathBuf {
    env::var_os("MAC2VENDOR_CACHE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE))
}

/// Where the raw registry download is staged before parsing
pub fn raw_path() -> PathBuf {
    raw_path_from(env::var_os("MAC2VENDOR_RAW"))
}

fn raw_path_from(value: Option<OsString>) -> PathBuf {
    value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join(DEFAULT_RAW_FILE))
}

/// HTTP timeout for the registry download. `0` disables it.
pub fn fetch_timeout() -> Option<Duration> {
    let secs = env::var("MAC2VENDOR_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
    parse_timeout(secs)
}

fn parse_timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

pub fn port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT) // Default value if env var is not set or invalid
}
