//! The `load` operation: make sure the cache exists, then read it into a table.
//!
//! A process moves `Uninitialized -> Loading -> Ready` exactly once. Loading
//! (download and parse) only happens when the cache file is absent; going back
//! requires deleting the cache, which is what [`Loader::purge`] is for.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::read_cache;
use crate::config;
use crate::error::LoadError;
use crate::oui::LookupTable;
use crate::registry::{self, Fetcher};

#[derive(Debug, Clone)]
pub struct Loader {
    url: String,
    raw_path: PathBuf,
    cache_path: PathBuf,
    timeout: Option<Duration>,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            url: config::registry_url(),
            raw_path: config::raw_path(),
            cache_path: config::cache_path(),
            timeout: config::fetch_timeout(),
        }
    }
}

impl Loader {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_raw_path(mut self, raw_path: impl Into<PathBuf>) -> Self {
        self.raw_path = raw_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Run fetch and parse if the cache is missing. A present cache is trusted
    /// as complete; both steps only ever publish whole files.
    pub fn prepare(&self) -> Result<(), LoadError> {
        if self.cache_path.exists() {
            log::debug!("Using existing cache {}", self.cache_path.display());
            return Ok(());
        }

        log::info!("Loading mac2vendor data. Please be patient...");
        Fetcher::new(&self.url, self.timeout)?.fetch(&self.raw_path)?;
        registry::parse(&self.raw_path, &self.cache_path)?;
        Ok(())
    }

    /// Build the lookup table, downloading and parsing the registry first if needed.
    pub fn load(&self) -> Result<LookupTable, LoadError> {
        self.prepare()?;
        let table = read_cache(&self.cache_path)?;
        if table.is_empty() {
            log::warn!("{} holds no vendor prefixes", self.cache_path.display());
        }
        Ok(table)
    }

    /// Delete the cache and the raw download so the next load starts over.
    pub fn purge(&self) -> Result<(), LoadError> {
        remove_if_present(&self.cache_path)?;
        self.remove_raw()
    }

    pub fn remove_raw(&self) -> Result<(), LoadError> {
        remove_if_present(&self.raw_path)
    }

    /// Make sure the cache is built, rebuilding it from scratch when `force`
    /// is set. The raw download is only needed while parsing and is removed
    /// afterwards.
    pub fn update(&self, force: bool) -> Result<LookupTable, LoadError> {
        if force {
            self.purge()?;
        }
        let table = self.load()?;
        self.remove_raw()?;
        Ok(table)
    }
}

fn remove_if_present(path: &Path) -> Result<(), LoadError> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(LoadError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the table cached at `cache_path`, with the registry URL and staging
/// path taken from the environment.
pub fn load(cache_path: impl Into<PathBuf>) -> Result<LookupTable, LoadError> {
    Loader::new(cache_path).load()
}
