use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::DownloadError;

use super::staging_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination already existed; nothing was requested
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

/// Remembers whether a failed copy gave up on the reading side, so body
/// errors and local write errors are reported separately.
struct TrackedBody<R> {
    inner: R,
    failed: bool,
}

impl<R: Read> Read for TrackedBody<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).inspect_err(|_| self.failed = true)
    }
}

/// Downloads the raw registry text from a fixed URL.
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DownloadError> {
        let url = url.into();
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|source| DownloadError::Request {
                url: url.clone(),
                source,
            })?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stream the registry into `destination` unless it already exists.
    ///
    /// The body is written to a sibling temporary file and renamed into place
    /// only once complete; on any failure nothing is left at `destination`.
    pub fn fetch(&self, destination: &Path) -> Result<FetchOutcome, DownloadError> {
        if destination.exists() {
            log::debug!("{} already present, skipping download", destination.display());
            return Ok(FetchOutcome::AlreadyPresent);
        }

        log::info!("Downloading {} to {}", self.url, destination.display());
        let request_err = |source| DownloadError::Request {
            url: self.url.clone(),
            source,
        };
        let write_err = |source| DownloadError::Write {
            path: destination.to_path_buf(),
            source,
        };

        let response = self.client.get(&self.url).send().map_err(request_err)?;
        if !response.status().is_success() {
            return Err(DownloadError::Status {
                url: self.url.clone(),
                status: response.status(),
            });
        }

        let mut writer = BufWriter::new(staging_file(destination).map_err(write_err)?);
        let mut body = TrackedBody {
            inner: response,
            failed: false,
        };
        let bytes = io::copy(&mut body, &mut writer).map_err(|source| {
            if body.failed {
                DownloadError::Body {
                    url: self.url.clone(),
                    source,
                }
            } else {
                write_err(source)
            }
        })?;
        writer.flush().map_err(write_err)?;
        let staged = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
        staged
            .persist(destination)
            .map_err(|e| write_err(e.error))?;

        log::info!("Saved {} bytes to {}", bytes, destination.display());
        Ok(FetchOutcome::Downloaded { bytes })
    }
}
