//! Resolve hardware (MAC) addresses to the organization that owns their IEEE
//! OUI block.
//!
//! The registry is downloaded once, parsed into a tab-delimited cache and
//! loaded into an immutable [`LookupTable`]:
//!
//! ```no_run
//! let table = mac2vendor::load("mac2vnd.dat")?;
//! println!("{}", table.lookup("84:38:35:77:aa:52")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod oui;
pub mod registry;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use error::{DownloadError, LoadError, LookupError};
pub use loader::{Loader, load};
pub use oui::{LookupTable, MacAddr, Oui};
