mod address;
mod table;

pub use address::{MacAddr, OUI_LEN, Oui};
pub use table::LookupTable;
