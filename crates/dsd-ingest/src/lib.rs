#![deny(unsafe_code)]

pub mod amount;
pub mod error;
pub mod extract;
pub mod layout;

pub use amount::parse_amount;
pub use error::{IngestError, Result};
pub use extract::{SheetExtract, read_extract, read_extract_path};
pub use layout::{DEFAULT_YEARS, SheetLayout};
