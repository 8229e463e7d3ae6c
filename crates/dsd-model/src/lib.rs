pub mod account;
pub mod error;
pub mod report;

pub use account::{AccountNode, AccountRow, PATH_SEPARATOR, YearKey, display_segment};
pub use error::{FootingError, Result};
pub use report::{FootingItem, FootingReport, SheetResult};
