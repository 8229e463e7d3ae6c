pub mod balance_sheet;
pub mod error;
pub mod ruleset;

pub use balance_sheet::{BALANCE_SHEET_CODE, BALANCE_SHEET_TITLE};
pub use error::{Result, RuleError};
pub use ruleset::{ChildRef, RuleSet, Sign, SpecialRule};
