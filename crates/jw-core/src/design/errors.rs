//! Design errors
//!
//! Budget shortfalls are not errors; they are absorbed where they happen.
//! Only conditions that stop a jewel from being designed at all surface here.

use thiserror::Error;

use crate::object::JewelKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignError {
    #[error("No legal theme for {kind} sval {sval}")]
    NoLegalTheme { kind: JewelKind, sval: u8 },

    #[error("Invalid design config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Could not parse design config: {0}")]
    ConfigParse(String),
}
