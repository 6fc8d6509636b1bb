//! Structured conversion errors
//!
//! Invalid input never halts the process. Every failure is a value the
//! caller can ignore, log, or surface to the user.

use thiserror::Error;
use crate::Category;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const AMBIGUOUS_UNIT: &str = "AMBIGUOUS_UNIT";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
}

/// Errors that can occur during unit lookup and conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Category key is not in the registry
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Unit symbol is not defined in the given category
    #[error("unknown unit '{symbol}' in category {category}")]
    UnknownUnit { category: Category, symbol: String },

    /// Unit symbol is not defined in any category
    #[error("unknown unit: {0}")]
    UnrecognizedUnit(String),

    /// Symbol resolves to units in more than one category
    #[error("ambiguous unit '{0}': defined in several categories")]
    AmbiguousUnit(String),

    /// Text could not be read as a number
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// Text is not shaped like a quantity or conversion spec
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl ConversionError {
    pub fn unknown_unit(category: Category, symbol: &str) -> Self {
        ConversionError::UnknownUnit {
            category,
            symbol: symbol.to_string(),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            ConversionError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            ConversionError::UnrecognizedUnit(_) => codes::UNKNOWN_UNIT,
            ConversionError::AmbiguousUnit(_) => codes::AMBIGUOUS_UNIT,
            ConversionError::InvalidNumber(_) => codes::PARSE_ERROR,
            ConversionError::InvalidFormat(_) => codes::PARSE_ERROR,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ConversionError::UnknownCategory(_) => {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
                Some(format!("Use one of: {}", names.join(", ")))
            }
            ConversionError::UnknownUnit { category, .. } => {
                Some(format!("Use one of: {}", crate::UNITS.symbols(*category).join(", ")))
            }
            ConversionError::UnrecognizedUnit(_) => {
                let all: Vec<&str> = Category::ALL
                    .iter()
                    .flat_map(|c| crate::UNITS.symbols(*c))
                    .collect();
                Some(format!("Use one of: {}", all.join(", ")))
            }
            ConversionError::AmbiguousUnit(_) => {
                Some("Name the category explicitly".to_string())
            }
            ConversionError::InvalidNumber(_) => {
                Some("Use plain decimal notation, e.g. 12.5".to_string())
            }
            ConversionError::InvalidFormat(_) => {
                Some("Write a quantity as '5 km' and a conversion as 'km->m'".to_string())
            }
        }
    }
}
