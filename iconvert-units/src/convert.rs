//! Conversion entry points
//!
//! All arguments are validated against the registry before any arithmetic,
//! so a bad category or unit is reported instead of producing a value.

use tracing::debug;
use crate::{Category, ConversionError, UNITS};

/// Convert `value` between two units of a category given by key.
///
/// ```
/// use iconvert_units::convert;
///
/// assert_eq!(convert(1.0, "Distance", "km", "m").unwrap(), 1000.0);
/// assert!(convert(1.0, "Mass", "km", "m").is_err());
/// ```
pub fn convert(value: f64, category: &str, from: &str, to: &str) -> Result<f64, ConversionError> {
    let category = Category::from_name(category)?;
    convert_in(value, category, from, to)
}

/// Convert `value` between two units of a known category
pub fn convert_in(value: f64, category: Category, from: &str, to: &str) -> Result<f64, ConversionError> {
    let from_unit = UNITS.lookup(category, from)?;
    let to_unit = UNITS.lookup(category, to)?;

    // Same category by construction; identity returns the input untouched
    let result = from_unit
        .convert_to(value, &to_unit)
        .ok_or_else(|| ConversionError::unknown_unit(category, to))?;

    debug!(%category, value, from = %from_unit, to = %to_unit, result, "converted");
    Ok(result)
}

/// Scale factor mapping values in `from` to values in `to`
pub fn ratio(category: Category, from: &str, to: &str) -> Result<f64, ConversionError> {
    convert_in(1.0, category, from, to)
}
