//! iConvert Units - Distance and Mass Conversion
//!
//! A fixed registry of units grouped by category, plus conversion between
//! any two units of the same category. Every unit has a scale factor
//! relative to its category's base unit.
//!
//! Categories:
//! - Distance (cm, dm, m, km), base meter
//! - Mass (g, kg, lb), base kilogram
//!
//! Unknown categories and units are reported as [`ConversionError`]s.

mod category;
mod error;
mod unit;
mod units;
mod quantity;
mod convert;
mod parse;
mod form;

pub use category::Category;
pub use error::{codes, ConversionError};
pub use unit::{Unit, UnitScale, LengthUnit, MassUnit, KG_PER_POUND};
pub use units::{UnitRegistry, DefaultPair, UNITS};
pub use quantity::Quantity;
pub use convert::{convert, convert_in, ratio};
pub use parse::{parse_value, parse_quantity, parse_conversion};
pub use form::{ConverterForm, FormState};
