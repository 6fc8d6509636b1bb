//! Text parsing - numeric field input, quantities like "5 km", and
//! conversion specs like "km->m"

use crate::{ConversionError, Quantity, Unit, UnitScale, UNITS};

/// Parse the text of a numeric input field.
///
/// Accepts plain decimal and exponent notation. Locale formats such as
/// `1,5` and non-finite values are rejected.
pub fn parse_value(s: &str) -> Result<f64, ConversionError> {
    let s = s.trim();
    let value: f64 = s
        .parse()
        .map_err(|_| ConversionError::InvalidNumber(s.to_string()))?;
    if !value.is_finite() {
        return Err(ConversionError::InvalidNumber(s.to_string()));
    }
    Ok(value)
}

/// Parse a quantity string like "5 km" or "100kg".
///
/// The unit's category is inferred from its symbol.
pub fn parse_quantity(s: &str) -> Result<Quantity, ConversionError> {
    let s = s.trim();

    // Number ends where the first character that can't belong to it appears
    let split_pos = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(s.len());

    let num_str = &s[..split_pos];
    let unit_str = s[split_pos..].trim();

    if num_str.is_empty() {
        return Err(ConversionError::InvalidNumber(format!("no number found in: {}", s)));
    }
    // "1,5 km" or "1 5 km": the number continues past where it was cut
    if unit_str.starts_with(|c: char| c.is_ascii_digit() || matches!(c, ',' | '.' | '_' | '\'')) {
        return Err(ConversionError::InvalidNumber(s.to_string()));
    }
    let value = parse_value(num_str)?;

    if unit_str.is_empty() {
        return Err(ConversionError::InvalidFormat(format!("missing unit in: {}", s)));
    }
    let unit = UNITS.locate(unit_str)?;

    Ok(Quantity::new(value, unit))
}

/// Parse a conversion specification like "kg->lb" or "km to m"
pub fn parse_conversion(s: &str) -> Result<(Unit, Unit), ConversionError> {
    let (from, to) = ["->", "→", " to ", " in "]
        .iter()
        .find_map(|sep| s.split_once(sep))
        .ok_or_else(|| {
            ConversionError::InvalidFormat(format!("expected 'unit1->unit2', got: {}", s))
        })?;

    let from_unit = UNITS.locate(from)?;
    let to_unit = UNITS.locate(to)?;

    if !from_unit.is_compatible(&to_unit) {
        return Err(ConversionError::unknown_unit(from_unit.category(), to.trim()));
    }

    Ok((from_unit, to_unit))
}
