//! Quantity type - a value with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::{Category, ConversionError, Unit, UnitScale};

/// A measured value together with its unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: f64,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Category of this quantity's unit
    pub fn category(&self) -> Category {
        self.unit.category()
    }

    /// Value expressed in the category's base unit
    pub fn base_value(&self) -> f64 {
        self.unit.to_base(self.value)
    }

    /// Convert to another unit of the same category
    pub fn convert_to(&self, target: Unit) -> Result<Quantity, ConversionError> {
        let value = self
            .unit
            .convert_to(self.value, &target)
            .ok_or_else(|| ConversionError::unknown_unit(self.category(), target.symbol()))?;
        Ok(Quantity::new(value, target))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare in base units
        self.unit.is_compatible(&other.unit) && self.base_value() == other.base_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LengthUnit, MassUnit};

    fn meter() -> Unit {
        Unit::Distance(LengthUnit::Meter)
    }

    fn kilometer() -> Unit {
        Unit::Distance(LengthUnit::Kilometer)
    }

    #[test]
    fn test_base_value() {
        let q = Quantity::new(5.0, kilometer());
        assert_eq!(q.base_value(), 5000.0);
        assert_eq!(q.category(), Category::Distance);
    }

    #[test]
    fn test_convert_to() {
        let q = Quantity::new(5000.0, meter());
        let converted = q.convert_to(kilometer()).unwrap();
        assert_eq!(converted.value, 5.0);
        assert_eq!(converted.unit, kilometer());
    }

    #[test]
    fn test_convert_across_categories_fails() {
        let q = Quantity::new(1.0, meter());
        let err = q.convert_to(Unit::Mass(MassUnit::Gram)).unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit(Category::Distance, "g"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Quantity::new(1.0, kilometer()), Quantity::new(1000.0, meter()));
        assert_ne!(Quantity::new(1.0, meter()), Quantity::new(1.0, Unit::Mass(MassUnit::Kilogram)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Quantity::new(2.5, kilometer())), "2.5 km");
    }
}
