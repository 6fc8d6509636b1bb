//! Unit representation with conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::Category;

/// Exact kilograms per international avoirdupois pound
pub const KG_PER_POUND: f64 = 0.45359237;

/// A unit with a fixed multiplicative relationship to its category's base unit
pub trait UnitScale {
    /// Category this unit measures
    fn category(&self) -> Category;

    /// Short key identifying the unit within its category (e.g. "km")
    fn symbol(&self) -> &'static str;

    /// Singular name (e.g. "kilometer")
    fn name(&self) -> &'static str;

    /// Factor to convert to the base unit (value_base = value * factor)
    fn to_base_factor(&self) -> f64;

    /// Check if this is the category's base unit
    fn is_base(&self) -> bool {
        self.to_base_factor() == 1.0
    }

    /// Convert a value in this unit to the base unit
    fn to_base(&self, value: f64) -> f64 {
        value * self.to_base_factor()
    }

    /// Convert a value in the base unit to this unit
    fn from_base(&self, value_base: f64) -> f64 {
        value_base / self.to_base_factor()
    }
}

/// Units of distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Centimeter,
    Decimeter,
    Meter,
    Kilometer,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Centimeter,
        LengthUnit::Decimeter,
        LengthUnit::Meter,
        LengthUnit::Kilometer,
    ];
}

impl UnitScale for LengthUnit {
    fn category(&self) -> Category {
        Category::Distance
    }

    fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Centimeter => "cm",
            LengthUnit::Decimeter => "dm",
            LengthUnit::Meter => "m",
            LengthUnit::Kilometer => "km",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LengthUnit::Centimeter => "centimeter",
            LengthUnit::Decimeter => "decimeter",
            LengthUnit::Meter => "meter",
            LengthUnit::Kilometer => "kilometer",
        }
    }

    fn to_base_factor(&self) -> f64 {
        match self {
            LengthUnit::Centimeter => 0.01,
            LengthUnit::Decimeter => 0.1,
            LengthUnit::Meter => 1.0,
            LengthUnit::Kilometer => 1000.0,
        }
    }
}

/// Units of mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    Gram,
    Kilogram,
    Pound,
}

impl MassUnit {
    pub const ALL: [MassUnit; 3] = [MassUnit::Gram, MassUnit::Kilogram, MassUnit::Pound];
}

impl UnitScale for MassUnit {
    fn category(&self) -> Category {
        Category::Mass
    }

    fn symbol(&self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Kilogram => "kg",
            MassUnit::Pound => "lb",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            MassUnit::Gram => "gram",
            MassUnit::Kilogram => "kilogram",
            MassUnit::Pound => "pound",
        }
    }

    fn to_base_factor(&self) -> f64 {
        match self {
            MassUnit::Gram => 0.001,
            MassUnit::Kilogram => 1.0,
            MassUnit::Pound => KG_PER_POUND,
        }
    }
}

/// Any registered unit, tagged by category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "unit")]
pub enum Unit {
    Distance(LengthUnit),
    Mass(MassUnit),
}

impl Unit {
    fn scale(&self) -> &dyn UnitScale {
        match self {
            Unit::Distance(u) => u,
            Unit::Mass(u) => u,
        }
    }

    /// Check if two units can be converted into each other
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.category() == other.category()
    }

    /// Convert a value from this unit to another unit.
    ///
    /// Returns `None` when the units belong to different categories.
    pub fn convert_to(&self, value: f64, target: &Unit) -> Option<f64> {
        if !self.is_compatible(target) {
            return None;
        }
        Some(self.rescale(value, target))
    }

    /// Rescale a value to a unit already known to share this unit's category.
    ///
    /// Identity returns the input untouched.
    pub(crate) fn rescale(&self, value: f64, target: &Unit) -> f64 {
        if self == target {
            return value;
        }
        target.from_base(self.to_base(value))
    }
}

impl UnitScale for Unit {
    fn category(&self) -> Category {
        self.scale().category()
    }

    fn symbol(&self) -> &'static str {
        self.scale().symbol()
    }

    fn name(&self) -> &'static str {
        self.scale().name()
    }

    fn to_base_factor(&self) -> f64 {
        self.scale().to_base_factor()
    }
}

impl From<LengthUnit> for Unit {
    fn from(u: LengthUnit) -> Self {
        Unit::Distance(u)
    }
}

impl From<MassUnit> for Unit {
    fn from(u: MassUnit) -> Self {
        Unit::Mass(u)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
