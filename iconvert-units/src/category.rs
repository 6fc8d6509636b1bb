//! Measurement categories
//!
//! A category is a dimension of measurement within which every unit is
//! convertible to every other through the category's base unit.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::ConversionError;

/// A dimension of measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Length, based on the meter
    Distance,
    /// Mass, based on the kilogram
    Mass,
}

impl Category {
    /// All categories in picker order
    pub const ALL: [Category; 2] = [Category::Distance, Category::Mass];

    /// Category key as shown to the user
    pub fn name(&self) -> &'static str {
        match self {
            Category::Distance => "Distance",
            Category::Mass => "Mass",
        }
    }

    /// Symbol of the base unit every factor in this category is relative to
    pub fn base_symbol(&self) -> &'static str {
        match self {
            Category::Distance => "m",
            Category::Mass => "kg",
        }
    }

    /// Look up a category by key (ASCII case-insensitive)
    pub fn from_name(name: &str) -> Result<Category, ConversionError> {
        let name = name.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConversionError::UnknownCategory(name.to_string()))
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_name(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Distance
    }
}
