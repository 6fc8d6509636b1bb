//! Unit definitions organized by category

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::{Serialize, Deserialize};
use tracing::trace;
use crate::{Category, ConversionError, LengthUnit, MassUnit, Unit, UnitScale};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Units selected when a category is switched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPair {
    pub input: Unit,
    pub output: Unit,
}

/// Units of one category, in picker order
struct CategoryTable {
    units: Vec<Unit>,
    aliases: HashMap<&'static str, &'static str>,
    defaults: DefaultPair,
}

/// Registry of all known units.
///
/// Built once and never mutated, so it can be shared across threads freely.
pub struct UnitRegistry {
    tables: HashMap<Category, CategoryTable>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        tables.insert(Category::Distance, Self::length_table());
        tables.insert(Category::Mass, Self::mass_table());
        UnitRegistry { tables }
    }

    fn table(&self, category: Category) -> &CategoryTable {
        // every Category variant is inserted by new()
        &self.tables[&category]
    }

    /// All categories in picker order
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Units of a category in picker order
    pub fn units(&self, category: Category) -> &[Unit] {
        &self.table(category).units
    }

    /// Canonical symbols of a category in picker order
    pub fn symbols(&self, category: Category) -> Vec<&'static str> {
        self.units(category).iter().map(|u| u.symbol()).collect()
    }

    /// Default (input, output) units of a category
    pub fn defaults(&self, category: Category) -> DefaultPair {
        self.table(category).defaults
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, category: Category, symbol: &str) -> Option<Unit> {
        let table = self.table(category);
        let symbol = symbol.trim();
        let canonical = table.aliases.get(symbol).copied().unwrap_or(symbol);
        table.units.iter().copied().find(|u| u.symbol() == canonical)
    }

    /// Like [`get`](Self::get), but reports a missing unit as an error
    pub fn lookup(&self, category: Category, symbol: &str) -> Result<Unit, ConversionError> {
        self.get(category, symbol).ok_or_else(|| {
            trace!(%category, symbol, "unit lookup failed");
            ConversionError::unknown_unit(category, symbol.trim())
        })
    }

    /// Find a unit by symbol or alias without knowing its category
    pub fn locate(&self, symbol: &str) -> Result<Unit, ConversionError> {
        let mut found = self.categories().iter().filter_map(|c| self.get(*c, symbol));
        match (found.next(), found.next()) {
            (Some(unit), None) => Ok(unit),
            (Some(_), Some(_)) => Err(ConversionError::AmbiguousUnit(symbol.trim().to_string())),
            (None, _) => Err(ConversionError::UnrecognizedUnit(symbol.trim().to_string())),
        }
    }

    fn length_table() -> CategoryTable {
        let units = LengthUnit::ALL.into_iter().map(Unit::from).collect();
        let aliases = HashMap::from([
            ("centimeter", "cm"),
            ("centimeters", "cm"),
            ("centimetre", "cm"),
            ("centimetres", "cm"),
            ("decimeter", "dm"),
            ("decimeters", "dm"),
            ("decimetre", "dm"),
            ("decimetres", "dm"),
            ("meter", "m"),
            ("meters", "m"),
            ("metre", "m"),
            ("metres", "m"),
            ("kilometer", "km"),
            ("kilometers", "km"),
            ("kilometre", "km"),
            ("kilometres", "km"),
        ]);
        CategoryTable {
            units,
            aliases,
            defaults: DefaultPair {
                input: Unit::Distance(LengthUnit::Kilometer),
                output: Unit::Distance(LengthUnit::Meter),
            },
        }
    }

    fn mass_table() -> CategoryTable {
        let units = MassUnit::ALL.into_iter().map(Unit::from).collect();
        let aliases = HashMap::from([
            ("gram", "g"),
            ("grams", "g"),
            ("kilogram", "kg"),
            ("kilograms", "kg"),
            ("kilo", "kg"),
            ("kilos", "kg"),
            ("pound", "lb"),
            ("pounds", "lb"),
            ("lbs", "lb"),
        ]);
        CategoryTable {
            units,
            aliases,
            defaults: DefaultPair {
                input: Unit::Mass(MassUnit::Kilogram),
                output: Unit::Mass(MassUnit::Pound),
            },
        }
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
