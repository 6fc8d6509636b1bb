//! Headless converter form
//!
//! Holds the state of the two-field converter screen: a category, an input
//! field with its unit and an output field with its unit. Every edit
//! recomputes the dependent field once. Edits are validated before anything
//! changes, so a rejected edit leaves the form as it was.

use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::{Category, ConversionError, Unit, UNITS};

/// Snapshot of the form, as a presentation layer would render it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub category: Category,
    pub input_value: f64,
    pub input_unit: Unit,
    pub output_value: f64,
    pub output_unit: Unit,
}

/// Two linked numeric fields converting between units of one category
#[derive(Debug, Clone)]
pub struct ConverterForm {
    state: FormState,
}

impl ConverterForm {
    /// New form on `category` with its default units and both values at zero
    pub fn new(category: Category) -> Self {
        let defaults = UNITS.defaults(category);
        ConverterForm {
            state: FormState {
                category,
                input_value: 0.0,
                input_unit: defaults.input,
                output_value: 0.0,
                output_unit: defaults.output,
            },
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn category(&self) -> Category {
        self.state.category
    }

    /// Symbols offered by both unit pickers
    pub fn unit_choices(&self) -> Vec<&'static str> {
        UNITS.symbols(self.state.category)
    }

    /// Switch category; units reset to the category's default pair
    pub fn select_category(&mut self, category: Category) -> &FormState {
        let defaults = UNITS.defaults(category);
        debug!(%category, input = %defaults.input, output = %defaults.output, "category selected");

        self.state.category = category;
        self.state.input_unit = defaults.input;
        self.state.output_unit = defaults.output;
        self.recompute_output();
        &self.state
    }

    /// Switch category by key
    pub fn select_category_named(&mut self, name: &str) -> Result<&FormState, ConversionError> {
        let category = Category::from_name(name)?;
        Ok(self.select_category(category))
    }

    /// Edit the input field; the output follows
    pub fn set_input_value(&mut self, value: f64) -> &FormState {
        self.state.input_value = value;
        self.recompute_output();
        &self.state
    }

    /// Edit the output field; the input follows
    pub fn set_output_value(&mut self, value: f64) -> &FormState {
        self.state.output_value = value;
        self.state.input_value = convert_between(value, self.state.output_unit, self.state.input_unit);
        &self.state
    }

    /// Pick the input unit; the output is recomputed from the input
    pub fn set_input_unit(&mut self, symbol: &str) -> Result<&FormState, ConversionError> {
        self.state.input_unit = UNITS.lookup(self.state.category, symbol)?;
        self.recompute_output();
        Ok(&self.state)
    }

    /// Pick the output unit; the output is recomputed from the input
    pub fn set_output_unit(&mut self, symbol: &str) -> Result<&FormState, ConversionError> {
        self.state.output_unit = UNITS.lookup(self.state.category, symbol)?;
        self.recompute_output();
        Ok(&self.state)
    }

    fn recompute_output(&mut self) {
        self.state.output_value =
            convert_between(self.state.input_value, self.state.input_unit, self.state.output_unit);
    }
}

impl Default for ConverterForm {
    fn default() -> Self {
        Self::new(Category::default())
    }
}

// Both units always belong to the form's category
fn convert_between(value: f64, from: Unit, to: Unit) -> f64 {
    from.rescale(value, &to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitScale;

    fn symbols(state: &FormState) -> (&'static str, &'static str) {
        (state.input_unit.symbol(), state.output_unit.symbol())
    }

    #[test]
    fn test_same_units_keep_value_exactly() {
        let mut form = ConverterForm::default();
        form.set_output_unit("km").unwrap();
        let state = form.set_input_value(0.1 + 0.2);
        assert_eq!(state.output_value, 0.1 + 0.2);
    }

    #[test]
    fn test_initial_state() {
        let form = ConverterForm::default();
        let state = form.state();
        assert_eq!(state.category, Category::Distance);
        assert_eq!(symbols(state), ("km", "m"));
        assert_eq!(state.input_value, 0.0);
        assert_eq!(state.output_value, 0.0);
    }

    #[test]
    fn test_input_drives_output() {
        let mut form = ConverterForm::default();
        let state = form.set_input_value(2.5);
        assert_eq!(state.output_value, 2500.0);
    }

    #[test]
    fn test_output_drives_input() {
        let mut form = ConverterForm::default();
        let state = form.set_output_value(500.0);
        assert_eq!(state.input_value, 0.5);
        assert_eq!(state.output_value, 500.0);
    }

    #[test]
    fn test_unit_change_recomputes_output() {
        let mut form = ConverterForm::default();
        form.set_input_value(1.0);

        let state = form.set_output_unit("cm").unwrap();
        assert_eq!(state.output_value, 100000.0);

        let state = form.set_input_unit("m").unwrap();
        assert_eq!(state.input_value, 1.0);
        assert_eq!(state.output_value, 100.0);
    }

    #[test]
    fn test_select_category_applies_defaults() {
        let mut form = ConverterForm::default();
        form.set_input_value(1.0);

        let state = form.select_category(Category::Mass);
        assert_eq!(symbols(state), ("kg", "lb"));
        assert!((state.output_value - 2.20462).abs() < 1e-5);

        let state = form.select_category_named("Distance").unwrap();
        assert_eq!(symbols(state), ("km", "m"));
        assert_eq!(state.output_value, 1000.0);
    }

    #[test]
    fn test_rejected_edits_leave_state_unchanged() {
        let mut form = ConverterForm::default();
        form.set_input_value(3.0);
        let before = *form.state();

        let err = form.set_input_unit("lb").unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit(Category::Distance, "lb"));
        assert!(form.select_category_named("Volume").is_err());
        assert!(form.set_output_unit("").is_err());

        assert_eq!(*form.state(), before);
    }

    #[test]
    fn test_unit_choices_follow_category() {
        let mut form = ConverterForm::new(Category::Mass);
        assert_eq!(form.unit_choices(), vec!["g", "kg", "lb"]);
        form.select_category(Category::Distance);
        assert_eq!(form.unit_choices(), vec!["cm", "dm", "m", "km"]);
    }
}
