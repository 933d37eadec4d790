use crate::grading::{
    convert_five_point_to_ten_point, convert_to_percentage, validate_five_point_input,
    validate_gpa_input, PercentageFormula,
};

/// Raw inputs of the two converters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Converter {
    pub gpa_input: String,
    pub formula: PercentageFormula,
    pub five_point_input: String,
}

impl Converter {
    pub fn new(formula: PercentageFormula) -> Self {
        Self {
            formula,
            ..Self::default()
        }
    }

    /// Percentage for the current GPA input; 0 while the input is blank or out of range.
    pub fn percentage(&self) -> f64 {
        validate_gpa_input(&self.gpa_input)
            .map(|gpa| convert_to_percentage(gpa, self.formula))
            .unwrap_or(0.0)
    }

    /// 10-point CGPA for the current 5-point input; 0 while the input is blank or out of range.
    pub fn ten_point(&self) -> f64 {
        validate_five_point_input(&self.five_point_input)
            .map(convert_five_point_to_ten_point)
            .unwrap_or(0.0)
    }

    pub fn cycle_formula(&mut self) {
        self.formula = self.formula.next();
    }

    pub fn clear_gpa(&mut self) {
        self.gpa_input.clear();
    }

    pub fn clear_five_point(&mut self) {
        self.five_point_input.clear();
    }
}
