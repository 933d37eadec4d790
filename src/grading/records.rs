use serde::{Deserialize, Serialize};

use super::engine::convert_to_percentage;
use super::formula::PercentageFormula;
use super::scale::LetterGrade;

/// A course row exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub name: String,
    pub grade: String,
    pub credits: String,
}

impl CourseEntry {
    pub fn new(name: &str, grade: &str, credits: &str) -> Self {
        Self {
            name: name.to_string(),
            grade: grade.to_string(),
            credits: credits.to_string(),
        }
    }

    /// Parse the CLI form `GRADE:CREDITS[:NAME]`.
    ///
    /// Missing parts are left blank rather than rejected, so a malformed
    /// argument still shows up as an excluded row.
    pub fn from_spec(spec: &str) -> Self {
        let mut parts = spec.splitn(3, ':');
        let grade = parts.next().unwrap_or_default().trim();
        let credits = parts.next().unwrap_or_default().trim();
        let name = parts.next().unwrap_or_default().trim();
        Self::new(name, grade, credits)
    }
}

/// A course that passed validation and takes part in the GPA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecord {
    pub name: Option<String>,
    /// `None` when the grade label is not on the scale (worth 0 points).
    pub grade: Option<LetterGrade>,
    pub credits: f64,
}

impl CourseRecord {
    pub fn points(&self) -> f64 {
        self.grade.map_or(0.0, LetterGrade::points)
    }

    pub fn weighted_points(&self) -> f64 {
        self.points() * self.credits
    }
}

/// A semester GPA exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemesterEntry {
    pub gpa: String,
}

impl SemesterEntry {
    pub fn new(gpa: &str) -> Self {
        Self {
            gpa: gpa.to_string(),
        }
    }
}

impl AsRef<str> for SemesterEntry {
    fn as_ref(&self) -> &str {
        &self.gpa
    }
}

/// A semester GPA inside `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemesterRecord {
    pub gpa: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionInput {
    pub value: f64,
    pub formula: PercentageFormula,
}

impl ConversionInput {
    pub fn percentage(&self) -> f64 {
        convert_to_percentage(self.value, self.formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spec_full() {
        let entry = CourseEntry::from_spec("A+:4:Linear Algebra");
        assert_eq!(entry.grade, "A+");
        assert_eq!(entry.credits, "4");
        assert_eq!(entry.name, "Linear Algebra");
    }

    #[test]
    fn test_from_spec_without_name() {
        let entry = CourseEntry::from_spec("B:3");
        assert_eq!(entry, CourseEntry::new("", "B", "3"));
    }

    #[test]
    fn test_from_spec_name_keeps_colons() {
        let entry = CourseEntry::from_spec("C:2:Lab: Circuits");
        assert_eq!(entry.name, "Lab: Circuits");
    }

    #[test]
    fn test_from_spec_missing_credits() {
        let entry = CourseEntry::from_spec("A");
        assert_eq!(entry.grade, "A");
        assert!(entry.credits.is_empty());
    }

    #[test]
    fn test_record_points_unknown_grade() {
        let record = CourseRecord {
            name: None,
            grade: None,
            credits: 3.0,
        };
        assert_eq!(record.points(), 0.0);
        assert_eq!(record.weighted_points(), 0.0);
    }

    #[test]
    fn test_conversion_input_percentage() {
        let input = ConversionInput {
            value: 9.0,
            formula: PercentageFormula::Fixed,
        };
        assert!((input.percentage() - 85.5).abs() < 1e-9);
    }

    #[test]
    fn test_record_weighted_points() {
        let record = CourseRecord {
            name: Some("Physics".to_string()),
            grade: Some(LetterGrade::BPlus),
            credits: 3.0,
        };
        assert_eq!(record.weighted_points(), 21.0);
    }
}
