use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GPA (0-10) to percentage conversion formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentageFormula {
    /// (GPA / 10) x 100
    #[default]
    Linear,
    /// (GPA - 0.75) x 10
    Offset,
    /// GPA x 9.5
    Fixed,
}

impl PercentageFormula {
    pub const ALL: [PercentageFormula; 3] = [
        PercentageFormula::Linear,
        PercentageFormula::Offset,
        PercentageFormula::Fixed,
    ];

    pub fn apply(self, gpa: f64) -> f64 {
        match self {
            PercentageFormula::Linear => (gpa / 10.0) * 100.0,
            PercentageFormula::Offset => (gpa - 0.75) * 10.0,
            PercentageFormula::Fixed => gpa * 9.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PercentageFormula::Linear => "linear",
            PercentageFormula::Offset => "offset",
            PercentageFormula::Fixed => "fixed",
        }
    }

    /// Human readable form of the formula, e.g. `(GPA ÷ 10) × 100`.
    pub fn expression(self) -> &'static str {
        match self {
            PercentageFormula::Linear => "(GPA ÷ 10) × 100",
            PercentageFormula::Offset => "(GPA - 0.75) × 10",
            PercentageFormula::Fixed => "GPA × 9.5",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PercentageFormula::Linear => "Standard conversion: divides GPA by 10 and multiplies by 100",
            PercentageFormula::Offset => "Adjusted conversion: subtracts 0.75 from GPA and multiplies by 10",
            PercentageFormula::Fixed => "Alternative conversion: multiplies GPA by 9.5",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PercentageFormula::Linear => PercentageFormula::Offset,
            PercentageFormula::Offset => PercentageFormula::Fixed,
            PercentageFormula::Fixed => PercentageFormula::Linear,
        }
    }
}

impl FromStr for PercentageFormula {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear-scale" | "formula1" | "1" => Ok(PercentageFormula::Linear),
            "offset" | "offset-scale" | "formula2" | "2" => Ok(PercentageFormula::Offset),
            "fixed" | "fixed-multiplier" | "formula3" | "3" => Ok(PercentageFormula::Fixed),
            other => bail!("Unknown formula '{}': expected linear, offset or fixed", other),
        }
    }
}

impl fmt::Display for PercentageFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_linear() {
        assert!((PercentageFormula::Linear.apply(8.5) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_offset() {
        assert!((PercentageFormula::Offset.apply(8.5) - 77.5).abs() < 1e-9);
    }

    #[test]
    fn test_apply_fixed() {
        assert!((PercentageFormula::Fixed.apply(8.0) - 76.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("linear".parse::<PercentageFormula>().unwrap(), PercentageFormula::Linear);
        assert_eq!("Offset-Scale".parse::<PercentageFormula>().unwrap(), PercentageFormula::Offset);
        assert_eq!("formula3".parse::<PercentageFormula>().unwrap(), PercentageFormula::Fixed);
        assert_eq!("2".parse::<PercentageFormula>().unwrap(), PercentageFormula::Offset);
    }

    #[test]
    fn test_parse_invalid() {
        let err = "quadratic".parse::<PercentageFormula>().unwrap_err();
        assert!(err.to_string().contains("quadratic"));
    }

    #[test]
    fn test_next_cycles() {
        let mut formula = PercentageFormula::Linear;
        for _ in 0..3 {
            formula = formula.next();
        }
        assert_eq!(formula, PercentageFormula::Linear);
    }

    #[test]
    fn test_default_is_linear() {
        assert_eq!(PercentageFormula::default(), PercentageFormula::Linear);
    }
}
