use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grades on the 10-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "O")]
    Outstanding,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    /// Every grade, best first.
    pub const ALL: [LetterGrade; 9] = [
        LetterGrade::Outstanding,
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    pub fn points(self) -> f64 {
        match self {
            LetterGrade::Outstanding => 10.0,
            LetterGrade::APlus => 9.0,
            LetterGrade::A => 8.0,
            LetterGrade::BPlus => 7.0,
            LetterGrade::B => 6.0,
            LetterGrade::CPlus => 5.0,
            LetterGrade::C => 4.0,
            LetterGrade::D => 3.0,
            LetterGrade::F => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LetterGrade::Outstanding => "O",
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// Next grade down the scale, wrapping from F back to O.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Next grade up the scale, wrapping from O back to F.
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for LetterGrade {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match LetterGrade::ALL
            .iter()
            .find(|g| g.label().eq_ignore_ascii_case(s))
        {
            Some(grade) => Ok(*grade),
            None => bail!("Unknown grade '{}': expected one of O, A+, A, B+, B, C+, C, D, F", s),
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Point value for a raw grade label. Labels not on the scale count as 0.
pub fn points_for(label: &str) -> f64 {
    label.parse::<LetterGrade>().map(LetterGrade::points).unwrap_or(0.0)
}
