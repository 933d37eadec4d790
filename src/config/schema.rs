use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::grading::PercentageFormula;

pub const DEFAULT_PRECISION: usize = 2;
pub const MAX_PRECISION: usize = 6;

/// Credit values offered when cycling a course's credits.
pub const DEFAULT_CREDIT_OPTIONS: [f64; 9] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

/// User configuration.
///
/// Every field is optional; missing fields fall back to the defaults.
///
/// Example YAML:
/// ```yaml
/// precision: 2
/// default_formula: offset
/// credit_options: [1, 2, 3, 4]
/// theme: auto
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Decimal places used when displaying results (default: 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,

    /// Percentage formula preselected in the converter: linear, offset or fixed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_formula: Option<String>,

    /// Credit values the TUI cycles through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_options: Option<Vec<f64>>,

    /// Terminal theme: auto, dark or light
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Config {
    pub fn precision(&self) -> usize {
        self.precision
            .unwrap_or(DEFAULT_PRECISION)
            .min(MAX_PRECISION)
    }

    /// Configured formula, or linear when unset or unparseable.
    pub fn formula(&self) -> PercentageFormula {
        self.default_formula
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }

    pub fn credit_options(&self) -> Vec<f64> {
        match &self.credit_options {
            Some(options) if !options.is_empty() => options.clone(),
            _ => DEFAULT_CREDIT_OPTIONS.to_vec(),
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ThemeMode::Auto),
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => bail!("Unknown theme '{}': expected auto, dark or light", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.precision(), 2);
        assert_eq!(config.formula(), PercentageFormula::Linear);
        assert_eq!(config.credit_options(), DEFAULT_CREDIT_OPTIONS.to_vec());
        assert_eq!(config.theme_mode(), ThemeMode::Auto);
    }

    #[test]
    fn test_precision_is_capped() {
        let config = Config {
            precision: Some(12),
            ..Config::default()
        };
        assert_eq!(config.precision(), MAX_PRECISION);
    }

    #[test]
    fn test_empty_credit_options_fall_back() {
        let config = Config {
            credit_options: Some(vec![]),
            ..Config::default()
        };
        assert_eq!(config.credit_options().len(), DEFAULT_CREDIT_OPTIONS.len());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
precision: 3
default_formula: offset
credit_options: [1, 2, 3.5]
theme: light
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.precision(), 3);
        assert_eq!(config.formula(), PercentageFormula::Offset);
        assert_eq!(config.credit_options(), vec![1.0, 2.0, 3.5]);
        assert_eq!(config.theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("colour: red\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            precision: Some(1),
            default_formula: Some("fixed".to_string()),
            credit_options: Some(vec![2.0, 4.0]),
            theme: Some("dark".to_string()),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_theme_mode_parse() {
        assert_eq!("DARK".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
