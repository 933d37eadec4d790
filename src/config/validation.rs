use super::schema::{Config, ThemeMode, MAX_PRECISION};
use crate::grading::PercentageFormula;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(precision) = config.precision {
        if precision > MAX_PRECISION {
            errors.push(format!("precision: must be at most {}", MAX_PRECISION));
        }
    }

    if let Some(ref formula) = config.default_formula {
        if let Err(e) = formula.parse::<PercentageFormula>() {
            errors.push(format!("default_formula: {}", e));
        }
    }

    if let Some(ref options) = config.credit_options {
        if options.is_empty() {
            errors.push("credit_options: must list at least one value".to_string());
        }
        for (i, credit) in options.iter().enumerate() {
            if !(credit.is_finite() && *credit > 0.0) {
                errors.push(format!(
                    "credit_options[{}]: invalid '{}' - must be a positive number",
                    i, credit
                ));
            }
        }
    }

    if let Some(ref theme) = config.theme {
        if let Err(e) = theme.parse::<ThemeMode>() {
            errors.push(format!("theme: {}", e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
