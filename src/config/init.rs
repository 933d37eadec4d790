use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{
    get_config_path, save_config, Config, ThemeMode, DEFAULT_CREDIT_OPTIONS, DEFAULT_PRECISION,
    MAX_PRECISION,
};
use crate::grading::PercentageFormula;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a comma or space separated list of credit values.
fn parse_credit_options(input: &str) -> Result<Vec<f64>, String> {
    let options = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
            _ => Err(format!("'{}' is not a positive number", part)),
        })
        .collect::<Result<Vec<f64>, String>>()?;

    if options.is_empty() {
        return Err("at least one credit value is required".to_string());
    }
    Ok(options)
}

fn format_credit_options(options: &[f64]) -> String {
    options
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Academic Ace Configuration Wizard");
    println!("=================================");
    println!();

    // 1. Display precision
    println!("Results are shown with a fixed number of decimal places.");
    let precision: usize = loop {
        let input = prompt_with_default("Decimal places", &DEFAULT_PRECISION.to_string())?;
        match input.parse::<usize>() {
            Ok(v) if v <= MAX_PRECISION => break v,
            Ok(_) => println!("  Invalid: must be at most {}. Try again.", MAX_PRECISION),
            Err(_) => println!("  Invalid: must be a whole number. Try again."),
        }
    };

    // 2. Percentage formula
    println!();
    println!("Different institutions convert GPA to percentage differently:");
    for formula in PercentageFormula::ALL {
        println!("  {:<7} {}", formula.name(), formula.expression());
    }
    let formula = loop {
        let input = prompt_with_default("Default formula", PercentageFormula::default().name())?;
        match input.parse::<PercentageFormula>() {
            Ok(f) => break f,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 3. Credit options
    println!();
    println!("The course calculator cycles through these credit values.");
    let credit_options = loop {
        let input = prompt_with_default(
            "Credit values",
            &format_credit_options(&DEFAULT_CREDIT_OPTIONS),
        )?;
        match parse_credit_options(&input) {
            Ok(options) => break options,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 4. Theme
    println!();
    let theme = loop {
        let input = prompt_with_default("Theme (auto, dark, light)", "auto")?;
        match input.parse::<ThemeMode>() {
            Ok(_) => break input.to_lowercase(),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 5. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        precision: Some(precision),
        default_formula: Some(formula.name().to_string()),
        credit_options: Some(credit_options),
        theme: Some(theme),
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `academic-ace` to get started.");

    Ok(())
}
