use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use academic_ace::config::{self, Config};
use academic_ace::grading::{CourseEntry, PercentageFormula};
use academic_ace::output;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Credit-weighted GPA of a list of courses
    Gpa {
        /// Courses as GRADE:CREDITS[:NAME], e.g. A:4:Mathematics
        #[arg(required = true, value_name = "COURSE")]
        courses: Vec<String>,
    },
    /// Cumulative GPA: the average of semester GPAs
    Cgpa {
        /// Semester GPAs on the 10-point scale
        #[arg(required = true, value_name = "GPA", allow_negative_numbers = true)]
        gpas: Vec<String>,
    },
    /// Convert a 10-point GPA to a percentage
    Percent {
        /// GPA between 0 and 10
        #[arg(allow_negative_numbers = true)]
        gpa: String,

        /// linear, offset or fixed (defaults to the configured formula)
        #[arg(short, long)]
        formula: Option<String>,
    },
    /// Convert a 5-point CGPA to the 10-point scale
    Scale {
        /// CGPA between 0 and 5
        #[arg(allow_negative_numbers = true)]
        cgpa: String,
    },
    /// Show the letter grade scale
    Grades,
    /// Create or overwrite the config file interactively
    Init,
    /// Interactive calculator (default if no subcommand)
    Tui,
}

#[derive(Parser, Debug)]
#[command(name = "academic-ace")]
#[command(about = "GPA, CGPA and percentage calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/academic-ace/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    academic_ace::logging::init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Tui);

    // Init runs before loading so a broken or missing file can be replaced
    if let Commands::Init = command {
        match config::init::run_init_wizard(cli.config) {
            Ok(()) => std::process::exit(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
    }

    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    debug!(
        precision = config.precision(),
        formula = %config.formula(),
        "config loaded"
    );

    match run(command, &config, cli.json) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run(command: Commands, config: &Config, json: bool) -> anyhow::Result<()> {
    let precision = config.precision();
    let use_colors = output::should_use_colors();

    match command {
        Commands::Gpa { courses } => {
            let entries: Vec<CourseEntry> =
                courses.iter().map(|c| CourseEntry::from_spec(c)).collect();
            let report = output::GpaReport::build(&entries);
            emit(&report, json, || {
                output::format_gpa_report(&report, precision, use_colors)
            })
        }
        Commands::Cgpa { gpas } => {
            let report = output::CgpaReport::build(&gpas);
            emit(&report, json, || {
                output::format_cgpa_report(&report, precision, use_colors)
            })
        }
        Commands::Percent { gpa, formula } => {
            let formula = match formula {
                Some(name) => name.parse::<PercentageFormula>()?,
                None => config.formula(),
            };
            let report = output::PercentageReport::build(&gpa, formula);
            emit(&report, json, || {
                output::format_percentage_report(&report, precision, use_colors)
            })
        }
        Commands::Scale { cgpa } => {
            let report = output::TenPointReport::build(&cgpa);
            emit(&report, json, || {
                output::format_ten_point_report(&report, precision, use_colors)
            })
        }
        Commands::Grades => {
            let scale = output::grade_scale();
            emit(&scale, json, || output::format_grade_scale(&scale, use_colors))
        }
        Commands::Tui => {
            let theme = academic_ace::tui::resolve_theme(config.theme_mode());
            let app = academic_ace::tui::App::new(config, theme);
            academic_ace::tui::run_tui(app)
        }
        // handled before the config is loaded
        Commands::Init => Ok(()),
    }
}

/// Print a report as JSON or as the formatted text.
fn emit<T, F>(report: &T, json: bool, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", output::to_json(report)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
