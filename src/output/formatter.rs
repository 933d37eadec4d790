use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use super::report::{CgpaReport, GpaReport, PercentageReport, ScaleLine, TenPointReport};
use crate::grading::{Band, Tone};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Fixed-decimal rendering of a result, e.g. `7.57` at precision 2.
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// A credit value as a user would type it: `4`, `1.5`. Rounded to four
/// decimals so float noise never reaches the screen.
pub fn format_credits(credits: f64) -> String {
    let fixed = format!("{:.4}", credits);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn paint(text: &str, tone: Tone) -> String {
    match tone {
        Tone::Success => text.green().to_string(),
        Tone::Info => text.blue().to_string(),
        Tone::Accent => text.magenta().to_string(),
        Tone::Caution => text.yellow().to_string(),
        Tone::Warning => text.bright_red().to_string(),
        Tone::Danger => text.red().to_string(),
    }
}

pub fn format_band(band: &Band, use_colors: bool) -> String {
    if use_colors {
        paint(band.label, band.tone).bold().to_string()
    } else {
        band.label.to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Format courses as a table with columns: Index, Grade, Points, Credits, Name
/// Rows that do not count toward the GPA are marked `(excluded)`.
pub fn format_course_table(report: &GpaReport, use_colors: bool) -> String {
    if report.courses.is_empty() {
        return "No courses entered.".to_string();
    }

    let term_width = get_terminal_width();
    // index(3) + space + grade(4) + points(6) + credits(7) + separators
    let fixed_width = 3 + 1 + 4 + 2 + 6 + 2 + 7 + 2;

    report
        .courses
        .iter()
        .map(|course| {
            let index_str = format!("{:>2}.", course.index);
            let grade = format!("{:<4}", or_dash(&course.grade));
            let points = match course.points {
                Some(p) => format!("{:>6}", format!("{} pts", p)),
                None => format!("{:>6}", "-"),
            };
            let credits = format!("{:>7}", format!("{} cr", or_dash(&course.credits)));

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&course.name, width - fixed_width)
                }
                Some(_) => truncate_name(&course.name, 20),
                None => course.name.clone(),
            };
            let name = if course.counted {
                name
            } else if name.is_empty() {
                "(excluded)".to_string()
            } else {
                format!("{} (excluded)", name)
            };

            if use_colors {
                let line = format!(
                    "{} {}  {}  {}  {}",
                    index_str.dimmed(),
                    grade.bold(),
                    points,
                    credits,
                    name
                );
                if course.counted {
                    line
                } else {
                    line.dimmed().to_string()
                }
            } else {
                format!("{} {}  {}  {}  {}", index_str, grade, points, credits, name)
                    .trim_end()
                    .to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_gpa_report(report: &GpaReport, precision: usize, use_colors: bool) -> String {
    let gpa = format_value(report.summary.gpa, precision);
    let gpa = if use_colors { gpa.bold().to_string() } else { gpa };
    let course_word = if report.summary.counted == 1 { "course" } else { "courses" };

    format!(
        "{}\n\nGPA: {}  {}\n  {} {}, {} credits, {} grade points",
        format_course_table(report, use_colors),
        gpa,
        format_band(&report.band, use_colors),
        report.summary.counted,
        course_word,
        format_value(report.summary.total_credits, precision),
        format_value(report.summary.total_points, precision),
    )
}

pub fn format_cgpa_report(report: &CgpaReport, precision: usize, use_colors: bool) -> String {
    let cgpa = format_value(report.summary.cgpa, precision);
    let cgpa = if use_colors { cgpa.bold().to_string() } else { cgpa };

    let mut lines = vec![format!(
        "CGPA: {}  {}",
        cgpa,
        format_band(&report.band, use_colors)
    )];
    let semester_word = if report.summary.counted == 1 { "semester" } else { "semesters" };
    lines.push(format!(
        "  Average of {} {}",
        report.summary.counted, semester_word
    ));

    let skipped: Vec<String> = report
        .semesters
        .iter()
        .filter(|s| !s.counted)
        .map(|s| format!("#{} '{}'", s.index, s.gpa))
        .collect();
    if !skipped.is_empty() {
        let note = format!("  Ignored (not in 0-10): {}", skipped.join(", "));
        lines.push(if use_colors {
            note.dimmed().to_string()
        } else {
            note
        });
    }

    lines.join("\n")
}

pub fn format_percentage_report(
    report: &PercentageReport,
    precision: usize,
    use_colors: bool,
) -> String {
    let gpa = report
        .gpa
        .map(|g| format_value(g, precision))
        .unwrap_or_else(|| format_value(0.0, precision));
    let percentage = format!("{}%", format_value(report.percentage, precision));
    let percentage = if use_colors {
        percentage.bold().to_string()
    } else {
        percentage
    };

    let mut lines = vec![format!(
        "GPA {} -> {}  {}",
        gpa,
        percentage,
        format_band(&report.band, use_colors)
    )];
    if report.gpa.is_none() {
        lines.push(format!(
            "  '{}' is not a GPA between 0 and 10",
            report.input
        ));
    }
    lines.push(format!("  Formula used: {}", report.expression));
    lines.join("\n")
}

pub fn format_ten_point_report(report: &TenPointReport, precision: usize, use_colors: bool) -> String {
    let five = report
        .five_point
        .map(|v| format_value(v, precision))
        .unwrap_or_else(|| format_value(0.0, precision));
    let ten = format_value(report.ten_point, precision);
    let ten = if use_colors { ten.bold().to_string() } else { ten };

    let mut lines = vec![format!("CGPA {} (5-point) -> {} (10-point)", five, ten)];
    if report.five_point.is_none() {
        lines.push(format!(
            "  '{}' is not a CGPA between 0 and 5",
            report.input
        ));
    }
    lines.push("  Conversion Formula: CGPA(10) = CGPA(5) × 2".to_string());
    lines.join("\n")
}

pub fn format_grade_scale(scale: &[ScaleLine], use_colors: bool) -> String {
    scale
        .iter()
        .map(|line| {
            let grade = format!("{:<3}", line.grade.label());
            let grade = if use_colors {
                grade.bold().to_string()
            } else {
                grade
            };
            format!("{} {:>2} points", grade, line.points)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{CourseEntry, PercentageFormula};
    use crate::output::report::grade_scale;

    fn sample_report() -> GpaReport {
        GpaReport::build(&[
            CourseEntry::new("Mathematics", "A", "4"),
            CourseEntry::new("Physics", "B+", "3"),
        ])
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(53.0 / 7.0, 2), "7.57");
        assert_eq!(format_value(0.0, 2), "0.00");
        assert_eq!(format_value(8.4, 0), "8");
    }

    #[test]
    fn test_format_credits() {
        assert_eq!(format_credits(4.0), "4");
        assert_eq!(format_credits(1.5), "1.5");
        assert_eq!(format_credits(0.1 + 0.2), "0.3");
        assert_eq!(format_credits(10.0), "10");
        assert_eq!(format_credits(0.0), "0");
    }

    #[test]
    fn test_format_course_table() {
        let result = format_course_table(&sample_report(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("8 pts"));
        assert!(lines[0].contains("4 cr"));
        assert!(lines[0].contains("Mathematics"));
        assert!(lines[1].contains("B+"));
    }

    #[test]
    fn test_format_course_table_excluded() {
        let report = GpaReport::build(&[CourseEntry::new("", "A", "")]);
        let result = format_course_table(&report, false);
        assert!(result.contains("(excluded)"));
        assert!(result.contains("- cr"));
    }

    #[test]
    fn test_format_course_table_empty() {
        let report = GpaReport::build(&[]);
        assert_eq!(format_course_table(&report, false), "No courses entered.");
    }

    #[test]
    fn test_format_gpa_report() {
        let result = format_gpa_report(&sample_report(), 2, false);
        assert!(result.contains("GPA: 7.57  Good"));
        assert!(result.contains("2 courses, 7.00 credits, 53.00 grade points"));
    }

    #[test]
    fn test_format_gpa_report_fractional_credits() {
        let report = GpaReport::build(&[
            CourseEntry::new("", "A", "0.1"),
            CourseEntry::new("", "A", "0.2"),
        ]);
        let result = format_gpa_report(&report, 2, false);
        assert!(result.contains("2 courses, 0.30 credits, 2.40 grade points"));
        assert!(!result.contains("0000"));
    }

    #[test]
    fn test_format_cgpa_report() {
        let report = CgpaReport::build(&["8.5", "7.0", "9.2"]);
        let result = format_cgpa_report(&report, 2, false);
        assert!(result.starts_with("CGPA: 8.23  Excellent Work"));
        assert!(result.contains("Average of 3 semesters"));
        assert!(!result.contains("Ignored"));
    }

    #[test]
    fn test_format_cgpa_report_single_semester() {
        let report = CgpaReport::build(&["9"]);
        let result = format_cgpa_report(&report, 2, false);
        assert!(result.contains("Average of 1 semester"));
        assert!(!result.contains("semesters"));
    }

    #[test]
    fn test_format_cgpa_report_lists_ignored() {
        let report = CgpaReport::build(&["9", "12"]);
        let result = format_cgpa_report(&report, 2, false);
        assert!(result.contains("Ignored (not in 0-10): #2 '12'"));
    }

    #[test]
    fn test_format_percentage_report() {
        let report = PercentageReport::build("8.5", PercentageFormula::Linear);
        let result = format_percentage_report(&report, 2, false);
        assert!(result.starts_with("GPA 8.50 -> 85.00%  A Grade"));
        assert!(result.contains("Formula used: (GPA ÷ 10) × 100"));
    }

    #[test]
    fn test_format_percentage_report_invalid() {
        let report = PercentageReport::build("abc", PercentageFormula::Fixed);
        let result = format_percentage_report(&report, 2, false);
        assert!(result.contains("0.00%"));
        assert!(result.contains("'abc' is not a GPA"));
    }

    #[test]
    fn test_format_ten_point_report() {
        let report = TenPointReport::build("4.2");
        let result = format_ten_point_report(&report, 2, false);
        assert!(result.starts_with("CGPA 4.20 (5-point) -> 8.40 (10-point)"));
    }

    #[test]
    fn test_format_grade_scale() {
        let result = format_grade_scale(&grade_scale(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "O   10 points");
        assert_eq!(lines[8], "F    0 points");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("Thermodynamics and Heat", 10), "Thermod...");
        assert_eq!(truncate_name("Hello", 3), "Hel");
    }
}
