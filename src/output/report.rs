//! Serializable result reports shared by the text and JSON outputs.

use serde::Serialize;

use crate::grading::{
    cgpa_summary, classify_cgpa, classify_gpa, classify_percentage, convert_five_point_to_ten_point,
    convert_to_percentage, course_gpa_summary, validate_course, validate_five_point_input,
    validate_gpa_input, validate_semester_gpa, Band, CgpaSummary, CourseEntry, GpaSummary,
    LetterGrade, PercentageFormula,
};

#[derive(Debug, Clone, Serialize)]
pub struct CourseLine {
    pub index: usize,
    pub name: String,
    pub grade: String,
    pub credits: String,
    /// Grade points, present only when the course counts toward the GPA.
    pub points: Option<f64>,
    pub counted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GpaReport {
    pub courses: Vec<CourseLine>,
    #[serde(flatten)]
    pub summary: GpaSummary,
    pub band: Band,
}

impl GpaReport {
    pub fn build(entries: &[CourseEntry]) -> Self {
        let courses = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let record = validate_course(entry);
                CourseLine {
                    index: idx + 1,
                    name: entry.name.trim().to_string(),
                    grade: entry.grade.trim().to_string(),
                    credits: entry.credits.trim().to_string(),
                    points: record.as_ref().map(|r| r.points()),
                    counted: record.is_some(),
                }
            })
            .collect();
        let summary = course_gpa_summary(entries);
        let band = classify_gpa(summary.gpa);
        Self {
            courses,
            summary,
            band,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SemesterLine {
    pub index: usize,
    pub gpa: String,
    pub counted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CgpaReport {
    pub semesters: Vec<SemesterLine>,
    #[serde(flatten)]
    pub summary: CgpaSummary,
    pub band: Band,
}

impl CgpaReport {
    pub fn build<S: AsRef<str>>(values: &[S]) -> Self {
        let semesters = values
            .iter()
            .enumerate()
            .map(|(idx, value)| SemesterLine {
                index: idx + 1,
                gpa: value.as_ref().trim().to_string(),
                counted: validate_semester_gpa(value.as_ref()).is_some(),
            })
            .collect();
        let summary = cgpa_summary(values);
        let band = classify_cgpa(summary.cgpa);
        Self {
            semesters,
            summary,
            band,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PercentageReport {
    pub input: String,
    /// Parsed GPA, absent when the input is blank or outside 0-10.
    pub gpa: Option<f64>,
    pub formula: PercentageFormula,
    pub expression: &'static str,
    pub percentage: f64,
    pub band: Band,
}

impl PercentageReport {
    pub fn build(input: &str, formula: PercentageFormula) -> Self {
        let gpa = validate_gpa_input(input);
        let percentage = gpa
            .map(|g| convert_to_percentage(g, formula))
            .unwrap_or(0.0);
        Self {
            input: input.trim().to_string(),
            gpa,
            formula,
            expression: formula.expression(),
            percentage,
            band: classify_percentage(percentage),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TenPointReport {
    pub input: String,
    pub five_point: Option<f64>,
    pub ten_point: f64,
}

impl TenPointReport {
    pub fn build(input: &str) -> Self {
        let five_point = validate_five_point_input(input);
        Self {
            input: input.trim().to_string(),
            five_point,
            ten_point: five_point
                .map(convert_five_point_to_ten_point)
                .unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaleLine {
    pub grade: LetterGrade,
    pub points: f64,
}

pub fn grade_scale() -> Vec<ScaleLine> {
    LetterGrade::ALL
        .iter()
        .map(|grade| ScaleLine {
            grade: *grade,
            points: grade.points(),
        })
        .collect()
}

/// Pretty-printed JSON for any report.
pub fn to_json<T: Serialize>(report: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
