use serde::Serialize;
use tracing::trace;

use super::formula::PercentageFormula;
use super::records::{CourseEntry, CourseRecord};
use super::validation::{validate_course, validate_semester_gpa, MAX_FIVE_POINT, MAX_GPA};

/// Credit-weighted GPA together with the totals it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_points: f64,
    pub total_credits: f64,
    pub counted: usize,
    pub excluded: usize,
}

/// Unweighted semester mean together with how many semesters counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CgpaSummary {
    pub cgpa: f64,
    pub counted: usize,
    pub excluded: usize,
}

/// Σ(points × credits) / Σ(credits) over the valid entries, 0 when none are valid.
pub fn compute_course_gpa(entries: &[CourseEntry]) -> f64 {
    course_gpa_summary(entries).gpa
}

pub fn course_gpa_summary(entries: &[CourseEntry]) -> GpaSummary {
    let records: Vec<CourseRecord> = entries.iter().filter_map(validate_course).collect();
    let excluded = entries.len() - records.len();
    let mut summary = summarize_records(&records);
    summary.excluded = excluded;
    trace!(
        counted = summary.counted,
        excluded,
        gpa = summary.gpa,
        "course gpa computed"
    );
    summary
}

/// Totals over already validated records. Records without positive credits are skipped.
fn summarize_records(records: &[CourseRecord]) -> GpaSummary {
    let mut total_points = 0.0;
    let mut total_credits = 0.0;
    let mut counted = 0;

    for record in records {
        if !(record.credits.is_finite() && record.credits > 0.0) {
            continue;
        }
        total_points += record.weighted_points();
        total_credits += record.credits;
        counted += 1;
    }

    let gpa = if total_credits > 0.0 {
        total_points / total_credits
    } else {
        0.0
    };

    GpaSummary {
        gpa,
        total_points,
        total_credits,
        counted,
        excluded: records.len() - counted,
    }
}

/// Mean of the semester GPAs that fall in [0, 10], 0 when none do.
pub fn compute_cgpa<S: AsRef<str>>(values: &[S]) -> f64 {
    cgpa_summary(values).cgpa
}

pub fn cgpa_summary<S: AsRef<str>>(values: &[S]) -> CgpaSummary {
    let valid: Vec<f64> = values
        .iter()
        .filter_map(|v| validate_semester_gpa(v.as_ref()))
        .collect();

    let cgpa = if valid.is_empty() {
        0.0
    } else {
        valid.iter().sum::<f64>() / valid.len() as f64
    };

    trace!(counted = valid.len(), cgpa, "cgpa computed");

    CgpaSummary {
        cgpa,
        counted: valid.len(),
        excluded: values.len() - valid.len(),
    }
}

/// Percentage equivalent of a 10-point GPA. Out-of-range input gives 0.
pub fn convert_to_percentage(gpa: f64, formula: PercentageFormula) -> f64 {
    if (0.0..=MAX_GPA).contains(&gpa) {
        formula.apply(gpa)
    } else {
        0.0
    }
}

/// 5-point CGPA doubled onto the 10-point scale. Out-of-range input gives 0.
pub fn convert_five_point_to_ten_point(cgpa_five: f64) -> f64 {
    if (0.0..=MAX_FIVE_POINT).contains(&cgpa_five) {
        cgpa_five * 2.0
    } else {
        0.0
    }
}
