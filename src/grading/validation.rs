//! Filters raw user input into values the engine can aggregate.
//!
//! Nothing here reports errors: an entry either contributes or it is left
//! out, and the caller keeps the raw entry around for editing.

use super::records::{CourseEntry, CourseRecord, SemesterRecord};
use super::scale::LetterGrade;

pub const MAX_GPA: f64 = 10.0;
pub const MAX_FIVE_POINT: f64 = 5.0;

/// Parse a trimmed decimal string. NaN and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn within(raw: &str, low: f64, high: f64) -> Option<f64> {
    parse_number(raw).filter(|v| *v >= low && *v <= high)
}

/// A course counts when it has a grade and a positive credit value.
pub fn validate_course(entry: &CourseEntry) -> Option<CourseRecord> {
    let grade = entry.grade.trim();
    if grade.is_empty() {
        return None;
    }

    let credits = parse_number(&entry.credits).filter(|c| *c > 0.0)?;
    let name = entry.name.trim();

    Some(CourseRecord {
        name: (!name.is_empty()).then(|| name.to_string()),
        grade: grade.parse::<LetterGrade>().ok(),
        credits,
    })
}

pub fn validate_semester_gpa(raw: &str) -> Option<f64> {
    within(raw, 0.0, MAX_GPA)
}

pub fn validate_semester(raw: &str) -> Option<SemesterRecord> {
    validate_semester_gpa(raw).map(|gpa| SemesterRecord { gpa })
}

/// GPA typed into the percentage converter.
pub fn validate_gpa_input(raw: &str) -> Option<f64> {
    within(raw, 0.0, MAX_GPA)
}

/// CGPA typed into the 5-point to 10-point converter.
pub fn validate_five_point_input(raw: &str) -> Option<f64> {
    within(raw, 0.0, MAX_FIVE_POINT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("8.5"), Some(8.5));
        assert_eq!(parse_number("  4 "), Some(4.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_valid_course() {
        let record = validate_course(&CourseEntry::new("Maths", "A", "4")).unwrap();
        assert_eq!(record.name.as_deref(), Some("Maths"));
        assert_eq!(record.grade, Some(LetterGrade::A));
        assert_eq!(record.credits, 4.0);
    }

    #[test]
    fn test_course_blank_name_is_none() {
        let record = validate_course(&CourseEntry::new("   ", "B", "3")).unwrap();
        assert!(record.name.is_none());
    }

    #[test]
    fn test_course_missing_grade_excluded() {
        assert!(validate_course(&CourseEntry::new("", "", "3")).is_none());
        assert!(validate_course(&CourseEntry::new("", "  ", "3")).is_none());
    }

    #[test]
    fn test_course_bad_credits_excluded() {
        assert!(validate_course(&CourseEntry::new("", "A", "")).is_none());
        assert!(validate_course(&CourseEntry::new("", "A", "zero")).is_none());
        assert!(validate_course(&CourseEntry::new("", "A", "0")).is_none());
        assert!(validate_course(&CourseEntry::new("", "A", "-2")).is_none());
    }

    #[test]
    fn test_course_unknown_grade_still_counts() {
        let record = validate_course(&CourseEntry::new("", "Z", "2")).unwrap();
        assert!(record.grade.is_none());
        assert_eq!(record.credits, 2.0);
    }

    #[test]
    fn test_semester_bounds() {
        assert_eq!(validate_semester_gpa("0"), Some(0.0));
        assert_eq!(validate_semester_gpa("10"), Some(10.0));
        assert_eq!(validate_semester_gpa("7.25"), Some(7.25));
        assert_eq!(validate_semester_gpa("10.01"), None);
        assert_eq!(validate_semester_gpa("-0.5"), None);
        assert_eq!(validate_semester_gpa(""), None);
    }

    #[test]
    fn test_semester_record() {
        assert_eq!(validate_semester("9").map(|r| r.gpa), Some(9.0));
        assert!(validate_semester("11").is_none());
    }

    #[test]
    fn test_five_point_bounds() {
        assert_eq!(validate_five_point_input("5"), Some(5.0));
        assert_eq!(validate_five_point_input("5.5"), None);
        assert_eq!(validate_gpa_input("5.5"), Some(5.5));
    }
}
