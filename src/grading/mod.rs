//! Grade aggregation: the letter scale, input validation, the GPA/CGPA
//! arithmetic and the qualitative bands shown next to each result.

pub mod classify;
pub mod engine;
pub mod formula;
pub mod records;
pub mod scale;
pub mod validation;

pub use classify::{classify_cgpa, classify_gpa, classify_percentage, Band, Ladder, Tone};
pub use engine::{
    cgpa_summary, compute_cgpa, compute_course_gpa, convert_five_point_to_ten_point,
    convert_to_percentage, course_gpa_summary, CgpaSummary, GpaSummary,
};
pub use formula::PercentageFormula;
pub use records::{ConversionInput, CourseEntry, CourseRecord, SemesterEntry, SemesterRecord};
pub use scale::{points_for, LetterGrade};
pub use validation::{
    validate_course, validate_five_point_input, validate_gpa_input, validate_semester,
    validate_semester_gpa,
};
