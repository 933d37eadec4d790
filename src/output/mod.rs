pub mod formatter;
pub mod report;

pub use formatter::{
    format_band, format_cgpa_report, format_course_table, format_credits, format_gpa_report,
    format_grade_scale, format_percentage_report, format_ten_point_report, format_value,
    should_use_colors,
};
pub use report::{
    grade_scale, to_json, CgpaReport, CourseLine, GpaReport, PercentageReport, ScaleLine,
    SemesterLine, TenPointReport,
};
