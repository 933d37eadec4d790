//! Caller-owned editing state: the record lists behind each calculator.

pub mod converter;
pub mod error;
pub mod sheet;

pub use converter::Converter;
pub use error::SessionError;
pub use sheet::{CourseSheet, SemesterSheet, Sheet, SheetItem, SheetRow};
