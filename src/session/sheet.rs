use serde::Serialize;
use tracing::debug;

use super::error::SessionError;
use crate::grading::{
    cgpa_summary, course_gpa_summary, CgpaSummary, CourseEntry, GpaSummary, SemesterEntry,
};

/// Something a sheet can hold one row of.
pub trait SheetItem: Default + Clone {
    /// Singular name used in notifications ("course", "semester").
    const NOUN: &'static str;
    const NOUN_PLURAL: &'static str;
}

impl SheetItem for CourseEntry {
    const NOUN: &'static str = "course";
    const NOUN_PLURAL: &'static str = "courses";
}

impl SheetItem for SemesterEntry {
    const NOUN: &'static str = "semester";
    const NOUN_PLURAL: &'static str = "semesters";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRow<T> {
    pub id: u32,
    pub entry: T,
}

/// Ordered list of editable rows owned by the caller.
///
/// A sheet is never empty: it starts with one blank row, refuses to remove
/// its last row, and `clear` resets it to a single blank row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet<T: SheetItem> {
    rows: Vec<SheetRow<T>>,
}

pub type CourseSheet = Sheet<CourseEntry>;
pub type SemesterSheet = Sheet<SemesterEntry>;

impl<T: SheetItem> Default for Sheet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SheetItem> Sheet<T> {
    pub fn new() -> Self {
        Self {
            rows: vec![SheetRow {
                id: 1,
                entry: T::default(),
            }],
        }
    }

    /// Build a sheet from existing entries. An empty list gives a blank sheet.
    pub fn from_entries(entries: Vec<T>) -> Self {
        if entries.is_empty() {
            return Self::new();
        }
        let rows = entries
            .into_iter()
            .zip(1..)
            .map(|(entry, id)| SheetRow { id, entry })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[SheetRow<T>] {
        &self.rows
    }

    /// Snapshot of the entries in display order.
    pub fn entries(&self) -> Vec<T> {
        self.rows.iter().map(|row| row.entry.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.rows.iter().find(|row| row.id == id).map(|row| &row.entry)
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Append a blank row and return its id.
    pub fn add(&mut self) -> u32 {
        let id = self.rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        self.rows.push(SheetRow {
            id,
            entry: T::default(),
        });
        debug!(id, noun = T::NOUN, "row added");
        id
    }

    pub fn update<F>(&mut self, id: u32, edit: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut T),
    {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(SessionError::UnknownRecord { noun: T::NOUN, id })?;
        edit(&mut row.entry);
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<(), SessionError> {
        let pos = self
            .position(id)
            .ok_or(SessionError::UnknownRecord { noun: T::NOUN, id })?;
        if self.rows.len() <= 1 {
            return Err(SessionError::LastRecord { noun: T::NOUN });
        }
        self.rows.remove(pos);
        debug!(id, noun = T::NOUN, "row removed");
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::new();
        debug!(noun = T::NOUN_PLURAL, "sheet cleared");
    }
}

impl Sheet<CourseEntry> {
    pub fn summary(&self) -> GpaSummary {
        course_gpa_summary(&self.entries())
    }

    pub fn gpa(&self) -> f64 {
        self.summary().gpa
    }
}

impl Sheet<SemesterEntry> {
    pub fn summary(&self) -> CgpaSummary {
        cgpa_summary(&self.entries())
    }

    pub fn cgpa(&self) -> f64 {
        self.summary().cgpa
    }
}
