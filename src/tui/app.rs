use ratatui::widgets::TableState;
use std::time::Instant;
use tracing::debug;

use crate::config::Config;
use crate::grading::{validation::parse_number, CourseEntry, LetterGrade, SemesterEntry};
use crate::output::format_credits;
use crate::session::{Converter, CourseSheet, SemesterSheet, SessionError, SheetItem};
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Courses,
    Semesters,
    Converter,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Courses, Tab::Semesters, Tab::Converter];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Courses => "Course GPA",
            Tab::Semesters => "CGPA",
            Tab::Converter => "Converter",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Courses => 0,
            Tab::Semesters => 1,
            Tab::Converter => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing into the focused field. Holds the value to restore on cancel.
    Editing { backup: String },
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Name,
    Grade,
    Credits,
}

impl CourseField {
    pub fn of(self, entry: &CourseEntry) -> &str {
        match self {
            CourseField::Name => &entry.name,
            CourseField::Grade => &entry.grade,
            CourseField::Credits => &entry.credits,
        }
    }

    fn of_mut(self, entry: &mut CourseEntry) -> &mut String {
        match self {
            CourseField::Name => &mut entry.name,
            CourseField::Grade => &mut entry.grade,
            CourseField::Credits => &mut entry.credits,
        }
    }

    fn next(self) -> Self {
        match self {
            CourseField::Name => CourseField::Grade,
            CourseField::Grade => CourseField::Credits,
            CourseField::Credits => CourseField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            CourseField::Name => CourseField::Credits,
            CourseField::Grade => CourseField::Name,
            CourseField::Credits => CourseField::Grade,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterField {
    Gpa,
    FivePoint,
}

/// Characters a field accepts while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Grade,
    Number,
}

impl FieldKind {
    fn accepts(self, c: char) -> bool {
        match self {
            FieldKind::Text => !c.is_control(),
            FieldKind::Grade => c.is_ascii_alphabetic() || c == '+',
            FieldKind::Number => c.is_ascii_digit() || c == '.',
        }
    }
}

pub struct App {
    pub tab: Tab,
    pub courses: CourseSheet,
    pub semesters: SemesterSheet,
    pub converter: Converter,
    pub course_table: TableState,
    pub semester_table: TableState,
    pub course_field: CourseField,
    pub converter_field: ConverterField,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub precision: usize,
    pub credit_options: Vec<f64>,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(config: &Config, theme: ThemeColors) -> Self {
        Self {
            tab: Tab::Courses,
            courses: CourseSheet::new(),
            semesters: SemesterSheet::new(),
            converter: Converter::new(config.formula()),
            course_table: TableState::default().with_selected(Some(0)),
            semester_table: TableState::default().with_selected(Some(0)),
            course_field: CourseField::Grade,
            converter_field: ConverterField::Gpa,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            precision: config.precision(),
            credit_options: config.credit_options(),
            theme,
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()];
    }

    pub fn previous_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len()];
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    fn table_parts(&mut self) -> Option<(&mut TableState, usize)> {
        match self.tab {
            Tab::Courses => Some((&mut self.course_table, self.courses.len())),
            Tab::Semesters => Some((&mut self.semester_table, self.semesters.len())),
            Tab::Converter => None,
        }
    }

    pub fn next_row(&mut self) {
        if self.tab == Tab::Converter {
            self.converter_field = match self.converter_field {
                ConverterField::Gpa => ConverterField::FivePoint,
                ConverterField::FivePoint => ConverterField::Gpa,
            };
            return;
        }
        if let Some((state, len)) = self.table_parts() {
            let i = match state.selected() {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            };
            state.select(Some(i));
        }
    }

    pub fn previous_row(&mut self) {
        if self.tab == Tab::Converter {
            self.next_row();
            return;
        }
        if let Some((state, len)) = self.table_parts() {
            let i = match state.selected() {
                Some(0) | None => len.saturating_sub(1),
                Some(i) => i - 1,
            };
            state.select(Some(i));
        }
    }

    pub fn next_field(&mut self) {
        if self.tab == Tab::Courses {
            self.course_field = self.course_field.next();
        }
    }

    pub fn previous_field(&mut self) {
        if self.tab == Tab::Courses {
            self.course_field = self.course_field.previous();
        }
    }

    pub fn selected_course_id(&self) -> Option<u32> {
        let idx = self.course_table.selected()?;
        self.courses.rows().get(idx).map(|row| row.id)
    }

    pub fn selected_semester_id(&self) -> Option<u32> {
        let idx = self.semester_table.selected()?;
        self.semesters.rows().get(idx).map(|row| row.id)
    }

    /// Append a blank row to the current sheet and select it.
    pub fn add_row(&mut self) {
        match self.tab {
            Tab::Courses => {
                let id = self.courses.add();
                self.course_table.select(self.courses.position(id));
            }
            Tab::Semesters => {
                let id = self.semesters.add();
                self.semester_table.select(self.semesters.position(id));
            }
            Tab::Converter => {}
        }
    }

    pub fn remove_selected(&mut self) {
        let result = match self.tab {
            Tab::Courses => match self.selected_course_id() {
                Some(id) => self.courses.remove(id),
                None => return,
            },
            Tab::Semesters => match self.selected_semester_id() {
                Some(id) => self.semesters.remove(id),
                None => return,
            },
            Tab::Converter => return,
        };

        if let Err(e) = result {
            debug!(error = %e, "remove refused");
            self.show_flash(format!("Cannot remove: {}", e));
            return;
        }

        let len = self.courses.len();
        clamp_selection(&mut self.course_table, len);
        let len = self.semesters.len();
        clamp_selection(&mut self.semester_table, len);
    }

    /// Clear the current sheet, or the focused converter input.
    pub fn clear_current(&mut self) {
        match self.tab {
            Tab::Courses => {
                self.courses.clear();
                self.course_table.select(Some(0));
                self.show_flash(format!(
                    "Cleared: All {} have been cleared",
                    CourseEntry::NOUN_PLURAL
                ));
            }
            Tab::Semesters => {
                self.semesters.clear();
                self.semester_table.select(Some(0));
                self.show_flash(format!(
                    "Cleared: All {} have been cleared",
                    SemesterEntry::NOUN_PLURAL
                ));
            }
            Tab::Converter => {
                match self.converter_field {
                    ConverterField::Gpa => self.converter.clear_gpa(),
                    ConverterField::FivePoint => self.converter.clear_five_point(),
                }
                self.show_flash("Cleared".to_string());
            }
        }
    }

    /// Step the selected course's grade down (`forward`) or up the scale.
    /// A blank or unknown grade starts from the top (or bottom).
    pub fn cycle_grade(&mut self, forward: bool) {
        if self.tab != Tab::Courses {
            return;
        }
        let Some(id) = self.selected_course_id() else {
            return;
        };
        let result = self.courses.update(id, |course| {
            let next = match (course.grade.parse::<LetterGrade>(), forward) {
                (Ok(grade), true) => grade.next(),
                (Ok(grade), false) => grade.previous(),
                (Err(_), true) => LetterGrade::Outstanding,
                (Err(_), false) => LetterGrade::F,
            };
            course.grade = next.label().to_string();
        });
        applied(result);
    }

    /// Move the selected course's credits to the next configured option.
    pub fn cycle_credits(&mut self) {
        if self.tab != Tab::Courses || self.credit_options.is_empty() {
            return;
        }
        let Some(id) = self.selected_course_id() else {
            return;
        };
        let options = &self.credit_options;
        let result = self.courses.update(id, |course| {
            let current = parse_number(&course.credits);
            let next = current
                .and_then(|c| options.iter().position(|o| (o - c).abs() < 1e-9))
                .map(|idx| options[(idx + 1) % options.len()])
                .unwrap_or(options[0]);
            course.credits = format_credits(next);
        });
        applied(result);
    }

    pub fn cycle_formula(&mut self) {
        if self.tab == Tab::Converter {
            self.converter.cycle_formula();
        }
    }

    fn field_kind(&self) -> FieldKind {
        match self.tab {
            Tab::Courses => match self.course_field {
                CourseField::Name => FieldKind::Text,
                CourseField::Grade => FieldKind::Grade,
                CourseField::Credits => FieldKind::Number,
            },
            Tab::Semesters | Tab::Converter => FieldKind::Number,
        }
    }

    /// Current text of the focused field, if there is one.
    pub fn focused_value(&self) -> Option<String> {
        match self.tab {
            Tab::Courses => {
                let id = self.selected_course_id()?;
                self.courses
                    .get(id)
                    .map(|c| self.course_field.of(c).to_string())
            }
            Tab::Semesters => {
                let id = self.selected_semester_id()?;
                self.semesters.get(id).map(|s| s.gpa.clone())
            }
            Tab::Converter => Some(match self.converter_field {
                ConverterField::Gpa => self.converter.gpa_input.clone(),
                ConverterField::FivePoint => self.converter.five_point_input.clone(),
            }),
        }
    }

    fn edit_focused<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut String),
    {
        match self.tab {
            Tab::Courses => {
                if let Some(id) = self.selected_course_id() {
                    let field = self.course_field;
                    applied(self.courses.update(id, |c| edit(field.of_mut(c))));
                }
            }
            Tab::Semesters => {
                if let Some(id) = self.selected_semester_id() {
                    applied(self.semesters.update(id, |s| edit(&mut s.gpa)));
                }
            }
            Tab::Converter => match self.converter_field {
                ConverterField::Gpa => edit(&mut self.converter.gpa_input),
                ConverterField::FivePoint => edit(&mut self.converter.five_point_input),
            },
        }
    }

    /// Start typing into the focused field. Edits apply live.
    pub fn start_editing(&mut self) {
        if let Some(backup) = self.focused_value() {
            self.input_mode = InputMode::Editing { backup };
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.field_kind().accepts(c) {
            self.edit_focused(|field| field.push(c));
        }
    }

    pub fn pop_char(&mut self) {
        self.edit_focused(|field| {
            field.pop();
        });
    }

    pub fn confirm_editing(&mut self) {
        if self.tab == Tab::Courses && self.course_field == CourseField::Grade {
            // normalise case so "b+" shows as "B+"
            self.edit_focused(|field| {
                if let Ok(grade) = field.parse::<LetterGrade>() {
                    *field = grade.label().to_string();
                }
            });
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_editing(&mut self) {
        if let InputMode::Editing { backup } = std::mem::replace(&mut self.input_mode, InputMode::Normal) {
            self.edit_focused(|field| *field = backup);
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.input_mode, InputMode::Editing { .. })
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }
}

/// Log an edit that missed its row. Returns whether the edit landed.
fn applied(result: Result<(), SessionError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "edit skipped");
            false
        }
    }
}

fn clamp_selection(state: &mut TableState, len: usize) {
    match state.selected() {
        Some(i) if i >= len => state.select(Some(len.saturating_sub(1))),
        None if len > 0 => state.select(Some(0)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::PercentageFormula;

    fn app() -> App {
        App::new(&Config::default(), ThemeColors::dark())
    }

    fn type_text(app: &mut App, text: &str) {
        app.start_editing();
        for c in text.chars() {
            app.push_char(c);
        }
        app.confirm_editing();
    }

    #[test]
    fn test_new_app_defaults() {
        let app = app();
        assert_eq!(app.tab, Tab::Courses);
        assert_eq!(app.courses.len(), 1);
        assert_eq!(app.selected_course_id(), Some(1));
        assert_eq!(app.precision, 2);
        assert_eq!(app.converter.formula, PercentageFormula::Linear);
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = app();
        app.next_tab();
        assert_eq!(app.tab, Tab::Semesters);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.tab, Tab::Courses);
        app.previous_tab();
        assert_eq!(app.tab, Tab::Converter);
    }

    #[test]
    fn test_build_course_gpa() {
        let mut app = app();
        app.course_field = CourseField::Grade;
        type_text(&mut app, "a");
        app.course_field = CourseField::Credits;
        type_text(&mut app, "4");

        app.add_row();
        assert_eq!(app.selected_course_id(), Some(2));
        app.course_field = CourseField::Grade;
        type_text(&mut app, "B+");
        app.course_field = CourseField::Credits;
        type_text(&mut app, "3");

        assert_eq!(app.courses.get(1).unwrap().grade, "A");
        assert!((app.courses.gpa() - 53.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_number_field_rejects_letters() {
        let mut app = app();
        app.course_field = CourseField::Credits;
        type_text(&mut app, "3x.5");
        assert_eq!(app.courses.get(1).unwrap().credits, "3.5");
    }

    #[test]
    fn test_cancel_editing_restores_value() {
        let mut app = app();
        app.course_field = CourseField::Name;
        type_text(&mut app, "Maths");

        app.start_editing();
        app.pop_char();
        app.push_char('!');
        assert_eq!(app.courses.get(1).unwrap().name, "Math!");
        app.cancel_editing();
        assert_eq!(app.courses.get(1).unwrap().name, "Maths");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_remove_last_course_flashes() {
        let mut app = app();
        app.remove_selected();
        assert_eq!(app.courses.len(), 1);
        let (msg, _) = app.flash_message.clone().unwrap();
        assert_eq!(msg, "Cannot remove: At least one course is required");
    }

    #[test]
    fn test_remove_clamps_selection() {
        let mut app = app();
        app.add_row();
        app.add_row();
        assert_eq!(app.course_table.selected(), Some(2));
        app.remove_selected();
        assert_eq!(app.courses.len(), 2);
        assert_eq!(app.course_table.selected(), Some(1));
    }

    #[test]
    fn test_clear_courses() {
        let mut app = app();
        app.add_row();
        app.cycle_grade(true);
        app.clear_current();
        assert_eq!(app.courses, CourseSheet::new());
        assert_eq!(app.course_table.selected(), Some(0));
        let (msg, _) = app.flash_message.clone().unwrap();
        assert_eq!(msg, "Cleared: All courses have been cleared");
    }

    #[test]
    fn test_clear_semesters() {
        let mut app = app();
        app.select_tab(Tab::Semesters);
        app.add_row();
        app.clear_current();
        assert_eq!(app.semesters.len(), 1);
        let (msg, _) = app.flash_message.clone().unwrap();
        assert_eq!(msg, "Cleared: All semesters have been cleared");
    }

    #[test]
    fn test_applied_reports_missed_edit() {
        let mut sheet = CourseSheet::new();
        assert!(applied(sheet.update(1, |c| c.grade = "A".to_string())));
        assert!(!applied(sheet.update(7, |c| c.grade = "B".to_string())));
        assert_eq!(sheet.get(1).unwrap().grade, "A");
    }

    #[test]
    fn test_cycle_grade() {
        let mut app = app();
        app.cycle_grade(true);
        assert_eq!(app.courses.get(1).unwrap().grade, "O");
        app.cycle_grade(true);
        assert_eq!(app.courses.get(1).unwrap().grade, "A+");
        app.cycle_grade(false);
        app.cycle_grade(false);
        assert_eq!(app.courses.get(1).unwrap().grade, "F");
    }

    #[test]
    fn test_cycle_credits() {
        let mut app = app();
        app.cycle_credits();
        assert_eq!(app.courses.get(1).unwrap().credits, "1");
        app.cycle_credits();
        assert_eq!(app.courses.get(1).unwrap().credits, "1.5");

        app.courses
            .update(1, |c| c.credits = "5".to_string())
            .unwrap();
        app.cycle_credits();
        assert_eq!(app.courses.get(1).unwrap().credits, "1");
    }

    #[test]
    fn test_semester_rows_and_cgpa() {
        let mut app = app();
        app.select_tab(Tab::Semesters);
        type_text(&mut app, "8.5");
        app.add_row();
        type_text(&mut app, "7.0");
        app.add_row();
        type_text(&mut app, "9.2");
        assert_eq!(app.semesters.summary().counted, 3);
        assert!((app.semesters.cgpa() - 24.7 / 3.0).abs() < 1e-9);

        app.previous_row();
        assert_eq!(app.semester_table.selected(), Some(1));
    }

    #[test]
    fn test_converter_fields() {
        let mut app = app();
        app.select_tab(Tab::Converter);
        type_text(&mut app, "8.5");
        app.cycle_formula();
        assert!((app.converter.percentage() - 77.5).abs() < 1e-9);

        app.next_row();
        assert_eq!(app.converter_field, ConverterField::FivePoint);
        type_text(&mut app, "4.2");
        assert!((app.converter.ten_point() - 8.4).abs() < 1e-9);

        app.clear_current();
        assert!(app.converter.five_point_input.is_empty());
        assert_eq!(app.converter.gpa_input, "8.5");
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut app = app();
        app.add_row();
        app.next_row();
        assert_eq!(app.course_table.selected(), Some(0));
        app.previous_row();
        assert_eq!(app.course_table.selected(), Some(1));
    }

    #[test]
    fn test_flash_expiry_keeps_fresh_message() {
        let mut app = app();
        app.show_flash("Cleared".to_string());
        app.update_flash();
        assert!(app.flash_message.is_some());
    }
}
