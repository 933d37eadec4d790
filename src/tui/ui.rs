use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::grading::{
    classify_cgpa, classify_gpa, classify_percentage, validate_course, validate_five_point_input,
    validate_gpa_input, validate_semester_gpa, Band, PercentageFormula,
};
use crate::output::format_value;
use crate::tui::app::{App, ConverterField, CourseField, InputMode, Tab};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Result(3) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Table or converter panels
        Constraint::Length(3), // Result panel
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.tab {
        Tab::Courses => render_course_table(frame, chunks[2], app),
        Tab::Semesters => render_semester_table(frame, chunks[2], app),
        Tab::Converter => render_converter(frame, chunks[2], app),
    }
    render_result(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.theme);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let left = "Academic Ace";
    let right = format!("precision {}", app.precision);
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

/// Text of an editable cell, with a cursor while it is being typed into.
fn cell_text(value: &str, focused: bool, editing: bool) -> String {
    if focused && editing {
        format!("{}|", value)
    } else if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn render_course_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let selected = app.course_table.selected();
    let editing = app.is_editing();
    let precision = app.precision;

    let rows: Vec<Row> = app
        .courses
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let record = validate_course(&row.entry);
            let is_selected = selected == Some(idx);

            let field_cell = |field: CourseField| {
                let focused = is_selected && app.course_field == field;
                let text = cell_text(field.of(&row.entry), focused, editing);
                if focused {
                    Cell::from(text).style(theme.cell_focused)
                } else {
                    Cell::from(text)
                }
            };

            let points = match &record {
                Some(r) => format_value(r.weighted_points(), precision),
                None => "excluded".to_string(),
            };

            let mut row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };
            if record.is_none() {
                row_style = row_style.fg(theme.excluded);
            }

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                field_cell(CourseField::Name),
                field_cell(CourseField::Grade),
                field_cell(CourseField::Credits),
                Cell::from(points),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index: "99."
        Constraint::Fill(1),    // Course name
        Constraint::Length(7),  // Grade
        Constraint::Length(9),  // Credits
        Constraint::Length(10), // Weighted points
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Course", "Grade", "Credits", "Points"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected)
        .block(Block::bordered().title(" Courses "));

    frame.render_stateful_widget(table, area, &mut app.course_table);
}

fn render_semester_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let selected = app.semester_table.selected();
    let editing = app.is_editing();

    let rows: Vec<Row> = app
        .semesters
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let focused = selected == Some(idx);
            let gpa = cell_text(&row.entry.gpa, focused, editing);
            let gpa_cell = if focused {
                Cell::from(gpa).style(theme.cell_focused)
            } else {
                Cell::from(gpa)
            };

            let counted = validate_semester_gpa(&row.entry.gpa).is_some();
            let (status, status_color) = if counted {
                ("counted", theme.tone_success)
            } else if row.entry.gpa.trim().is_empty() {
                ("empty", theme.excluded)
            } else {
                ("ignored (0-10 only)", theme.tone_warning)
            };

            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(format!("Semester {}", idx + 1)),
                gpa_cell,
                Cell::from(status).style(Style::default().fg(status_color)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Semester", "GPA", "Status"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected)
        .block(Block::bordered().title(" Semesters "));

    frame.render_stateful_widget(table, area, &mut app.semester_table);
}

fn input_line<'a>(label: &'a str, value: &str, focused: bool, editing: bool, theme: &ThemeColors) -> Line<'a> {
    let text = if focused && editing {
        format!("{}|", value)
    } else if value.is_empty() {
        "enter a value".to_string()
    } else {
        value.to_string()
    };
    let style = if focused {
        theme.cell_focused
    } else if value.is_empty() {
        Style::default().fg(theme.muted)
    } else {
        Style::default()
    };
    Line::from(vec![Span::raw(label), Span::styled(text, style)])
}

fn band_span(band: &Band, theme: &ThemeColors) -> Span<'static> {
    Span::styled(
        band.label,
        Style::default().fg(theme.tone_color(band.tone)).bold(),
    )
}

fn render_converter(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editing = app.is_editing();
    let converter = &app.converter;

    let chunks = Layout::vertical([Constraint::Fill(3), Constraint::Fill(2)]).split(area);

    // GPA to percentage
    let mut lines = vec![input_line(
        "GPA (0-10):  ",
        &converter.gpa_input,
        app.converter_field == ConverterField::Gpa,
        editing,
        theme,
    )];
    lines.push(Line::from(""));
    for formula in PercentageFormula::ALL {
        let active = formula == converter.formula;
        let marker = if active { "(*) " } else { "( ) " };
        let style = if active {
            Style::default().fg(theme.title_color).bold()
        } else {
            Style::default().fg(theme.muted)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{:<8}", formula.name()), style),
            Span::styled(formula.expression(), style),
        ]));
    }
    lines.push(Line::from(""));
    if validate_gpa_input(&converter.gpa_input).is_some() {
        let percentage = converter.percentage();
        lines.push(Line::from(vec![
            Span::raw("Percentage:  "),
            Span::styled(
                format!("{}%", format_value(percentage, app.precision)),
                theme.result_value,
            ),
            Span::raw("  "),
            band_span(&classify_percentage(percentage), theme),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter a GPA between 0 and 10",
            Style::default().fg(theme.muted),
        )));
    }
    lines.push(Line::from(format!(
        "Formula used: {}",
        converter.formula.expression()
    )));
    lines.push(Line::from(Span::styled(
        converter.formula.description(),
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" GPA to Percentage ")),
        chunks[0],
    );

    // 5-point to 10-point
    let mut lines = vec![input_line(
        "CGPA (0-5):  ",
        &converter.five_point_input,
        app.converter_field == ConverterField::FivePoint,
        editing,
        theme,
    )];
    if validate_five_point_input(&converter.five_point_input).is_some() {
        lines.push(Line::from(vec![
            Span::raw("CGPA (0-10): "),
            Span::styled(
                format_value(converter.ten_point(), app.precision),
                theme.result_value,
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter a CGPA between 0 and 5",
            Style::default().fg(theme.muted),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Conversion Formula: CGPA(10) = CGPA(5) × 2",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" 5-point to 10-point ")),
        chunks[1],
    );
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = match app.tab {
        Tab::Courses => {
            let summary = app.courses.summary();
            Line::from(vec![
                Span::raw("GPA: "),
                Span::styled(format_value(summary.gpa, app.precision), theme.result_value),
                Span::raw("  "),
                band_span(&classify_gpa(summary.gpa), theme),
                Span::styled(
                    format!(
                        "   {} counted, {} credits, {} grade points",
                        summary.counted,
                        format_value(summary.total_credits, app.precision),
                        format_value(summary.total_points, app.precision),
                    ),
                    Style::default().fg(theme.muted),
                ),
            ])
        }
        Tab::Semesters => {
            let summary = app.semesters.summary();
            Line::from(vec![
                Span::raw("CGPA: "),
                Span::styled(format_value(summary.cgpa, app.precision), theme.result_value),
                Span::raw("  "),
                band_span(&classify_cgpa(summary.cgpa), theme),
                Span::styled(
                    format!(
                        "   average of {} {}",
                        summary.counted,
                        if summary.counted == 1 { "semester" } else { "semesters" }
                    ),
                    Style::default().fg(theme.muted),
                ),
            ])
        }
        Tab::Converter => {
            let percentage = app.converter.percentage();
            Line::from(vec![
                Span::raw("Percentage: "),
                Span::styled(
                    format!("{}%", format_value(percentage, app.precision)),
                    theme.result_value,
                ),
                Span::raw("   10-point CGPA: "),
                Span::styled(
                    format_value(app.converter.ten_point(), app.precision),
                    theme.result_value,
                ),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line).block(Block::bordered()), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Cannot") {
            theme.flash_error
        } else if msg.starts_with("Cleared") {
            theme.flash_success
        } else {
            theme.muted
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: Vec<(&str, &str)> = match (app.is_editing(), app.tab) {
            (true, _) => vec![("Enter", ":done "), ("Esc", ":cancel "), ("Bksp", ":delete")],
            (false, Tab::Courses) => vec![
                ("j/k", ":row "),
                ("h/l", ":field "),
                ("e", ":edit "),
                ("g/G", ":grade "),
                ("c", ":credits "),
                ("a", ":add "),
                ("d", ":remove "),
                ("x", ":clear "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            (false, Tab::Semesters) => vec![
                ("j/k", ":row "),
                ("e", ":edit "),
                ("a", ":add "),
                ("d", ":remove "),
                ("x", ":clear "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            (false, Tab::Converter) => vec![
                ("j/k", ":input "),
                ("e", ":edit "),
                ("f", ":formula "),
                ("x", ":clear "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

const HELP_KEYS: [(&str, &str); 15] = [
    ("Tab / 1 2 3  ", "Switch calculator"),
    ("j / Down     ", "Next row or input"),
    ("k / Up       ", "Previous row or input"),
    ("h / l        ", "Previous / next column"),
    ("Enter / e    ", "Edit focused field"),
    ("Esc          ", "Cancel edit"),
    ("g / G        ", "Next / previous grade"),
    ("c            ", "Next credit value"),
    ("a            ", "Add row"),
    ("d / Delete   ", "Remove row"),
    ("x            ", "Clear sheet or input"),
    ("f            ", "Next percentage formula"),
    ("?            ", "Show/hide this help"),
    ("q / Ctrl-c   ", "Quit"),
    ("             ", "Blank rows are left out"),
];

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, HELP_KEYS.len() as u16 + 4, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let mut help_lines: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(theme.status_key_color).bold()),
                Span::raw(*action),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::grading::CourseEntry;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(&Config::default(), ThemeColors::dark())
    }

    #[test]
    fn test_course_tab_shows_gpa() {
        let mut app = app();
        app.courses
            .update(1, |c| {
                c.grade = "A".to_string();
                c.credits = "4".to_string();
            })
            .unwrap();
        let screen = render(&mut app);
        assert!(screen.contains("Academic Ace"));
        assert!(screen.contains("GPA: 8.00"));
        assert!(screen.contains("Very Good"));
    }

    #[test]
    fn test_fractional_credit_totals_are_rounded() {
        let mut app = app();
        app.courses
            .update(1, |c| *c = CourseEntry::new("", "A", "0.1"))
            .unwrap();
        let id = app.courses.add();
        app.courses
            .update(id, |c| *c = CourseEntry::new("", "A", "0.2"))
            .unwrap();
        let screen = render(&mut app);
        assert!(screen.contains("0.30 credits, 2.40 grade points"));
        assert!(!screen.contains("0000"));
    }

    #[test]
    fn test_single_semester_wording() {
        let mut app = app();
        app.select_tab(Tab::Semesters);
        app.semesters.update(1, |s| s.gpa = "9".to_string()).unwrap();
        let screen = render(&mut app);
        assert!(screen.contains("average of 1 semester"));
        assert!(!screen.contains("1 semesters"));
    }

    #[test]
    fn test_blank_course_row_is_excluded() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("excluded"));
        assert!(screen.contains("GPA: 0.00"));
    }

    #[test]
    fn test_converter_tab() {
        let mut app = app();
        app.select_tab(Tab::Converter);
        app.converter.gpa_input = "8.5".to_string();
        app.converter.five_point_input = "4.2".to_string();
        let screen = render(&mut app);
        assert!(screen.contains("85.00%"));
        assert!(screen.contains("A Grade"));
        assert!(screen.contains("8.40"));
    }

    #[test]
    fn test_help_popup() {
        let mut app = app();
        app.show_help();
        let screen = render(&mut app);
        assert!(screen.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_small_terminal() {
        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = app();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Terminal too small"));
    }
}
