//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;
use tracing::debug;

use crate::config::ThemeMode;
use crate::grading::Tone;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Band colors, one per tone
    pub tone_success: Color,
    pub tone_info: Color,
    pub tone_accent: Color,
    pub tone_caution: Color,
    pub tone_warning: Color,
    pub tone_danger: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub excluded: Color,
    pub header_style: Style,
    pub row_selected: Style,
    pub cell_focused: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub result_value: Style,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            tone_success: Color::Green,
            tone_info: Color::Blue,
            tone_accent: Color::Magenta,
            tone_caution: Color::Yellow,
            tone_warning: Color::Rgb(255, 150, 50),
            tone_danger: Color::Red,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            excluded: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().bg(Color::Indexed(238)),
            cell_focused: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            result_value: Style::new().fg(Color::Cyan).bold(),
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            tone_success: Color::Rgb(22, 130, 60),
            tone_info: Color::Rgb(30, 90, 200),
            tone_accent: Color::Rgb(90, 60, 190),
            tone_caution: Color::Rgb(170, 120, 0),
            tone_warning: Color::Rgb(200, 100, 20),
            tone_danger: Color::Rgb(190, 30, 30),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Gray,
            excluded: Color::Gray,
            header_style: Style::new().bold(),
            row_selected: Style::new().bg(Color::Indexed(252)),
            cell_focused: Style::new().reversed(),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            result_value: Style::new().fg(Color::Blue).bold(),
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Gray),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(22, 130, 60),
            flash_error: Color::Rgb(190, 30, 30),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    /// Color for a classification band
    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.tone_success,
            Tone::Info => self.tone_info,
            Tone::Accent => self.tone_accent,
            Tone::Caution => self.tone_caution,
            Tone::Warning => self.tone_warning,
            Tone::Danger => self.tone_danger,
        }
    }
}

/// Pick the palette for the configured mode. `Auto` asks the terminal for
/// its background luminance and falls back to dark when it cannot tell.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => {
                debug!(luma, "light terminal background detected");
                ThemeColors::light()
            }
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                debug!(error = %e, "could not detect terminal background");
                ThemeColors::dark()
            }
        },
    }
}
