pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tracing::debug;

use app::{InputMode, Tab};

pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);
    debug!("tui started");

    let result = (|| -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(&mut app, key),
                Event::Tick => app.update_flash(),
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Tab switching
            KeyCode::Tab => app.next_tab(),
            KeyCode::BackTab => app.previous_tab(),
            KeyCode::Char('1') => app.select_tab(Tab::Courses),
            KeyCode::Char('2') => app.select_tab(Tab::Semesters),
            KeyCode::Char('3') => app.select_tab(Tab::Converter),

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            KeyCode::Char('l') | KeyCode::Right => app.next_field(),
            KeyCode::Char('h') | KeyCode::Left => app.previous_field(),

            // Editing
            KeyCode::Enter | KeyCode::Char('e') => app.start_editing(),
            KeyCode::Char('g') => app.cycle_grade(true),
            KeyCode::Char('G') => app.cycle_grade(false),
            KeyCode::Char('c') => app.cycle_credits(),
            KeyCode::Char('f') => app.cycle_formula(),

            // Rows
            KeyCode::Char('a') => app.add_row(),
            KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
            KeyCode::Char('x') => app.clear_current(),

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        InputMode::Editing { .. } => match key.code {
            KeyCode::Enter | KeyCode::Tab => app.confirm_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.pop_char(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.cancel_editing();
                app.should_quit = true;
            }
            KeyCode::Char(c) => app.push_char(c),

            // Ignore all other keys (don't propagate to Normal mode)
            _ => {}
        },
        InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
