pub mod config;
pub mod grading;
pub mod logging;
pub mod output;
pub mod session;
pub mod stderr_buffer;
pub mod tui;
