//! ccanvas Application
//!
//! The application shell: command line, window, input translation and the
//! render loop around a capture session.

mod app;
mod cli;
mod shortcuts;

pub use app::{App, AppConfig, AppError};
pub use cli::Cli;
pub use shortcuts::{Shortcut, ShortcutRegistry};
