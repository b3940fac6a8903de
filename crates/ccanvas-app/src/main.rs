//! Main application entry point.

use ccanvas_app::{App, AppConfig, AppError, Cli, ShortcutRegistry};
use ccanvas_core::{load_document, CanvasSession};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Help and version requests are not failures.
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.to_config()?;
    let mut session = CanvasSession::new(&config)?;

    // A bad seed file stops the run before any window opens.
    if let Some(input) = &config.input {
        session.seed(&load_document(input)?);
    }

    log::info!("Starting ccanvas");
    ShortcutRegistry::log_all(config.line_count);

    pollster::block_on(App::run(session, AppConfig::default()))
}
