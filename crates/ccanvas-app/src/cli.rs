use ccanvas_core::config::{has_json_extension, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_EXTENT};
use ccanvas_core::{CanvasConfig, ConfigError, DEFAULT_OUTPUT, MAX_LINES};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// command-line interface for the coordinate digitizer
#[derive(Parser, Debug, Clone)]
#[command(name = "ccanvas", version)]
#[command(about = "Click points on a blank canvas and save them as JSON coordinates")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// number of lines to capture, selected with keys 1 to N
    #[arg(value_parser = clap::value_parser!(u8).range(1..=MAX_LINES as i64))]
    pub line_count: u8,

    /// canvas width in data units
    #[arg(short, long, default_value_t = DEFAULT_WIDTH, value_parser = parse_extent)]
    pub width: f64,

    /// canvas height in data units
    #[arg(short, long, default_value_t = DEFAULT_HEIGHT, value_parser = parse_extent)]
    pub height: f64,

    /// existing JSON file to resume from
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON file to write on exit
    #[arg(short, long, default_value = DEFAULT_OUTPUT, value_parser = parse_output)]
    pub output: PathBuf,

    /// print help
    #[arg(long = "help", action = ArgAction::Help)]
    _help: Option<bool>,
}

impl Cli {
    /// Validated run configuration.
    pub fn to_config(&self) -> Result<CanvasConfig, ConfigError> {
        CanvasConfig::new(
            self.width,
            self.height,
            self.line_count as usize,
            self.input.clone(),
            self.output.clone(),
        )
    }
}

fn parse_extent(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if value.is_finite() && value >= MIN_EXTENT {
        Ok(value)
    } else {
        Err(format!("must be at least {}", MIN_EXTENT))
    }
}

fn parse_output(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if has_json_extension(&path) {
        Ok(path)
    } else {
        Err("must be a .json file".to_string())
    }
}
