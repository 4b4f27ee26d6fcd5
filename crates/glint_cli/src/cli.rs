use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(version, about = "Render a JSON scene description with the Glint ray tracer")]
pub struct Args {
    /// Scene description file (JSON)
    pub scene: PathBuf,

    /// Output image; `.bmp` uses the built-in encoder, other extensions go through `image`
    #[arg(short, long, default_value = "output.bmp")]
    pub output: PathBuf,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Override the maximum reflection/refraction depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Logging level; when omitted `RUST_LOG` is used, falling back to info
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}
