//! Command line configuration

use std::path::PathBuf;

use clap::Parser;

use super::Step;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Trolley cart configuration
#[derive(Debug, Parser)]
#[command(
    name = "trolley",
    about = "Load a cart fixture, replay cart gestures and print the cart",
    long_about = None
)]
pub struct Config {
    /// Directory holding `products/` and `carts/` fixture files
    #[arg(short, long, env = "TROLLEY_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set to load
    #[arg(short, long, env = "TROLLEY_SET", default_value = "plants")]
    pub set: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "TROLLEY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Steps to replay in order: `add:<product key>`, `increment:<name>`, `decrement:<name>`,
    /// `remove:<name>`, `continue` or `checkout`
    #[arg(value_name = "STEP")]
    pub steps: Vec<Step>,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
