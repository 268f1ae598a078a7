//! Command-line parsing and validation helpers.

mod validation;

pub use validation::{load_init, validate};

use clap::Parser;
use std::path::PathBuf;

use crate::cell::state::CellMode;

/// CLI options for the cell engine. Validated values keep the session loop
/// total over whatever the host feeds it.
#[derive(Debug, Parser, Clone)]
#[command(about = "Vibe smart-cell client engine", author, version)]
pub struct AppConfig {
    /// Cell flavor: conversational chat or code generation
    #[arg(long, value_enum, default_value_t = CellMode::Chat)]
    pub mode: CellMode,

    /// Inline JSON initial payload from the host
    #[arg(long = "init", value_name = "JSON")]
    pub init: Option<String>,

    /// Read the initial payload from a JSON file instead
    #[arg(long = "init-file", value_name = "PATH")]
    pub init_file: Option<PathBuf>,

    /// Write the rendered markup here after every redraw
    #[arg(long = "render-file", value_name = "PATH")]
    pub render_file: Option<PathBuf>,

    /// Enable trace logging
    #[arg(long = "logs", env = "VIBECELL_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "VIBECELL_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow user content (prompts, chunks) in trace logs
    #[arg(
        long = "log-content",
        env = "VIBECELL_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,
}
