use anyhow::Result;
use clap::Parser;

use vibecell::config::{self, AppConfig};

fn main() -> Result<()> {
    let config = AppConfig::parse();
    config::validate(&config)?;
    vibecell::telemetry::init_tracing(&config);
    let init = config::load_init(&config)?;
    vibecell::run_cell_mode(&config, init)
}
