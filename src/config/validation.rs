use anyhow::{bail, Context, Result};
use std::fs;

use crate::ipc::protocol::InitPayload;

use super::AppConfig;

/// Reject flag combinations the session loop cannot honor.
pub fn validate(config: &AppConfig) -> Result<()> {
    if config.init.is_some() && config.init_file.is_some() {
        bail!("--init and --init-file are mutually exclusive");
    }
    Ok(())
}

/// Load the initial host payload from the configured source. Without one the
/// cell starts empty and waits for host events.
pub fn load_init(config: &AppConfig) -> Result<InitPayload> {
    if let Some(raw) = &config.init {
        return serde_json::from_str(raw).context("parsing --init payload");
    }
    if let Some(path) = &config.init_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading init payload from {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("parsing init payload from {}", path.display()));
    }
    Ok(InitPayload::default())
}
