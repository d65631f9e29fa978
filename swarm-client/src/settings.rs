use std::path::Path;

use anyhow::{Context, Result};
use swarm_shared::SteeringSettings;

/// Reads steering settings from a JSON file. Missing fields take defaults,
/// non-finite weights are replaced.
pub fn load_settings(path: &Path) -> Result<SteeringSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    let settings: SteeringSettings = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings {}", path.display()))?;
    Ok(settings.sanitized())
}
