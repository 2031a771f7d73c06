//! Baseline state persistence.
//!
//! The baseline is a single JSON file, read once at the start of a run and
//! rewritten in full at the end. A missing file means first run; a present
//! but unparsable file is fatal rather than silently discarded.

use std::path::Path;

use guidewatch_shared::{BaselineState, GuidewatchError, Result};

/// Load the baseline state. `None` means no baseline exists (first run).
pub fn load_state(path: &Path) -> Result<Option<BaselineState>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| GuidewatchError::io(path, e))?;
    let state = serde_json::from_str(&content).map_err(|e| {
        GuidewatchError::parse(format!("invalid state file {}: {e}", path.display()))
    })?;
    Ok(Some(state))
}

/// Write the baseline state, creating parent directories as needed.
pub fn save_state(path: &Path, state: &BaselineState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| GuidewatchError::io(parent, e))?;
        }
    }

    let content = serde_json::to_string_pretty(state)
        .map_err(|e| GuidewatchError::parse(format!("state serialization failed: {e}")))?;
    std::fs::write(path, content).map_err(|e| GuidewatchError::io(path, e))
}
