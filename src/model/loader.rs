//! Model loading.
//!
//! Models are stored as JSON and validated before the engine accepts them;
//! a load failure is surfaced once at startup, never per parse call.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};

use crate::model::ParserModel;

/// Load and validate a parser model from a JSON file
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ParserModel> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(anyhow!("Model file not found: {}", path.display()));
    }

    let json = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read model file {}: {}", path.display(), e))?;

    let model: ParserModel = serde_json::from_str(&json)
        .map_err(|e| anyhow!("Invalid model file {}: {}", path.display(), e))?;

    model
        .validate()
        .map_err(|e| anyhow!("Model {} failed validation: {}", path.display(), e))?;

    log::info!(
        "Loaded model '{}' ({} tags, {} lexicon entries)",
        model.name,
        model.tag_set.len(),
        model.tagger.lexicon.len()
    );
    Ok(model)
}

/// Save a model to a JSON file
pub fn save_model<P: AsRef<Path>>(model: &ParserModel, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(model)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}
