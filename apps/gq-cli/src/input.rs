//! YAML input schema for analysis requests.
//!
//! File-format concerns stay here; the core crates take validated
//! slices and options.

use crate::error::{AppError, AppResult};
use gq_gas::ValidateOptions;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub analyst: String,
    pub composition: Vec<ComponentRow>,
    #[serde(default)]
    pub options: InputOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentRow {
    pub species: String,
    pub mole_percent: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    pub auto_normalize: bool,
}

pub fn load_input(path: &Path) -> AppResult<AnalysisInput> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let input: AnalysisInput =
        serde_yaml::from_str(&content).map_err(|source| AppError::InputParse {
            path: path.to_path_buf(),
            source,
        })?;

    if input.composition.is_empty() {
        return Err(AppError::InvalidInput(
            "composition list is empty".to_string(),
        ));
    }
    Ok(input)
}

impl AnalysisInput {
    pub fn raw_components(&self) -> Vec<(&str, f64)> {
        self.composition
            .iter()
            .map(|row| (row.species.as_str(), row.mole_percent))
            .collect()
    }

    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            auto_normalize: self.options.auto_normalize,
            ..ValidateOptions::default()
        }
    }
}
