//! Error types for the gq-cli front-end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read input file: {path}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse input file: {path}")]
    InputParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Composition error: {0}")]
    Composition(#[from] gq_gas::CompositionError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] gq_gas::CalculationError),

    #[error("Rule set error: {0}")]
    Rules(#[from] gq_gas::RuleSetError),

    #[error("Report error: {0}")]
    Report(#[from] gq_report::ReportError),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
