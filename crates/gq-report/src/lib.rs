//! gq-report: analysis record storage and content-based analysis IDs.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_analysis_id;
pub use store::ReportStore;
pub use types::*;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Analysis not found: {analysis_id}")]
    AnalysisNotFound { analysis_id: String },
}
