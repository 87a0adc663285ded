//! Analysis record storage API.

use crate::types::AnalysisRecord;
use crate::{ReportError, ReportResult};
use std::fs;
use std::path::PathBuf;

#[derive(Clone)]
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    pub fn new(root_dir: PathBuf) -> ReportResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn record_dir(&self, analysis_id: &str) -> PathBuf {
        self.root_dir.join(analysis_id)
    }

    pub fn has_record(&self, analysis_id: &str) -> bool {
        self.record_dir(analysis_id).join("record.json").exists()
    }

    /// Write the record as pretty JSON plus a flat CSV property table
    /// for spreadsheet import.
    pub fn save_record(&self, record: &AnalysisRecord) -> ReportResult<()> {
        let record_dir = self.record_dir(&record.analysis_id);
        fs::create_dir_all(&record_dir)?;

        let record_path = record_dir.join("record.json");
        let record_json = serde_json::to_string_pretty(record)?;
        fs::write(record_path, record_json)?;

        let csv_path = record_dir.join("properties.csv");
        let mut csv = String::from("key,name,value,unit\n");
        for row in &record.properties {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                row.key, row.name, row.value, row.unit
            ));
        }
        fs::write(csv_path, csv)?;

        tracing::debug!(analysis_id = %record.analysis_id, "saved analysis record");
        Ok(())
    }

    pub fn load_record(&self, analysis_id: &str) -> ReportResult<AnalysisRecord> {
        let record_path = self.record_dir(analysis_id).join("record.json");

        if !record_path.exists() {
            return Err(ReportError::AnalysisNotFound {
                analysis_id: analysis_id.to_string(),
            });
        }

        let content = fs::read_to_string(record_path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }

    pub fn list_records(&self) -> ReportResult<Vec<AnalysisRecord>> {
        let mut records = Vec::new();

        if !self.root_dir.exists() {
            return Ok(records);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let analysis_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(record) = self.load_record(&analysis_id) {
                    records.push(record);
                }
            }
        }

        Ok(records)
    }

    pub fn delete_record(&self, analysis_id: &str) -> ReportResult<()> {
        let record_dir = self.record_dir(analysis_id);
        if record_dir.exists() {
            fs::remove_dir_all(record_dir)?;
        }
        Ok(())
    }
}
