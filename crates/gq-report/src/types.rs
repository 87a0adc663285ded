//! Analysis record types.

use gq_gas::{Classification, Composition, GasProperties, Severity, UnitSystem, Verdict};
use serde::{Deserialize, Serialize};

pub type AnalysisId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub project: String,
    pub gas_source: String,
    pub analyst: String,
    pub timestamp: String,
}

impl AnalysisMetadata {
    pub fn now(project: &str, gas_source: &str, analyst: &str) -> Self {
        Self {
            project: project.to_string(),
            gas_source: gas_source.to_string(),
            analyst: analyst.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionRow {
    pub species: String,
    pub formula: String,
    pub name: String,
    pub mole_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRow {
    pub key: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
}

/// Violated rule snapshot; measured value and bounds are in SI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationRow {
    pub rule: String,
    pub measured: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: AnalysisId,
    pub metadata: AnalysisMetadata,
    pub unit_system: UnitSystem,
    pub was_normalized: bool,
    pub composition: Vec<CompositionRow>,
    pub properties: Vec<PropertyRow>,
    pub classification: Classification,
    pub violations: Vec<ViolationRow>,
}

/// Flatten one completed analysis into its storage record.
///
/// The property table is rendered in `unit_system`; composition rows
/// keep canonical species keys so records stay comparable.
pub fn build_record(
    analysis_id: AnalysisId,
    metadata: AnalysisMetadata,
    composition: &Composition,
    properties: &GasProperties,
    verdict: &Verdict,
    unit_system: UnitSystem,
) -> AnalysisRecord {
    let composition_rows = composition
        .iter()
        .map(|(species, fraction)| CompositionRow {
            species: species.key().to_string(),
            formula: species.formula().to_string(),
            name: species.display_name().to_string(),
            mole_pct: fraction * 100.0,
        })
        .collect();

    let property_rows = properties
        .render(unit_system)
        .entries
        .into_iter()
        .map(|entry| PropertyRow {
            key: entry.key.to_string(),
            name: entry.name.to_string(),
            value: entry.value,
            unit: entry.unit.to_string(),
        })
        .collect();

    let violation_rows = verdict
        .violations
        .iter()
        .map(|v| ViolationRow {
            rule: v.rule.clone(),
            measured: v.measured,
            min: v.min,
            max: v.max,
            severity: v.severity,
        })
        .collect();

    AnalysisRecord {
        analysis_id,
        metadata,
        unit_system,
        was_normalized: composition.was_normalized(),
        composition: composition_rows,
        properties: property_rows,
        classification: verdict.classification,
        violations: violation_rows,
    }
}
