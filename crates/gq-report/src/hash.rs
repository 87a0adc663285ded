//! Content-based hashing for analysis IDs.

use gq_gas::{Composition, ReferenceConditions, RuleSet, UnitSystem};
use sha2::{Digest, Sha256};

/// Derive the analysis ID from everything that determines the record:
/// composition, rule set, reference conditions, and output unit system.
/// Metadata is deliberately excluded so re-running the same gas under
/// the same rules hits the same record.
pub fn compute_analysis_id(
    composition: &Composition,
    rules: &RuleSet,
    conditions: &ReferenceConditions,
    unit_system: UnitSystem,
) -> String {
    let mut hasher = Sha256::new();

    for (species, fraction) in composition.iter() {
        hasher.update(format!("{}={:.12e};", species.key(), fraction).as_bytes());
    }

    let rules_json = serde_json::to_string(rules).unwrap_or_default();
    hasher.update(rules_json.as_bytes());

    hasher.update(
        format!(
            "{:.6}K|{:.6}kPa|{:?}",
            conditions.temperature_k(),
            conditions.pressure_kpa(),
            unit_system
        )
        .as_bytes(),
    );

    let result = hasher.finalize();
    format!("{:x}", result)
}
