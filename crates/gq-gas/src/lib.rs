//! gq-gas: fuel-gas quality analysis for gasqual.
//!
//! Provides:
//! - Species definitions for the natural-gas analysis envelope
//! - Per-species reference property table (substitutable)
//! - Composition validation and normalization
//! - Derived property calculations (density, heating values, Wobbe, Z)
//! - Rule-based turbine suitability evaluation
//! - SI / US-customary report rendering
//!
//! # Architecture
//!
//! The pipeline is three pure functions: [`validate_composition`] turns
//! raw percent input into a normalized [`Composition`];
//! [`compute_properties`] derives a [`GasProperties`] block in SI from a
//! [`SpeciesTable`]; [`evaluate_suitability`] checks the result against a
//! data-driven [`RuleSet`]. Each stage is total over the outputs of the
//! previous one, so callers compose them with `?` and nothing else.
//!
//! # Example
//!
//! ```
//! use gq_gas::{
//!     Classification, ReferenceConditions, RuleSet, UnitSystem, ValidateOptions,
//!     compute_properties, evaluate_suitability, find_preset, reference_table,
//!     validate_composition,
//! };
//!
//! let preset = find_preset("pipeline").unwrap();
//! let table = reference_table();
//! let comp = validate_composition(preset.components, &table, &ValidateOptions::default())
//!     .unwrap();
//! let props = compute_properties(&comp, &table, &ReferenceConditions::normal()).unwrap();
//! let verdict = evaluate_suitability(&props, &RuleSet::turbine_default());
//!
//! assert_eq!(verdict.classification, Classification::Suitable);
//! for entry in props.render(UnitSystem::Si).entries {
//!     println!("{:<28} {:>12.4} {}", entry.name, entry.value, entry.unit);
//! }
//! ```

pub mod composition;
pub mod error;
pub mod presets;
pub mod properties;
pub mod species;
pub mod suitability;
pub mod table;
pub mod units;

// Re-exports for ergonomics
pub use composition::{Composition, ValidateOptions, validate_composition};
pub use error::{CalcResult, CalculationError, CompositionError, CompositionResult};
pub use presets::{Preset, all_presets, find_preset};
pub use properties::{
    GasProperties, PropertyReport, ReferenceConditions, ReportedProperty, compute_properties,
};
pub use species::Species;
pub use suitability::{
    Classification, Rule, RuleProperty, RuleSet, RuleSetError, Severity, Verdict, Violation,
    evaluate_suitability,
};
pub use table::{SpeciesRecord, SpeciesTable, reference_table};
pub use units::{PropertyUnit, UnitSystem, convert, unit_label};
