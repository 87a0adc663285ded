//! Analysis errors.

use thiserror::Error;

use crate::species::Species;

/// Result type for composition validation.
pub type CompositionResult<T> = Result<T, CompositionError>;

/// Result type for property calculations.
pub type CalcResult<T> = Result<T, CalculationError>;

/// Errors raised while turning raw user input into a valid composition.
///
/// Every variant names the offending entry so the caller can point the
/// user at the exact field to fix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionError {
    /// No components with a positive fraction.
    #[error("Composition is empty")]
    Empty,

    /// Species key not recognized or absent from the active reference table.
    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    /// NaN or infinite fraction.
    #[error("Non-finite fraction for {species}")]
    NonFiniteFraction { species: String },

    /// Negative fraction.
    #[error("Negative fraction for {species}: {value}")]
    NegativeFraction { species: String, value: f64 },

    /// Mole fractions do not sum close enough to 1.
    #[error("Mole fractions sum to {sum} (allowed deviation from 1: {tolerance})")]
    SumOutOfTolerance { sum: f64, tolerance: f64 },
}

/// Errors raised while deriving gas properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Species present in the composition but missing from the property table.
    #[error("No reference data for species {}", .species.key())]
    MissingSpeciesData { species: Species },

    /// Non-physical intermediate value (zero molar mass, negative density, ...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Reference temperature or pressure outside the physical range.
    #[error("Invalid reference conditions: {what}")]
    InvalidConditions { what: &'static str },
}
