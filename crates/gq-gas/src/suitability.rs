//! Turbine-suitability rules and verdicts.
//!
//! The rule set is plain data: each rule binds one computed property to
//! an allowed band and a severity. Swapping the table swaps the turbine
//! model; no evaluator change needed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::properties::GasProperties;
use crate::units::PropertyUnit;

/// Computed property a rule can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleProperty {
    WobbeLower,
    LhvVolumetric,
    SpecificGravity,
    MethaneNumber,
    HydrogenContent,
    InertContent,
    HeavyHydrocarbonContent,
    H2sContent,
    ZFactor,
}

impl RuleProperty {
    /// Pull the measured value out of computed properties (SI).
    pub fn measured(&self, props: &GasProperties) -> f64 {
        match self {
            RuleProperty::WobbeLower => props.wobbe_lower_mj_m3,
            RuleProperty::LhvVolumetric => props.lhv_vol_mj_m3,
            RuleProperty::SpecificGravity => props.specific_gravity,
            RuleProperty::MethaneNumber => props.methane_number,
            RuleProperty::HydrogenContent => props.hydrogen_mol_pct,
            RuleProperty::InertContent => props.inerts_mol_pct,
            RuleProperty::HeavyHydrocarbonContent => props.heavies_mol_pct,
            RuleProperty::H2sContent => props.h2s_ppmv,
            RuleProperty::ZFactor => props.z_factor,
        }
    }

    /// Dimension of the constrained quantity (for display).
    pub fn unit(&self) -> PropertyUnit {
        match self {
            RuleProperty::WobbeLower | RuleProperty::LhvVolumetric => {
                PropertyUnit::EnergyPerVolume
            }
            RuleProperty::SpecificGravity
            | RuleProperty::MethaneNumber
            | RuleProperty::ZFactor => PropertyUnit::Dimensionless,
            RuleProperty::HydrogenContent
            | RuleProperty::InertContent
            | RuleProperty::HeavyHydrocarbonContent => PropertyUnit::MolePercent,
            RuleProperty::H2sContent => PropertyUnit::PartsPerMillion,
        }
    }
}

/// How a violated rule affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Violation caps the verdict at Marginal.
    Soft,
    /// Violation forces Unsuitable.
    Hard,
}

/// One acceptance rule: property must lie in [min, max].
///
/// A missing bound is unbounded on that side. Bounds are in SI units of
/// the property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub property: RuleProperty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub severity: Severity,
}

impl Rule {
    /// Check a measured value against this rule's band.
    ///
    /// NaN never passes, so a corrupt measurement can only fail a rule.
    pub fn passes(&self, measured: f64) -> bool {
        let above_min = self.min.map_or(true, |m| measured >= m);
        let below_max = self.max.map_or(true, |m| measured <= m);
        above_min && below_max
    }
}

/// Ordered list of acceptance rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

/// Errors in a rule-set definition.
#[derive(Error, Debug)]
pub enum RuleSetError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Duplicate rule name: {name}")]
    DuplicateName { name: String },

    #[error("Invalid rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },

    #[error("Rule set is empty")]
    Empty,
}

impl RuleSet {
    /// Parse and validate a rule set from YAML.
    pub fn from_yaml(text: &str) -> Result<Self, RuleSetError> {
        let set: RuleSet = serde_yaml::from_str(text)?;
        set.validate()?;
        Ok(set)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, RuleSetError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Structural checks: unique names, finite and ordered bounds.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.rules.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut seen = std::collections::HashSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err(RuleSetError::InvalidRule {
                    name: format!("{:?}", rule.property),
                    reason: "name must not be empty".to_string(),
                });
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(RuleSetError::DuplicateName {
                    name: rule.name.clone(),
                });
            }
            for bound in [rule.min, rule.max].into_iter().flatten() {
                if !bound.is_finite() {
                    return Err(RuleSetError::InvalidRule {
                        name: rule.name.clone(),
                        reason: format!("bound {} is not finite", bound),
                    });
                }
            }
            if rule.min.is_none() && rule.max.is_none() {
                return Err(RuleSetError::InvalidRule {
                    name: rule.name.clone(),
                    reason: "at least one bound is required".to_string(),
                });
            }
            if let (Some(min), Some(max)) = (rule.min, rule.max)
                && min > max
            {
                return Err(RuleSetError::InvalidRule {
                    name: rule.name.clone(),
                    reason: format!("min {} exceeds max {}", min, max),
                });
            }
        }
        Ok(())
    }

    /// Default acceptance window for a heavy-duty gas turbine burning
    /// pipeline-quality natural gas (SI; Wobbe/LHV at normal conditions).
    pub fn turbine_default() -> Self {
        fn rule(
            name: &str,
            property: RuleProperty,
            min: Option<f64>,
            max: Option<f64>,
            severity: Severity,
        ) -> Rule {
            Rule {
                name: name.to_string(),
                property,
                min,
                max,
                severity,
            }
        }

        Self {
            rules: vec![
                rule(
                    "Wobbe Index (L)",
                    RuleProperty::WobbeLower,
                    Some(47.0),
                    Some(51.0),
                    Severity::Hard,
                ),
                rule(
                    "LHV (volume)",
                    RuleProperty::LhvVolumetric,
                    Some(32.0),
                    Some(40.0),
                    Severity::Hard,
                ),
                rule(
                    "Specific Gravity",
                    RuleProperty::SpecificGravity,
                    Some(0.55),
                    Some(0.75),
                    Severity::Soft,
                ),
                rule(
                    "Methane Number",
                    RuleProperty::MethaneNumber,
                    Some(80.0),
                    None,
                    Severity::Soft,
                ),
                rule(
                    "H2 Content",
                    RuleProperty::HydrogenContent,
                    None,
                    Some(5.0),
                    Severity::Soft,
                ),
                rule(
                    "Inerts",
                    RuleProperty::InertContent,
                    None,
                    Some(10.0),
                    Severity::Soft,
                ),
                rule(
                    "Heavy Hydrocarbons (C4+)",
                    RuleProperty::HeavyHydrocarbonContent,
                    None,
                    Some(2.0),
                    Severity::Soft,
                ),
                rule(
                    "H2S Content",
                    RuleProperty::H2sContent,
                    None,
                    Some(5.0),
                    Severity::Hard,
                ),
                rule(
                    "Compressibility Factor",
                    RuleProperty::ZFactor,
                    Some(0.95),
                    Some(1.05),
                    Severity::Soft,
                ),
            ],
        }
    }
}

/// Final three-way classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Suitable,
    Marginal,
    Unsuitable,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Suitable => write!(f, "Suitable"),
            Classification::Marginal => write!(f, "Marginal"),
            Classification::Unsuitable => write!(f, "Unsuitable"),
        }
    }
}

/// One violated rule with the offending value and allowed band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub property: RuleProperty,
    pub measured: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub severity: Severity,
}

/// Evaluation result: classification plus every violated rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub classification: Classification,
    pub violations: Vec<Violation>,
}

/// Evaluate every rule against the computed properties.
///
/// Total and deterministic: all rules are checked (no short-circuit),
/// violations come out in rule-set order, and equal inputs give equal
/// verdicts. Any hard violation forces Unsuitable; otherwise any soft
/// violation gives Marginal.
pub fn evaluate_suitability(props: &GasProperties, rules: &RuleSet) -> Verdict {
    let mut classification = Classification::Suitable;
    let mut violations = Vec::new();

    for rule in &rules.rules {
        let measured = rule.property.measured(props);
        if rule.passes(measured) {
            continue;
        }
        classification = match rule.severity {
            Severity::Hard => Classification::Unsuitable,
            Severity::Soft => {
                if classification == Classification::Unsuitable {
                    Classification::Unsuitable
                } else {
                    Classification::Marginal
                }
            }
        };
        violations.push(Violation {
            rule: rule.name.clone(),
            property: rule.property,
            measured,
            min: rule.min,
            max: rule.max,
            severity: rule.severity,
        });
    }

    Verdict {
        classification,
        violations,
    }
}
