//! SI / US-customary rendering of computed quantities.
//!
//! Properties are computed and stored in SI; conversion happens only at
//! the reporting edge. US factors derive from the exact definitions of
//! the pound, the IT Btu and the cubic foot, so a value converted out
//! and back differs only by float rounding.

use serde::{Deserialize, Serialize};

/// Target unit system for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Si,
    Us,
}

impl std::str::FromStr for UnitSystem {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "si" | "metric" => Ok(UnitSystem::Si),
            "us" | "imperial" => Ok(UnitSystem::Us),
            _ => Err("unknown unit system (expected 'si' or 'us')"),
        }
    }
}

/// Dimension of a reported quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyUnit {
    Dimensionless,
    /// g/mol vs lb/lbmol (numerically identical).
    MolarMass,
    /// kg/m3 vs lb/ft3.
    Density,
    /// MJ/kg vs Btu/lb.
    EnergyPerMass,
    /// MJ/m3 vs Btu/ft3.
    EnergyPerVolume,
    /// degC vs degF (affine).
    Temperature,
    /// K vs degR.
    AbsoluteTemperature,
    /// kPa vs psia.
    Pressure,
    /// kg air / kg fuel vs lb air / lb fuel (numerically identical).
    MassRatio,
    /// Pass-through on conversion.
    MolePercent,
    /// Pass-through on conversion.
    PartsPerMillion,
}

const KG_PER_LB: f64 = 0.453_592_37;
const J_PER_BTU: f64 = 1_055.055_852_62;
const M3_PER_FT3: f64 = 0.028_316_846_592;
const KPA_PER_PSI: f64 = 6.894_757_293_168_361;

/// Convert a value between unit systems.
pub fn convert(value: f64, unit: PropertyUnit, from: UnitSystem, to: UnitSystem) -> f64 {
    if from == to {
        return value;
    }
    let us_per_si = match unit {
        PropertyUnit::Dimensionless
        | PropertyUnit::MolarMass
        | PropertyUnit::MassRatio
        | PropertyUnit::MolePercent
        | PropertyUnit::PartsPerMillion => 1.0,
        // kg/m3 -> lb/ft3
        PropertyUnit::Density => M3_PER_FT3 / KG_PER_LB,
        // MJ/kg -> Btu/lb
        PropertyUnit::EnergyPerMass => 1e6 * KG_PER_LB / J_PER_BTU,
        // MJ/m3 -> Btu/ft3
        PropertyUnit::EnergyPerVolume => 1e6 * M3_PER_FT3 / J_PER_BTU,
        // K -> degR
        PropertyUnit::AbsoluteTemperature => 1.8,
        // kPa -> psia
        PropertyUnit::Pressure => 1.0 / KPA_PER_PSI,
        // degC <-> degF is affine, not a pure factor
        PropertyUnit::Temperature => {
            return match to {
                UnitSystem::Us => value * 1.8 + 32.0,
                UnitSystem::Si => (value - 32.0) / 1.8,
            };
        }
    };
    match to {
        UnitSystem::Us => value * us_per_si,
        UnitSystem::Si => value / us_per_si,
    }
}

/// Display label for a unit in the given system.
pub fn unit_label(unit: PropertyUnit, system: UnitSystem) -> &'static str {
    match (unit, system) {
        (PropertyUnit::Dimensionless, _) => "-",
        (PropertyUnit::MolarMass, UnitSystem::Si) => "g/mol",
        (PropertyUnit::MolarMass, UnitSystem::Us) => "lb/lbmol",
        (PropertyUnit::Density, UnitSystem::Si) => "kg/m3",
        (PropertyUnit::Density, UnitSystem::Us) => "lb/ft3",
        (PropertyUnit::EnergyPerMass, UnitSystem::Si) => "MJ/kg",
        (PropertyUnit::EnergyPerMass, UnitSystem::Us) => "Btu/lb",
        (PropertyUnit::EnergyPerVolume, UnitSystem::Si) => "MJ/m3",
        (PropertyUnit::EnergyPerVolume, UnitSystem::Us) => "Btu/ft3",
        (PropertyUnit::Temperature, UnitSystem::Si) => "degC",
        (PropertyUnit::Temperature, UnitSystem::Us) => "degF",
        (PropertyUnit::AbsoluteTemperature, UnitSystem::Si) => "K",
        (PropertyUnit::AbsoluteTemperature, UnitSystem::Us) => "degR",
        (PropertyUnit::Pressure, UnitSystem::Si) => "kPa",
        (PropertyUnit::Pressure, UnitSystem::Us) => "psia",
        (PropertyUnit::MassRatio, UnitSystem::Si) => "kg/kg",
        (PropertyUnit::MassRatio, UnitSystem::Us) => "lb/lb",
        (PropertyUnit::MolePercent, _) => "mol%",
        (PropertyUnit::PartsPerMillion, _) => "ppmv",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gq_core::numeric::{Tolerances, nearly_equal};

    const ALL_UNITS: [PropertyUnit; 11] = [
        PropertyUnit::Dimensionless,
        PropertyUnit::MolarMass,
        PropertyUnit::Density,
        PropertyUnit::EnergyPerMass,
        PropertyUnit::EnergyPerVolume,
        PropertyUnit::Temperature,
        PropertyUnit::AbsoluteTemperature,
        PropertyUnit::Pressure,
        PropertyUnit::MassRatio,
        PropertyUnit::MolePercent,
        PropertyUnit::PartsPerMillion,
    ];

    #[test]
    fn known_factors() {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        // handbook values
        assert!(nearly_equal(
            convert(1.0, PropertyUnit::EnergyPerMass, UnitSystem::Si, UnitSystem::Us),
            429.9226,
            Tolerances { abs: 1e-4, rel: 0.0 }
        ));
        assert!(nearly_equal(
            convert(1.0, PropertyUnit::EnergyPerVolume, UnitSystem::Si, UnitSystem::Us),
            26.8392,
            Tolerances { abs: 1e-4, rel: 0.0 }
        ));
        assert!(nearly_equal(
            convert(1.0, PropertyUnit::Density, UnitSystem::Si, UnitSystem::Us),
            0.062428,
            Tolerances { abs: 1e-6, rel: 0.0 }
        ));
        assert!(nearly_equal(
            convert(100.0, PropertyUnit::Pressure, UnitSystem::Si, UnitSystem::Us),
            14.50377,
            Tolerances { abs: 1e-5, rel: 0.0 }
        ));
        assert!(nearly_equal(
            convert(0.0, PropertyUnit::Temperature, UnitSystem::Si, UnitSystem::Us),
            32.0,
            tol
        ));
        assert!(nearly_equal(
            convert(273.15, PropertyUnit::AbsoluteTemperature, UnitSystem::Si, UnitSystem::Us),
            491.67,
            Tolerances { abs: 1e-9, rel: 1e-12 }
        ));
    }

    #[test]
    fn same_system_is_identity() {
        for unit in ALL_UNITS {
            assert_eq!(convert(42.5, unit, UnitSystem::Si, UnitSystem::Si), 42.5);
            assert_eq!(convert(42.5, unit, UnitSystem::Us, UnitSystem::Us), 42.5);
        }
    }

    #[test]
    fn labels_differ_where_systems_do() {
        assert_eq!(unit_label(PropertyUnit::Density, UnitSystem::Si), "kg/m3");
        assert_eq!(unit_label(PropertyUnit::Density, UnitSystem::Us), "lb/ft3");
        assert_eq!(unit_label(PropertyUnit::MolePercent, UnitSystem::Us), "mol%");
    }

    #[test]
    fn parse_unit_system() {
        assert_eq!("SI".parse::<UnitSystem>().unwrap(), UnitSystem::Si);
        assert_eq!("us".parse::<UnitSystem>().unwrap(), UnitSystem::Us);
        assert!("cgs".parse::<UnitSystem>().is_err());
    }
}
