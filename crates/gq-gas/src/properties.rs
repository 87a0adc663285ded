//! Derived gas properties.
//!
//! All quantities are computed once in SI at the configured reference
//! conditions and held in [`GasProperties`]; unit conversion happens
//! only when rendering a report.

use crate::composition::Composition;
use crate::error::{CalcResult, CalculationError};
use crate::species::Species;
use crate::table::SpeciesTable;
use crate::units::{self, PropertyUnit, UnitSystem};
use gq_core::units::constants::{NORMAL_PRESSURE_KPA, NORMAL_TEMPERATURE_K, R_J_PER_MOL_K};
use gq_core::units::{Pressure, Temperature, k, kpa};
use uom::si::pressure::{kilopascal, pascal};
use uom::si::thermodynamic_temperature::kelvin;

/// Molar mass of dry air [g/mol].
pub const DRY_AIR_MOLAR_MASS_G_MOL: f64 = 28.9647;

/// Mole fraction of O2 in dry air.
pub const AIR_O2_MOLE_FRACTION: f64 = 0.2095;

/// Temperature and pressure at which volumetric quantities are quoted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceConditions {
    pub temperature: Temperature,
    pub pressure: Pressure,
}

impl ReferenceConditions {
    /// Build reference conditions, rejecting non-physical values.
    pub fn new(temperature: Temperature, pressure: Pressure) -> CalcResult<Self> {
        let t_k = temperature.get::<kelvin>();
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(CalculationError::InvalidConditions {
                what: "reference temperature",
            });
        }
        let p_pa = pressure.get::<pascal>();
        if !p_pa.is_finite() || p_pa <= 0.0 {
            return Err(CalculationError::InvalidConditions {
                what: "reference pressure",
            });
        }
        Ok(Self {
            temperature,
            pressure,
        })
    }

    /// Normal conditions: 273.15 K and 101.325 kPa (22.414 L/mol ideal).
    pub fn normal() -> Self {
        Self {
            temperature: k(NORMAL_TEMPERATURE_K),
            pressure: kpa(NORMAL_PRESSURE_KPA),
        }
    }

    /// Reference temperature [K].
    pub fn temperature_k(&self) -> f64 {
        self.temperature.get::<kelvin>()
    }

    /// Reference pressure [kPa].
    pub fn pressure_kpa(&self) -> f64 {
        self.pressure.get::<kilopascal>()
    }
}

impl Default for ReferenceConditions {
    fn default() -> Self {
        Self::normal()
    }
}

/// Derived properties of a gas mixture, all in SI.
#[derive(Debug, Clone, PartialEq)]
pub struct GasProperties {
    pub reference_temperature_k: f64,
    pub reference_pressure_kpa: f64,
    /// Apparent molar mass [g/mol].
    pub molar_mass_g_mol: f64,
    /// Ideal-gas specific gravity relative to dry air [-].
    pub specific_gravity: f64,
    /// Compressibility factor at reference conditions [-].
    pub z_factor: f64,
    /// Ideal-gas density [kg/m3].
    pub ideal_density_kg_m3: f64,
    /// Real-gas density (Z-corrected) [kg/m3].
    pub density_kg_m3: f64,
    /// Kay pseudo-critical temperature [K].
    pub pseudo_critical_temperature_k: f64,
    /// Kay pseudo-critical pressure [kPa].
    pub pseudo_critical_pressure_kpa: f64,
    /// Lower heating value, mass basis [MJ/kg].
    pub lhv_mass_mj_kg: f64,
    /// Higher heating value, mass basis [MJ/kg].
    pub hhv_mass_mj_kg: f64,
    /// Lower heating value, volume basis at reference conditions [MJ/m3].
    pub lhv_vol_mj_m3: f64,
    /// Higher heating value, volume basis at reference conditions [MJ/m3].
    pub hhv_vol_mj_m3: f64,
    /// Wobbe index on LHV [MJ/m3].
    pub wobbe_lower_mj_m3: f64,
    /// Wobbe index on HHV [MJ/m3].
    pub wobbe_higher_mj_m3: f64,
    /// Methane number (knock resistance correlation) [-].
    pub methane_number: f64,
    pub hydrogen_mol_pct: f64,
    pub inerts_mol_pct: f64,
    pub heavies_mol_pct: f64,
    pub h2s_ppmv: f64,
    /// Stoichiometric air/fuel ratio, mass basis [kg/kg].
    pub stoich_air_fuel_ratio: f64,
    /// Adiabatic flame temperature estimate [degC].
    pub flame_temperature_c: f64,
}

/// One rendered report line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedProperty {
    pub key: &'static str,
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// Property table rendered in one unit system.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyReport {
    pub unit_system: UnitSystem,
    pub entries: Vec<ReportedProperty>,
}

impl PropertyReport {
    /// Find a rendered entry by key.
    pub fn get(&self, key: &str) -> Option<&ReportedProperty> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// Compute all derived properties for a validated composition.
///
/// Fails only if `table` lacks data for a present species or an
/// intermediate value comes out non-physical.
pub fn compute_properties(
    composition: &Composition,
    table: &SpeciesTable<'_>,
    conditions: &ReferenceConditions,
) -> CalcResult<GasProperties> {
    let t_k = conditions.temperature_k();
    let p_kpa = conditions.pressure_kpa();
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(CalculationError::InvalidConditions {
            what: "reference temperature",
        });
    }
    if !p_kpa.is_finite() || p_kpa <= 0.0 {
        return Err(CalculationError::InvalidConditions {
            what: "reference pressure",
        });
    }

    // Mole-fraction-weighted mixture sums (Kay's rule for pseudo-criticals).
    let mut molar_mass = 0.0;
    let mut pseudo_tc_k = 0.0;
    let mut pseudo_pc_kpa = 0.0;
    let mut acentric = 0.0;
    let mut o2_mol_per_mol = 0.0;
    for (species, x) in composition.iter() {
        let record = table.lookup(species)?;
        molar_mass += x * record.molar_mass_g_mol;
        pseudo_tc_k += x * record.critical_temperature_k;
        pseudo_pc_kpa += x * record.critical_pressure_kpa;
        acentric += x * record.acentric_factor;
        o2_mol_per_mol += x * record.stoich_o2_mol_per_mol;
    }
    let molar_mass = ensure_physical(molar_mass, "mixture molar mass")?;
    let pseudo_tc_k = ensure_physical(pseudo_tc_k, "pseudo-critical temperature")?;
    let pseudo_pc_kpa = ensure_physical(pseudo_pc_kpa, "pseudo-critical pressure")?;

    let specific_gravity = molar_mass / DRY_AIR_MOLAR_MASS_G_MOL;

    // Pitzer two-term virial correlation at reduced conditions.
    let tr = t_k / pseudo_tc_k;
    let pr = p_kpa / pseudo_pc_kpa;
    let b0 = 0.083 - 0.422 / tr.powf(1.6);
    let b1 = 0.139 - 0.172 / tr.powf(4.2);
    let z_factor =
        ensure_physical(1.0 + (b0 + acentric * b1) * pr / tr, "compressibility factor")?;

    // Ideal-gas density rho = p M / (R T), Z-corrected for the real gas.
    let ideal_density = p_kpa * 1e3 * (molar_mass * 1e-3) / (R_J_PER_MOL_K * t_k);
    let density = ensure_physical(ideal_density / z_factor, "density")?;

    // Heating values mix linearly in mass fractions, not mole fractions.
    let mut lhv_mass = 0.0;
    let mut hhv_mass = 0.0;
    for (species, w) in composition.mass_fractions(table)? {
        let record = table.lookup(species)?;
        lhv_mass += w * record.lhv_mj_kg;
        hhv_mass += w * record.hhv_mj_kg;
    }

    let lhv_vol = lhv_mass * density;
    let hhv_vol = hhv_mass * density;

    let sg = ensure_physical(specific_gravity, "specific gravity")?;
    let wobbe_lower = wobbe_index(lhv_vol, sg);
    let wobbe_higher = wobbe_index(hhv_vol, sg);

    // Content measures used by the rule set.
    let x_methane = composition.mole_fraction(Species::Methane);
    let x_ethane = composition.mole_fraction(Species::Ethane);
    let x_propane = composition.mole_fraction(Species::Propane);
    let x_hydrogen = composition.mole_fraction(Species::Hydrogen);
    let x_h2s = composition.mole_fraction(Species::HydrogenSulfide);
    let x_inerts: f64 = composition
        .iter()
        .filter(|(s, _)| s.is_inert())
        .map(|(_, x)| x)
        .sum();
    let x_heavies: f64 = composition
        .iter()
        .filter(|(s, _)| s.is_heavy_hydrocarbon())
        .map(|(_, x)| x)
        .sum();

    // Linear methane-number correlation; inerts raise knock resistance.
    let methane_number =
        137.78 * x_methane - 40.0 * x_ethane - 79.52 * x_propane + 1.5 * x_inerts;

    // Air demand from per-species O2 stoichiometry.
    let air_mol_per_mol = o2_mol_per_mol / AIR_O2_MOLE_FRACTION;
    let stoich_air_fuel_ratio = air_mol_per_mol * DRY_AIR_MOLAR_MASS_G_MOL / molar_mass;

    // Flame temperature estimate anchored at 1900 degC for pipeline gas,
    // shifted by volumetric heat content and inert dilution.
    let flame_temperature_c = 1900.0 + (lhv_vol / 40.0) * 100.0 - (x_inerts * 100.0) * 15.0;

    Ok(GasProperties {
        reference_temperature_k: t_k,
        reference_pressure_kpa: p_kpa,
        molar_mass_g_mol: molar_mass,
        specific_gravity,
        z_factor,
        ideal_density_kg_m3: ideal_density,
        density_kg_m3: density,
        pseudo_critical_temperature_k: pseudo_tc_k,
        pseudo_critical_pressure_kpa: pseudo_pc_kpa,
        lhv_mass_mj_kg: lhv_mass,
        hhv_mass_mj_kg: hhv_mass,
        lhv_vol_mj_m3: lhv_vol,
        hhv_vol_mj_m3: hhv_vol,
        wobbe_lower_mj_m3: wobbe_lower,
        wobbe_higher_mj_m3: wobbe_higher,
        methane_number,
        hydrogen_mol_pct: x_hydrogen * 100.0,
        inerts_mol_pct: x_inerts * 100.0,
        heavies_mol_pct: x_heavies * 100.0,
        h2s_ppmv: x_h2s * 1e6,
        stoich_air_fuel_ratio,
        flame_temperature_c,
    })
}

/// Wobbe index: volumetric heating value over the square root of
/// specific gravity.
fn wobbe_index(hv_vol_mj_m3: f64, specific_gravity: f64) -> f64 {
    hv_vol_mj_m3 / specific_gravity.sqrt()
}

fn ensure_physical(v: f64, what: &'static str) -> CalcResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CalculationError::NonPhysical { what })
    }
}

impl GasProperties {
    /// Canonical SI rows in display order.
    fn canonical_rows(&self) -> [(&'static str, &'static str, f64, PropertyUnit); 21] {
        [
            (
                "molar_mass",
                "Molar Mass",
                self.molar_mass_g_mol,
                PropertyUnit::MolarMass,
            ),
            (
                "specific_gravity",
                "Specific Gravity",
                self.specific_gravity,
                PropertyUnit::Dimensionless,
            ),
            (
                "z_factor",
                "Compressibility Factor",
                self.z_factor,
                PropertyUnit::Dimensionless,
            ),
            (
                "density",
                "Density",
                self.density_kg_m3,
                PropertyUnit::Density,
            ),
            (
                "ideal_density",
                "Density (ideal)",
                self.ideal_density_kg_m3,
                PropertyUnit::Density,
            ),
            (
                "pseudo_critical_temperature",
                "Pseudo-critical Temperature",
                self.pseudo_critical_temperature_k,
                PropertyUnit::AbsoluteTemperature,
            ),
            (
                "pseudo_critical_pressure",
                "Pseudo-critical Pressure",
                self.pseudo_critical_pressure_kpa,
                PropertyUnit::Pressure,
            ),
            (
                "lhv_mass",
                "LHV (mass)",
                self.lhv_mass_mj_kg,
                PropertyUnit::EnergyPerMass,
            ),
            (
                "hhv_mass",
                "HHV (mass)",
                self.hhv_mass_mj_kg,
                PropertyUnit::EnergyPerMass,
            ),
            (
                "lhv_vol",
                "LHV (volume)",
                self.lhv_vol_mj_m3,
                PropertyUnit::EnergyPerVolume,
            ),
            (
                "hhv_vol",
                "HHV (volume)",
                self.hhv_vol_mj_m3,
                PropertyUnit::EnergyPerVolume,
            ),
            (
                "wobbe_lower",
                "Wobbe Index (L)",
                self.wobbe_lower_mj_m3,
                PropertyUnit::EnergyPerVolume,
            ),
            (
                "wobbe_higher",
                "Wobbe Index (H)",
                self.wobbe_higher_mj_m3,
                PropertyUnit::EnergyPerVolume,
            ),
            (
                "methane_number",
                "Methane Number",
                self.methane_number,
                PropertyUnit::Dimensionless,
            ),
            (
                "h2",
                "H2 Content",
                self.hydrogen_mol_pct,
                PropertyUnit::MolePercent,
            ),
            (
                "inerts",
                "Inerts (CO2+N2)",
                self.inerts_mol_pct,
                PropertyUnit::MolePercent,
            ),
            (
                "heavies",
                "Heavy HC (C4+)",
                self.heavies_mol_pct,
                PropertyUnit::MolePercent,
            ),
            (
                "h2s",
                "H2S Content",
                self.h2s_ppmv,
                PropertyUnit::PartsPerMillion,
            ),
            (
                "stoich_afr",
                "Stoich Air/Fuel Ratio",
                self.stoich_air_fuel_ratio,
                PropertyUnit::MassRatio,
            ),
            (
                "flame_temperature",
                "Flame Temperature (est)",
                self.flame_temperature_c,
                PropertyUnit::Temperature,
            ),
            (
                "reference_temperature",
                "Reference Temperature",
                self.reference_temperature_k,
                PropertyUnit::AbsoluteTemperature,
            ),
        ]
    }

    /// Render the property table in the requested unit system.
    pub fn render(&self, system: UnitSystem) -> PropertyReport {
        let entries = self
            .canonical_rows()
            .into_iter()
            .map(|(key, name, si_value, unit)| ReportedProperty {
                key,
                name,
                value: units::convert(si_value, unit, UnitSystem::Si, system),
                unit: units::unit_label(unit, system),
            })
            .collect();
        PropertyReport {
            unit_system: system,
            entries,
        }
    }
}
