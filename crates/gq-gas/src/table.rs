//! Per-species reference property table.

use crate::error::{CalcResult, CalculationError};
use crate::species::Species;

/// Reference properties for one species.
///
/// Heating values are mass-basis at 25 degC combustion reference.
/// Molar masses and critical constants from standard reference data
/// (NIST / GPA 2145); acentric factors from Reid-Prausnitz-Poling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesRecord {
    pub species: Species,
    /// Molar mass [g/mol].
    pub molar_mass_g_mol: f64,
    /// Lower heating value [MJ/kg].
    pub lhv_mj_kg: f64,
    /// Higher heating value [MJ/kg].
    pub hhv_mj_kg: f64,
    /// Critical temperature [K].
    pub critical_temperature_k: f64,
    /// Critical pressure [kPa].
    pub critical_pressure_kpa: f64,
    /// Pitzer acentric factor [-].
    pub acentric_factor: f64,
    /// O2 demand for complete combustion [mol O2 / mol fuel].
    pub stoich_o2_mol_per_mol: f64,
}

const REFERENCE_DATA: [SpeciesRecord; 14] = [
    SpeciesRecord {
        species: Species::Methane,
        molar_mass_g_mol: 16.043,
        lhv_mj_kg: 50.01,
        hhv_mj_kg: 55.50,
        critical_temperature_k: 190.56,
        critical_pressure_kpa: 4599.0,
        acentric_factor: 0.0115,
        stoich_o2_mol_per_mol: 2.0,
    },
    SpeciesRecord {
        species: Species::Ethane,
        molar_mass_g_mol: 30.070,
        lhv_mj_kg: 47.49,
        hhv_mj_kg: 51.88,
        critical_temperature_k: 305.32,
        critical_pressure_kpa: 4872.0,
        acentric_factor: 0.0995,
        stoich_o2_mol_per_mol: 3.5,
    },
    SpeciesRecord {
        species: Species::Propane,
        molar_mass_g_mol: 44.097,
        lhv_mj_kg: 46.35,
        hhv_mj_kg: 50.36,
        critical_temperature_k: 369.83,
        critical_pressure_kpa: 4248.0,
        acentric_factor: 0.1523,
        stoich_o2_mol_per_mol: 5.0,
    },
    SpeciesRecord {
        species: Species::NButane,
        molar_mass_g_mol: 58.123,
        lhv_mj_kg: 45.75,
        hhv_mj_kg: 49.50,
        critical_temperature_k: 425.12,
        critical_pressure_kpa: 3796.0,
        acentric_factor: 0.2002,
        stoich_o2_mol_per_mol: 6.5,
    },
    SpeciesRecord {
        species: Species::Isobutane,
        molar_mass_g_mol: 58.123,
        lhv_mj_kg: 45.61,
        hhv_mj_kg: 49.36,
        critical_temperature_k: 407.81,
        critical_pressure_kpa: 3629.0,
        acentric_factor: 0.1835,
        stoich_o2_mol_per_mol: 6.5,
    },
    SpeciesRecord {
        species: Species::NPentane,
        molar_mass_g_mol: 72.150,
        lhv_mj_kg: 45.36,
        hhv_mj_kg: 49.01,
        critical_temperature_k: 469.70,
        critical_pressure_kpa: 3370.0,
        acentric_factor: 0.2515,
        stoich_o2_mol_per_mol: 8.0,
    },
    SpeciesRecord {
        species: Species::Isopentane,
        molar_mass_g_mol: 72.150,
        lhv_mj_kg: 45.24,
        hhv_mj_kg: 48.89,
        critical_temperature_k: 460.35,
        critical_pressure_kpa: 3378.0,
        acentric_factor: 0.2275,
        stoich_o2_mol_per_mol: 8.0,
    },
    SpeciesRecord {
        species: Species::NHexane,
        molar_mass_g_mol: 86.177,
        lhv_mj_kg: 45.10,
        hhv_mj_kg: 48.68,
        critical_temperature_k: 507.60,
        critical_pressure_kpa: 3025.0,
        acentric_factor: 0.3013,
        stoich_o2_mol_per_mol: 9.5,
    },
    SpeciesRecord {
        species: Species::NHeptane,
        molar_mass_g_mol: 100.204,
        lhv_mj_kg: 44.93,
        hhv_mj_kg: 48.45,
        critical_temperature_k: 540.20,
        critical_pressure_kpa: 2740.0,
        acentric_factor: 0.3495,
        stoich_o2_mol_per_mol: 11.0,
    },
    SpeciesRecord {
        species: Species::Hydrogen,
        molar_mass_g_mol: 2.016,
        lhv_mj_kg: 120.00,
        hhv_mj_kg: 141.80,
        critical_temperature_k: 33.145,
        critical_pressure_kpa: 1296.4,
        acentric_factor: -0.219,
        stoich_o2_mol_per_mol: 0.5,
    },
    SpeciesRecord {
        species: Species::CarbonMonoxide,
        molar_mass_g_mol: 28.010,
        lhv_mj_kg: 10.10,
        hhv_mj_kg: 10.10,
        critical_temperature_k: 132.86,
        critical_pressure_kpa: 3494.0,
        acentric_factor: 0.0497,
        stoich_o2_mol_per_mol: 0.5,
    },
    SpeciesRecord {
        species: Species::CarbonDioxide,
        molar_mass_g_mol: 44.010,
        lhv_mj_kg: 0.0,
        hhv_mj_kg: 0.0,
        critical_temperature_k: 304.13,
        critical_pressure_kpa: 7377.3,
        acentric_factor: 0.2239,
        stoich_o2_mol_per_mol: 0.0,
    },
    SpeciesRecord {
        species: Species::Nitrogen,
        molar_mass_g_mol: 28.014,
        lhv_mj_kg: 0.0,
        hhv_mj_kg: 0.0,
        critical_temperature_k: 126.19,
        critical_pressure_kpa: 3395.8,
        acentric_factor: 0.0372,
        stoich_o2_mol_per_mol: 0.0,
    },
    SpeciesRecord {
        species: Species::HydrogenSulfide,
        molar_mass_g_mol: 34.081,
        lhv_mj_kg: 15.20,
        hhv_mj_kg: 16.53,
        critical_temperature_k: 373.10,
        critical_pressure_kpa: 9000.0,
        acentric_factor: 0.1005,
        stoich_o2_mol_per_mol: 1.5,
    },
];

/// Borrowed view over a set of species records.
///
/// The built-in table covers all [`Species`]; tests and alternative data
/// sources can substitute any slice of records.
#[derive(Debug, Clone, Copy)]
pub struct SpeciesTable<'a> {
    records: &'a [SpeciesRecord],
}

impl<'a> SpeciesTable<'a> {
    pub fn new(records: &'a [SpeciesRecord]) -> Self {
        Self { records }
    }

    /// Look up the record for a species.
    pub fn lookup(&self, species: Species) -> CalcResult<&'a SpeciesRecord> {
        self.records
            .iter()
            .find(|r| r.species == species)
            .ok_or(CalculationError::MissingSpeciesData { species })
    }

    pub fn contains(&self, species: Species) -> bool {
        self.records.iter().any(|r| r.species == species)
    }

    /// Iterate over all records in table order.
    pub fn all(&self) -> impl Iterator<Item = &'a SpeciesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The built-in reference table.
pub fn reference_table() -> SpeciesTable<'static> {
    SpeciesTable::new(&REFERENCE_DATA)
}
