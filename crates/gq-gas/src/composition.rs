//! Gas composition: validated, normalized mole fractions.

use crate::error::{CalcResult, CompositionError, CompositionResult};
use crate::species::Species;
use crate::table::SpeciesTable;
use gq_core::numeric::{Tolerances, nearly_equal};

/// Options controlling composition validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    /// Rescale an off-unity sum instead of rejecting it.
    pub auto_normalize: bool,
    /// Accepted deviation of the fraction sum from 1 without rescaling.
    pub sum_tolerance: f64,
    /// Accepted deviation of the fraction sum from 1 when `auto_normalize` is set.
    pub normalize_tolerance: f64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            auto_normalize: false,
            sum_tolerance: 1e-4,
            normalize_tolerance: 2e-2,
        }
    }
}

/// Fuel gas composition defined by normalized mole fractions.
///
/// Construction always goes through validation, so a `Composition` value
/// holds only known species with positive, finite fractions whose sum
/// (in construction order) is exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Species and their mole fractions (normalized to sum=1).
    items: Vec<(Species, f64)>,
    /// True when the input sum was off-unity and got rescaled.
    was_normalized: bool,
}

/// Validate raw user input given in mole percent (0-100 per entry).
///
/// Checks every key against `table`, rejects negative or non-finite
/// values, merges duplicate species by summation, and gates the total
/// against the configured tolerance before converting to fractions.
pub fn validate_composition(
    raw: &[(&str, f64)],
    table: &SpeciesTable<'_>,
    options: &ValidateOptions,
) -> CompositionResult<Composition> {
    if raw.is_empty() {
        return Err(CompositionError::Empty);
    }

    let mut entries = Vec::with_capacity(raw.len());
    for (name, percent) in raw {
        let species: Species = name
            .parse()
            .map_err(|_| CompositionError::UnknownSpecies {
                name: (*name).to_string(),
            })?;
        if !table.contains(species) {
            return Err(CompositionError::UnknownSpecies {
                name: (*name).to_string(),
            });
        }
        if !percent.is_finite() {
            return Err(CompositionError::NonFiniteFraction {
                species: (*name).to_string(),
            });
        }
        if *percent < 0.0 {
            return Err(CompositionError::NegativeFraction {
                species: (*name).to_string(),
                value: *percent,
            });
        }
        entries.push((species, percent / 100.0));
    }

    finish(merge_duplicates(entries), options)
}

impl Composition {
    /// Create a pure-species composition.
    pub fn pure(species: Species) -> Self {
        Self {
            items: vec![(species, 1.0)],
            was_normalized: false,
        }
    }

    /// Create a composition from mole fractions (0-1 per entry).
    ///
    /// Same validation path as [`validate_composition`] minus the key
    /// lookup; fractions are gated against the sum tolerance in `options`.
    pub fn from_mole_fractions(
        fractions: Vec<(Species, f64)>,
        options: &ValidateOptions,
    ) -> CompositionResult<Self> {
        if fractions.is_empty() {
            return Err(CompositionError::Empty);
        }

        for (species, fraction) in &fractions {
            if !fraction.is_finite() {
                return Err(CompositionError::NonFiniteFraction {
                    species: species.key().to_string(),
                });
            }
            if *fraction < 0.0 {
                return Err(CompositionError::NegativeFraction {
                    species: species.key().to_string(),
                    value: *fraction,
                });
            }
        }

        finish(merge_duplicates(fractions), options)
    }

    /// Return a normalized copy (fractions rescaled to sum exactly 1).
    ///
    /// Idempotent: normalizing an already-normalized composition returns
    /// an identical value.
    pub fn normalize(&self) -> Self {
        let mut items = self.items.clone();
        rescale_to_unit(&mut items);
        Self {
            items,
            was_normalized: self.was_normalized,
        }
    }

    /// Get mole fraction of a species (0.0 if not present).
    pub fn mole_fraction(&self, species: Species) -> f64 {
        self.items
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// Check if this is a pure-species composition.
    ///
    /// Returns `Some(species)` if exactly one species has fraction ≈1.0.
    pub fn is_pure(&self) -> Option<Species> {
        if self.items.len() == 1 {
            let (species, frac) = self.items[0];
            let tol = Tolerances {
                abs: 1e-10,
                rel: 1e-10,
            };
            if nearly_equal(frac, 1.0, tol) {
                return Some(species);
            }
        }
        None
    }

    /// True when validation rescaled an off-unity input sum.
    pub fn was_normalized(&self) -> bool {
        self.was_normalized
    }

    /// Number of species with non-zero fractions.
    pub fn species_count(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all species with non-zero mole fractions.
    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.items.iter().copied()
    }

    /// Mixture (apparent) molar mass [g/mol]: M = Σ x_i·M_i.
    pub fn apparent_molar_mass(&self, table: &SpeciesTable<'_>) -> CalcResult<f64> {
        let mut molar_mass = 0.0;
        for (species, fraction) in &self.items {
            molar_mass += fraction * table.lookup(*species)?.molar_mass_g_mol;
        }
        Ok(molar_mass)
    }

    /// Convert mole fractions to mass fractions: w_i = x_i·M_i / Σ x_j·M_j.
    ///
    /// Mass-basis weights are what per-kilogram quantities (heating
    /// values) mix linearly in; mole fractions do not.
    pub fn mass_fractions(&self, table: &SpeciesTable<'_>) -> CalcResult<Vec<(Species, f64)>> {
        let molar_mass = self.apparent_molar_mass(table)?;
        let mut weights = Vec::with_capacity(self.items.len());
        for (species, fraction) in &self.items {
            let record = table.lookup(*species)?;
            weights.push((*species, fraction * record.molar_mass_g_mol / molar_mass));
        }
        Ok(weights)
    }
}

/// Sum repeated species, preserving first-occurrence order.
fn merge_duplicates(entries: Vec<(Species, f64)>) -> Vec<(Species, f64)> {
    let mut merged: Vec<(Species, f64)> = Vec::with_capacity(entries.len());
    for (species, fraction) in entries {
        match merged.iter_mut().find(|(s, _)| *s == species) {
            Some((_, existing)) => *existing += fraction,
            None => merged.push((species, fraction)),
        }
    }
    merged
}

/// Gate the fraction sum against tolerances, then normalize.
fn finish(
    mut entries: Vec<(Species, f64)>,
    options: &ValidateOptions,
) -> CompositionResult<Composition> {
    entries.retain(|(_, f)| *f > 0.0);
    if entries.is_empty() {
        return Err(CompositionError::Empty);
    }

    let sum: f64 = entries.iter().map(|(_, f)| f).sum();
    let deviation = (sum - 1.0).abs();

    let was_normalized = if deviation <= options.sum_tolerance {
        false
    } else if options.auto_normalize && deviation <= options.normalize_tolerance {
        true
    } else {
        let tolerance = if options.auto_normalize {
            options.normalize_tolerance
        } else {
            options.sum_tolerance
        };
        return Err(CompositionError::SumOutOfTolerance { sum, tolerance });
    };

    entries.retain(|(_, f)| *f / sum > 1e-15); // Drop negligible species
    rescale_to_unit(&mut entries);
    Ok(Composition {
        items: entries,
        was_normalized,
    })
}

/// Rescale fractions so their left-to-right sum is exactly 1.0.
fn rescale_to_unit(items: &mut [(Species, f64)]) {
    let sum: f64 = items.iter().map(|(_, f)| f).sum();
    if sum == 1.0 {
        return;
    }
    for (_, fraction) in items.iter_mut() {
        *fraction /= sum;
    }
    // Pin the last fraction so repeated normalization is a no-op.
    let head: f64 = items[..items.len() - 1].iter().map(|(_, f)| f).sum();
    if let Some((_, last)) = items.last_mut() {
        *last = 1.0 - head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::reference_table;

    fn strict() -> ValidateOptions {
        ValidateOptions::default()
    }

    fn lenient() -> ValidateOptions {
        ValidateOptions {
            auto_normalize: true,
            ..ValidateOptions::default()
        }
    }

    #[test]
    fn pure_composition() {
        let comp = Composition::pure(Species::Methane);
        assert_eq!(comp.is_pure(), Some(Species::Methane));
        assert_eq!(comp.mole_fraction(Species::Methane), 1.0);
        assert_eq!(comp.mole_fraction(Species::Nitrogen), 0.0);
        assert!(!comp.was_normalized());
    }

    #[test]
    fn percent_input_maps_to_fractions() {
        let raw = [("CH4", 95.0), ("C2H6", 3.0), ("N2", 2.0)];
        let comp = validate_composition(&raw, &reference_table(), &strict()).unwrap();

        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-12,
        };
        assert!(nearly_equal(comp.mole_fraction(Species::Methane), 0.95, tol));
        assert!(nearly_equal(comp.mole_fraction(Species::Nitrogen), 0.02, tol));
        assert!(!comp.was_normalized());

        let sum: f64 = comp.iter().map(|(_, f)| f).sum();
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn strict_mode_rejects_off_unity_sum() {
        let raw = [("CH4", 95.0), ("N2", 3.5)];
        let err = validate_composition(&raw, &reference_table(), &strict()).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::SumOutOfTolerance { .. }
        ));
    }

    #[test]
    fn auto_normalize_rescales_and_flags() {
        let raw = [("CH4", 95.0), ("N2", 3.5)];
        let comp = validate_composition(&raw, &reference_table(), &lenient()).unwrap();

        assert!(comp.was_normalized());
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-12,
        };
        assert!(nearly_equal(
            comp.mole_fraction(Species::Methane),
            95.0 / 98.5,
            tol
        ));
        let sum: f64 = comp.iter().map(|(_, f)| f).sum();
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn auto_normalize_still_rejects_wild_sums() {
        let raw = [("CH4", 50.0)];
        let err = validate_composition(&raw, &reference_table(), &lenient()).unwrap_err();
        assert!(matches!(err, CompositionError::SumOutOfTolerance { sum, .. } if sum == 0.5));
    }

    #[test]
    fn tiny_rounding_deviation_is_not_flagged() {
        // 100.005 % total: within the strict band, silently rescaled
        let raw = [("CH4", 95.005), ("C2H6", 5.0)];
        let comp = validate_composition(&raw, &reference_table(), &strict()).unwrap();
        assert!(!comp.was_normalized());
        let sum: f64 = comp.iter().map(|(_, f)| f).sum();
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn unknown_species_rejected() {
        let raw = [("CH4", 95.0), ("Xe", 5.0)];
        let err = validate_composition(&raw, &reference_table(), &strict()).unwrap_err();
        assert_eq!(
            err,
            CompositionError::UnknownSpecies {
                name: "Xe".to_string()
            }
        );
    }

    #[test]
    fn species_missing_from_table_rejected() {
        let methane_only = [*reference_table().lookup(Species::Methane).unwrap()];
        let table = SpeciesTable::new(&methane_only);
        let raw = [("CH4", 95.0), ("N2", 5.0)];

        let err = validate_composition(&raw, &table, &strict()).unwrap_err();
        assert_eq!(
            err,
            CompositionError::UnknownSpecies {
                name: "N2".to_string()
            }
        );
    }

    #[test]
    fn negative_fraction_rejected() {
        let raw = [("CH4", 101.0), ("N2", -1.0)];
        let err = validate_composition(&raw, &reference_table(), &strict()).unwrap_err();
        assert_eq!(
            err,
            CompositionError::NegativeFraction {
                species: "N2".to_string(),
                value: -1.0
            }
        );
    }

    #[test]
    fn non_finite_fraction_rejected() {
        let raw = [("CH4", f64::NAN)];
        let err = validate_composition(&raw, &reference_table(), &strict()).unwrap_err();
        assert!(matches!(err, CompositionError::NonFiniteFraction { .. }));
    }

    #[test]
    fn duplicate_entries_merge_by_summation() {
        let raw = [("CH4", 60.0), ("methane", 36.0), ("N2", 4.0)];
        let comp = validate_composition(&raw, &reference_table(), &strict()).unwrap();

        assert_eq!(comp.species_count(), 2);
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-12,
        };
        assert!(nearly_equal(comp.mole_fraction(Species::Methane), 0.96, tol));
    }

    #[test]
    fn zero_entries_are_dropped() {
        let raw = [("CH4", 100.0), ("C2H6", 0.0)];
        let comp = validate_composition(&raw, &reference_table(), &strict()).unwrap();
        assert_eq!(comp.species_count(), 1);
        assert_eq!(comp.is_pure(), Some(Species::Methane));
    }

    #[test]
    fn empty_and_all_zero_rejected() {
        let err = validate_composition(&[], &reference_table(), &strict()).unwrap_err();
        assert_eq!(err, CompositionError::Empty);

        let raw = [("CH4", 0.0), ("N2", 0.0)];
        let err = validate_composition(&raw, &reference_table(), &lenient()).unwrap_err();
        assert_eq!(err, CompositionError::Empty);
    }

    #[test]
    fn mole_fraction_constructor_gates_sum() {
        let ok = Composition::from_mole_fractions(
            vec![(Species::Methane, 0.9), (Species::Nitrogen, 0.1)],
            &strict(),
        );
        assert!(ok.is_ok());

        let err = Composition::from_mole_fractions(
            vec![(Species::Methane, 0.9), (Species::Nitrogen, 0.2)],
            &strict(),
        )
        .unwrap_err();
        assert!(matches!(err, CompositionError::SumOutOfTolerance { .. }));
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = [("CH4", 94.0), ("C2H6", 3.5), ("CO2", 1.5)];
        let comp = validate_composition(&raw, &reference_table(), &lenient()).unwrap();

        let once = comp.normalize();
        let twice = once.normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn mass_fractions_known_binary() {
        let comp = Composition::from_mole_fractions(
            vec![(Species::Methane, 0.5), (Species::CarbonDioxide, 0.5)],
            &strict(),
        )
        .unwrap();

        let weights = comp.mass_fractions(&reference_table()).unwrap();
        let expected_ch4 = 0.5 * 16.043 / (0.5 * 16.043 + 0.5 * 44.010);

        let w_ch4 = weights
            .iter()
            .find(|(s, _)| *s == Species::Methane)
            .map(|(_, w)| *w)
            .unwrap();
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-12,
        };
        assert!(nearly_equal(w_ch4, expected_ch4, tol));

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert!(nearly_equal(total, 1.0, Tolerances::default()));
    }

    #[test]
    fn mass_fractions_need_table_data() {
        let methane_only = [*reference_table().lookup(Species::Methane).unwrap()];
        let table = SpeciesTable::new(&methane_only);
        let comp = Composition::from_mole_fractions(
            vec![(Species::Methane, 0.5), (Species::Nitrogen, 0.5)],
            &strict(),
        )
        .unwrap();

        assert!(comp.mass_fractions(&table).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_sum_is_exactly_one(fracs in prop::collection::vec(1e-6_f64..1.0_f64, 1..7)) {
            let species = [
                Species::Methane,
                Species::Ethane,
                Species::Propane,
                Species::Hydrogen,
                Species::CarbonDioxide,
                Species::Nitrogen,
                Species::HydrogenSulfide,
            ];
            let total: f64 = fracs.iter().sum();
            let input: Vec<(Species, f64)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (species[i % species.len()], f / total))
                .collect();

            let options = ValidateOptions {
                auto_normalize: true,
                ..ValidateOptions::default()
            };
            if let Ok(comp) = Composition::from_mole_fractions(input, &options) {
                let sum: f64 = comp.iter().map(|(_, f)| f).sum();
                prop_assert_eq!(sum, 1.0);
            }
        }

        #[test]
        fn apparent_molar_mass_stays_within_component_range(
            fracs in prop::collection::vec(1e-4_f64..1.0_f64, 1..7)
        ) {
            let species = [
                Species::Methane,
                Species::Ethane,
                Species::Propane,
                Species::Hydrogen,
                Species::CarbonDioxide,
                Species::Nitrogen,
                Species::HydrogenSulfide,
            ];
            let total: f64 = fracs.iter().sum();
            let input: Vec<(Species, f64)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (species[i % species.len()], f / total))
                .collect();

            let table = crate::table::reference_table();
            if let Ok(comp) = Composition::from_mole_fractions(input, &ValidateOptions::default()) {
                let mixture = comp.apparent_molar_mass(&table).unwrap();
                let masses: Vec<f64> = comp
                    .iter()
                    .map(|(s, _)| table.lookup(s).unwrap().molar_mass_g_mol)
                    .collect();
                let lo = masses.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = masses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

                // convex combination of the component molar masses
                prop_assert!(mixture >= lo - 1e-9);
                prop_assert!(mixture <= hi + 1e-9);
            }
        }

        #[test]
        fn normalize_idempotent_for_any_valid_input(fracs in prop::collection::vec(1e-3_f64..1.0_f64, 2..6)) {
            let species = [
                Species::Methane,
                Species::Ethane,
                Species::Propane,
                Species::NButane,
                Species::Nitrogen,
                Species::CarbonDioxide,
            ];
            let total: f64 = fracs.iter().sum();
            let input: Vec<(Species, f64)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (species[i % species.len()], f / total))
                .collect();

            let options = ValidateOptions {
                auto_normalize: true,
                ..ValidateOptions::default()
            };
            if let Ok(comp) = Composition::from_mole_fractions(input, &options) {
                let once = comp.normalize();
                let twice = once.normalize();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
