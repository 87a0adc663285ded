//! End-to-end analysis flow: raw input through validation, property
//! calculation, and the suitability verdict.

use gq_gas::*;

fn analyze(raw: &[(&str, f64)], options: &ValidateOptions) -> (GasProperties, Verdict) {
    let table = reference_table();
    let comp = validate_composition(raw, &table, options).expect("composition should validate");
    let props = compute_properties(&comp, &table, &ReferenceConditions::normal())
        .expect("reference table covers all species");
    let verdict = evaluate_suitability(&props, &RuleSet::turbine_default());
    (props, verdict)
}

fn violated_rules(verdict: &Verdict) -> Vec<&str> {
    verdict.violations.iter().map(|v| v.rule.as_str()).collect()
}

#[test]
fn presets_validate_without_normalization() {
    for preset in all_presets() {
        let comp = validate_composition(
            preset.components,
            &reference_table(),
            &ValidateOptions::default(),
        )
        .unwrap_or_else(|e| panic!("preset '{}' should validate: {e}", preset.id));
        assert!(!comp.was_normalized(), "preset '{}' sums to 100%", preset.id);
        assert!(comp.species_count() > 0);
    }
}

#[test]
fn pipeline_preset_is_suitable() {
    let preset = find_preset("pipeline").unwrap();
    let (props, verdict) = analyze(preset.components, &ValidateOptions::default());

    assert_eq!(verdict.classification, Classification::Suitable);
    assert!(verdict.violations.is_empty());
    assert!((props.wobbe_lower_mj_m3 - 47.505).abs() < 0.02);
    assert!((props.methane_number - 129.52).abs() < 0.2);
}

#[test]
fn lean_preset_is_suitable() {
    let preset = find_preset("lean").unwrap();
    let (props, verdict) = analyze(preset.components, &ValidateOptions::default());

    assert_eq!(verdict.classification, Classification::Suitable);
    // high-methane send-out gas sits near the lower Wobbe bound
    assert!(props.wobbe_lower_mj_m3 >= 47.0);
    assert!(props.wobbe_lower_mj_m3 < 47.5);
}

#[test]
fn rich_preset_fails_on_heating_value() {
    let preset = find_preset("rich").unwrap();
    let (props, verdict) = analyze(preset.components, &ValidateOptions::default());

    assert_eq!(verdict.classification, Classification::Unsuitable);
    assert_eq!(violated_rules(&verdict), ["LHV (volume)"]);

    let violation = &verdict.violations[0];
    assert_eq!(violation.severity, Severity::Hard);
    assert_eq!(violation.max, Some(40.0));
    assert!((violation.measured - 41.08).abs() < 0.05);
    assert_eq!(violation.measured, props.lhv_vol_mj_m3);
}

#[test]
fn hydrogen_blend_is_marginal() {
    let raw = [("CH4", 91.5), ("C2H6", 2.5), ("H2", 6.0)];
    let (props, verdict) = analyze(&raw, &ValidateOptions::default());

    assert_eq!(verdict.classification, Classification::Marginal);
    assert_eq!(violated_rules(&verdict), ["Specific Gravity", "H2 Content"]);
    assert!(verdict
        .violations
        .iter()
        .all(|v| v.severity == Severity::Soft));
    assert!((props.hydrogen_mol_pct - 6.0).abs() < 1e-9);
    // hydrogen lightens the gas below the SG floor but Wobbe still passes
    assert!(props.specific_gravity < 0.55);
    assert!(props.wobbe_lower_mj_m3 > 47.0);
}

#[test]
fn sour_gas_is_unsuitable_on_h2s() {
    let raw = [
        ("CH4", 94.9),
        ("C2H6", 2.5),
        ("C3H8", 0.5),
        ("nC4H10", 0.2),
        ("CO2", 1.0),
        ("N2", 0.8),
        ("H2S", 0.1),
    ];
    let (props, verdict) = analyze(&raw, &ValidateOptions::default());

    assert_eq!(verdict.classification, Classification::Unsuitable);
    assert_eq!(violated_rules(&verdict), ["H2S Content"]);
    // 0.1 mol% = 1000 ppmv, far past the 5 ppmv limit
    assert!((props.h2s_ppmv - 1000.0).abs() < 1e-6);
}

#[test]
fn excess_inerts_are_flagged() {
    let raw = [("CH4", 88.0), ("CO2", 6.0), ("N2", 6.0)];
    let (props, verdict) = analyze(&raw, &ValidateOptions::default());

    // dilution drags Wobbe and LHV below their hard floors as well
    assert_eq!(verdict.classification, Classification::Unsuitable);
    assert_eq!(
        violated_rules(&verdict),
        ["Wobbe Index (L)", "LHV (volume)", "Inerts"]
    );
    assert!((props.inerts_mol_pct - 12.0).abs() < 1e-9);
}

#[test]
fn wild_sums_are_rejected_before_any_calculation() {
    let raw = [("CH4", 50.0)];
    let table = reference_table();

    let strict = validate_composition(&raw, &table, &ValidateOptions::default()).unwrap_err();
    assert!(matches!(
        strict,
        CompositionError::SumOutOfTolerance { tolerance, .. } if tolerance == 1e-4
    ));

    let lenient = ValidateOptions {
        auto_normalize: true,
        ..ValidateOptions::default()
    };
    let err = validate_composition(&raw, &table, &lenient).unwrap_err();
    assert!(matches!(
        err,
        CompositionError::SumOutOfTolerance { sum, tolerance } if sum == 0.5 && tolerance == 2e-2
    ));
}

#[test]
fn auto_normalized_input_flows_through_analysis() {
    let raw = [("CH4", 95.0), ("N2", 3.5)];
    let table = reference_table();
    let lenient = ValidateOptions {
        auto_normalize: true,
        ..ValidateOptions::default()
    };

    let comp = validate_composition(&raw, &table, &lenient).unwrap();
    assert!(comp.was_normalized());
    let sum: f64 = comp.iter().map(|(_, f)| f).sum();
    assert_eq!(sum, 1.0);

    let props = compute_properties(&comp, &table, &ReferenceConditions::normal()).unwrap();
    let verdict = evaluate_suitability(&props, &RuleSet::turbine_default());

    // rescaled 95/3.5 gas carries enough nitrogen to sink the Wobbe index
    assert_eq!(verdict.classification, Classification::Unsuitable);
    assert_eq!(violated_rules(&verdict), ["Wobbe Index (L)"]);
    assert!(props.wobbe_lower_mj_m3 < 47.0);
}

#[test]
fn analysis_is_deterministic() {
    let preset = find_preset("pipeline").unwrap();
    let first = analyze(preset.components, &ValidateOptions::default());
    let second = analyze(preset.components, &ValidateOptions::default());

    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}

#[test]
fn shipped_rule_file_matches_builtin_default() {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("demos");
    path.push("turbine_rules.yaml");

    if !path.exists() {
        eprintln!("Skipping test: rule file not found at {:?}", path);
        return;
    }

    let text = std::fs::read_to_string(&path).expect("rule file should be readable");
    let parsed = RuleSet::from_yaml(&text).expect("shipped rule file should parse");
    assert_eq!(parsed, RuleSet::turbine_default());
}

#[test]
fn reports_agree_across_unit_systems() {
    let preset = find_preset("pipeline").unwrap();
    let (props, _) = analyze(preset.components, &ValidateOptions::default());

    let si = props.render(UnitSystem::Si);
    let us = props.render(UnitSystem::Us);

    let density_si = si.get("density").unwrap();
    let density_us = us.get("density").unwrap();
    assert_eq!(density_si.unit, "kg/m3");
    assert_eq!(density_us.unit, "lb/ft3");
    assert!((density_us.value - density_si.value * 0.062428).abs() < 1e-6);

    let flame_si = si.get("flame_temperature").unwrap();
    let flame_us = us.get("flame_temperature").unwrap();
    assert_eq!(flame_si.unit, "degC");
    assert_eq!(flame_us.unit, "degF");
    assert_eq!(flame_us.value, flame_si.value * 1.8 + 32.0);

    let tc_si = si.get("pseudo_critical_temperature").unwrap();
    let tc_us = us.get("pseudo_critical_temperature").unwrap();
    assert_eq!(tc_si.unit, "K");
    assert_eq!(tc_us.unit, "degR");
    assert_eq!(tc_us.value, tc_si.value * 1.8);
}
