use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use gq_core::units::constants::{NORMAL_PRESSURE_KPA, NORMAL_TEMPERATURE_K};
use gq_core::units::{k, kpa};
use gq_gas::{
    Classification, Composition, PropertyReport, ReferenceConditions, RuleSet, Severity,
    UnitSystem, Verdict, all_presets, compute_properties, evaluate_suitability, find_preset,
    reference_table, validate_composition,
};
use gq_report::{AnalysisMetadata, ReportStore, build_record, compute_analysis_id};

mod error;
mod input;

use error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "gq-cli")]
#[command(about = "gasqual CLI - Gas turbine fuel quality analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a fuel gas composition and print the verdict
    Analyze {
        /// Path to the composition YAML file
        input_path: PathBuf,
        /// Output unit system: si or us
        #[arg(long, default_value = "si")]
        units: String,
        /// Custom rule set YAML (defaults to the built-in turbine rules)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Directory for saved analysis records
        #[arg(long, default_value = "./gq-reports")]
        reports_dir: PathBuf,
        /// Skip saving the analysis record
        #[arg(long)]
        no_save: bool,
        /// Reference temperature in K (default 273.15)
        #[arg(long)]
        temperature_k: Option<f64>,
        /// Reference pressure in kPa (default 101.325)
        #[arg(long)]
        pressure_kpa: Option<f64>,
    },
    /// Validate a composition file without computing properties
    Check {
        /// Path to the composition YAML file
        input_path: PathBuf,
    },
    /// List supported species and their reference data
    Species,
    /// List built-in presets, or print one as a ready-to-edit input file
    Presets {
        /// Preset ID to print
        id: Option<String>,
    },
    /// Print the active rule set
    Rules {
        /// Custom rule set YAML (defaults to the built-in turbine rules)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// List saved analysis records
    Reports {
        /// Directory of saved analysis records
        #[arg(long, default_value = "./gq-reports")]
        reports_dir: PathBuf,
    },
    /// Show one saved analysis record
    ShowReport {
        /// Analysis ID, or a unique prefix of one
        analysis_id: String,
        /// Directory of saved analysis records
        #[arg(long, default_value = "./gq-reports")]
        reports_dir: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input_path,
            units,
            rules,
            reports_dir,
            no_save,
            temperature_k,
            pressure_kpa,
        } => cmd_analyze(
            &input_path,
            &units,
            rules.as_deref(),
            &reports_dir,
            no_save,
            temperature_k,
            pressure_kpa,
        ),
        Commands::Check { input_path } => cmd_check(&input_path),
        Commands::Species => cmd_species(),
        Commands::Presets { id } => cmd_presets(id.as_deref()),
        Commands::Rules { rules } => cmd_rules(rules.as_deref()),
        Commands::Reports { reports_dir } => cmd_reports(&reports_dir),
        Commands::ShowReport {
            analysis_id,
            reports_dir,
        } => cmd_show_report(&analysis_id, &reports_dir),
    }
}

fn cmd_analyze(
    input_path: &Path,
    units: &str,
    rules_path: Option<&Path>,
    reports_dir: &Path,
    no_save: bool,
    temperature_k: Option<f64>,
    pressure_kpa: Option<f64>,
) -> AppResult<()> {
    println!("Analyzing fuel gas: {}", input_path.display());

    let input = input::load_input(input_path)?;
    tracing::debug!(path = %input_path.display(), "loaded analysis input");

    let unit_system: UnitSystem = units
        .parse()
        .map_err(|e: &str| AppError::InvalidInput(e.to_string()))?;
    let rules = load_rules(rules_path)?;

    let conditions = match (temperature_k, pressure_kpa) {
        (None, None) => ReferenceConditions::normal(),
        (t, p) => ReferenceConditions::new(
            k(t.unwrap_or(NORMAL_TEMPERATURE_K)),
            kpa(p.unwrap_or(NORMAL_PRESSURE_KPA)),
        )?,
    };

    let table = reference_table();
    let raw = input.raw_components();
    let composition = validate_composition(&raw, &table, &input.validate_options())?;
    if composition.was_normalized() {
        println!("Note: input sum was off 100% and has been normalized");
    }

    let props = compute_properties(&composition, &table, &conditions)?;
    let report = props.render(unit_system);
    let verdict = evaluate_suitability(&props, &rules);

    print_composition(&composition);
    print_report(&report);
    print_verdict(&verdict);

    if !no_save {
        let store = ReportStore::new(reports_dir.to_path_buf())?;
        let analysis_id = compute_analysis_id(&composition, &rules, &conditions, unit_system);
        if store.has_record(&analysis_id) {
            println!("\n✓ Report already on file: {}", analysis_id);
        } else {
            let record = build_record(
                analysis_id.clone(),
                AnalysisMetadata::now(&input.project, &input.source, &input.analyst),
                &composition,
                &props,
                &verdict,
                unit_system,
            );
            store.save_record(&record)?;
            println!("\n✓ Report saved: {}", analysis_id);
        }
    }

    Ok(())
}

fn cmd_check(input_path: &Path) -> AppResult<()> {
    println!("Checking composition: {}", input_path.display());

    let input = input::load_input(input_path)?;
    let raw = input.raw_components();
    let total: f64 = raw.iter().map(|(_, pct)| pct).sum();
    let composition = validate_composition(&raw, &reference_table(), &input.validate_options())?;

    println!("✓ Composition is valid");
    println!("  Species: {}", composition.species_count());
    println!("  Input total: {:.4} mol%", total);
    if composition.was_normalized() {
        println!("  Normalized to 100% for analysis");
    }
    Ok(())
}

fn cmd_species() -> AppResult<()> {
    let table = reference_table();

    println!("Supported species:");
    println!(
        "  {:<8} {:<8} {:<18} {:>8} {:>10} {:>10}",
        "ID", "Formula", "Name", "M g/mol", "LHV MJ/kg", "HHV MJ/kg"
    );
    for record in table.all() {
        println!(
            "  {:<8} {:<8} {:<18} {:>8.3} {:>10.2} {:>10.2}",
            record.species.key(),
            record.species.formula(),
            record.species.display_name(),
            record.molar_mass_g_mol,
            record.lhv_mj_kg,
            record.hhv_mj_kg
        );
    }
    Ok(())
}

fn cmd_presets(id: Option<&str>) -> AppResult<()> {
    match id {
        None => {
            println!("Available presets:");
            for preset in all_presets() {
                println!("  {:<10} {}", preset.id, preset.name);
            }
            println!("\nPrint one as an input file with: gq-cli presets <id>");
        }
        Some(id) => {
            let preset =
                find_preset(id).ok_or_else(|| AppError::UnknownPreset(id.to_string()))?;
            println!("# {}", preset.name);
            println!("project: \"\"");
            println!("source: \"\"");
            println!("analyst: \"\"");
            println!("composition:");
            for (species, mole_percent) in preset.components {
                println!("  - species: {}", species);
                println!("    mole_percent: {}", mole_percent);
            }
        }
    }
    Ok(())
}

fn cmd_rules(rules_path: Option<&Path>) -> AppResult<()> {
    let rules = load_rules(rules_path)?;

    println!("Active rules:");
    println!(
        "  {:<26} {:>10} {:>10}  {}",
        "Rule", "Min", "Max", "Severity"
    );
    for rule in &rules.rules {
        let min = rule
            .min
            .map(|v| format!("{}", v))
            .unwrap_or_else(|| "-".to_string());
        let max = rule
            .max
            .map(|v| format!("{}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<26} {:>10} {:>10}  {}",
            rule.name,
            min,
            max,
            severity_label(rule.severity)
        );
    }
    Ok(())
}

fn cmd_reports(reports_dir: &Path) -> AppResult<()> {
    let store = ReportStore::new(reports_dir.to_path_buf())?;
    let mut records = store.list_records()?;

    if records.is_empty() {
        println!("No saved reports in {}", reports_dir.display());
        return Ok(());
    }

    records.sort_by(|a, b| a.metadata.timestamp.cmp(&b.metadata.timestamp));
    println!("Saved reports:");
    for record in records {
        println!(
            "  {}  {:<10} {}  {}",
            record.analysis_id,
            record.classification.to_string(),
            record.metadata.timestamp,
            record.metadata.project
        );
    }
    Ok(())
}

fn cmd_show_report(analysis_id: &str, reports_dir: &Path) -> AppResult<()> {
    let store = ReportStore::new(reports_dir.to_path_buf())?;

    let record = if store.has_record(analysis_id) {
        store.load_record(analysis_id)?
    } else {
        // accept a unique ID prefix
        let mut matches: Vec<_> = store
            .list_records()?
            .into_iter()
            .filter(|r| r.analysis_id.starts_with(analysis_id))
            .collect();
        match matches.len() {
            0 => {
                return Err(gq_report::ReportError::AnalysisNotFound {
                    analysis_id: analysis_id.to_string(),
                }
                .into());
            }
            1 => matches.remove(0),
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "analysis ID prefix '{}' is ambiguous",
                    analysis_id
                )));
            }
        }
    };

    println!("Analysis: {}", record.analysis_id);
    println!("  Project:   {}", record.metadata.project);
    println!("  Source:    {}", record.metadata.gas_source);
    println!("  Analyst:   {}", record.metadata.analyst);
    println!("  Timestamp: {}", record.metadata.timestamp);
    if record.was_normalized {
        println!("  Input sum was normalized to 100%");
    }

    println!("\nComposition:");
    for row in &record.composition {
        println!("  {:<8} {:>9.4} mol%  {}", row.species, row.mole_pct, row.name);
    }

    println!("\nProperties:");
    for row in &record.properties {
        println!("  {:<28} {:>12.4} {}", row.name, row.value, row.unit);
    }

    println!("\nClassification: {}", record.classification);
    if !record.violations.is_empty() {
        println!("Violated rules:");
        for v in &record.violations {
            println!(
                "  [{}] {}: measured {:.4}, allowed {}",
                severity_label(v.severity),
                v.rule,
                v.measured,
                band_label(v.min, v.max)
            );
        }
    }
    Ok(())
}

fn load_rules(path: Option<&Path>) -> AppResult<RuleSet> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(RuleSet::from_yaml(&text)?)
        }
        None => Ok(RuleSet::turbine_default()),
    }
}

fn print_composition(composition: &Composition) {
    println!("\nComposition ({} species):", composition.species_count());
    for (species, fraction) in composition.iter() {
        println!(
            "  {:<8} {:>9.4} mol%  {}",
            species.key(),
            fraction * 100.0,
            species.display_name()
        );
    }
}

fn print_report(report: &PropertyReport) {
    let system = match report.unit_system {
        UnitSystem::Si => "SI",
        UnitSystem::Us => "US",
    };
    println!("\nProperties [{}]:", system);
    for entry in &report.entries {
        println!("  {:<28} {:>12.4} {}", entry.name, entry.value, entry.unit);
    }
}

fn print_verdict(verdict: &Verdict) {
    println!();
    match verdict.classification {
        Classification::Suitable => println!("✓ SUITABLE FOR TURBINE USE"),
        Classification::Marginal => println!("! MARGINAL: review violations before use"),
        Classification::Unsuitable => println!("✗ NOT SUITABLE FOR TURBINE USE"),
    }

    if !verdict.violations.is_empty() {
        println!("\nViolated rules:");
        for v in &verdict.violations {
            println!(
                "  [{}] {}: measured {:.4}, allowed {}",
                severity_label(v.severity),
                v.rule,
                v.measured,
                band_label(v.min, v.max)
            );
        }
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Hard => "hard",
        Severity::Soft => "soft",
    }
}

fn band_label(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{} to {}", min, max),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (None, None) => "unbounded".to_string(),
    }
}
