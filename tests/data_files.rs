use std::path::Path;

use afr_monitoring_toolbox::blend::{aggregate_blend, blend_substitution_rate, BlendSettings};
use afr_monitoring_toolbox::clinker::{compute_impact_from, Oxide};
use afr_monitoring_toolbox::config::{load_or_default, Config};
use afr_monitoring_toolbox::fuel::{all_historical_characteristics, fuel_statistics};
use afr_monitoring_toolbox::reference_data::{
    load_analyses, load_impact_input, load_recipe, load_reference_or_builtin, ReferenceDataError,
};
use afr_monitoring_toolbox::thresholds::{classify_blend, Status, Threshold};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual}, expected={expected}, tol={tol}"
    );
}

#[test]
fn demo_config_has_thresholds() {
    let cfg = load_or_default(Path::new("demos/config.toml")).expect("config");
    assert!(matches!(cfg.thresholds.blend.ncv, Threshold::AtLeast { .. }));
    assert_eq!(cfg.thresholds.impact.delta_k2o, Threshold::Unset);
    assert_close(cfg.blend_settings().container_volume_m3, 3.0, 1e-12);
}

#[test]
fn reference_file_is_merged_over_builtin_table() {
    let reference = load_reference_or_builtin(Some(Path::new("demos/reference.toml"))).unwrap();
    assert_eq!(reference.hydrogen_pct("Pneus"), Some(6.6));
    assert_eq!(reference.hydrogen_pct("Farines"), Some(6.8));
    assert_eq!(reference.hydrogen_pct("CSR"), Some(5.8));

    let missing = load_reference_or_builtin(Some(Path::new("demos/absent.toml"))).unwrap();
    assert_eq!(missing.hydrogen_pct("Pneus"), Some(6.5));
}

#[test]
fn demo_recipe_aggregates() {
    let reference = load_reference_or_builtin(None).unwrap();
    let doc = load_recipe(Path::new("demos/recipe.toml")).expect("recipe");
    let report = aggregate_blend(
        &doc.recipe(),
        &reference,
        &doc.characteristics,
        &BlendSettings::default(),
    );
    assert_eq!(report.installations.len(), 2);
    // Pneus 7.2 + CSR 9.6 + Boues 6.3
    assert_close(report.combined.total_weight_t, 23.1, 1e-9);
    assert!(report.combined.unresolved.is_empty());
    let ncv = report.combined.ncv.unwrap();
    assert!(ncv > 2000.0 && ncv < 6500.0);

    let fossil = doc.fossil.expect("fossil feed");
    let tsr = blend_substitution_rate(&report.combined, fossil.weight_t, fossil.ncv).unwrap();
    assert!(tsr > 0.0 && tsr < 100.0);

    let rows = classify_blend(&report.combined, &Config::default().thresholds.blend);
    assert!(rows.iter().all(|r| r.status == Status::Unknown));
}

#[test]
fn demo_impact_input_computes() {
    let input = load_impact_input(Path::new("demos/impact.toml")).expect("impact");
    let result = compute_impact_from(&input).expect("valid rate");
    assert_close(
        result.clinker_without_ash.get(Oxide::SiO2).unwrap(),
        21.5,
        1e-9,
    );
    assert!(result.moduli_with_ash.lsf.unwrap() < result.moduli_without_ash.lsf.unwrap());
}

#[test]
fn demo_analyses_feed_statistics_and_history() {
    let reference = load_reference_or_builtin(None).unwrap();
    let records = load_analyses(Path::new("demos/analyses.toml"))
        .expect("analyses")
        .results(&reference);
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.ncv.is_some()));

    let stats = fuel_statistics(&records);
    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].fuel, "Pneus");
    assert_eq!(stats[0].count, 2);

    let history = all_historical_characteristics(&records, &reference);
    let boues = history.iter().find(|c| c.fuel == "Boues").unwrap();
    assert_close(boues.ash.unwrap(), 28.0, 1e-9);
}

#[test]
fn missing_data_file_reports_path() {
    let err = load_recipe(Path::new("demos/nope.toml")).unwrap_err();
    assert!(matches!(err, ReferenceDataError::Io { .. }));
    assert!(err.to_string().contains("nope.toml"));
}
