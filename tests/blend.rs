use afr_monitoring_toolbox::blend::{
    aggregate_blend, blend_substitution_rate, summarize_entries, thermal_substitution_rate,
    BlendSettings, FuelCharacteristics, Installation, Recipe, WeightSource,
};
use afr_monitoring_toolbox::fuel::ReferenceData;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual}, expected={expected}, tol={tol}"
    );
}

fn characteristics() -> Vec<FuelCharacteristics> {
    vec![
        FuelCharacteristics {
            fuel: "Pneus".into(),
            ncv: Some(6500.0),
            moisture: Some(5.0),
            chlorine: Some(0.2),
            ash: Some(10.0),
            cost_per_tonne: None,
        },
        FuelCharacteristics {
            fuel: "CSR".into(),
            ncv: Some(4500.0),
            moisture: Some(15.0),
            chlorine: Some(0.8),
            ash: Some(12.0),
            cost_per_tonne: None,
        },
        FuelCharacteristics {
            fuel: "Boues".into(),
            ncv: Some(2000.0),
            moisture: Some(40.0),
            chlorine: Some(0.1),
            ash: Some(30.0),
            cost_per_tonne: Some(8.0),
        },
    ]
}

fn single(installation: Installation) -> Recipe {
    Recipe::new(vec![installation])
}

#[test]
fn equal_weights_average_evenly() {
    // Pneus 4 x 1.8 t = 7.2 t, CSR 6 x 1.2 t = 7.2 t
    let recipe = single(Installation::new("L1").with("Pneus", 4).with("CSR", 6));
    let report = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    );
    let s = &report.combined;
    assert_close(s.total_weight_t, 14.4, 1e-9);
    assert_close(s.ncv.unwrap(), 5500.0, 1e-6);
    assert_close(s.moisture.unwrap(), 10.0, 1e-9);
    assert_close(s.chlorine.unwrap(), 0.5, 1e-9);
    assert_close(s.ash.unwrap(), 11.0, 1e-9);
    // 단가는 기준 데이터(25, 15)에서
    assert_close(s.cost_per_tonne.unwrap(), 20.0, 1e-9);
    assert!(s.unresolved.is_empty());
}

#[test]
fn empty_recipe_has_no_indicators() {
    let recipe = single(Installation::new("L1").with("Pneus", 0).with("CSR", 0));
    let report = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    );
    let s = &report.combined;
    assert_eq!(s.total_weight_t, 0.0);
    assert!(s.total_weight_t.is_sign_positive());
    assert!(s.contributions.is_empty());
    assert_eq!(s.ncv, None);
    assert_eq!(s.moisture, None);
    assert_eq!(s.chlorine, None);
    assert_eq!(s.ash, None);
    assert_eq!(s.cost_per_tonne, None);
}

#[test]
fn split_entries_give_same_result() {
    let reference = ReferenceData::builtin();
    let chars = characteristics();
    let settings = BlendSettings::default();
    let merged = single(Installation::new("L1").with("Pneus", 4).with("CSR", 3));
    let split = single(
        Installation::new("L1")
            .with("Pneus", 1)
            .with("CSR", 3)
            .with("pneus ", 3),
    );
    let a = aggregate_blend(&merged, &reference, &chars, &settings).combined;
    let b = aggregate_blend(&split, &reference, &chars, &settings).combined;
    assert_close(a.total_weight_t, b.total_weight_t, 1e-9);
    assert_close(a.ncv.unwrap(), b.ncv.unwrap(), 1e-9);
    assert_close(a.moisture.unwrap(), b.moisture.unwrap(), 1e-9);
    assert_eq!(b.contributions.len(), 2);
    assert_eq!(b.contributions[0].fuel, "Pneus");
    assert_eq!(b.contributions[0].containers, 4);
}

#[test]
fn volumetric_fallback_when_weight_per_container_is_missing() {
    let recipe = single(Installation::new("L1").with("Boues", 2));
    let report = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    );
    let c = &report.combined.contributions[0];
    assert_eq!(c.source, WeightSource::Volumetric);
    // 2 x 3 m3 x 1.05 t/m3
    assert_close(c.weight_t, 6.3, 1e-9);
    assert_close(report.combined.cost_per_tonne.unwrap(), 8.0, 1e-9);

    let small = BlendSettings {
        container_volume_m3: 2.0,
    };
    let report = aggregate_blend(&recipe, &ReferenceData::builtin(), &characteristics(), &small);
    assert_close(report.combined.total_weight_t, 4.2, 1e-9);
}

#[test]
fn fully_unresolved_recipe_has_positive_zero_weight() {
    let recipe = single(Installation::new("L1").with("Inconnu", 3));
    let s = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    )
    .combined;
    assert!(s.total_weight_t.is_sign_positive());
    assert_eq!(format!("{:.2}", s.total_weight_t), "0.00");
    assert_eq!(s.ncv, None);
}

#[test]
fn unknown_fuel_is_reported_and_excluded() {
    let recipe = single(Installation::new("L1").with("Pneus", 4).with("Inconnu", 5));
    let report = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    );
    let s = &report.combined;
    assert_eq!(s.unresolved, vec!["Inconnu".to_string()]);
    assert_close(s.total_weight_t, 7.2, 1e-9);
    assert_close(s.ncv.unwrap(), 6500.0, 1e-9);
}

#[test]
fn absent_fuel_with_bad_data_does_not_affect_blend() {
    let mut chars = characteristics();
    chars.push(FuelCharacteristics {
        fuel: "Bois".into(),
        ncv: Some(f64::NAN),
        moisture: None,
        chlorine: Some(f64::INFINITY),
        ash: None,
        cost_per_tonne: None,
    });
    let recipe = single(Installation::new("L1").with("Pneus", 4).with("CSR", 6).with("Bois", 0));
    let s = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &chars,
        &BlendSettings::default(),
    )
    .combined;
    assert_close(s.ncv.unwrap(), 5500.0, 1e-6);
    assert_close(s.chlorine.unwrap(), 0.5, 1e-9);
}

#[test]
fn contributing_fuel_without_data_leaves_indicator_empty() {
    let recipe = single(Installation::new("L1").with("Pneus", 4).with("Bois", 2));
    let s = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    )
    .combined;
    assert_close(s.total_weight_t, 9.2, 1e-9);
    assert_eq!(s.ncv, None);
    // 단가는 기준 데이터에 있으므로 계산된다: (7.2*25 + 2*20) / 9.2
    assert_close(s.cost_per_tonne.unwrap(), 220.0 / 9.2, 1e-9);
}

#[test]
fn installations_are_summarized_separately_and_combined() {
    let recipe = Recipe::new(vec![
        Installation::new("Ligne 1").with("Pneus", 4),
        Installation::new("Ligne 2").with("CSR", 6),
    ]);
    let report = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    );
    assert_eq!(report.installations.len(), 2);
    assert_eq!(report.installations[0].name, "Ligne 1");
    assert_close(report.installations[0].summary.ncv.unwrap(), 6500.0, 1e-9);
    assert_close(report.installations[1].summary.ncv.unwrap(), 4500.0, 1e-9);
    assert_close(report.combined.ncv.unwrap(), 5500.0, 1e-6);
    assert_eq!(recipe.total_containers(), 10);
}

#[test]
fn summarize_entries_matches_combined_report() {
    let recipe = single(Installation::new("L1").with("Pneus", 4).with("CSR", 6));
    let reference = ReferenceData::builtin();
    let chars = characteristics();
    let settings = BlendSettings::default();
    let direct = summarize_entries(recipe.entries(), &reference, &chars, &settings);
    let report = aggregate_blend(&recipe, &reference, &chars, &settings);
    assert_eq!(direct, report.combined);
}

#[test]
fn thermal_substitution_rate_is_heat_share() {
    assert_close(
        thermal_substitution_rate(10.0, 5000.0, 10.0, 5000.0).unwrap(),
        50.0,
        1e-9,
    );
    assert_close(
        thermal_substitution_rate(10.0, 4000.0, 5.0, 8000.0).unwrap(),
        50.0,
        1e-9,
    );
    assert_eq!(thermal_substitution_rate(0.0, 5000.0, 0.0, 8000.0), None);
    assert_eq!(thermal_substitution_rate(-1.0, 5000.0, 5.0, 8000.0), None);

    let recipe = single(Installation::new("L1").with("Pneus", 4).with("CSR", 6));
    let s = aggregate_blend(
        &recipe,
        &ReferenceData::builtin(),
        &characteristics(),
        &BlendSettings::default(),
    )
    .combined;
    assert_close(blend_substitution_rate(&s, 14.4, 5500.0).unwrap(), 50.0, 1e-6);
}
