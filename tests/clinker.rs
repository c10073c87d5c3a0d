use afr_monitoring_toolbox::clinker::{
    alumina_modulus, blend_oxides, clinker_with_ash, compute_impact, compute_impact_from,
    compute_moduli, lime_saturation_factor, Delta, silica_modulus, ImpactInput, Modulus, Oxide,
    OxideAnalysis,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual}, expected={expected}, tol={tol}"
    );
}

fn raw_meal() -> OxideAnalysis {
    OxideAnalysis::default()
        .with(Oxide::SiO2, 21.5)
        .with(Oxide::Al2O3, 5.2)
        .with(Oxide::Fe2O3, 3.1)
        .with(Oxide::CaO, 66.0)
        .with(Oxide::MgO, 1.5)
        .with(Oxide::SO3, 0.8)
        .with(Oxide::K2O, 0.6)
}

fn ash() -> OxideAnalysis {
    OxideAnalysis::default()
        .with(Oxide::SiO2, 45.0)
        .with(Oxide::Al2O3, 20.0)
        .with(Oxide::Fe2O3, 8.0)
        .with(Oxide::CaO, 10.0)
        .with(Oxide::MgO, 2.0)
        .with(Oxide::SO3, 3.0)
        .with(Oxide::K2O, 1.5)
}

#[test]
fn moduli_match_hand_calculation() {
    let m = compute_moduli(&raw_meal());
    assert_close(m.ms.unwrap(), 21.5 / 8.3, 1e-9);
    assert_close(m.af.unwrap(), 5.2 / 3.1, 1e-9);
    // 100*66 / (2.8*21.5 + 1.18*5.2 + 0.65*3.1)
    assert_close(m.lsf.unwrap(), 6600.0 / 68.351, 1e-9);
    let c3s = 4.071 * 66.0 - 7.6 * 21.5 - 6.718 * 5.2 - 1.43 * 3.1;
    assert_close(m.c3s.unwrap(), c3s, 1e-9);
    assert_close(m.c2s.unwrap(), 2.867 * 21.5 - 0.7544 * c3s, 1e-9);
    assert_close(m.c3a.unwrap(), 2.65 * 5.2 - 1.692 * 3.1, 1e-9);
    assert_close(m.c4af.unwrap(), 3.043 * 3.1, 1e-9);
}

#[test]
fn zero_fe2o3_only_blocks_alumina_modulus() {
    let a = raw_meal().with(Oxide::Fe2O3, 0.0);
    assert_eq!(alumina_modulus(&a), None);
    assert_close(silica_modulus(&a).unwrap(), 21.5 / 5.2, 1e-9);
    assert!(lime_saturation_factor(&a).is_some());
}

#[test]
fn missing_oxide_leaves_dependent_moduli_empty() {
    let mut a = raw_meal();
    a.set(Oxide::CaO, None);
    let m = compute_moduli(&a);
    assert_eq!(m.lsf, None);
    assert_eq!(m.c3s, None);
    assert_eq!(m.c2s, None);
    assert!(m.ms.is_some());
    assert!(m.c3a.is_some());
}

#[test]
fn ignited_basis_removes_loss_on_ignition() {
    let raw = OxideAnalysis::default()
        .with(Oxide::Loi, 35.0)
        .with(Oxide::SiO2, 13.0)
        .with(Oxide::CaO, 42.9);
    let ig = raw.ignited();
    assert_eq!(ig.get(Oxide::Loi), Some(0.0));
    assert_close(ig.get(Oxide::SiO2).unwrap(), 20.0, 1e-9);
    assert_close(ig.get(Oxide::CaO).unwrap(), 66.0, 1e-9);
    assert_eq!(ig.get(Oxide::Al2O3), None);

    let burnt = OxideAnalysis::default().with(Oxide::Loi, 100.0).with(Oxide::SiO2, 1.0);
    assert_eq!(burnt.ignited(), OxideAnalysis::default());
}

#[test]
fn zero_rate_leaves_clinker_unchanged() {
    // 생료 PF 포함, 0으로 측정된 산화물 포함
    let raw = OxideAnalysis::default()
        .with(Oxide::Loi, 35.0)
        .with(Oxide::SiO2, 13.975)
        .with(Oxide::Al2O3, 3.38)
        .with(Oxide::Fe2O3, 2.015)
        .with(Oxide::CaO, 42.9)
        .with(Oxide::MgO, 0.975)
        .with(Oxide::SO3, 0.52)
        .with(Oxide::K2O, 0.39)
        .with(Oxide::TiO2, 0.0)
        .with(Oxide::MnO, 0.0)
        .with(Oxide::P2O5, 0.0);
    let result = compute_impact(&raw, &ash(), 0.0, None).expect("impact");
    for oxide in Oxide::ALL {
        let without = result.clinker_without_ash.get(oxide).expect("measured");
        let with = result.clinker_with_ash.get(oxide).expect("measured");
        assert_close(with, without, 1e-9);

        let delta = result.oxide_delta(oxide).unwrap();
        assert_close(delta.absolute.expect("absolute"), 0.0, 1e-9);
        assert_close(delta.relative_pct.expect("relative"), 0.0, 1e-6);
    }
    assert_eq!(result.oxide_delta(Oxide::Loi).unwrap().relative_pct, Some(0.0));
    for modulus in Modulus::ALL {
        let delta = result.modulus_delta(modulus).unwrap();
        assert_close(delta.absolute.expect("absolute"), 0.0, 1e-9);
        assert_close(delta.relative_pct.expect("relative"), 0.0, 1e-6);
    }
}

#[test]
fn ash_incorporation_shifts_composition() {
    let result = compute_impact(&raw_meal(), &ash(), 5.0, None).expect("impact");
    let sio2 = result.oxide_delta(Oxide::SiO2).unwrap();
    assert_close(sio2.with.unwrap(), 0.95 * 21.5 + 0.05 * 45.0, 1e-9);
    // 변화량 = with - without
    assert_close(sio2.absolute.unwrap(), 1.175, 1e-9);
    assert_close(sio2.relative_pct.unwrap(), 1.175 / 21.5 * 100.0, 1e-9);

    // 실리카가 많은 재는 석회 포화도를 떨어뜨린다.
    let lsf = result.modulus_delta(Modulus::Lsf).unwrap();
    assert!(lsf.absolute.unwrap() < 0.0);
    assert!(lsf.with.unwrap() < lsf.without.unwrap());
}

#[test]
fn oxide_missing_from_raw_meal_stays_empty() {
    let ash = ash().with(Oxide::P2O5, 1.0);
    let result = compute_impact(&raw_meal(), &ash, 5.0, None).unwrap();
    let p2o5 = result.oxide_delta(Oxide::P2O5).unwrap();
    assert_eq!(p2o5.without, None);
    assert_eq!(p2o5.with, None);
    assert_eq!(p2o5.absolute, None);
}

#[test]
fn relative_delta_floors_zero_base() {
    let raw = raw_meal().with(Oxide::TiO2, 0.0);
    let ash = ash().with(Oxide::TiO2, 1.0);
    let result = compute_impact(&raw, &ash, 10.0, None).unwrap();
    let tio2 = result.oxide_delta(Oxide::TiO2).unwrap();
    assert_close(tio2.absolute.unwrap(), 0.1, 1e-9);
    // 0.1 / 1e-6 × 100
    assert_close(tio2.relative_pct.unwrap(), 1e7, 1e-2);

    // 기준값이 없을 때만 비어 있다.
    let p2o5 = Delta::between(None, Some(1.0));
    assert_eq!(p2o5.relative_pct, None);
    assert_eq!(Delta::between(Some(0.0), Some(0.0)).relative_pct, Some(0.0));
}

#[test]
fn invalid_rate_yields_no_result() {
    assert!(compute_impact(&raw_meal(), &ash(), 150.0, None).is_none());
    assert!(compute_impact(&raw_meal(), &ash(), -1.0, None).is_none());
    assert!(compute_impact(&raw_meal(), &ash(), f64::NAN, None).is_none());
    assert!(clinker_with_ash(&raw_meal(), &ash(), 100.1).is_none());
}

#[test]
fn measured_clinker_overrides_computed_one() {
    let measured = raw_meal().with(Oxide::SiO2, 22.0);
    let result = compute_impact(&raw_meal(), &ash(), 5.0, Some(&measured)).unwrap();
    assert_eq!(result.clinker_with_ash, measured);
    assert_close(
        result.oxide_delta(Oxide::SiO2).unwrap().absolute.unwrap(),
        0.5,
        1e-9,
    );
}

#[test]
fn blend_oxides_weights_each_oxide() {
    let a = OxideAnalysis::default().with(Oxide::SiO2, 20.0);
    let b = OxideAnalysis::default().with(Oxide::SiO2, 40.0);
    let mix = blend_oxides(&[(3.0, &a), (1.0, &b)]);
    assert_close(mix.get(Oxide::SiO2).unwrap(), 25.0, 1e-9);
    assert_eq!(mix.get(Oxide::CaO), None);
}

#[test]
fn impact_input_reads_from_toml() {
    let input: ImpactInput = toml::from_str(
        r#"
        incorporation_rate_pct = 5.0

        [raw_meal]
        pf = 35.0
        sio2 = 13.975
        al2o3 = 3.38
        fe2o3 = 2.015
        cao = 42.9

        [ash]
        sio2 = 45.0
        al2o3 = 20.0
        fe2o3 = 8.0
        cao = 10.0
        "#,
    )
    .expect("toml");
    let result = compute_impact_from(&input).expect("impact");
    let sio2 = result.oxide_delta(Oxide::SiO2).unwrap();
    assert_close(sio2.without.unwrap(), 21.5, 1e-9);
    assert!(result.moduli_with_ash.ms.is_some());
}
