//! 재(ash) 혼입 전후 클링커 조성과 모듈러스 변화를 계산한다.
//!
//! 부호 규칙: 양수 변화량은 재 혼입으로 값이 증가했음을 뜻한다.

use serde::{Deserialize, Serialize};

use super::moduli::{compute_moduli, CementModuli, Modulus};
use super::oxides::{blend_oxides, Oxide, OxideAnalysis};
use crate::weighting::{floored_denominator, guarded_ratio};

/// 영향 계산 입력.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactInput {
    /// 생료(raw meal) 분석
    pub raw_meal: OxideAnalysis,
    /// 혼합 연료 재(ash) 분석
    pub ash: OxideAnalysis,
    /// 클링커 중 재 혼입률 [%]
    pub incorporation_rate_pct: f64,
    /// 재 혼입 클링커 실측 조성. 있으면 계산값 대신 쓴다.
    #[serde(default)]
    pub with_ash_override: Option<OxideAnalysis>,
}

/// 재 혼입 전(without)과 후(with)의 값과 그 차이.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Delta {
    pub without: Option<f64>,
    pub with: Option<f64>,
    /// with - without
    pub absolute: Option<f64>,
    /// (with - without) / without × 100. 기준값은 ±1e-6 아래로 내려가지 않는다.
    pub relative_pct: Option<f64>,
}

impl Delta {
    pub fn between(without: Option<f64>, with: Option<f64>) -> Self {
        let absolute = without.zip(with).map(|(before, after)| after - before);
        let relative_pct = without
            .zip(absolute)
            .and_then(|(base, diff)| guarded_ratio(diff, floored_denominator(base)))
            .map(|r| r * 100.0);
        Delta {
            without,
            with,
            absolute,
            relative_pct,
        }
    }
}

/// 재 혼입 영향 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    pub clinker_without_ash: OxideAnalysis,
    pub clinker_with_ash: OxideAnalysis,
    pub moduli_without_ash: CementModuli,
    pub moduli_with_ash: CementModuli,
    pub oxide_deltas: Vec<(Oxide, Delta)>,
    pub modulus_deltas: Vec<(Modulus, Delta)>,
}

impl ImpactResult {
    pub fn oxide_delta(&self, oxide: Oxide) -> Option<&Delta> {
        self.oxide_deltas
            .iter()
            .find(|(o, _)| *o == oxide)
            .map(|(_, d)| d)
    }

    pub fn modulus_delta(&self, modulus: Modulus) -> Option<&Delta> {
        self.modulus_deltas
            .iter()
            .find(|(m, _)| *m == modulus)
            .map(|(_, d)| d)
    }
}

/// 생료와 재를 혼입률로 섞은 클링커 조성 (강열 기준).
pub fn clinker_with_ash(
    raw_meal: &OxideAnalysis,
    ash: &OxideAnalysis,
    incorporation_rate_pct: f64,
) -> Option<OxideAnalysis> {
    if !incorporation_rate_pct.is_finite() || !(0.0..=100.0).contains(&incorporation_rate_pct) {
        return None;
    }
    let base = raw_meal.ignited();
    let ash = ash.ignited();
    Some(blend_oxides(&[
        (100.0 - incorporation_rate_pct, &base),
        (incorporation_rate_pct, &ash),
    ]))
}

/// 재 혼입 전/후 클링커를 각각 계산하고 모든 산화물과 모듈러스의 변화량을 구한다.
///
/// 혼입률이 0~100% 범위를 벗어나거나 유한하지 않으면 `None`.
pub fn compute_impact(
    raw_meal: &OxideAnalysis,
    ash: &OxideAnalysis,
    incorporation_rate_pct: f64,
    with_ash_override: Option<&OxideAnalysis>,
) -> Option<ImpactResult> {
    let computed_with = clinker_with_ash(raw_meal, ash, incorporation_rate_pct)?;
    let clinker_without_ash = raw_meal.ignited();
    let clinker_with_ash = match with_ash_override {
        Some(measured) => measured.ignited(),
        None => computed_with,
    };

    let moduli_without_ash = compute_moduli(&clinker_without_ash);
    let moduli_with_ash = compute_moduli(&clinker_with_ash);

    let oxide_deltas = Oxide::ALL
        .into_iter()
        .map(|oxide| {
            let delta = Delta::between(
                clinker_without_ash.get(oxide),
                clinker_with_ash.get(oxide),
            );
            (oxide, delta)
        })
        .collect();
    let modulus_deltas = Modulus::ALL
        .into_iter()
        .map(|modulus| {
            let delta = Delta::between(
                moduli_without_ash.get(modulus),
                moduli_with_ash.get(modulus),
            );
            (modulus, delta)
        })
        .collect();

    Some(ImpactResult {
        clinker_without_ash,
        clinker_with_ash,
        moduli_without_ash,
        moduli_with_ash,
        oxide_deltas,
        modulus_deltas,
    })
}

/// 입력 묶음으로 계산한다.
pub fn compute_impact_from(input: &ImpactInput) -> Option<ImpactResult> {
    compute_impact(
        &input.raw_meal,
        &input.ash,
        input.incorporation_rate_pct,
        input.with_ash_override.as_ref(),
    )
}
