//! 건량 기준 고위발열량(PCS)에서 도착 기준 순발열량(NCV/PCI)을 계산한다.
//!
//! NCV = ((PCS - 50.6353308·H) · (1 - W/100)) - W · 5.832616878 - Cl · 5.86
//!
//! 계수는 과거 저장 기록과 호환되도록 고정이다.

use super::reference::ReferenceData;

/// 수소 함량 보정 계수 [kcal/kg per %H]
pub const HYDROGEN_FACTOR: f64 = 50.635_330_8;
/// 수분 증발 잠열 계수 [kcal/kg per %H2O]
pub const MOISTURE_FACTOR: f64 = 5.832_616_878;
/// 염소 보정 계수 [kcal/kg per %Cl]
pub const CHLORINE_FACTOR: f64 = 5.86;

fn is_percentage(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// 순발열량을 계산해 정수 kcal/kg로 반올림한다.
///
/// 수소 함량을 모르거나 입력이 범위를 벗어나면 `None`. 기준 데이터가 아직 없는 신규
/// 연료에서는 흔한 상황이므로 오류가 아니라 "계산 불가"로 다룬다.
/// `chlorine_pct`가 없으면 0으로 본다.
pub fn compute_ncv(
    pcs_dry: f64,
    moisture_pct: f64,
    hydrogen_pct: Option<f64>,
    chlorine_pct: Option<f64>,
) -> Option<f64> {
    let hydrogen = hydrogen_pct?;
    let chlorine = chlorine_pct.unwrap_or(0.0);
    if !is_non_negative(pcs_dry)
        || !is_percentage(moisture_pct)
        || !is_non_negative(hydrogen)
        || !is_non_negative(chlorine)
    {
        return None;
    }
    let ncv = (pcs_dry - HYDROGEN_FACTOR * hydrogen) * (1.0 - moisture_pct / 100.0)
        - moisture_pct * MOISTURE_FACTOR
        - chlorine * CHLORINE_FACTOR;
    ncv.is_finite().then(|| round_half_up(ncv))
}

/// 반올림. 0.5는 항상 +∞ 쪽으로 올려 과거 저장 기록의 정수 NCV와 맞춘다 (-2.5 → -2).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// 기준 데이터에서 연료의 수소 함량을 찾아 순발열량을 계산한다.
pub fn compute_ncv_for_fuel(
    pcs_dry: f64,
    moisture_pct: f64,
    fuel: &str,
    chlorine_pct: Option<f64>,
    reference: &ReferenceData,
) -> Option<f64> {
    let hydrogen = reference.hydrogen_pct(fuel);
    if hydrogen.is_none() {
        log::debug!("수소 함량 미등록 연료: {fuel}");
    }
    compute_ncv(pcs_dry, moisture_pct, hydrogen, chlorine_pct)
}

/// 불활성분(inerts) 보정: PCS_used = PCS_measured · (1 - inerts/100).
/// 불활성분이 없으면 측정값을 그대로 쓴다.
pub fn corrected_pcs(pcs_measured: f64, inerts_pct: Option<f64>) -> Option<f64> {
    if !is_non_negative(pcs_measured) {
        return None;
    }
    match inerts_pct {
        None => Some(pcs_measured),
        Some(inerts) if is_percentage(inerts) => Some(pcs_measured * (1.0 - inerts / 100.0)),
        Some(_) => None,
    }
}
