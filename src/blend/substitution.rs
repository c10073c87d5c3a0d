//! 열 대체율(TSR): 킬른 투입 열량 중 대체연료가 공급하는 비율.

use super::aggregate::BlendSummary;
use crate::weighting::guarded_ratio;

fn is_valid_flow(weight_t: f64, ncv_kcal_per_kg: f64) -> bool {
    weight_t.is_finite() && weight_t >= 0.0 && ncv_kcal_per_kg.is_finite() && ncv_kcal_per_kg >= 0.0
}

/// TSR [%] = AF 열량 / (AF 열량 + 화석연료 열량) × 100.
///
/// 무게는 같은 기간/단위(t)로 맞춰야 한다. 총 열량이 0에 가깝거나 입력이 음수/비유한이면 `None`.
pub fn thermal_substitution_rate(
    af_weight_t: f64,
    af_ncv_kcal_per_kg: f64,
    fossil_weight_t: f64,
    fossil_ncv_kcal_per_kg: f64,
) -> Option<f64> {
    if !is_valid_flow(af_weight_t, af_ncv_kcal_per_kg)
        || !is_valid_flow(fossil_weight_t, fossil_ncv_kcal_per_kg)
    {
        return None;
    }
    let af_heat = af_weight_t * af_ncv_kcal_per_kg;
    let fossil_heat = fossil_weight_t * fossil_ncv_kcal_per_kg;
    guarded_ratio(af_heat, af_heat + fossil_heat).map(|r| r * 100.0)
}

/// 혼합 요약의 총 무게와 혼합 NCV로 TSR을 계산한다.
pub fn blend_substitution_rate(
    summary: &BlendSummary,
    fossil_weight_t: f64,
    fossil_ncv_kcal_per_kg: f64,
) -> Option<f64> {
    let af_ncv = summary.ncv?;
    thermal_substitution_rate(
        summary.total_weight_t,
        af_ncv,
        fossil_weight_t,
        fossil_ncv_kcal_per_kg,
    )
}
