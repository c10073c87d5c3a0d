//! 무게 가중 평균과 0-분모 보호 규칙.
//!
//! 혼합 연료 지표, 클링커 재(ash) 혼입, 분석 이력 평균이 모두 이 규칙을 공유한다.

/// 절댓값이 이보다 작은 분모는 0으로 취급한다.
pub const EPSILON: f64 = 1e-6;

/// 값이 0에 충분히 가까운지 판정한다.
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// 분모가 0에 가까우면 `None`을 돌려주는 나눗셈.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if !numerator.is_finite() || !denominator.is_finite() || is_near_zero(denominator) {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

/// 부호는 유지한 채 절댓값을 `EPSILON` 이상으로 올린 분모.
pub fn floored_denominator(value: f64) -> f64 {
    value.abs().max(EPSILON).copysign(value)
}

/// `Σ(w_i * v_i) / Σ(w_i)` 를 계산한다.
///
/// - 무게가 0인 항목은 값이 없어도 건너뛴다.
/// - 무게가 양수인데 값이 없거나 유한하지 않으면 결과는 `None`.
/// - 음수/비유한 무게가 있거나 총 무게가 0이면 `None`.
pub fn weighted_average<I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;
    for (weight, value) in items {
        if !weight.is_finite() || weight < 0.0 {
            return None;
        }
        if weight == 0.0 {
            continue;
        }
        let value = value.filter(|v| v.is_finite())?;
        total_weight += weight;
        weighted_sum += weight * value;
    }
    guarded_ratio(weighted_sum, total_weight)
}

/// 값이 있는 항목만 골라 가중 평균한다. 분석 이력처럼 측정 누락이 흔한 데이터에 쓴다.
pub fn weighted_average_of_known<I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    weighted_average(
        items
            .into_iter()
            .filter(|(_, value)| value.map_or(false, f64::is_finite)),
    )
}
