//! 지표별 녹/황/적 경계와 분류기.
//!
//! 경계는 지표마다 명시적으로 "설정 안 됨"을 가질 수 있고, 그 경우 분류 결과는 항상
//! `Status::Unknown`이다. 경계값 자체는 이름이 붙은 쪽(더 좋은) 구간에 포함된다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blend::BlendSummary;
use crate::clinker::{ImpactResult, Modulus, Oxide};

/// 분류 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Green,
    Yellow,
    Red,
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Green => "green",
            Status::Yellow => "yellow",
            Status::Red => "red",
            Status::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// 지표의 방향성.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsWorse,
    LowerIsWorse,
    Banded,
}

/// 지표 하나의 경계 설정.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Threshold {
    #[default]
    Unset,
    /// 높을수록 나쁨: v ≤ green → 녹, v ≤ yellow → 황, 그 외 적
    AtMost { green: f64, yellow: f64 },
    /// 낮을수록 나쁨: v ≥ green → 녹, v ≥ yellow → 황, 그 외 적
    AtLeast { green: f64, yellow: f64 },
    /// 허용 구간: [green_min, green_max] → 녹, [yellow_min, yellow_max] → 황, 그 외 적
    Within {
        green_min: f64,
        green_max: f64,
        yellow_min: f64,
        yellow_max: f64,
    },
}

impl Threshold {
    pub fn polarity(&self) -> Option<Polarity> {
        match self {
            Threshold::Unset => None,
            Threshold::AtMost { .. } => Some(Polarity::HigherIsWorse),
            Threshold::AtLeast { .. } => Some(Polarity::LowerIsWorse),
            Threshold::Within { .. } => Some(Polarity::Banded),
        }
    }

    /// 경계가 서로 모순되지 않는지 검사한다. 모순된 설정(예: min > max)은 설정 안 됨과 같게 다룬다.
    pub fn is_consistent(&self) -> bool {
        let all_finite = |values: &[f64]| values.iter().all(|v| v.is_finite());
        match *self {
            Threshold::Unset => false,
            Threshold::AtMost { green, yellow } => all_finite(&[green, yellow]) && green <= yellow,
            Threshold::AtLeast { green, yellow } => all_finite(&[green, yellow]) && green >= yellow,
            Threshold::Within {
                green_min,
                green_max,
                yellow_min,
                yellow_max,
            } => {
                all_finite(&[green_min, green_max, yellow_min, yellow_max])
                    && yellow_min <= green_min
                    && green_min <= green_max
                    && green_max <= yellow_max
            }
        }
    }

    pub fn classify(&self, value: f64) -> Status {
        if !value.is_finite() || !self.is_consistent() {
            return Status::Unknown;
        }
        match *self {
            Threshold::Unset => Status::Unknown,
            Threshold::AtMost { green, yellow } => {
                if value <= green {
                    Status::Green
                } else if value <= yellow {
                    Status::Yellow
                } else {
                    Status::Red
                }
            }
            Threshold::AtLeast { green, yellow } => {
                if value >= green {
                    Status::Green
                } else if value >= yellow {
                    Status::Yellow
                } else {
                    Status::Red
                }
            }
            Threshold::Within {
                green_min,
                green_max,
                yellow_min,
                yellow_max,
            } => {
                if (green_min..=green_max).contains(&value) {
                    Status::Green
                } else if (yellow_min..=yellow_max).contains(&value) {
                    Status::Yellow
                } else {
                    Status::Red
                }
            }
        }
    }
}

/// 분류 가능한 지표. 혼합 지표와 재 혼입 변화량 지표로 나뉜다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Ncv,
    Moisture,
    Chlorine,
    Ash,
    Cost,
    DeltaLsf,
    DeltaMs,
    DeltaAf,
    DeltaC3s,
    DeltaSo3,
    DeltaK2o,
    DeltaP2o5,
}

impl Indicator {
    pub const BLEND: [Indicator; 5] = [
        Indicator::Ncv,
        Indicator::Moisture,
        Indicator::Chlorine,
        Indicator::Ash,
        Indicator::Cost,
    ];

    pub const IMPACT: [Indicator; 7] = [
        Indicator::DeltaLsf,
        Indicator::DeltaMs,
        Indicator::DeltaAf,
        Indicator::DeltaC3s,
        Indicator::DeltaSo3,
        Indicator::DeltaK2o,
        Indicator::DeltaP2o5,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Indicator::Ncv => "ncv",
            Indicator::Moisture => "moisture",
            Indicator::Chlorine => "chlorine",
            Indicator::Ash => "ash",
            Indicator::Cost => "cost",
            Indicator::DeltaLsf => "delta_lsf",
            Indicator::DeltaMs => "delta_ms",
            Indicator::DeltaAf => "delta_af",
            Indicator::DeltaC3s => "delta_c3s",
            Indicator::DeltaSo3 => "delta_so3",
            Indicator::DeltaK2o => "delta_k2o",
            Indicator::DeltaP2o5 => "delta_p2o5",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Indicator::BLEND
            .into_iter()
            .chain(Indicator::IMPACT)
            .find(|i| i.key() == key)
    }
}

/// 지표 이름으로 경계를 찾을 수 있는 설정 묶음.
pub trait ThresholdSet {
    /// 이 묶음이 다루지 않는 지표는 `None`.
    fn threshold(&self, indicator: Indicator) -> Option<&Threshold>;
}

/// 혼합 지표 경계. 높을수록 나쁜 수분/염소/회분/단가, 낮을수록 나쁜 NCV가 일반적이다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendThresholds {
    #[serde(default)]
    pub ncv: Threshold,
    #[serde(default)]
    pub moisture: Threshold,
    #[serde(default)]
    pub chlorine: Threshold,
    #[serde(default)]
    pub ash: Threshold,
    #[serde(default)]
    pub cost: Threshold,
}

impl ThresholdSet for BlendThresholds {
    fn threshold(&self, indicator: Indicator) -> Option<&Threshold> {
        match indicator {
            Indicator::Ncv => Some(&self.ncv),
            Indicator::Moisture => Some(&self.moisture),
            Indicator::Chlorine => Some(&self.chlorine),
            Indicator::Ash => Some(&self.ash),
            Indicator::Cost => Some(&self.cost),
            _ => None,
        }
    }
}

/// 재 혼입 변화량(with - without) 경계.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactThresholds {
    #[serde(default)]
    pub delta_lsf: Threshold,
    #[serde(default)]
    pub delta_ms: Threshold,
    #[serde(default)]
    pub delta_af: Threshold,
    #[serde(default)]
    pub delta_c3s: Threshold,
    #[serde(default)]
    pub delta_so3: Threshold,
    #[serde(default)]
    pub delta_k2o: Threshold,
    #[serde(default)]
    pub delta_p2o5: Threshold,
}

impl ThresholdSet for ImpactThresholds {
    fn threshold(&self, indicator: Indicator) -> Option<&Threshold> {
        match indicator {
            Indicator::DeltaLsf => Some(&self.delta_lsf),
            Indicator::DeltaMs => Some(&self.delta_ms),
            Indicator::DeltaAf => Some(&self.delta_af),
            Indicator::DeltaC3s => Some(&self.delta_c3s),
            Indicator::DeltaSo3 => Some(&self.delta_so3),
            Indicator::DeltaK2o => Some(&self.delta_k2o),
            Indicator::DeltaP2o5 => Some(&self.delta_p2o5),
            _ => None,
        }
    }
}

/// 값을 지표 경계로 분류한다. 경계가 없거나 모순되면 `Unknown`.
pub fn classify<S: ThresholdSet + ?Sized>(value: f64, set: &S, indicator: Indicator) -> Status {
    set.threshold(indicator)
        .map_or(Status::Unknown, |threshold| threshold.classify(value))
}

/// 값이 없을 수 있는 경우의 분류.
pub fn classify_opt<S: ThresholdSet + ?Sized>(
    value: Option<f64>,
    set: &S,
    indicator: Indicator,
) -> Status {
    value.map_or(Status::Unknown, |v| classify(v, set, indicator))
}

/// 표시용 분류 결과 한 줄.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub indicator: Indicator,
    pub value: Option<f64>,
    pub status: Status,
}

/// 혼합 요약의 모든 지표를 분류한다.
pub fn classify_blend(summary: &BlendSummary, thresholds: &BlendThresholds) -> Vec<Classification> {
    Indicator::BLEND
        .into_iter()
        .map(|indicator| {
            let value = match indicator {
                Indicator::Ncv => summary.ncv,
                Indicator::Moisture => summary.moisture,
                Indicator::Chlorine => summary.chlorine,
                Indicator::Ash => summary.ash,
                Indicator::Cost => summary.cost_per_tonne,
                _ => None,
            };
            Classification {
                indicator,
                value,
                status: classify_opt(value, thresholds, indicator),
            }
        })
        .collect()
}

/// 재 혼입 변화량(절대값 차이)을 분류한다.
pub fn classify_impact(result: &ImpactResult, thresholds: &ImpactThresholds) -> Vec<Classification> {
    Indicator::IMPACT
        .into_iter()
        .map(|indicator| {
            let delta = match indicator {
                Indicator::DeltaLsf => result.modulus_delta(Modulus::Lsf),
                Indicator::DeltaMs => result.modulus_delta(Modulus::Ms),
                Indicator::DeltaAf => result.modulus_delta(Modulus::Af),
                Indicator::DeltaC3s => result.modulus_delta(Modulus::C3s),
                Indicator::DeltaSo3 => result.oxide_delta(Oxide::SO3),
                Indicator::DeltaK2o => result.oxide_delta(Oxide::K2O),
                Indicator::DeltaP2o5 => result.oxide_delta(Oxide::P2O5),
                _ => None,
            };
            let value = delta.and_then(|d| d.absolute);
            Classification {
                indicator,
                value,
                status: classify_opt(value, thresholds, indicator),
            }
        })
        .collect()
}
