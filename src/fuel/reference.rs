//! 연료 종류별 기준 상수(컨테이너당 무게, 수소 함량, 밀도, 톤당 단가)와 조회.
//! 내장 값은 참고용이며 현장 기준 데이터 파일로 덮어써야 한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 연료 한 종류의 기준 데이터. 측정/입력되지 않은 값은 `None`이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelReference {
    pub name: String,
    /// 표준 컨테이너 1개당 무게 [t]
    #[serde(default)]
    pub weight_per_container_t: Option<f64>,
    /// 수소 함량 [%]
    #[serde(default)]
    pub hydrogen_pct: Option<f64>,
    /// 겉보기 밀도 [t/m3]
    #[serde(default)]
    pub density_t_per_m3: Option<f64>,
    /// 톤당 단가
    #[serde(default)]
    pub cost_per_tonne: Option<f64>,
}

/// 기준 데이터 불변식 위반.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuelReferenceError {
    #[error("연료 이름이 비어 있습니다")]
    EmptyName,
    #[error("{0}: 컨테이너당 무게는 음수일 수 없습니다")]
    NegativeWeight(String),
    #[error("{0}: 수소 함량은 0~100% 범위여야 합니다")]
    HydrogenOutOfRange(String),
    #[error("{0}: 밀도는 음수일 수 없습니다")]
    NegativeDensity(String),
}

impl FuelReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight_per_container_t: None,
            hydrogen_pct: None,
            density_t_per_m3: None,
            cost_per_tonne: None,
        }
    }

    /// 이름 비교는 앞뒤 공백과 대소문자를 무시한다.
    pub fn matches(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// 무게/수소/밀도 불변식을 검사한다.
    pub fn validate(&self) -> Result<(), FuelReferenceError> {
        if self.name.trim().is_empty() {
            return Err(FuelReferenceError::EmptyName);
        }
        if self
            .weight_per_container_t
            .is_some_and(|w| !w.is_finite() || w < 0.0)
        {
            return Err(FuelReferenceError::NegativeWeight(self.name.clone()));
        }
        if self
            .hydrogen_pct
            .is_some_and(|h| !h.is_finite() || !(0.0..=100.0).contains(&h))
        {
            return Err(FuelReferenceError::HydrogenOutOfRange(self.name.clone()));
        }
        if self
            .density_t_per_m3
            .is_some_and(|d| !d.is_finite() || d < 0.0)
        {
            return Err(FuelReferenceError::NegativeDensity(self.name.clone()));
        }
        Ok(())
    }
}

/// 한 번의 계산 동안 고정해서 쓰는 기준 데이터 스냅샷.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    fuels: Vec<FuelReference>,
}

impl ReferenceData {
    /// 불변식을 통과한 기록만 받는다. 위반 기록은 경고 후 제외하고, 같은 이름은 뒤의 것이 이긴다.
    pub fn new(fuels: Vec<FuelReference>) -> Self {
        let mut accepted: Vec<FuelReference> = Vec::with_capacity(fuels.len());
        for fuel in fuels {
            if let Err(err) = fuel.validate() {
                log::warn!("기준 데이터 제외: {err}");
                continue;
            }
            match accepted.iter_mut().find(|f| f.matches(&fuel.name)) {
                Some(existing) => *existing = fuel,
                None => accepted.push(fuel),
            }
        }
        Self { fuels: accepted }
    }

    /// 내장 참고 테이블로 스냅샷을 만든다.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_FUELS.iter().map(BuiltinFuel::to_reference).collect())
    }

    pub fn fuels(&self) -> &[FuelReference] {
        &self.fuels
    }

    pub fn find(&self, name: &str) -> Option<&FuelReference> {
        self.fuels.iter().find(|f| f.matches(name))
    }

    /// 연료의 수소 함량. 연료가 없거나 값이 비어 있으면 `None`.
    pub fn hydrogen_pct(&self, name: &str) -> Option<f64> {
        self.find(name)?.hydrogen_pct
    }

    /// 다른 스냅샷의 기록으로 덮어쓴 새 스냅샷을 만든다.
    pub fn merged_with(&self, overrides: &ReferenceData) -> Self {
        let mut fuels = self.fuels.clone();
        fuels.extend(overrides.fuels.iter().cloned());
        Self::new(fuels)
    }
}

struct BuiltinFuel {
    name: &'static str,
    weight_per_container_t: Option<f64>,
    hydrogen_pct: Option<f64>,
    density_t_per_m3: Option<f64>,
    cost_per_tonne: Option<f64>,
}

impl BuiltinFuel {
    fn to_reference(&self) -> FuelReference {
        FuelReference {
            name: self.name.to_string(),
            weight_per_container_t: self.weight_per_container_t,
            hydrogen_pct: self.hydrogen_pct,
            density_t_per_m3: self.density_t_per_m3,
            cost_per_tonne: self.cost_per_tonne,
        }
    }
}

const fn fuel(
    name: &'static str,
    weight_per_container_t: Option<f64>,
    hydrogen_pct: Option<f64>,
    density_t_per_m3: Option<f64>,
    cost_per_tonne: Option<f64>,
) -> BuiltinFuel {
    BuiltinFuel {
        name,
        weight_per_container_t,
        hydrogen_pct,
        density_t_per_m3,
        cost_per_tonne,
    }
}

const BUILTIN_FUELS: &[BuiltinFuel] = &[
    fuel("Pneus", Some(1.8), Some(6.5), Some(0.60), Some(25.0)),
    fuel("CSR", Some(1.2), Some(5.8), Some(0.40), Some(15.0)),
    fuel("Grignons", Some(2.1), Some(6.0), Some(0.70), Some(30.0)),
    fuel("Boues", None, Some(4.5), Some(1.05), Some(5.0)),
    fuel("Bois", Some(1.0), Some(6.1), Some(0.35), Some(20.0)),
    fuel("DMB", Some(1.5), Some(5.0), Some(0.50), Some(10.0)),
    fuel("Plastiques", Some(0.9), Some(7.2), Some(0.30), Some(12.0)),
    fuel("Petcoke", None, Some(3.5), Some(0.80), Some(120.0)),
];

// NOTE:
// - Hydrogen contents are typical dry-basis values for each fuel family, not plant measurements.
// - Boues and Petcoke carry no per-container weight and fall back to the volumetric rule.
