//! 레시피(연료별 컨테이너 수)를 무게 가중 평균 혼합 특성과 단가로 환산한다.

use serde::{Deserialize, Serialize};

use super::recipe::{merge_entries, Recipe, RecipeEntry};
use crate::fuel::reference::{FuelReference, ReferenceData};
use crate::weighting::weighted_average;

/// 표준 컨테이너 체적 [m3]. 컨테이너당 무게가 없을 때의 체적 환산에 쓴다.
pub const DEFAULT_CONTAINER_VOLUME_M3: f64 = 3.0;

/// 연료별 평균 특성. 분석 이력이나 입력 파일에서 온다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelCharacteristics {
    pub fuel: String,
    /// 순발열량 [kcal/kg]
    #[serde(default)]
    pub ncv: Option<f64>,
    /// 수분 [%]
    #[serde(default)]
    pub moisture: Option<f64>,
    /// 염소 [%]
    #[serde(default)]
    pub chlorine: Option<f64>,
    /// 회분 [%]
    #[serde(default)]
    pub ash: Option<f64>,
    /// 톤당 단가. 없으면 기준 데이터의 단가를 쓴다.
    #[serde(default)]
    pub cost_per_tonne: Option<f64>,
}

impl FuelCharacteristics {
    pub fn new(fuel: impl Into<String>) -> Self {
        Self {
            fuel: fuel.into(),
            ..Self::default()
        }
    }
}

/// 혼합 계산 설정.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendSettings {
    pub container_volume_m3: f64,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            container_volume_m3: DEFAULT_CONTAINER_VOLUME_M3,
        }
    }
}

/// 연료 무게를 어떤 기준 값으로 구했는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeightSource {
    /// 컨테이너 수 × 컨테이너당 무게
    PerContainer,
    /// 컨테이너 수 × 컨테이너 체적 × 밀도 (레거시 대체식)
    Volumetric,
}

/// 혼합에 참여한 연료 하나의 기여분.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelContribution {
    pub fuel: String,
    pub containers: u32,
    pub weight_t: f64,
    pub source: WeightSource,
}

/// 혼합 지표. 총 무게가 0이면 모든 지표가 `None`이다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlendSummary {
    pub total_weight_t: f64,
    pub contributions: Vec<FuelContribution>,
    /// 무게를 정할 수 없어 제외된 연료
    pub unresolved: Vec<String>,
    pub ncv: Option<f64>,
    pub moisture: Option<f64>,
    pub chlorine: Option<f64>,
    pub ash: Option<f64>,
    pub cost_per_tonne: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationBlend {
    pub name: String,
    pub summary: BlendSummary,
}

/// 설비별 결과와 전체 합산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendReport {
    pub installations: Vec<InstallationBlend>,
    pub combined: BlendSummary,
}

/// 컨테이너당 무게를 우선하고, 없으면 체적 × 밀도로 환산한다.
pub fn resolve_weight(
    containers: u32,
    reference: Option<&FuelReference>,
    settings: &BlendSettings,
) -> Option<(f64, WeightSource)> {
    let reference = reference?;
    let count = f64::from(containers);
    let positive = |v: &f64| v.is_finite() && *v > 0.0;
    if let Some(w) = reference.weight_per_container_t.filter(positive) {
        return Some((count * w, WeightSource::PerContainer));
    }
    let volume = Some(settings.container_volume_m3).filter(positive)?;
    let density = reference.density_t_per_m3.filter(positive)?;
    Some((count * volume * density, WeightSource::Volumetric))
}

fn find_characteristics<'a>(
    characteristics: &'a [FuelCharacteristics],
    fuel: &str,
) -> Option<&'a FuelCharacteristics> {
    characteristics
        .iter()
        .find(|c| c.fuel.trim().eq_ignore_ascii_case(fuel.trim()))
}

fn weighted_indicator<F>(contributions: &[FuelContribution], pick: F) -> Option<f64>
where
    F: Fn(&FuelContribution) -> Option<f64>,
{
    weighted_average(contributions.iter().map(|c| (c.weight_t, pick(c))))
}

/// 레시피 줄 묶음 하나를 요약한다.
pub fn summarize_entries<'a, I>(
    entries: I,
    reference: &ReferenceData,
    characteristics: &[FuelCharacteristics],
    settings: &BlendSettings,
) -> BlendSummary
where
    I: IntoIterator<Item = &'a RecipeEntry>,
{
    let mut contributions = Vec::new();
    let mut unresolved = Vec::new();
    for entry in merge_entries(entries) {
        match resolve_weight(entry.containers, reference.find(&entry.fuel), settings) {
            Some((weight_t, source)) => contributions.push(FuelContribution {
                fuel: entry.fuel,
                containers: entry.containers,
                weight_t,
                source,
            }),
            None => {
                log::warn!("무게를 정할 수 없어 혼합에서 제외: {}", entry.fuel);
                unresolved.push(entry.fuel);
            }
        }
    }

    let total_weight_t = contributions.iter().fold(0.0, |acc, c| acc + c.weight_t);
    let lookup = |c: &FuelContribution| find_characteristics(characteristics, &c.fuel);

    let ncv = weighted_indicator(&contributions, |c| lookup(c).and_then(|f| f.ncv));
    let moisture = weighted_indicator(&contributions, |c| lookup(c).and_then(|f| f.moisture));
    let chlorine = weighted_indicator(&contributions, |c| lookup(c).and_then(|f| f.chlorine));
    let ash = weighted_indicator(&contributions, |c| lookup(c).and_then(|f| f.ash));
    let cost_per_tonne = weighted_indicator(&contributions, |c| {
        lookup(c)
            .and_then(|f| f.cost_per_tonne)
            .or_else(|| reference.find(&c.fuel).and_then(|r| r.cost_per_tonne))
    });

    BlendSummary {
        total_weight_t,
        contributions,
        unresolved,
        ncv,
        moisture,
        chlorine,
        ash,
        cost_per_tonne,
    }
}

/// 설비별 혼합과 전체 혼합을 계산한다.
///
/// 레시피에 없는 연료는 무게 0으로 가중 평균에서 빠지므로, 그 연료의 특성이 비어 있어도
/// 결과에 영향을 주지 않는다.
pub fn aggregate_blend(
    recipe: &Recipe,
    reference: &ReferenceData,
    characteristics: &[FuelCharacteristics],
    settings: &BlendSettings,
) -> BlendReport {
    let installations = recipe
        .installations
        .iter()
        .map(|installation| InstallationBlend {
            name: installation.name.clone(),
            summary: summarize_entries(&installation.entries, reference, characteristics, settings),
        })
        .collect();
    let combined = summarize_entries(recipe.entries(), reference, characteristics, settings);
    BlendReport {
        installations,
        combined,
    }
}
