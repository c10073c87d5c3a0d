//! 실험실 분석 기록 한 건과, 기록 이력에서 구하는 연료별 통계/평균 특성.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ncv::{compute_ncv_for_fuel, corrected_pcs};
use super::reference::ReferenceData;
use crate::blend::FuelCharacteristics;
use crate::weighting::weighted_average_of_known;

/// 분석 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub date: NaiveDate,
    pub fuel: String,
    #[serde(default)]
    pub supplier: String,
    /// 입고 톤수 [t]
    pub tonnage_t: f64,
    /// 건량 기준 고위발열량 [kcal/kg]
    pub pcs: f64,
    /// 수분 [%]
    pub moisture_pct: f64,
    #[serde(default)]
    pub chlorine_pct: Option<f64>,
    #[serde(default)]
    pub ash_pct: Option<f64>,
    /// 불활성분 [%]
    #[serde(default)]
    pub inerts_pct: Option<f64>,
}

/// 저장 단위가 되는 분석 기록. NCV는 생성/수정 시 다시 계산된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub input: AnalysisInput,
    /// 계산된 순발열량 [kcal/kg]. 기준 데이터가 없으면 비어 있다.
    #[serde(default)]
    pub ncv: Option<f64>,
}

/// 명시적 수정 요청. `None`인 항목은 그대로 둔다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisEdit {
    pub date: Option<NaiveDate>,
    pub fuel: Option<String>,
    pub supplier: Option<String>,
    pub tonnage_t: Option<f64>,
    pub pcs: Option<f64>,
    pub moisture_pct: Option<f64>,
    pub chlorine_pct: Option<Option<f64>>,
    pub ash_pct: Option<Option<f64>>,
    pub inerts_pct: Option<Option<f64>>,
}

fn ncv_of(input: &AnalysisInput, reference: &ReferenceData) -> Option<f64> {
    let pcs = corrected_pcs(input.pcs, input.inerts_pct)?;
    compute_ncv_for_fuel(
        pcs,
        input.moisture_pct,
        &input.fuel,
        input.chlorine_pct,
        reference,
    )
}

impl AnalysisResult {
    /// 입력으로 기록을 만들고 NCV를 계산한다.
    pub fn create(input: AnalysisInput, reference: &ReferenceData) -> Self {
        let ncv = ncv_of(&input, reference);
        Self { input, ncv }
    }

    /// 수정 사항을 반영하고 NCV를 다시 계산한다.
    pub fn edit(&mut self, edit: AnalysisEdit, reference: &ReferenceData) {
        let input = &mut self.input;
        if let Some(date) = edit.date {
            input.date = date;
        }
        if let Some(fuel) = edit.fuel {
            input.fuel = fuel;
        }
        if let Some(supplier) = edit.supplier {
            input.supplier = supplier;
        }
        if let Some(tonnage) = edit.tonnage_t {
            input.tonnage_t = tonnage;
        }
        if let Some(pcs) = edit.pcs {
            input.pcs = pcs;
        }
        if let Some(moisture) = edit.moisture_pct {
            input.moisture_pct = moisture;
        }
        if let Some(chlorine) = edit.chlorine_pct {
            input.chlorine_pct = chlorine;
        }
        if let Some(ash) = edit.ash_pct {
            input.ash_pct = ash;
        }
        if let Some(inerts) = edit.inerts_pct {
            input.inerts_pct = inerts;
        }
        self.recompute(reference);
    }

    /// 기준 데이터가 바뀐 뒤 NCV만 다시 계산한다.
    pub fn recompute(&mut self, reference: &ReferenceData) {
        self.ncv = ncv_of(&self.input, reference);
    }

    pub fn is_fuel(&self, fuel: &str) -> bool {
        self.input.fuel.trim().eq_ignore_ascii_case(fuel.trim())
    }
}

/// 한 지표의 평균/최소/최대.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    /// 유한한 값만 집계한다. 값이 하나도 없으면 `None`.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| SeriesStats {
            mean: sum / count as f64,
            min,
            max,
        })
    }
}

/// 연료 하나의 분석 이력 통계.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelStatistics {
    pub fuel: String,
    pub count: usize,
    pub total_tonnage_t: f64,
    pub ncv: Option<SeriesStats>,
    pub moisture: Option<SeriesStats>,
    pub chlorine: Option<SeriesStats>,
    pub ash: Option<SeriesStats>,
}

/// 기록을 연료별로 묶어 통계를 낸다. 연료는 처음 등장한 순서를 따른다.
pub fn fuel_statistics(records: &[AnalysisResult]) -> Vec<FuelStatistics> {
    let mut fuels: Vec<&str> = Vec::new();
    for record in records {
        let name = record.input.fuel.trim();
        if !fuels.iter().any(|f| f.eq_ignore_ascii_case(name)) {
            fuels.push(name);
        }
    }
    fuels
        .into_iter()
        .map(|fuel| {
            let group: Vec<&AnalysisResult> = records.iter().filter(|r| r.is_fuel(fuel)).collect();
            FuelStatistics {
                fuel: fuel.to_string(),
                count: group.len(),
                total_tonnage_t: group
                    .iter()
                    .map(|r| r.input.tonnage_t)
                    .filter(|t| t.is_finite() && *t > 0.0)
                    .fold(0.0, |acc, t| acc + t),
                ncv: SeriesStats::from_values(group.iter().filter_map(|r| r.ncv)),
                moisture: SeriesStats::from_values(group.iter().map(|r| r.input.moisture_pct)),
                chlorine: SeriesStats::from_values(group.iter().filter_map(|r| r.input.chlorine_pct)),
                ash: SeriesStats::from_values(group.iter().filter_map(|r| r.input.ash_pct)),
            }
        })
        .collect()
}

/// 톤수 가중 평균으로 연료의 평균 특성을 구한다. 단가는 기준 데이터에서 가져온다.
pub fn historical_characteristics(
    records: &[AnalysisResult],
    fuel: &str,
    reference: &ReferenceData,
) -> FuelCharacteristics {
    let group: Vec<&AnalysisResult> = records
        .iter()
        .filter(|r| r.is_fuel(fuel) && r.input.tonnage_t.is_finite() && r.input.tonnage_t > 0.0)
        .collect();
    let average = |pick: fn(&AnalysisResult) -> Option<f64>| {
        weighted_average_of_known(group.iter().map(|r| (r.input.tonnage_t, pick(r))))
    };
    FuelCharacteristics {
        fuel: fuel.trim().to_string(),
        ncv: average(|r| r.ncv),
        moisture: average(|r| Some(r.input.moisture_pct)),
        chlorine: average(|r| r.input.chlorine_pct),
        ash: average(|r| r.input.ash_pct),
        cost_per_tonne: reference.find(fuel).and_then(|r| r.cost_per_tonne),
    }
}

/// 이력에 나타난 모든 연료의 평균 특성.
pub fn all_historical_characteristics(
    records: &[AnalysisResult],
    reference: &ReferenceData,
) -> Vec<FuelCharacteristics> {
    fuel_statistics(records)
        .iter()
        .map(|stats| historical_characteristics(records, &stats.fuel, reference))
        .collect()
}
