//! TOML 입력 문서: 연료 기준 데이터, 혼합 레시피, 재 혼입 영향 입력, 분석 이력.
//!
//! 문서를 한 번 읽어 만든 스냅샷을 계산 동안 그대로 쓴다.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::blend::{FuelCharacteristics, Installation, Recipe};
use crate::clinker::ImpactInput;
use crate::fuel::{AnalysisInput, AnalysisResult, FuelReference, ReferenceData};

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("{path}: 파일 입출력 오류: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: TOML 파싱 오류: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// TOML 파일 하나를 읽어 역직렬화한다.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ReferenceDataError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
        path: display.clone(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ReferenceDataError::Parse {
        path: display,
        source,
    })
}

/// `[[fuel]]` 배열로 된 기준 데이터 문서.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDocument {
    #[serde(default, rename = "fuel")]
    pub fuels: Vec<FuelReference>,
}

/// 기준 데이터 파일을 읽는다. 불변식을 어긴 기록은 경고 후 제외된다.
pub fn load_reference_data(path: &Path) -> Result<ReferenceData, ReferenceDataError> {
    let doc: ReferenceDocument = load_toml(path)?;
    log::info!("기준 데이터 {}건 로드: {}", doc.fuels.len(), path.display());
    Ok(ReferenceData::new(doc.fuels))
}

/// 내장 테이블 위에 파일의 기록을 덮어쓴다. 경로가 없거나 파일이 없으면 내장 테이블만 쓴다.
pub fn load_reference_or_builtin(path: Option<&Path>) -> Result<ReferenceData, ReferenceDataError> {
    let builtin = ReferenceData::builtin();
    match path {
        Some(p) if p.exists() => Ok(builtin.merged_with(&load_reference_data(p)?)),
        Some(p) => {
            log::warn!("기준 데이터 파일이 없어 내장 테이블 사용: {}", p.display());
            Ok(builtin)
        }
        None => Ok(builtin),
    }
}

/// 화석연료(예: 석유 코크스) 투입량. TSR 계산에 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FossilFeed {
    pub weight_t: f64,
    pub ncv: f64,
}

/// 혼합 레시피 문서.
///
/// ```toml
/// [[installation]]
/// name = "Ligne 1"
/// entries = [{ fuel = "Pneus", containers = 4 }]
///
/// [[characteristics]]
/// fuel = "Pneus"
/// ncv = 6500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeDocument {
    #[serde(default, rename = "installation")]
    pub installations: Vec<Installation>,
    #[serde(default)]
    pub characteristics: Vec<FuelCharacteristics>,
    #[serde(default)]
    pub fossil: Option<FossilFeed>,
}

impl RecipeDocument {
    pub fn recipe(&self) -> Recipe {
        Recipe::new(self.installations.clone())
    }

    /// 문서에 적힌 특성을 우선하고, 빠진 연료는 `fallback`(보통 분석 이력 평균)에서 채운다.
    pub fn characteristics_with(&self, fallback: &[FuelCharacteristics]) -> Vec<FuelCharacteristics> {
        let mut out = self.characteristics.clone();
        for extra in fallback {
            let known = out
                .iter()
                .any(|c| c.fuel.trim().eq_ignore_ascii_case(extra.fuel.trim()));
            if !known {
                out.push(extra.clone());
            }
        }
        out
    }
}

/// `[[analysis]]` 배열로 된 분석 이력 문서.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysesDocument {
    #[serde(default, rename = "analysis")]
    pub analyses: Vec<AnalysisInput>,
}

impl AnalysesDocument {
    /// 현재 기준 데이터로 NCV를 계산한 기록 목록.
    pub fn results(&self, reference: &ReferenceData) -> Vec<AnalysisResult> {
        self.analyses
            .iter()
            .cloned()
            .map(|input| AnalysisResult::create(input, reference))
            .collect()
    }
}

pub fn load_recipe(path: &Path) -> Result<RecipeDocument, ReferenceDataError> {
    load_toml(path)
}

pub fn load_impact_input(path: &Path) -> Result<ImpactInput, ReferenceDataError> {
    load_toml(path)
}

pub fn load_analyses(path: &Path) -> Result<AnalysesDocument, ReferenceDataError> {
    load_toml(path)
}
