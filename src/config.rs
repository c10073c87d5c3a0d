use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::blend::{BlendSettings, DEFAULT_CONTAINER_VOLUME_M3};
use crate::thresholds::{BlendThresholds, ImpactThresholds};

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// 혼합/재 혼입 지표 경계 설정. 관리자가 편집하고, 계산 중에는 읽기 전용 스냅샷으로 쓴다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub blend: BlendThresholds,
    #[serde(default)]
    pub impact: ImpactThresholds,
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// auto / ko / en / fr
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub language_pack_dir: Option<String>,
    /// 연료 기준 데이터 TOML. 없으면 내장 테이블을 쓴다.
    #[serde(default)]
    pub reference_data: Option<PathBuf>,
    /// 체적 환산용 컨테이너 체적 [m3]
    #[serde(default = "default_container_volume")]
    pub container_volume_m3: f64,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

fn default_language() -> String {
    "auto".to_string()
}

fn default_container_volume() -> f64 {
    DEFAULT_CONTAINER_VOLUME_M3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            language_pack_dir: None,
            reference_data: None,
            container_volume_m3: default_container_volume(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::info!("설정 로드: {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        log::info!("기본 설정 생성: {}", path.display());
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn blend_settings(&self) -> BlendSettings {
        BlendSettings {
            container_volume_m3: self.container_volume_m3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::{Indicator, Status, Threshold, ThresholdSet};

    #[test]
    fn missing_thresholds_deserialize_as_unset() {
        let cfg: Config = toml::from_str(
            r#"
            language = "fr"

            [thresholds.blend.chlorine]
            kind = "at_most"
            green = 0.5
            yellow = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.language, "fr");
        assert_eq!(cfg.container_volume_m3, DEFAULT_CONTAINER_VOLUME_M3);
        assert_eq!(cfg.thresholds.blend.ncv, Threshold::Unset);
        assert_eq!(
            cfg.thresholds.blend.threshold(Indicator::Chlorine),
            Some(&Threshold::AtMost {
                green: 0.5,
                yellow: 1.0
            })
        );
        assert_eq!(
            cfg.thresholds.blend.chlorine.classify(0.5),
            Status::Green
        );
    }

    #[test]
    fn default_config_survives_toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.thresholds.impact.delta_lsf = Threshold::AtLeast {
            green: -1.0,
            yellow: -3.0,
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
