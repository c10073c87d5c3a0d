//! 대체연료(AFR) 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 화면에서도 재사용한다.

pub mod app;
pub mod blend;
pub mod clinker;
pub mod config;
pub mod fuel;
pub mod i18n;
pub mod reference_data;
pub mod thresholds;
pub mod ui_cli;
pub mod weighting;
