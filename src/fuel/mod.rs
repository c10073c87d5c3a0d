//! 대체연료(AFR) 기준 데이터, 순발열량 계산, 분석 기록 모듈 모음.

pub mod analysis;
pub mod ncv;
pub mod reference;

pub use analysis::*;
pub use ncv::*;
pub use reference::*;
