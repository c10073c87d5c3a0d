//! 클링커 화학: 산화물 분석, 시멘트 모듈러스, 재 혼입 영향.

pub mod impact;
pub mod moduli;
pub mod oxides;

pub use impact::*;
pub use moduli::*;
pub use oxides::*;
