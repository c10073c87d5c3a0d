//! 혼합 레시피 집계와 열 대체율 모듈 모음.

pub mod aggregate;
pub mod recipe;
pub mod substitution;

pub use aggregate::*;
pub use recipe::*;
pub use substitution::*;
