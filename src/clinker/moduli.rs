//! 산화물 조성에서 시멘트 모듈러스(MS, AF, LSF)와 Bogue 광물상을 계산한다.
//!
//! - MS  = SiO2 / (Al2O3 + Fe2O3)
//! - AF  = Al2O3 / Fe2O3
//! - LSF = 100 · CaO / (2.8·SiO2 + 1.18·Al2O3 + 0.65·Fe2O3)
//! - C3S = 4.071·CaO - 7.600·SiO2 - 6.718·Al2O3 - 1.430·Fe2O3
//! - C2S = 2.867·SiO2 - 0.7544·C3S
//! - C3A = 2.650·Al2O3 - 1.692·Fe2O3
//! - C4AF = 3.043·Fe2O3
//!
//! 필요한 산화물이 없거나 분모가 0에 가까우면 해당 값만 `None`이다.

use serde::Serialize;

use super::oxides::{Oxide, OxideAnalysis};
use crate::weighting::guarded_ratio;

pub const LSF_SIO2: f64 = 2.8;
pub const LSF_AL2O3: f64 = 1.18;
pub const LSF_FE2O3: f64 = 0.65;

pub const C3S_CAO: f64 = 4.071;
pub const C3S_SIO2: f64 = 7.600;
pub const C3S_AL2O3: f64 = 6.718;
pub const C3S_FE2O3: f64 = 1.430;

pub const C2S_SIO2: f64 = 2.867;
pub const C2S_C3S: f64 = 0.7544;

pub const C3A_AL2O3: f64 = 2.650;
pub const C3A_FE2O3: f64 = 1.692;

pub const C4AF_FE2O3: f64 = 3.043;

/// 모듈러스/광물상 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Modulus {
    Ms,
    Af,
    Lsf,
    C3s,
    C2s,
    C3a,
    C4af,
}

impl Modulus {
    pub const ALL: [Modulus; 7] = [
        Modulus::Ms,
        Modulus::Af,
        Modulus::Lsf,
        Modulus::C3s,
        Modulus::C2s,
        Modulus::C3a,
        Modulus::C4af,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Modulus::Ms => "MS",
            Modulus::Af => "AF",
            Modulus::Lsf => "LSF",
            Modulus::C3s => "C3S",
            Modulus::C2s => "C2S",
            Modulus::C3a => "C3A",
            Modulus::C4af => "C4AF",
        }
    }
}

/// 산화물 분석에서 파생되는 값. 저장하지 않고 항상 다시 계산한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CementModuli {
    pub ms: Option<f64>,
    pub af: Option<f64>,
    pub lsf: Option<f64>,
    pub c3s: Option<f64>,
    pub c2s: Option<f64>,
    pub c3a: Option<f64>,
    pub c4af: Option<f64>,
}

impl CementModuli {
    pub fn get(&self, modulus: Modulus) -> Option<f64> {
        match modulus {
            Modulus::Ms => self.ms,
            Modulus::Af => self.af,
            Modulus::Lsf => self.lsf,
            Modulus::C3s => self.c3s,
            Modulus::C2s => self.c2s,
            Modulus::C3a => self.c3a,
            Modulus::C4af => self.c4af,
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub fn silica_modulus(analysis: &OxideAnalysis) -> Option<f64> {
    let sio2 = analysis.get(Oxide::SiO2)?;
    let al2o3 = analysis.get(Oxide::Al2O3)?;
    let fe2o3 = analysis.get(Oxide::Fe2O3)?;
    guarded_ratio(sio2, al2o3 + fe2o3)
}

pub fn alumina_modulus(analysis: &OxideAnalysis) -> Option<f64> {
    let al2o3 = analysis.get(Oxide::Al2O3)?;
    let fe2o3 = analysis.get(Oxide::Fe2O3)?;
    guarded_ratio(al2o3, fe2o3)
}

pub fn lime_saturation_factor(analysis: &OxideAnalysis) -> Option<f64> {
    let cao = analysis.get(Oxide::CaO)?;
    let sio2 = analysis.get(Oxide::SiO2)?;
    let al2o3 = analysis.get(Oxide::Al2O3)?;
    let fe2o3 = analysis.get(Oxide::Fe2O3)?;
    let denominator = LSF_SIO2 * sio2 + LSF_AL2O3 * al2o3 + LSF_FE2O3 * fe2o3;
    guarded_ratio(100.0 * cao, denominator)
}

pub fn bogue_c3s(analysis: &OxideAnalysis) -> Option<f64> {
    let cao = analysis.get(Oxide::CaO)?;
    let sio2 = analysis.get(Oxide::SiO2)?;
    let al2o3 = analysis.get(Oxide::Al2O3)?;
    let fe2o3 = analysis.get(Oxide::Fe2O3)?;
    finite(C3S_CAO * cao - C3S_SIO2 * sio2 - C3S_AL2O3 * al2o3 - C3S_FE2O3 * fe2o3)
}

/// 필요한 산화물/분모 조건은 각 값마다 따로 판정한다.
pub fn compute_moduli(analysis: &OxideAnalysis) -> CementModuli {
    let c3s = bogue_c3s(analysis);
    let sio2 = analysis.get(Oxide::SiO2);
    let al2o3 = analysis.get(Oxide::Al2O3);
    let fe2o3 = analysis.get(Oxide::Fe2O3);
    CementModuli {
        ms: silica_modulus(analysis),
        af: alumina_modulus(analysis),
        lsf: lime_saturation_factor(analysis),
        c3s,
        c2s: sio2
            .zip(c3s)
            .and_then(|(s, c)| finite(C2S_SIO2 * s - C2S_C3S * c)),
        c3a: al2o3
            .zip(fe2o3)
            .and_then(|(a, f)| finite(C3A_AL2O3 * a - C3A_FE2O3 * f)),
        c4af: fe2o3.and_then(|f| finite(C4AF_FE2O3 * f)),
    }
}
