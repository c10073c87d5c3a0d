use serde::{Deserialize, Serialize};

use crate::weighting::{guarded_ratio, weighted_average};

/// 분석 대상 산화물 11종. `Loi`는 강열감량(PF)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Oxide {
    Loi,
    SiO2,
    Al2O3,
    Fe2O3,
    CaO,
    MgO,
    SO3,
    K2O,
    TiO2,
    MnO,
    P2O5,
}

impl Oxide {
    pub const ALL: [Oxide; 11] = [
        Oxide::Loi,
        Oxide::SiO2,
        Oxide::Al2O3,
        Oxide::Fe2O3,
        Oxide::CaO,
        Oxide::MgO,
        Oxide::SO3,
        Oxide::K2O,
        Oxide::TiO2,
        Oxide::MnO,
        Oxide::P2O5,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Oxide::Loi => "LOI",
            Oxide::SiO2 => "SiO2",
            Oxide::Al2O3 => "Al2O3",
            Oxide::Fe2O3 => "Fe2O3",
            Oxide::CaO => "CaO",
            Oxide::MgO => "MgO",
            Oxide::SO3 => "SO3",
            Oxide::K2O => "K2O",
            Oxide::TiO2 => "TiO2",
            Oxide::MnO => "MnO",
            Oxide::P2O5 => "P2O5",
        }
    }
}

/// 산화물 분석 한 건 [%]. 값이 없으면 "측정 안 함"이며 0과 다르다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OxideAnalysis {
    #[serde(default, alias = "pf")]
    pub loi: Option<f64>,
    #[serde(default)]
    pub sio2: Option<f64>,
    #[serde(default)]
    pub al2o3: Option<f64>,
    #[serde(default)]
    pub fe2o3: Option<f64>,
    #[serde(default)]
    pub cao: Option<f64>,
    #[serde(default)]
    pub mgo: Option<f64>,
    #[serde(default)]
    pub so3: Option<f64>,
    #[serde(default)]
    pub k2o: Option<f64>,
    #[serde(default)]
    pub tio2: Option<f64>,
    #[serde(default)]
    pub mno: Option<f64>,
    #[serde(default)]
    pub p2o5: Option<f64>,
}

impl OxideAnalysis {
    fn slot(&self, oxide: Oxide) -> Option<f64> {
        match oxide {
            Oxide::Loi => self.loi,
            Oxide::SiO2 => self.sio2,
            Oxide::Al2O3 => self.al2o3,
            Oxide::Fe2O3 => self.fe2o3,
            Oxide::CaO => self.cao,
            Oxide::MgO => self.mgo,
            Oxide::SO3 => self.so3,
            Oxide::K2O => self.k2o,
            Oxide::TiO2 => self.tio2,
            Oxide::MnO => self.mno,
            Oxide::P2O5 => self.p2o5,
        }
    }

    fn slot_mut(&mut self, oxide: Oxide) -> &mut Option<f64> {
        match oxide {
            Oxide::Loi => &mut self.loi,
            Oxide::SiO2 => &mut self.sio2,
            Oxide::Al2O3 => &mut self.al2o3,
            Oxide::Fe2O3 => &mut self.fe2o3,
            Oxide::CaO => &mut self.cao,
            Oxide::MgO => &mut self.mgo,
            Oxide::SO3 => &mut self.so3,
            Oxide::K2O => &mut self.k2o,
            Oxide::TiO2 => &mut self.tio2,
            Oxide::MnO => &mut self.mno,
            Oxide::P2O5 => &mut self.p2o5,
        }
    }

    /// 측정값. 음수/비유한 값은 측정 안 함으로 본다.
    pub fn get(&self, oxide: Oxide) -> Option<f64> {
        self.slot(oxide).filter(|v| v.is_finite() && *v >= 0.0)
    }

    pub fn set(&mut self, oxide: Oxide, value: Option<f64>) {
        *self.slot_mut(oxide) = value;
    }

    pub fn with(mut self, oxide: Oxide, value: f64) -> Self {
        self.set(oxide, Some(value));
        self
    }

    pub fn measured(&self) -> impl Iterator<Item = (Oxide, f64)> + '_ {
        Oxide::ALL
            .into_iter()
            .filter_map(move |oxide| self.get(oxide).map(|v| (oxide, v)))
    }

    /// 강열 기준으로 환산한다: 각 산화물 / (1 - LOI/100), LOI는 0이 된다.
    ///
    /// LOI가 없으면 그대로 돌려주고, LOI가 100%에 가까우면 모든 값이 비어 있는 분석이 된다.
    pub fn ignited(&self) -> OxideAnalysis {
        let Some(loi) = self.get(Oxide::Loi) else {
            return self.clone();
        };
        let Some(factor) = guarded_ratio(100.0, 100.0 - loi).filter(|f| *f > 0.0) else {
            return OxideAnalysis::default();
        };
        let mut out = OxideAnalysis::default();
        for oxide in Oxide::ALL {
            let value = match oxide {
                Oxide::Loi => Some(0.0),
                _ => self.get(oxide).map(|v| v * factor),
            };
            out.set(oxide, value);
        }
        out
    }
}

/// 여러 분석을 무게 가중 평균으로 섞는다. 산화물마다 독립적으로 계산한다.
///
/// 무게가 0인 분석은 빠지고, 무게가 있는 분석에 해당 산화물 값이 없으면 그 산화물은 비어 있다.
pub fn blend_oxides(parts: &[(f64, &OxideAnalysis)]) -> OxideAnalysis {
    let mut out = OxideAnalysis::default();
    for oxide in Oxide::ALL {
        let value = weighted_average(parts.iter().map(|(w, a)| (*w, a.get(oxide))));
        out.set(oxide, value);
    }
    out
}
