use serde::{Deserialize, Serialize};

/// 레시피 한 줄: 연료 이름과 컨테이너 수.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub fuel: String,
    pub containers: u32,
}

/// 물리적 투입 설비(예: 병렬 투입 라인) 하나의 레시피.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<RecipeEntry>,
}

impl Installation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// 빌더 형태로 레시피 줄을 추가한다.
    pub fn with(mut self, fuel: impl Into<String>, containers: u32) -> Self {
        self.entries.push(RecipeEntry {
            fuel: fuel.into(),
            containers,
        });
        self
    }

    pub fn total_containers(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.containers)).sum()
    }
}

/// 설비별로 묶인 혼합 레시피.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, rename = "installation")]
    pub installations: Vec<Installation>,
}

impl Recipe {
    pub fn new(installations: Vec<Installation>) -> Self {
        Self { installations }
    }

    pub fn total_containers(&self) -> u64 {
        self.installations.iter().map(Installation::total_containers).sum()
    }

    /// 모든 설비의 레시피 줄을 순서대로 돌려준다.
    pub fn entries(&self) -> impl Iterator<Item = &RecipeEntry> {
        self.installations.iter().flat_map(|i| i.entries.iter())
    }
}

/// 같은 연료(대소문자/공백 무시)의 줄을 합치고, 0개인 줄은 없는 것으로 본다.
/// 처음 등장한 표기를 연료 이름으로 유지한다.
pub fn merge_entries<'a, I>(entries: I) -> Vec<RecipeEntry>
where
    I: IntoIterator<Item = &'a RecipeEntry>,
{
    let mut merged: Vec<RecipeEntry> = Vec::new();
    for entry in entries {
        if entry.containers == 0 {
            continue;
        }
        let key = entry.fuel.trim();
        match merged
            .iter_mut()
            .find(|m| m.fuel.eq_ignore_ascii_case(key))
        {
            Some(existing) => existing.containers = existing.containers.saturating_add(entry.containers),
            None => merged.push(RecipeEntry {
                fuel: key.to_string(),
                containers: entry.containers,
            }),
        }
    }
    merged
}
