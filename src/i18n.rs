use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::thresholds::Status;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const NOT_AVAILABLE: &str = "general.not_available";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_NCV: &str = "main_menu.ncv";
    pub const MAIN_MENU_BLEND: &str = "main_menu.blend";
    pub const MAIN_MENU_IMPACT: &str = "main_menu.impact";
    pub const MAIN_MENU_STATS: &str = "main_menu.stats";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const NCV_HEADING: &str = "ncv.heading";
    pub const PROMPT_PCS: &str = "prompt.pcs";
    pub const PROMPT_MOISTURE: &str = "prompt.moisture";
    pub const PROMPT_FUEL: &str = "prompt.fuel";
    pub const PROMPT_CHLORINE_OPTIONAL: &str = "prompt.chlorine_optional";
    pub const PROMPT_INERTS_OPTIONAL: &str = "prompt.inerts_optional";
    pub const RESULT_NCV: &str = "result.ncv";
    pub const RESULT_NCV_UNAVAILABLE: &str = "result.ncv_unavailable";

    pub const BLEND_HEADING: &str = "blend.heading";
    pub const BLEND_COMBINED: &str = "blend.combined";
    pub const PROMPT_RECIPE_PATH: &str = "prompt.recipe_path";
    pub const PROMPT_HISTORY_PATH_OPTIONAL: &str = "prompt.history_path_optional";
    pub const RESULT_TOTAL_WEIGHT: &str = "result.total_weight";
    pub const RESULT_UNRESOLVED: &str = "result.unresolved";
    pub const RESULT_TSR: &str = "result.tsr";

    pub const IMPACT_HEADING: &str = "impact.heading";
    pub const PROMPT_IMPACT_PATH: &str = "prompt.impact_path";
    pub const IMPACT_INVALID_RATE: &str = "impact.invalid_rate";
    pub const IMPACT_COLUMNS: &str = "impact.columns";

    pub const STATS_HEADING: &str = "stats.heading";
    pub const PROMPT_ANALYSES_PATH: &str = "prompt.analyses_path";
    pub const STATS_COUNT: &str = "stats.count";

    pub const CLASSIFY_HEADING: &str = "classify.heading";
    pub const UNKNOWN_INDICATOR: &str = "classify.unknown_indicator";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const STATUS_GREEN: &str = "status.green";
    pub const STATUS_YELLOW: &str = "status.yellow";
    pub const STATUS_RED: &str = "status.red";
    pub const STATUS_UNKNOWN: &str = "status.unknown";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Fr,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("fr") {
            Language::Fr
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/fr)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: built_in_pack(lang_code),
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 언어팩 → 내장 영어 → 내장 한국어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::Ko => ko(key),
            Language::En | Language::Fr => en(key).unwrap_or_else(|| ko(key)),
        }
    }

    /// 분류 결과 표시 문자열.
    pub fn status(&self, status: Status) -> &str {
        self.t(match status {
            Status::Green => keys::STATUS_GREEN,
            Status::Yellow => keys::STATUS_YELLOW,
            Status::Red => keys::STATUS_RED,
            Status::Unknown => keys::STATUS_UNKNOWN,
        })
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("fr") => Some("fr".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" | "en" | "fr" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., fr-fr)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., fr)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "fr" | "fr-fr" => parse_toml_to_map(include_str!("../locales/fr-fr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        NOT_AVAILABLE => "N/A",
        MAIN_MENU_TITLE => "\n=== AFR Monitoring Toolbox ===",
        MAIN_MENU_NCV => "1) 순발열량(PCI) 계산",
        MAIN_MENU_BLEND => "2) 혼합 레시피 집계",
        MAIN_MENU_IMPACT => "3) 클링커 재 혼입 영향",
        MAIN_MENU_STATS => "4) 분석 이력 통계",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        NCV_HEADING => "\n-- 순발열량 --",
        PROMPT_PCS => "PCS 건량 기준 [kcal/kg]: ",
        PROMPT_MOISTURE => "수분 [%]: ",
        PROMPT_FUEL => "연료 이름: ",
        PROMPT_CHLORINE_OPTIONAL => "염소 [%] (없으면 엔터): ",
        PROMPT_INERTS_OPTIONAL => "불활성분 [%] (없으면 엔터): ",
        RESULT_NCV => "PCI [kcal/kg]:",
        RESULT_NCV_UNAVAILABLE => "계산 불가: 기준 데이터(수소 함량)가 없거나 입력이 범위를 벗어났습니다.",
        BLEND_HEADING => "\n-- 혼합 레시피 --",
        BLEND_COMBINED => "전체",
        PROMPT_RECIPE_PATH => "레시피 파일 경로: ",
        PROMPT_HISTORY_PATH_OPTIONAL => "분석 이력 파일 경로 (없으면 엔터): ",
        RESULT_TOTAL_WEIGHT => "총 무게 [t]:",
        RESULT_UNRESOLVED => "무게 미정으로 제외된 연료:",
        RESULT_TSR => "열 대체율 TSR [%]:",
        IMPACT_HEADING => "\n-- 클링커 재 혼입 영향 --",
        PROMPT_IMPACT_PATH => "영향 입력 파일 경로: ",
        IMPACT_INVALID_RATE => "재 혼입률은 0~100% 범위여야 합니다.",
        IMPACT_COLUMNS => "항목        재 없음      재 포함      변화량     변화율[%]",
        STATS_HEADING => "\n-- 분석 이력 통계 --",
        PROMPT_ANALYSES_PATH => "분석 이력 파일 경로: ",
        STATS_COUNT => "건수",
        CLASSIFY_HEADING => "\n-- 지표 판정 --",
        UNKNOWN_INDICATOR => "알 수 없는 지표입니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 자동  2) 한국어  3) English  4) Français",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 설정되었습니다:",
        STATUS_GREEN => "녹색",
        STATUS_YELLOW => "황색",
        STATUS_RED => "적색",
        STATUS_UNKNOWN => "판정 불가",
        _ => "???",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        NOT_AVAILABLE => "N/A",
        MAIN_MENU_TITLE => "\n=== AFR Monitoring Toolbox ===",
        MAIN_MENU_NCV => "1) Net calorific value (NCV)",
        MAIN_MENU_BLEND => "2) Blend recipe",
        MAIN_MENU_IMPACT => "3) Clinker ash impact",
        MAIN_MENU_STATS => "4) Analysis history statistics",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        NCV_HEADING => "\n-- Net Calorific Value --",
        PROMPT_PCS => "Gross calorific value, dry basis [kcal/kg]: ",
        PROMPT_MOISTURE => "Moisture [%]: ",
        PROMPT_FUEL => "Fuel name: ",
        PROMPT_CHLORINE_OPTIONAL => "Chlorine [%] (enter to skip): ",
        PROMPT_INERTS_OPTIONAL => "Inerts [%] (enter to skip): ",
        RESULT_NCV => "NCV [kcal/kg]:",
        RESULT_NCV_UNAVAILABLE => "Cannot compute: missing reference data (hydrogen content) or input out of range.",
        BLEND_HEADING => "\n-- Blend Recipe --",
        BLEND_COMBINED => "Combined",
        PROMPT_RECIPE_PATH => "Recipe file path: ",
        PROMPT_HISTORY_PATH_OPTIONAL => "Analysis history file path (enter to skip): ",
        RESULT_TOTAL_WEIGHT => "Total weight [t]:",
        RESULT_UNRESOLVED => "Excluded fuels (weight unknown):",
        RESULT_TSR => "Thermal substitution rate [%]:",
        IMPACT_HEADING => "\n-- Clinker Ash Impact --",
        PROMPT_IMPACT_PATH => "Impact input file path: ",
        IMPACT_INVALID_RATE => "Ash incorporation rate must be within 0-100%.",
        IMPACT_COLUMNS => "Item        Without ash  With ash     Delta      Delta[%]",
        STATS_HEADING => "\n-- Analysis History Statistics --",
        PROMPT_ANALYSES_PATH => "Analysis history file path: ",
        STATS_COUNT => "count",
        CLASSIFY_HEADING => "\n-- Indicator Classification --",
        UNKNOWN_INDICATOR => "Unknown indicator:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Auto  2) 한국어  3) English  4) Français",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language set to:",
        STATUS_GREEN => "green",
        STATUS_YELLOW => "yellow",
        STATUS_RED => "red",
        STATUS_UNKNOWN => "unknown",
        _ => return None,
    })
}
