use std::path::{Path, PathBuf};

use clap::Subcommand;
use thiserror::Error;

use crate::blend::{aggregate_blend, blend_substitution_rate};
use crate::clinker::compute_impact_from;
use crate::config::{self, Config, ConfigError};
use crate::fuel::{
    all_historical_characteristics, compute_ncv, compute_ncv_for_fuel, corrected_pcs,
    fuel_statistics, ReferenceData,
};
use crate::i18n::{self, Translator};
use crate::reference_data::{self, ReferenceDataError};
use crate::thresholds::{classify, classify_blend, classify_impact, Indicator, ThresholdSet};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("데이터 파일 오류: {0}")]
    Data(#[from] ReferenceDataError),
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 파일 기반 계산 명령.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute net calorific value from a lab analysis
    Ncv {
        /// Gross calorific value, dry basis [kcal/kg]
        #[arg(long)]
        pcs: f64,
        /// Moisture [%]
        #[arg(long)]
        moisture: f64,
        /// Fuel name used to look up hydrogen content
        #[arg(long)]
        fuel: Option<String>,
        /// Hydrogen content [%], overrides the reference lookup
        #[arg(long)]
        hydrogen: Option<f64>,
        /// Chlorine [%]
        #[arg(long)]
        chlorine: Option<f64>,
        /// Inert fraction [%] applied to PCS before the calculation
        #[arg(long)]
        inerts: Option<f64>,
    },

    /// Aggregate a blend recipe file into weighted properties and cost
    Blend {
        /// Recipe TOML file
        recipe: PathBuf,
        /// Analysis history TOML used for missing fuel characteristics
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Compute clinker moduli with and without fuel ash
    Impact {
        /// Impact input TOML file
        input: PathBuf,
    },

    /// Per-fuel statistics over an analysis history file
    Stats {
        /// Analysis history TOML file
        analyses: PathBuf,
    },

    /// Classify a single indicator value against the configured thresholds
    Classify {
        /// Indicator key (ncv, moisture, chlorine, ash, cost, delta_lsf, ...)
        #[arg(long)]
        indicator: String,
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
    },

    /// Interactive menu
    Menu,
}

/// 한 번의 실행 동안 고정되는 설정/기준 데이터/번역기 묶음.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub reference: ReferenceData,
    pub tr: Translator,
}

impl Session {
    /// 설정을 읽고(없으면 생성) 기준 데이터와 번역기를 준비한다.
    pub fn open(config_path: &Path, cli_lang: &str) -> Result<Self, AppError> {
        let config = config::load_or_default(config_path)?;
        let reference = reference_data::load_reference_or_builtin(config.reference_data.as_deref())?;
        let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
        let tr = Translator::new_with_pack(&lang, config.language_pack_dir.as_deref());
        log::debug!("언어 {lang}, 기준 연료 {}종", reference.fuels().len());
        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
            reference,
            tr,
        })
    }

    /// 설정의 언어를 바꾸고 번역기를 다시 만든다.
    pub fn set_language(&mut self, code: &str) {
        self.config.language = code.to_string();
        let lang = i18n::resolve_language("auto", Some(code));
        self.tr = Translator::new_with_pack(&lang, self.config.language_pack_dir.as_deref());
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        self.config.save_to(&self.config_path)?;
        Ok(())
    }
}

/// 명령을 실행한다. 명령이 없으면 대화형 메뉴를 띄운다.
pub fn run(session: &mut Session, command: Option<Command>) -> Result<(), AppError> {
    match command.unwrap_or(Command::Menu) {
        Command::Ncv {
            pcs,
            moisture,
            fuel,
            hydrogen,
            chlorine,
            inerts,
        } => {
            let ncv = ncv_for(session, pcs, moisture, fuel.as_deref(), hydrogen, chlorine, inerts);
            ui_cli::print_ncv(&session.tr, ncv);
            Ok(())
        }
        Command::Blend { recipe, history } => run_blend(session, &recipe, history.as_deref()),
        Command::Impact { input } => run_impact(session, &input),
        Command::Stats { analyses } => run_stats(session, &analyses),
        Command::Classify { indicator, value } => run_classify(session, &indicator, value),
        Command::Menu => run_menu(session),
    }
}

/// 수소 함량을 직접 주면 그 값을, 아니면 연료 이름으로 기준 데이터를 찾는다.
pub fn ncv_for(
    session: &Session,
    pcs: f64,
    moisture: f64,
    fuel: Option<&str>,
    hydrogen: Option<f64>,
    chlorine: Option<f64>,
    inerts: Option<f64>,
) -> Option<f64> {
    let pcs = corrected_pcs(pcs, inerts)?;
    match (hydrogen, fuel) {
        (Some(h), _) => compute_ncv(pcs, moisture, Some(h), chlorine),
        (None, Some(name)) => compute_ncv_for_fuel(pcs, moisture, name, chlorine, &session.reference),
        (None, None) => None,
    }
}

pub fn run_blend(session: &Session, recipe_path: &Path, history: Option<&Path>) -> Result<(), AppError> {
    let doc = reference_data::load_recipe(recipe_path)?;
    let from_history = match history {
        Some(path) => {
            let records = reference_data::load_analyses(path)?.results(&session.reference);
            all_historical_characteristics(&records, &session.reference)
        }
        None => Vec::new(),
    };
    let characteristics = doc.characteristics_with(&from_history);
    let report = aggregate_blend(
        &doc.recipe(),
        &session.reference,
        &characteristics,
        &session.config.blend_settings(),
    );
    let classifications = classify_blend(&report.combined, &session.config.thresholds.blend);
    let tsr = doc
        .fossil
        .and_then(|f| blend_substitution_rate(&report.combined, f.weight_t, f.ncv));
    ui_cli::print_blend_report(&session.tr, &report, &classifications, tsr);
    Ok(())
}

pub fn run_impact(session: &Session, input_path: &Path) -> Result<(), AppError> {
    let input = reference_data::load_impact_input(input_path)?;
    match compute_impact_from(&input) {
        Some(result) => {
            let classifications = classify_impact(&result, &session.config.thresholds.impact);
            ui_cli::print_impact(&session.tr, &result, &classifications);
        }
        None => println!("{}", session.tr.t(i18n::keys::IMPACT_INVALID_RATE)),
    }
    Ok(())
}

pub fn run_stats(session: &Session, analyses_path: &Path) -> Result<(), AppError> {
    let records = reference_data::load_analyses(analyses_path)?.results(&session.reference);
    ui_cli::print_statistics(&session.tr, &fuel_statistics(&records));
    Ok(())
}

pub fn run_classify(session: &Session, key: &str, value: f64) -> Result<(), AppError> {
    let indicator = Indicator::from_key(key).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "{} {key}",
            session.tr.t(i18n::keys::UNKNOWN_INDICATOR)
        ))
    })?;
    let thresholds = &session.config.thresholds;
    let set: &dyn ThresholdSet = if Indicator::BLEND.contains(&indicator) {
        &thresholds.blend
    } else {
        &thresholds.impact
    };
    let status = classify(value, set, indicator);
    ui_cli::print_classification(&session.tr, indicator, Some(value), status);
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run_menu(session: &mut Session) -> Result<(), AppError> {
    loop {
        let result = match ui_cli::main_menu(&session.tr)? {
            MenuChoice::Ncv => ui_cli::handle_ncv(session),
            MenuChoice::Blend => ui_cli::handle_blend(session),
            MenuChoice::Impact => ui_cli::handle_impact(session),
            MenuChoice::Stats => ui_cli::handle_stats(session),
            MenuChoice::Settings => {
                ui_cli::handle_settings(session)?;
                session.save_config()
            }
            MenuChoice::Exit => {
                session.save_config()?;
                println!("{}", session.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        // 파일 오류 등은 메뉴를 끝내지 않고 알려준다.
        if let Err(err) = result {
            log::warn!("{err}");
            println!("{}: {err}", session.tr.t(i18n::keys::ERROR_PREFIX));
        }
    }
    Ok(())
}
