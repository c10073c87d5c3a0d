use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::{self, AppError, Session};
use crate::blend::{BlendReport, BlendSummary, WeightSource};
use crate::clinker::{Delta, ImpactResult};
use crate::fuel::{FuelStatistics, SeriesStats};
use crate::i18n::{keys, Translator};
use crate::thresholds::{Classification, Indicator, Status};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Ncv,
    Blend,
    Impact,
    Stats,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_NCV,
        keys::MAIN_MENU_BLEND,
        keys::MAIN_MENU_IMPACT,
        keys::MAIN_MENU_STATS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Ncv),
            "2" => return Ok(MenuChoice::Blend),
            "3" => return Ok(MenuChoice::Impact),
            "4" => return Ok(MenuChoice::Stats),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 순발열량 메뉴를 처리한다.
pub fn handle_ncv(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::NCV_HEADING));
    let pcs = read_f64(tr, tr.t(keys::PROMPT_PCS))?;
    let moisture = read_f64(tr, tr.t(keys::PROMPT_MOISTURE))?;
    let fuel = read_line(tr.t(keys::PROMPT_FUEL))?;
    let chlorine = read_opt_f64(tr, tr.t(keys::PROMPT_CHLORINE_OPTIONAL))?;
    let inerts = read_opt_f64(tr, tr.t(keys::PROMPT_INERTS_OPTIONAL))?;
    let ncv = app::ncv_for(session, pcs, moisture, Some(fuel.trim()), None, chlorine, inerts);
    print_ncv(tr, ncv);
    Ok(())
}

/// 혼합 레시피 메뉴를 처리한다.
pub fn handle_blend(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::BLEND_HEADING));
    let recipe = read_path(tr.t(keys::PROMPT_RECIPE_PATH))?;
    let history = read_opt_path(tr.t(keys::PROMPT_HISTORY_PATH_OPTIONAL))?;
    app::run_blend(session, &recipe, history.as_deref())
}

/// 재 혼입 영향 메뉴를 처리한다.
pub fn handle_impact(session: &Session) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::IMPACT_HEADING));
    let input = read_path(session.tr.t(keys::PROMPT_IMPACT_PATH))?;
    app::run_impact(session, &input)
}

pub fn handle_stats(session: &Session) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::STATS_HEADING));
    let analyses = read_path(session.tr.t(keys::PROMPT_ANALYSES_PATH))?;
    app::run_stats(session, &analyses)
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        session.config.language,
        tr.language_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let code = match sel.trim() {
        "" => return Ok(()),
        "1" => "auto",
        "2" => "ko",
        "3" => "en",
        "4" => "fr",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    session.set_language(code);
    println!("{} {code}", session.tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 프롬프트를 찍고 한 줄을 읽는다. 입력이 끝났으면(EOF) 오류로 돌려 메뉴 루프를 끝낸다.
pub fn read_line_from<R: BufRead>(reader: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let read = reader.read_line(&mut buf).map_err(AppError::Io)?;
    if read == 0 {
        return Err(AppError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력은 "측정 안 됨"으로 본다.
fn read_opt_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_path(prompt: &str) -> Result<PathBuf, AppError> {
    loop {
        let s = read_line(prompt)?;
        if !s.trim().is_empty() {
            return Ok(PathBuf::from(s.trim()));
        }
    }
}

fn read_opt_path(prompt: &str) -> Result<Option<PathBuf>, AppError> {
    let s = read_line(prompt)?;
    let s = s.trim();
    Ok((!s.is_empty()).then(|| PathBuf::from(s)))
}

/// 값이 없으면 N/A 로 표시한다. 없는 값을 0으로 찍지 않는다.
pub fn fmt_opt(tr: &Translator, value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => tr.t(keys::NOT_AVAILABLE).to_string(),
    }
}

pub fn print_ncv(tr: &Translator, ncv: Option<f64>) {
    match ncv {
        Some(v) => println!("{} {v:.0}", tr.t(keys::RESULT_NCV)),
        None => println!("{}", tr.t(keys::RESULT_NCV_UNAVAILABLE)),
    }
}

fn print_summary(tr: &Translator, summary: &BlendSummary) {
    for c in &summary.contributions {
        let source = match c.source {
            WeightSource::PerContainer => "t/cont.",
            WeightSource::Volumetric => "m3",
        };
        println!(
            "  {:<12} {:>4} x  {:>8.2} t  ({source})",
            c.fuel, c.containers, c.weight_t
        );
    }
    println!("  {} {:.2}", tr.t(keys::RESULT_TOTAL_WEIGHT), summary.total_weight_t);
    println!(
        "  NCV {}  H2O {}%  Cl {}%  Ash {}%  Cost {}",
        fmt_opt(tr, summary.ncv, 0),
        fmt_opt(tr, summary.moisture, 2),
        fmt_opt(tr, summary.chlorine, 3),
        fmt_opt(tr, summary.ash, 2),
        fmt_opt(tr, summary.cost_per_tonne, 2),
    );
    if !summary.unresolved.is_empty() {
        println!("  {} {}", tr.t(keys::RESULT_UNRESOLVED), summary.unresolved.join(", "));
    }
}

/// 설비별 결과, 전체 결과, 판정, TSR 을 출력한다.
pub fn print_blend_report(
    tr: &Translator,
    report: &BlendReport,
    classifications: &[Classification],
    tsr: Option<f64>,
) {
    for installation in &report.installations {
        println!("[{}]", installation.name);
        print_summary(tr, &installation.summary);
    }
    println!("[{}]", tr.t(keys::BLEND_COMBINED));
    print_summary(tr, &report.combined);
    if tsr.is_some() {
        println!("{} {}", tr.t(keys::RESULT_TSR), fmt_opt(tr, tsr, 1));
    }
    print_classifications(tr, classifications);
}

fn print_delta_row(tr: &Translator, label: &str, delta: &Delta, decimals: usize) {
    println!(
        "{label:<10} {:>12} {:>12} {:>10} {:>10}",
        fmt_opt(tr, delta.without, decimals),
        fmt_opt(tr, delta.with, decimals),
        fmt_opt(tr, delta.absolute, decimals),
        fmt_opt(tr, delta.relative_pct, 1),
    );
}

pub fn print_impact(tr: &Translator, result: &ImpactResult, classifications: &[Classification]) {
    println!("{}", tr.t(keys::IMPACT_COLUMNS));
    for (oxide, delta) in &result.oxide_deltas {
        print_delta_row(tr, oxide.label(), delta, 2);
    }
    for (modulus, delta) in &result.modulus_deltas {
        print_delta_row(tr, modulus.label(), delta, 2);
    }
    print_classifications(tr, classifications);
}

fn fmt_series(tr: &Translator, stats: Option<&SeriesStats>, decimals: usize) -> String {
    match stats {
        Some(s) => format!(
            "{:.decimals$} [{:.decimals$}..{:.decimals$}]",
            s.mean, s.min, s.max
        ),
        None => tr.t(keys::NOT_AVAILABLE).to_string(),
    }
}

pub fn print_statistics(tr: &Translator, stats: &[FuelStatistics]) {
    for s in stats {
        println!(
            "{} ({} {}, {:.1} t)",
            s.fuel,
            tr.t(keys::STATS_COUNT),
            s.count,
            s.total_tonnage_t
        );
        println!("  NCV      {}", fmt_series(tr, s.ncv.as_ref(), 0));
        println!("  H2O %    {}", fmt_series(tr, s.moisture.as_ref(), 2));
        println!("  Cl %     {}", fmt_series(tr, s.chlorine.as_ref(), 3));
        println!("  Ash %    {}", fmt_series(tr, s.ash.as_ref(), 2));
    }
}

pub fn print_classification(tr: &Translator, indicator: Indicator, value: Option<f64>, status: Status) {
    println!(
        "  {:<12} {:>10}  {}",
        indicator.key(),
        fmt_opt(tr, value, 3),
        tr.status(status)
    );
}

pub fn print_classifications(tr: &Translator, rows: &[Classification]) {
    println!("{}", tr.t(keys::CLASSIFY_HEADING));
    for row in rows {
        print_classification(tr, row.indicator, row.value, row.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = Cursor::new("");
        let err = read_line_from(&mut input, "> ").unwrap_err();
        assert!(matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn blank_line_is_not_end_of_input() {
        let mut input = Cursor::new("\n3\n");
        assert_eq!(read_line_from(&mut input, "> ").unwrap(), "\n");
        assert_eq!(read_line_from(&mut input, "> ").unwrap(), "3\n");
        assert!(read_line_from(&mut input, "> ").is_err());
    }
}
