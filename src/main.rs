use std::path::PathBuf;

use clap::Parser;

use afr_monitoring_toolbox::app::{self, Command, Session};
use afr_monitoring_toolbox::config::CONFIG_FILE;
use afr_monitoring_toolbox::i18n::{self, keys, Translator};

#[derive(Parser)]
#[command(
    name = "afr_toolbox",
    version,
    about = "Alternative fuel and clinker monitoring toolbox"
)]
struct Cli {
    /// Interface language (auto, ko, en, fr)
    #[arg(long, global = true, default_value = "auto")]
    lang: String,

    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령 또는 메뉴를 실행한다.
fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = Session::open(&cli.config, &cli.lang)
        .and_then(|mut session| app::run(&mut session, cli.command));
    if let Err(err) = result {
        // 세션을 못 연 경우에도 오류 접두어는 지정 언어로 낸다.
        let tr = Translator::new(&i18n::resolve_language(&cli.lang, None));
        log::error!("{err}");
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}
