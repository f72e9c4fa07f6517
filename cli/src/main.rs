use clap::{CommandFactory, Parser};
use promptfeed_cli::commands::{cli, detect, run};
use promptfeed_cli::exit::exit_code_for_error;
use promptfeed_core::api::{AppConfig, CliError, LoggingConfig, TextMarkers};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = promptfeed_core::config::load(args.config.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let markers = if args.ascii {
        TextMarkers::ascii()
    } else {
        TextMarkers::unicode()
    };

    match args.command {
        Some(cmd) => dispatch(cmd, &cfg, markers).await,
        None => {
            cli::Args::command().print_help()?;
            println!();
            Ok(0)
        }
    }
}

async fn dispatch(
    cmd: cli::Commands,
    cfg: &AppConfig,
    markers: TextMarkers,
) -> Result<i32, CliError> {
    match cmd {
        cli::Commands::Run(run_args) => run::run_cmd(run_args, cfg, markers).await,
        cli::Commands::Detect(detect_args) => detect::detect_cmd(detect_args, cfg, markers).await,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err("logging is enabled but both console and file output are off".to_string());
    }

    let filter = log_filter(logging, std::env::var("RUST_LOG").ok())?;
    let file_writer = if logging.file {
        Some(open_log_file(logging)?)
    } else {
        None
    };

    let stderr_ansi = atty::is(atty::Stream::Stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(logging.console.then(|| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(stderr_ansi)
        }))
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
        }))
        .init();

    Ok(())
}

/// `RUST_LOG` wins over the configured level when it is set and non-blank.
fn log_filter(logging: &LoggingConfig, rust_log: Option<String>) -> Result<EnvFilter, String> {
    let directives = rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| logging.level.clone());
    EnvFilter::try_new(&directives).map_err(|e| format!("invalid log filter {directives:?}: {e}"))
}

/// One log file per process under the configured directory.
fn open_log_file(logging: &LoggingConfig) -> Result<NonBlocking, String> {
    let dir = logging.log_directory();
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("cannot create log dir {}: {e}", dir.display()))?;
    let appender =
        tracing_appender::rolling::never(&dir, format!("promptfeed.{}.log", std::process::id()));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}
