use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use promptfeed_core::api as core_api;
use promptfeed_core::api::{CliError, RunOptions, TextMarkers};

use super::cli::RunArgs;

const USAGE_RUN: &str = "promptfeed run file1.py file2.py https://yourlink.com";

/// Script targets and link override pulled out of the free-form `run` arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Targets {
    pub scripts: Vec<PathBuf>,
    pub link: Option<String>,
    pub ignored: Vec<String>,
}

/// Scripts are recognised by extension first, so `http_client.py` is a
/// script. Any other argument starting with `http` is the link; the last one
/// wins.
pub fn split_targets(args: &[String], options: &RunOptions) -> Targets {
    let mut targets = Targets::default();
    for arg in args {
        if options.is_script(arg) {
            targets.scripts.push(PathBuf::from(arg));
        } else if arg.starts_with("http") {
            targets.link = Some(arg.clone());
        } else {
            targets.ignored.push(arg.clone());
        }
    }
    targets
}

pub fn apply_overrides(options: &mut RunOptions, targets: &Targets, args: &RunArgs) {
    if let Some(link) = &targets.link {
        options.answers.link = link.clone();
    }
    if let Some(confirm) = &args.confirm {
        options.answers.confirm = confirm.clone();
    }
    if let Some(secs) = args.timeout_secs {
        options.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
}

pub fn build_options(cfg: &core_api::AppConfig) -> Result<RunOptions, CliError> {
    RunOptions::from_config(cfg)
        .map_err(|e| CliError::Config(format!("invalid classify rule: {e}")))
}

#[tracing::instrument(name = "cli.run", skip_all)]
pub async fn run_cmd(
    args: RunArgs,
    cfg: &core_api::AppConfig,
    markers: TextMarkers,
) -> Result<i32, CliError> {
    let mut options = build_options(cfg)?;
    let targets = split_targets(&args.targets, &options);

    for arg in &targets.ignored {
        tracing::warn!(arg = %arg, "ignoring argument that is neither a script nor a link");
    }
    if targets.scripts.is_empty() {
        return Err(CliError::Usage(format!(
            "no script files specified. Usage: {USAGE_RUN}"
        )));
    }

    apply_overrides(&mut options, &targets, &args);
    tracing::info!(
        scripts = targets.scripts.len(),
        link = %options.answers.link,
        timeout = ?options.timeout,
        dry_run = args.dry_run,
        "starting batch"
    );

    let launcher = promptfeed_plugins::factory::build_launcher(args.dry_run);
    let stdout = std::io::stdout();
    let mut write_err: Option<std::io::Error> = None;

    let report = core_api::run_batch(
        core_api::RunBatchArgs {
            scripts: &targets.scripts,
            options: &options,
            launcher: launcher.as_ref(),
        },
        |event| {
            let mut out = stdout.lock();
            let res = core_api::render_event(event, &markers, &mut out).and_then(|_| out.flush());
            if let Err(e) = res {
                write_err.get_or_insert(e);
            }
        },
    )
    .await;

    if let Some(e) = write_err {
        return Err(CliError::Io(e));
    }

    {
        let mut out = stdout.lock();
        core_api::render_summary(&report, &markers, &mut out)?;
        out.flush()?;
    }

    if report.failed() > 0 {
        return Err(CliError::Batch {
            failed: report.failed(),
            total: report.total(),
        });
    }
    Ok(0)
}
