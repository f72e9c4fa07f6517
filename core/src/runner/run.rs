use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::answers::{plan_script, ScriptPlan};
use crate::error::RunnerError;

use super::traits::ScriptLauncher;
use super::types::{
    BatchEvent, BatchReport, LaunchRequest, RunOptions, ScriptOutcome, ScriptOutput, ScriptReport,
};

pub struct RunBatchArgs<'a> {
    pub scripts: &'a [PathBuf],
    pub options: &'a RunOptions,
    pub launcher: &'a dyn ScriptLauncher,
}

/// Run every script in order, one child at a time.
///
/// A script that cannot be read, planned or launched is recorded as failed
/// and the batch moves on to the next one.
pub async fn run_batch<F>(args: RunBatchArgs<'_>, mut on_event: F) -> BatchReport
where
    F: FnMut(BatchEvent<'_>),
{
    let started = Instant::now();
    let mut report = BatchReport::default();

    for path in args.scripts {
        on_event(BatchEvent::Started { path });
        let script = run_script(path, args.options, args.launcher).await;
        on_event(BatchEvent::Finished(&script));
        report.scripts.push(script);
    }

    tracing::info!(
        total = report.total(),
        failed = report.failed(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch finished"
    );
    report
}

async fn run_script(
    path: &Path,
    options: &RunOptions,
    launcher: &dyn ScriptLauncher,
) -> ScriptReport {
    let (prompts, result) = match plan_script(path, &options.rules, &options.answers).await {
        Ok(plan) => (plan.values.len(), launch_script(path, plan, options, launcher).await),
        Err(e) => (0, Err(e.into())),
    };

    let outcome = match result {
        Ok(output) => {
            tracing::info!(
                path = %path.display(),
                exit_code = ?output.exit_code,
                duration_ms = output.duration_ms,
                "script finished"
            );
            ScriptOutcome::Completed(output)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "script failed");
            ScriptOutcome::Failed(e.to_string())
        }
    };

    ScriptReport {
        path: path.to_path_buf(),
        prompts,
        outcome,
    }
}

async fn launch_script(
    path: &Path,
    plan: ScriptPlan,
    options: &RunOptions,
    launcher: &dyn ScriptLauncher,
) -> Result<ScriptOutput, RunnerError> {
    let interpreter = options
        .interpreter_for(path)
        .ok_or_else(|| RunnerError::NoInterpreter {
            path: path.to_path_buf(),
        })?;

    let request = LaunchRequest {
        script: path.to_path_buf(),
        program: interpreter.program.clone(),
        args: interpreter.args.clone(),
        input: plan.input,
        timeout: options.timeout,
    };

    tracing::debug!(
        path = %path.display(),
        launcher = launcher.name(),
        program = %request.program,
        prompts = plan.values.len(),
        "launching script"
    );
    launcher.launch(&request).await
}
