#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use pretty_assertions::assert_eq;
use promptfeed_core::api::{
    run_batch, AnswerConfig, AppConfig, InterpreterConfig, LaunchRequest, RunBatchArgs,
    RunOptions, RunnerError, ScriptLauncher, ScriptOutcome,
};
use promptfeed_plugins::runner::ProcessLauncher;

fn sh_options(link: &str) -> RunOptions {
    let mut cfg = AppConfig::default();
    cfg.runner.interpreters.insert(
        "sh".to_string(),
        InterpreterConfig {
            program: "sh".to_string(),
            args: vec![],
        },
    );
    let mut opts = RunOptions::from_config(&cfg).unwrap();
    opts.answers = AnswerConfig::new(link);
    opts
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn sh_request(script: &Path, input: &str) -> LaunchRequest {
    LaunchRequest {
        script: script.to_path_buf(),
        program: "sh".to_string(),
        args: vec![],
        input: input.to_string(),
        timeout: None,
    }
}

#[tokio::test]
async fn answers_arrive_in_prompt_order() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(
        dir.path(),
        "ask.sh",
        "# input: continue? (y/n)\nread a\n# input: enter link\nread b\necho \"a=$a b=$b\"\n",
    );
    let opts = sh_options("https://x.test");
    let launcher = ProcessLauncher::new();

    let report = run_batch(
        RunBatchArgs {
            scripts: &[script],
            options: &opts,
            launcher: &launcher,
        },
        |_| {},
    )
    .await;

    assert_eq!(report.scripts[0].prompts, 2);
    match &report.scripts[0].outcome {
        ScriptOutcome::Completed(out) => {
            assert_eq!(out.stdout, "a=y b=https://x.test\n");
            assert_eq!(out.stderr, "");
            assert_eq!(out.exit_code, Some(0));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn batch_survives_missing_middle_script() {
    let dir = tempfile::tempdir().unwrap();
    let scripts = vec![
        write_script(dir.path(), "first.sh", "echo first\n"),
        dir.path().join("second.sh"),
        write_script(dir.path(), "third.sh", "echo third\necho warn >&2\n"),
    ];
    let opts = sh_options("https://x.test");
    let launcher = ProcessLauncher::new();

    let report = run_batch(
        RunBatchArgs {
            scripts: &scripts,
            options: &opts,
            launcher: &launcher,
        },
        |_| {},
    )
    .await;

    assert_eq!(report.total(), 3);
    assert_eq!(report.failed(), 1);

    let outcomes: Vec<_> = report.scripts.iter().map(|r| &r.outcome).collect();
    match outcomes[0] {
        ScriptOutcome::Completed(out) => assert_eq!(out.stdout, "first\n"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    match outcomes[1] {
        ScriptOutcome::Failed(msg) => assert!(msg.contains("second.sh"), "{msg}"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    match outcomes[2] {
        ScriptOutcome::Completed(out) => {
            assert_eq!(out.stdout, "third\n");
            assert_eq!(out.stderr, "warn\n");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn reports_child_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "fail.sh", "echo bye\nexit 3\n");

    let out = ProcessLauncher::new()
        .launch(&sh_request(&script, "\n"))
        .await
        .unwrap();
    assert_eq!(out.exit_code, Some(3));
    assert_eq!(out.stdout, "bye\n");
}

#[tokio::test]
async fn child_that_ignores_stdin_still_completes() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "quiet.sh", "exit 0\n");
    let input = "y\n".repeat(512 * 1024);

    let out = ProcessLauncher::new()
        .launch(&sh_request(&script, &input))
        .await
        .unwrap();
    assert_eq!(out.exit_code, Some(0));
}

#[tokio::test]
async fn large_input_and_output_do_not_deadlock() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "echo.sh", "cat\n");
    let input = "https://x.test\n".repeat(64 * 1024);

    let out = ProcessLauncher::new()
        .launch(&sh_request(&script, &input))
        .await
        .unwrap();
    assert_eq!(out.stdout.len(), input.len());
    assert_eq!(out.exit_code, Some(0));
}

#[tokio::test]
async fn hung_child_is_killed_on_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "hang.sh", "exec sleep 30\n");
    let mut request = sh_request(&script, "\n");
    request.timeout = Some(Duration::from_secs(1));

    let err = ProcessLauncher::new().launch(&request).await.unwrap_err();
    assert!(matches!(err, RunnerError::Timeout { .. }), "{err}");
}

#[tokio::test]
async fn missing_interpreter_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "x.sh", "echo hi\n");
    let mut request = sh_request(&script, "\n");
    request.program = "promptfeed-no-such-interpreter".to_string();

    let err = ProcessLauncher::new().launch(&request).await.unwrap_err();
    assert!(matches!(err, RunnerError::Spawn(_)));
    assert!(err.to_string().contains("promptfeed-no-such-interpreter"));
}
