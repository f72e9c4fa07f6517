use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use promptfeed_core::error::RunnerError;
use promptfeed_core::runner::{LaunchRequest, ScriptLauncher, ScriptOutput};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// Runs `program args... <script>` with stdin fed from the request's input.
pub struct ProcessLauncher {}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptLauncher for ProcessLauncher {
    fn name(&self) -> &str {
        "process"
    }

    async fn launch(&self, request: &LaunchRequest) -> Result<ScriptOutput, RunnerError> {
        let started = Instant::now();

        // kill_on_drop covers every early return below, including the timeout.
        let mut child = Command::new(&request.program)
            .args(&request.args)
            .arg(&request.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunnerError::Spawn(format!("{}: {e}", request.program)))?;

        let feeder = child
            .stdin
            .take()
            .map(|stdin| feed_stdin(stdin, request.input.clone()));

        let waited = match request.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(res) => res,
                Err(_) => {
                    abort_feeder(feeder);
                    return Err(RunnerError::Timeout {
                        secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait_with_output().await,
        };

        let output = match waited {
            Ok(output) => output,
            Err(source) => {
                abort_feeder(feeder);
                return Err(RunnerError::StreamIo {
                    stream: "output",
                    source,
                });
            }
        };

        if let Err(e) = settle_feeder(feeder).await {
            tracing::warn!(
                script = %request.script.display(),
                error = %e,
                "input was not fully written to the script"
            );
        }

        Ok(ScriptOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}

/// Writes the whole input and closes the pipe so the child sees EOF.
///
/// Runs beside `wait_with_output` so a child that fills its stdout pipe
/// before reading stdin cannot deadlock us.
fn feed_stdin<W>(mut stdin: W, input: String) -> JoinHandle<Result<(), RunnerError>>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let res = async {
            stdin.write_all(input.as_bytes()).await?;
            stdin.shutdown().await
        }
        .await;
        drop(stdin);

        match res {
            Ok(()) => Ok(()),
            // The child exited without reading everything; not our failure.
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                tracing::debug!("child closed stdin before all input was written");
                Ok(())
            }
            Err(source) => Err(RunnerError::StreamIo {
                stream: "stdin",
                source,
            }),
        }
    })
}

/// The captured output is worth more than the stdin error, so this only
/// reports what went wrong.
async fn settle_feeder(feeder: Option<JoinHandle<Result<(), RunnerError>>>) -> Result<(), String> {
    let Some(handle) = feeder else {
        return Ok(());
    };
    match handle.await {
        Ok(res) => res.map_err(|e| e.to_string()),
        Err(e) => Err(format!("stdin feeder task failed: {e}")),
    }
}

fn abort_feeder(feeder: Option<JoinHandle<Result<(), RunnerError>>>) {
    if let Some(handle) = feeder {
        handle.abort();
    }
}
