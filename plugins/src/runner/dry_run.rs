use async_trait::async_trait;
use promptfeed_core::error::RunnerError;
use promptfeed_core::runner::{LaunchRequest, ScriptLauncher, ScriptOutput};

/// Reports what would be run instead of starting a child.
pub struct DryRunLauncher {}

impl DryRunLauncher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for DryRunLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptLauncher for DryRunLauncher {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn launch(&self, request: &LaunchRequest) -> Result<ScriptOutput, RunnerError> {
        let mut command = vec![request.program.clone()];
        command.extend(request.args.iter().cloned());
        command.push(request.script.display().to_string());

        let mut stdout = format!("command: {}\n", command.join(" "));
        stdout.push_str("stdin:\n");
        for line in request.input.lines() {
            stdout.push_str("  ");
            stdout.push_str(line);
            stdout.push('\n');
        }

        Ok(ScriptOutput {
            exit_code: Some(0),
            stdout,
            stderr: String::new(),
            duration_ms: 0,
        })
    }
}
