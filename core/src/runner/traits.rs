use async_trait::async_trait;

use super::types::{LaunchRequest, ScriptOutput};
use crate::error::RunnerError;

/// Starts a child for one script, feeds it `request.input` and waits for it.
#[async_trait]
pub trait ScriptLauncher: Send + Sync {
    fn name(&self) -> &str;
    async fn launch(&self, request: &LaunchRequest) -> Result<ScriptOutput, RunnerError>;
}
