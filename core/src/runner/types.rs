use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::answers::AnswerConfig;
use crate::classify::RuleSet;
use crate::config::{AppConfig, InterpreterConfig};

/// Everything needed to start one child.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub script: PathBuf,
    pub program: String,
    pub args: Vec<String>,
    pub input: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Completed(ScriptOutput),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub path: PathBuf,
    pub prompts: usize,
    pub outcome: ScriptOutcome,
}

impl ScriptReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ScriptOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub scripts: Vec<ScriptReport>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.scripts.len()
    }

    pub fn failed(&self) -> usize {
        self.scripts.iter().filter(|r| r.is_failed()).count()
    }

    pub fn completed(&self) -> usize {
        self.total() - self.failed()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    Started { path: &'a Path },
    Finished(&'a ScriptReport),
}

/// Per-batch settings, built once from config and CLI overrides.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub answers: AnswerConfig,
    pub rules: RuleSet,
    pub interpreters: BTreeMap<String, InterpreterConfig>,
    pub timeout: Option<Duration>,
}

impl RunOptions {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            answers: AnswerConfig {
                link: cfg.runner.default_link.clone(),
                confirm: cfg.runner.confirm_answer.clone(),
            },
            rules: RuleSet::from_config(&cfg.classify)?,
            interpreters: cfg.runner.interpreters.clone(),
            timeout: cfg.runner.timeout_secs.map(Duration::from_secs),
        })
    }

    /// True if `arg` ends in `.<ext>` for a configured interpreter.
    pub fn is_script(&self, arg: &str) -> bool {
        self.interpreters.keys().any(|ext| {
            arg.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    pub fn interpreter_for(&self, path: &Path) -> Option<&InterpreterConfig> {
        let ext = path.extension()?.to_str()?;
        self.interpreters.get(ext)
    }
}
