//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `promptfeed_core::api` instead of reaching into internal modules.

pub use crate::answers::{
    answers_for, input_blob, plan_script, plan_source, AnswerConfig, ScriptPlan,
};
pub use crate::classify::{read_script_text, scan_script, Category, PromptRule, RuleSet};
pub use crate::config::{
    load, AppConfig, ClassifyConfig, InterpreterConfig, LoggingConfig, RunnerConfig, DEFAULT_LINK,
};
pub use crate::error::{CliError, RunnerError, ScanError};
pub use crate::runner::{
    render_event, render_report, render_summary, run_batch, BatchEvent, BatchReport,
    LaunchRequest, RunBatchArgs, RunOptions, ScriptLauncher, ScriptOutcome, ScriptOutput,
    ScriptReport, TextMarkers,
};
