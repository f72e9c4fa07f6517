mod report;
mod run;
mod traits;
pub mod types;

pub use report::{render_event, render_report, render_summary, TextMarkers};
pub use run::{run_batch, RunBatchArgs};
pub use traits::ScriptLauncher;
pub use types::{
    BatchEvent, BatchReport, LaunchRequest, RunOptions, ScriptOutcome, ScriptOutput, ScriptReport,
};
