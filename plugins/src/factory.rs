use promptfeed_core::runner::ScriptLauncher;

use crate::runner::{DryRunLauncher, ProcessLauncher};

pub fn build_launcher(dry_run: bool) -> Box<dyn ScriptLauncher> {
    if dry_run {
        Box::new(DryRunLauncher::new())
    } else {
        Box::new(ProcessLauncher::new())
    }
}
