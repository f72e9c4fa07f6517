pub mod dry_run;
pub mod process;

pub use dry_run::DryRunLauncher;
pub use process::ProcessLauncher;
