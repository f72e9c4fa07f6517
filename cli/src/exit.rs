use promptfeed_core::api::{CliError, RunnerError};

pub fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 2: usage error (no scripts given; clap uses 2 for parse errors too)
    // 11: config error
    // 20: a script could not be read, launched or completed
    // 50: internal/uncategorized
    match e {
        CliError::Usage(_) => 2,
        CliError::Config(_) => 11,
        CliError::Batch { .. } => 20,
        CliError::Runner(re) => match re {
            RunnerError::Scan(_) => 20,
            RunnerError::NoInterpreter { .. } => 11,
            RunnerError::Spawn(_) => 20,
            RunnerError::StreamIo { .. } => 20,
            RunnerError::Timeout { .. } => 20,
        },
        CliError::Io(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}
