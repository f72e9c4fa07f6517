use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("config error: {0}")]
    Config(String),
    #[error("usage: {0}")]
    Usage(String),
    #[error("{failed} of {total} scripts failed")]
    Batch { failed: usize, total: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Failure to turn a script path into text the classifier can scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("no interpreter configured for {}", path.display())]
    NoInterpreter { path: PathBuf },
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },
}
