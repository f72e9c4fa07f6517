use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

pub const AFTER_HELP: &str = "\
Notes:
  - Prompts are detected from script lines that mention `input`.
  - A prompt asking for a link, URL or website is answered with the link;
    every other prompt is answered with `y`.
  - Default link: https://github.com/cool-8298 (any argument starting with
    `http` overrides it, wherever it appears).

Example:
  promptfeed run script1.py script2.py https://example.com";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "promptfeed",
    version,
    about = "Run scripts and answer their input() prompts automatically",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file. Defaults to ~/.promptfeed/config.toml, then ./promptfeed.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use plain ASCII markers in output.
    #[arg(long, global = true)]
    pub ascii: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Script files and an optional link, in any order.
    #[arg(value_name = "FILE|LINK")]
    pub targets: Vec<String>,

    /// Kill a script that runs longer than this many seconds (0 disables).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Answer used for confirmation prompts.
    #[arg(long)]
    pub confirm: Option<String>,

    /// Show what would be run and fed, without starting any script.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DetectArgs {
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Link used when showing planned answers.
    #[arg(long)]
    pub link: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one or more scripts, answering their prompts.
    Run(RunArgs),
    /// Show detected prompts and planned answers without running anything.
    Detect(DetectArgs),
}
