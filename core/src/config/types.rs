use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::Category;

pub const DEFAULT_LINK: &str = "https://github.com/cool-8298";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub classify: ClassifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "promptfeed_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. `~` is expanded.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Answer for prompts classified as `Link`.
    #[serde(default = "default_link")]
    pub default_link: String,

    /// Answer for prompts classified as `Confirm`.
    #[serde(default = "default_confirm_answer")]
    pub confirm_answer: String,

    /// Kill a child that runs longer than this. Unset waits forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Extension (without the dot) to interpreter command.
    #[serde(default = "default_interpreters")]
    pub interpreters: BTreeMap<String, InterpreterConfig>,
}

fn default_link() -> String {
    DEFAULT_LINK.to_string()
}

fn default_confirm_answer() -> String {
    "y".to_string()
}

fn default_interpreters() -> BTreeMap<String, InterpreterConfig> {
    let mut map = BTreeMap::new();
    map.insert(
        "py".to_string(),
        InterpreterConfig {
            program: "python".to_string(),
            args: Vec::new(),
        },
    );
    map
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            default_link: default_link(),
            confirm_answer: default_confirm_answer(),
            timeout_secs: None,
            interpreters: default_interpreters(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Substring that marks a line as a prompt line.
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Evaluated in order before the built-in rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

fn default_keyword() -> String {
    "input".to_string()
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub category: Category,
}
