mod load;
mod types;

pub use load::{
    apply_env_overrides, get_data_dir, load, load_from_path, ENV_DEFAULT_LINK, ENV_TIMEOUT_SECS,
};
pub use types::{
    AppConfig, ClassifyConfig, InterpreterConfig, LoggingConfig, RuleConfig, RunnerConfig,
    DEFAULT_LINK,
};
