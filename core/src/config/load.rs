use std::path::{Path, PathBuf};

use super::types::{AppConfig, LoggingConfig};

pub const ENV_DEFAULT_LINK: &str = "PROMPTFEED_DEFAULT_LINK";
pub const ENV_TIMEOUT_SECS: &str = "PROMPTFEED_TIMEOUT_SECS";

/// Get the promptfeed data directory: ~/.promptfeed
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".promptfeed"))
}

/// Load configuration.
///
/// Priority: `explicit` path, then `~/.promptfeed/config.toml`, then
/// `./promptfeed.toml`, then built-in defaults. Environment overrides are
/// applied on top of whichever source won.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut cfg = match explicit {
        Some(path) => load_from_path(path)?,
        None => {
            let home_config = get_data_dir().ok().map(|d| d.join("config.toml"));
            let local_config = Path::new("promptfeed.toml");

            match home_config {
                Some(p) if p.exists() => load_from_path(&p)?,
                _ if local_config.exists() => load_from_path(local_config)?,
                _ => AppConfig::default(),
            }
        }
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse {} failed: {e}", path.display()))?;
    Ok(cfg)
}

pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(ENV_DEFAULT_LINK) {
        if !v.trim().is_empty() {
            cfg.runner.default_link = v.trim().to_string();
        }
    }

    if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
        let v = v.trim();
        if !v.is_empty() {
            let secs = v.parse::<u64>().map_err(|_| {
                anyhow::anyhow!("{ENV_TIMEOUT_SECS} must be an integer, got {v:?}")
            })?;
            cfg.runner.timeout_secs = (secs > 0).then_some(secs);
        }
    }

    Ok(())
}

impl LoggingConfig {
    /// Directory for log files, with `~` expanded. Falls back to the OS temp dir.
    pub fn log_directory(&self) -> PathBuf {
        match self
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => PathBuf::from(shellexpand::tilde(d).as_ref()),
            None => std::env::temp_dir().join("promptfeed"),
        }
    }
}
