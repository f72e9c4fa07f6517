use std::io::Write;
use std::path::{Path, PathBuf};

use promptfeed_core::api as core_api;
use promptfeed_core::api::{Category, CliError, TextMarkers};
use serde::Serialize;

use super::cli::{DetectArgs, OutputFormat};
use super::run::build_options;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectEntry {
    pub path: PathBuf,
    pub prompts: Vec<Category>,
    pub answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn detect_file(path: &Path, options: &core_api::RunOptions) -> DetectEntry {
    match core_api::plan_script(path, &options.rules, &options.answers).await {
        Ok(plan) => DetectEntry {
            path: path.to_path_buf(),
            prompts: plan.categories,
            answers: plan.values,
            error: None,
        },
        Err(e) => DetectEntry {
            path: path.to_path_buf(),
            prompts: Vec::new(),
            answers: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}

pub fn render_text<W: Write>(
    entries: &[DetectEntry],
    markers: &TextMarkers,
    w: &mut W,
) -> std::io::Result<()> {
    for entry in entries {
        let path = entry.path.display();
        if let Some(err) = &entry.error {
            writeln!(w, "{} {}: {}", markers.fail, path, err)?;
            continue;
        }
        writeln!(w, "{} {}: {} prompt(s)", markers.ok, path, entry.prompts.len())?;
        for (i, (category, answer)) in entry.prompts.iter().zip(&entry.answers).enumerate() {
            writeln!(w, "  {}. {} -> {}", i + 1, category, answer)?;
        }
    }
    Ok(())
}

pub async fn detect_cmd(
    args: DetectArgs,
    cfg: &core_api::AppConfig,
    markers: TextMarkers,
) -> Result<i32, CliError> {
    let mut options = build_options(cfg)?;
    if let Some(link) = args.link {
        options.answers.link = link;
    }

    let mut entries = Vec::with_capacity(args.files.len());
    for path in &args.files {
        entries.push(detect_file(path, &options).await);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render_text(&entries, &markers, &mut out)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::Anyhow(e.into()))?;
            writeln!(out, "{json}")?;
        }
    }
    out.flush()?;

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    if failed > 0 {
        return Err(CliError::Batch {
            failed,
            total: entries.len(),
        });
    }
    Ok(0)
}
