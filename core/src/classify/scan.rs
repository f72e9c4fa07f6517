use std::borrow::Cow;
use std::path::Path;

use encoding_rs::UTF_8;

use super::rules::RuleSet;
use super::types::Category;
use crate::error::ScanError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a script as UTF-8 text. A leading BOM is dropped.
pub async fn read_script_text(path: &Path) -> Result<String, ScanError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    decode_utf8(&bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| ScanError::Decode {
            path: path.to_path_buf(),
        })
}

fn decode_utf8(bytes: &[u8]) -> Option<Cow<'_, str>> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    UTF_8.decode_without_bom_handling_and_without_replacement(body)
}

pub async fn scan_script(path: &Path, rules: &RuleSet) -> Result<Vec<Category>, ScanError> {
    let text = read_script_text(path).await?;
    let categories = rules.classify(&text);
    tracing::debug!(
        path = %path.display(),
        prompts = categories.len(),
        "classified script"
    );
    Ok(categories)
}
