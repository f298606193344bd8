use super::types::ReportDocument;
use anyhow::Result;
use std::path::Path;

/// Generate JSON summary
pub fn generate(doc: &ReportDocument, path: &Path) -> Result<()> {
    std::fs::write(path, render(doc)?)?;
    Ok(())
}

pub fn render(doc: &ReportDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}
