//! Report document loading (JSON, YAML)

use crate::domain::Report;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub mod document;

pub use document::ReportDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Read a report document, choosing the parser from the file extension.
pub fn load_report(path: &Path) -> Result<Report> {
    let Some(format) = DocumentFormat::from_path(path) else {
        anyhow::bail!(
            "Unsupported report extension for {} (expected .json, .yaml or .yml)",
            path.display()
        );
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading report file: {}", path.display()))?;
    let report = parse_report(&content, format)
        .with_context(|| format!("Invalid report document: {}", path.display()))?;

    let summary = report.summary();
    tracing::debug!(
        path = %path.display(),
        types = summary.types.renamed + summary.types.skipped,
        resources = summary.resources.renamed + summary.resources.skipped,
        hidden_strings = summary.hidden_strings,
        "loaded report"
    );
    Ok(report)
}

pub fn parse_report(content: &str, format: DocumentFormat) -> Result<Report> {
    let doc: ReportDocument = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(doc.into())
}
