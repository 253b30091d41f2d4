//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::domain::{ReportSummary, StatusCounts};
use crate::input::load_report;

#[derive(Args)]
pub struct InfoArgs {
    /// Report document (.json, .yaml or .yml)
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let report = load_report(&args.report)?;
    let summary = report.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let name = args.report.file_name().and_then(|n| n.to_str()).unwrap_or("");
    println!("Report: {}", name);
    for line in summary_lines(&summary) {
        println!("{}", line);
    }
    Ok(())
}

fn summary_lines(summary: &ReportSummary) -> Vec<String> {
    let row = |label: &str, counts: &StatusCounts| {
        format!("  {:<12}{:>6} renamed, {:>6} skipped", label, counts.renamed, counts.skipped)
    };
    vec![
        row("Types:", &summary.types),
        row("Methods:", &summary.methods),
        row("Fields:", &summary.fields),
        row("Properties:", &summary.properties),
        row("Events:", &summary.events),
        row("Resources:", &summary.resources),
        format!("  {:<12}{:>6}", "Strings:", summary.hidden_strings),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lines_are_aligned() {
        let summary = ReportSummary {
            types: StatusCounts { renamed: 2, skipped: 1 },
            hidden_strings: 3,
            ..ReportSummary::default()
        };
        let lines = summary_lines(&summary);
        assert_eq!(lines[0], "  Types:           2 renamed,      1 skipped");
        assert_eq!(lines[6], "  Strings:         3");
    }
}
