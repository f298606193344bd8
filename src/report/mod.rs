pub mod html;
pub mod json;
pub mod junit;
pub mod manifest;
pub mod surefire;
pub mod types;

use crate::utils::config::ReportConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use types::ReportDocument;

/// Paths written by one report generation
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub html_path: PathBuf,
    pub json_path: PathBuf,
    pub document: ReportDocument,
}

/// Build the report document from the configured results directory
pub fn build_document(config: &ReportConfig) -> Result<ReportDocument> {
    let results = surefire::discover(config)?;
    let generated_at = chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();
    Ok(ReportDocument::new(
        manifest::build_summary(generated_at),
        results,
    ))
}

/// Discover results, render both artifacts and write them, overwriting prior runs.
///
/// Only filesystem write errors fail the generation.
pub fn generate_report(config: &ReportConfig) -> Result<GeneratedReport> {
    let document = build_document(config)?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let html_path = config.html_path();
    html::generate(&document, &html_path)
        .with_context(|| format!("Failed to write {}", html_path.display()))?;
    println!("Test report generated: {}", html_path.display());

    let json_path = config.json_path();
    json::generate(&document, &json_path)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;
    println!("Test summary saved: {}", json_path.display());

    Ok(GeneratedReport {
        html_path,
        json_path,
        document,
    })
}

/// Print the console summary block
pub fn print_summary(doc: &ReportDocument) {
    let coverage = &doc.summary.test_coverage;
    let ops: Vec<&str> = coverage
        .crud_operations_covered
        .iter()
        .map(|op| op.as_str())
        .collect();

    println!("\n{}", "=".repeat(60));
    println!("{}", "FLIXMATE CRUD TEST SUMMARY".bold());
    println!("{}", "=".repeat(60));
    println!("Functions Tested: {}", coverage.total_functions);
    println!("Endpoints Tested: {}", coverage.total_endpoints);
    println!("CRUD Operations: {}", ops.join(", "));

    if doc.has_results() {
        let totals = &doc.totals;
        println!("Total Tests: {}", totals.tests);
        println!("Passed: {}", totals.passed.to_string().green());
        println!("Failed: {}", totals.failed.to_string().red());
        println!("Success Rate: {:.1}%", totals.success_rate);
    } else {
        println!("{}", "No test results found. Run tests first.".yellow());
    }
    println!("{}", "=".repeat(60));
}
