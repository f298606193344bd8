//! Maven Surefire result discovery.
//!
//! Reads the root `<testsuite>` attributes of `TEST-*.xml` files.

use super::types::{SuiteResult, SuiteResults};
use crate::utils::config::ReportConfig;
use anyhow::{Context, Result};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attr(#[from] AttrError),

    #[error("no root element")]
    MissingRoot,

    #[error("text before the root element")]
    TextBeforeRoot,

    #[error("attribute {name}=\"{value}\" is not a valid number")]
    InvalidAttribute { name: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse the root element of a Surefire report.
///
/// Missing counts default to 0 and a missing name to "Unknown"; a count that
/// is present but not a non-negative integer is an error.
pub fn parse_suite(content: &str) -> Result<SuiteResult, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => return suite_from_root(e),
            Event::Text(ref t) if !t.iter().all(u8::is_ascii_whitespace) => {
                return Err(ParseError::TextBeforeRoot)
            }
            Event::Eof => return Err(ParseError::MissingRoot),
            // Declaration, comments, doctype, whitespace
            _ => {}
        }
        buf.clear();
    }
}

fn suite_from_root(root: &BytesStart<'_>) -> Result<SuiteResult, ParseError> {
    let mut name = "Unknown".to_string();
    let (mut tests, mut failures, mut errors, mut skipped) = (0, 0, 0, 0);
    let mut time = 0.0;

    for attr in root.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"name" => name = value.to_string(),
            b"tests" => tests = parse_count("tests", &value)?,
            b"failures" => failures = parse_count("failures", &value)?,
            b"errors" => errors = parse_count("errors", &value)?,
            b"skipped" => skipped = parse_count("skipped", &value)?,
            b"time" => time = parse_time(&value)?,
            _ => {}
        }
    }

    Ok(SuiteResult::new(&name, tests, failures, errors, skipped, time))
}

fn parse_count(name: &str, value: &str) -> Result<u32, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn parse_time(value: &str) -> Result<f64, ParseError> {
    // Surefire writes thousands separators for long suites ("1,234.5")
    value
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .ok_or_else(|| ParseError::InvalidAttribute {
            name: "time".to_string(),
            value: value.to_string(),
        })
}

pub fn parse_file(path: &Path) -> Result<SuiteResult, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_suite(&content)
}

/// List result files matching the configured pattern, in path order
pub fn find_result_files(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let dir = glob::Pattern::escape(&config.results_dir.to_string_lossy());
    let pattern = format!("{}/{}", dir, config.results_pattern);

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid results pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Discover and parse every result file. Unparsable files are logged and skipped.
pub fn discover(config: &ReportConfig) -> Result<SuiteResults> {
    let mut results = SuiteResults::new();

    if !config.results_dir.is_dir() {
        log::warn!("No surefire reports found. Run tests first.");
        return Ok(results);
    }

    for path in find_result_files(config)? {
        match parse_file(&path) {
            Ok(suite) => {
                log::debug!("Parsed {} ({} tests)", path.display(), suite.tests);
                results.insert(suite.name.clone(), suite);
            }
            Err(e) => log::warn!("Error parsing {}: {}", path.display(), e),
        }
    }

    Ok(results)
}
