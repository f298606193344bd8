use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed Surefire suites keyed by suite name
pub type SuiteResults = BTreeMap<String, SuiteResult>;

/// `(tests - failures - errors) / tests * 100`, or 0 without tests
pub fn success_rate(tests: u32, failures: u32, errors: u32) -> f64 {
    if tests == 0 {
        return 0.0;
    }
    let passed = tests.saturating_sub(failures.saturating_add(errors));
    (passed as f64 / tests as f64 * 100.0).clamp(0.0, 100.0)
}

/// Counts from one `TEST-*.xml` root element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteResult {
    #[serde(skip)]
    pub name: String,
    pub tests: u32,
    pub failures: u32,
    pub errors: u32,
    pub skipped: u32,
    pub time: f64,
    pub success_rate: f64,
}

impl SuiteResult {
    pub fn new(name: &str, tests: u32, failures: u32, errors: u32, skipped: u32, time: f64) -> Self {
        Self {
            name: name.to_string(),
            tests,
            failures,
            errors,
            skipped,
            time,
            success_rate: success_rate(tests, failures, errors),
        }
    }

    pub fn is_passing(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }
}

/// Aggregate over all discovered suites
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultTotals {
    pub suites: u32,
    pub tests: u32,
    pub failures: u32,
    pub errors: u32,
    pub skipped: u32,
    pub time: f64,
    pub passed: u32,
    pub failed: u32,
    pub success_rate: f64,
}

impl ResultTotals {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a SuiteResult>,
    {
        let mut totals = Self::default();
        for r in results {
            totals.suites = totals.suites.saturating_add(1);
            totals.tests = totals.tests.saturating_add(r.tests);
            totals.failures = totals.failures.saturating_add(r.failures);
            totals.errors = totals.errors.saturating_add(r.errors);
            totals.skipped = totals.skipped.saturating_add(r.skipped);
            totals.time += r.time;
        }

        // Counts saturate at u32::MAX; passed + failed always equals tests
        totals.failed = totals.failures.saturating_add(totals.errors).min(totals.tests);
        totals.passed = totals.tests - totals.failed;
        totals.success_rate = success_rate(totals.tests, totals.failures, totals.errors);
        totals
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum CrudOperation {
    Create,
    Read,
    Update,
    Delete,
}

impl CrudOperation {
    pub const ALL: [CrudOperation; 4] = [
        CrudOperation::Create,
        CrudOperation::Read,
        CrudOperation::Update,
        CrudOperation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CrudOperation::Create => "Create",
            CrudOperation::Read => "Read",
            CrudOperation::Update => "Update",
            CrudOperation::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeatureStatus {
    Tested,
    Untested,
}

impl FeatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Tested => "Tested",
            FeatureStatus::Untested => "Untested",
        }
    }
}

/// Entry of the static feature manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureDescriptor {
    pub name: String,
    pub endpoints: Vec<String>,
    pub crud_operations: Vec<CrudOperation>,
    pub status: FeatureStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCoverage {
    pub total_functions: u32,
    pub functions_tested: u32,
    pub total_endpoints: u32,
    pub crud_operations_covered: Vec<CrudOperation>,
    pub error_handling_tested: bool,
    pub data_integrity_verified: bool,
    pub authentication_tested: bool,
    pub authorization_tested: bool,
}

/// The `summary` object of `test_summary.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestSummary {
    pub test_execution_time: String,
    /// Always `static-documentation`: the manifest is not measured
    pub manifest_kind: String,
    pub functions_tested: Vec<FeatureDescriptor>,
    pub test_coverage: TestCoverage,
}

/// Everything rendered into the HTML and JSON artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub summary: ManifestSummary,
    pub test_results: SuiteResults,
    pub totals: ResultTotals,
}

impl ReportDocument {
    pub fn new(summary: ManifestSummary, test_results: SuiteResults) -> Self {
        let totals = ResultTotals::from_results(test_results.values());
        Self {
            summary,
            test_results,
            totals,
        }
    }

    pub fn has_results(&self) -> bool {
        !self.test_results.is_empty()
    }
}
