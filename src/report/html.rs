use super::types::{FeatureDescriptor, ReportDocument, SuiteResult};
use anyhow::Result;
use std::path::Path;

/// Render the report and write it to `path`
pub fn generate(doc: &ReportDocument, path: &Path) -> Result<()> {
    std::fs::write(path, render(doc))?;
    Ok(())
}

pub fn render(doc: &ReportDocument) -> String {
    let summary = &doc.summary;
    let coverage = &summary.test_coverage;

    let features_html: String = summary.functions_tested.iter().map(feature_card).collect();

    let results_html = if doc.has_results() {
        results_section(doc)
    } else {
        r#"<p class="placeholder">No test results found. Please run the tests first (e.g. <code>mvn test</code>) so that <code>target/surefire-reports/TEST-*.xml</code> exists, then regenerate this report.</p>"#.to_string()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>FlixMate CRUD Test Report</title>
    <style>
        :root {{
            --bg-primary: #0a0f1d;
            --bg-secondary: #141b2d;
            --bg-tertiary: #1f2937;
            --border: #374151;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --green: #10b981;
            --red: #ef4444;
            --blue: #3b82f6;
            --purple: #8b5cf6;
        }}

        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}

        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.5;
            padding: 3rem 1rem;
        }}

        .container {{
            max-width: 1100px;
            margin: 0 auto;
        }}

        header {{
            margin-bottom: 2.5rem;
        }}

        h1 {{
            font-size: 2.25rem;
            font-weight: 800;
        }}

        h2 {{
            font-size: 1.35rem;
            margin: 2.5rem 0 1rem;
        }}

        .eyebrow {{
            font-size: 0.875rem;
            font-weight: 600;
            color: var(--purple);
            text-transform: uppercase;
            letter-spacing: 0.1em;
        }}

        .note {{
            color: var(--text-secondary);
            font-size: 0.875rem;
            margin-bottom: 1rem;
        }}

        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 1.5rem;
        }}

        .stat {{
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            padding: 1.5rem;
            border-radius: 1rem;
        }}

        .stat-value {{
            font-size: 2.25rem;
            font-weight: 800;
        }}

        .stat-label {{
            color: var(--text-secondary);
            font-size: 0.875rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
        }}

        .stat.passed .stat-value {{ color: var(--green); }}
        .stat.failed .stat-value {{ color: var(--red); }}

        .feature {{
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            border-radius: 1rem;
            margin-bottom: 1.25rem;
            overflow: hidden;
        }}

        .feature-header {{
            padding: 1rem 1.5rem;
            font-weight: 700;
            border-bottom: 1px solid var(--border);
        }}

        .feature-content {{
            padding: 1rem 1.5rem;
        }}

        .badge {{
            display: inline-block;
            padding: 0.2rem 0.7rem;
            margin: 0 0.25rem 0.5rem 0;
            border-radius: 9999px;
            font-size: 0.75rem;
            font-weight: 600;
            background: rgba(16, 185, 129, 0.1);
            color: var(--green);
        }}

        .endpoint {{
            font-family: 'JetBrains Mono', monospace;
            font-size: 0.8125rem;
            background: var(--bg-tertiary);
            border-left: 3px solid var(--blue);
            padding: 0.4rem 0.75rem;
            margin: 0.3rem 0;
        }}

        table {{
            width: 100%;
            border-collapse: collapse;
            margin-top: 1.5rem;
        }}

        th, td {{
            padding: 0.6rem 0.75rem;
            border: 1px solid var(--border);
            text-align: left;
        }}

        th {{
            background: var(--bg-tertiary);
            color: var(--text-secondary);
            font-size: 0.75rem;
            text-transform: uppercase;
        }}

        .test-pass {{ color: var(--green); font-weight: 700; }}
        .test-fail {{ color: var(--red); font-weight: 700; }}

        .placeholder {{
            background: var(--bg-secondary);
            border: 1px dashed var(--border);
            border-radius: 1rem;
            padding: 1.5rem;
            color: var(--text-secondary);
        }}

        .meta {{
            margin-top: 4rem;
            padding-top: 2rem;
            border-top: 1px solid var(--border);
            color: var(--text-secondary);
            font-size: 0.875rem;
            text-align: center;
        }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <div class="eyebrow">FlixMate API</div>
            <h1>CRUD Test Report</h1>
            <div class="note">Generated: {generated}</div>
        </header>

        <h2>Documented Feature Coverage</h2>
        <p class="note">Static documentation manifest. These entries are maintained by hand and are not measured from the test run below.</p>
        <div class="summary">
            <div class="stat">
                <div class="stat-value">{total_functions}</div>
                <div class="stat-label">Functions</div>
            </div>
            <div class="stat">
                <div class="stat-value">{total_endpoints}</div>
                <div class="stat-label">Endpoints</div>
            </div>
            <div class="stat">
                <div class="stat-value">{crud_count}</div>
                <div class="stat-label">CRUD Operations</div>
            </div>
        </div>

        <h2>Functions</h2>
        {features_html}

        <h2>Measured Test Execution Results</h2>
        {results_html}

        <div class="meta">FlixMate API - CRUD Testing Suite</div>
    </div>
</body>
</html>"#,
        generated = html_escape(&summary.test_execution_time),
        total_functions = coverage.total_functions,
        total_endpoints = coverage.total_endpoints,
        crud_count = coverage.crud_operations_covered.len(),
        features_html = features_html,
        results_html = results_html,
    )
}

fn feature_card(feature: &FeatureDescriptor) -> String {
    let badges: String = feature
        .crud_operations
        .iter()
        .map(|op| format!(r#"<span class="badge">{}</span>"#, op.as_str()))
        .collect();
    let endpoints: String = feature
        .endpoints
        .iter()
        .map(|e| format!(r#"<div class="endpoint">{}</div>"#, html_escape(e)))
        .collect();

    format!(
        r#"
        <div class="feature">
            <div class="feature-header">{name}</div>
            <div class="feature-content">
                <div>{badges}</div>
                {endpoints}
                <p class="note">Status: <span class="test-pass">{status}</span></p>
            </div>
        </div>
"#,
        name = html_escape(&feature.name),
        badges = badges,
        endpoints = endpoints,
        status = feature.status.as_str(),
    )
}

fn results_section(doc: &ReportDocument) -> String {
    let totals = &doc.totals;
    let rows: String = doc.test_results.values().map(result_row).collect();

    format!(
        r#"
        <div class="summary">
            <div class="stat">
                <div class="stat-value">{tests}</div>
                <div class="stat-label">Total Tests</div>
            </div>
            <div class="stat passed">
                <div class="stat-value">{passed}</div>
                <div class="stat-label">Passed</div>
            </div>
            <div class="stat failed">
                <div class="stat-value">{failed}</div>
                <div class="stat-label">Failed</div>
            </div>
            <div class="stat">
                <div class="stat-value">{rate:.1}%</div>
                <div class="stat-label">Success Rate</div>
            </div>
        </div>
        <table>
            <tr>
                <th>Test Class</th>
                <th>Tests</th>
                <th>Failures</th>
                <th>Errors</th>
                <th>Skipped</th>
                <th>Time (s)</th>
                <th>Success Rate</th>
            </tr>
            {rows}
        </table>
"#,
        tests = totals.tests,
        passed = totals.passed,
        failed = totals.failed,
        rate = totals.success_rate,
        rows = rows,
    )
}

fn result_row(result: &SuiteResult) -> String {
    let status_class = if result.is_passing() {
        "test-pass"
    } else {
        "test-fail"
    };

    format!(
        r#"
            <tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{:.2}</td>
                <td class="{}">{:.1}%</td>
            </tr>"#,
        html_escape(&result.name),
        result.tests,
        result.failures,
        result.errors,
        result.skipped,
        result.time,
        status_class,
        result.success_rate
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
