use crate::runner::state::{StepState, StepStatus, VerificationRun};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

pub const SUITE_NAME: &str = "CrudVerification";

/// Generate JUnit XML for a verification run
pub fn generate_junit_xml(run: &VerificationRun) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let summary = run.summary();
    let tests = summary.total_steps.to_string();
    let failures = summary.failed.to_string();
    let skipped = summary.skipped.to_string();
    let time = seconds(summary.total_duration_ms.unwrap_or(0));
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();

    // Bare <testsuite> root, the same shape Surefire writes
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", SUITE_NAME));
    suite_start.push_attribute(("tests", tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("errors", "0"));
    suite_start.push_attribute(("skipped", skipped.as_str()));
    suite_start.push_attribute(("id", run.run_id.as_str()));
    suite_start.push_attribute(("time", time.as_str()));
    suite_start.push_attribute(("timestamp", timestamp.as_str()));
    writer.write_event(Event::Start(suite_start))?;

    for step in &run.steps {
        write_test_case(&mut writer, step)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, step: &StepState) -> Result<()> {
    let time = seconds(step.duration_ms.unwrap_or(0));
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", step.step.display_name()));
    case_start.push_attribute(("classname", SUITE_NAME));
    case_start.push_attribute(("time", time.as_str()));
    writer.write_event(Event::Start(case_start))?;

    match &step.status {
        StepStatus::Failed { error } => {
            let mut fail_start = BytesStart::new("failure");
            fail_start.push_attribute(("message", error.as_str()));
            fail_start.push_attribute(("type", "StepFailure"));
            writer.write_event(Event::Start(fail_start))?;
            writer.write_event(Event::Text(BytesText::new(error)))?;
            writer.write_event(Event::End(BytesEnd::new("failure")))?;
        }
        StepStatus::Skipped { reason } => {
            let mut skip = BytesStart::new("skipped");
            skip.push_attribute(("message", reason.as_str()));
            writer.write_event(Event::Empty(skip))?;
        }
        _ => {}
    }

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

fn seconds(ms: u64) -> String {
    format!("{:.3}", ms as f64 / 1000.0)
}

/// Write the JUnit report to `path`, creating parent directories
pub fn write_report(run: &VerificationRun, path: &Path) -> Result<()> {
    let xml = generate_junit_xml(run)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, xml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::surefire;
    use crate::runner::state::Step;

    fn sample_run() -> VerificationRun {
        let mut run = VerificationRun::new();
        for step in [Step::Health, Step::Read, Step::Persistence] {
            run.step_mut(step).start();
            run.step_mut(step).pass();
        }
        run.step_mut(Step::Authenticate)
            .fail("unexpected status 401: <bad credentials>".to_string());
        for step in [Step::Create, Step::Update, Step::Delete] {
            run.step_mut(step).skip("not authenticated".to_string());
        }
        run
    }

    #[test]
    fn test_generate_junit_xml() {
        let xml = generate_junit_xml(&sample_run()).expect("Failed to generate XML");

        assert!(xml.contains(r#"<testsuite name="CrudVerification""#));
        assert!(!xml.contains("<testsuites"));
        assert!(xml.contains(r#"tests="7""#));
        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"skipped="3""#));
        assert!(xml.contains(r#"<testcase name="Admin Authentication""#));
        assert!(xml.contains("&lt;bad credentials&gt;"));
        assert!(xml.contains(r#"<skipped message="not authenticated"/>"#));
    }

    #[test]
    fn test_export_is_readable_as_surefire_suite() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("reports/TEST-CrudVerification.xml");
        write_report(&sample_run(), &path).unwrap();

        let suite = surefire::parse_file(&path).unwrap();
        assert_eq!(suite.name, SUITE_NAME);
        assert_eq!(suite.tests, 7);
        assert_eq!(suite.failures, 1);
        assert_eq!(suite.skipped, 3);
    }
}
