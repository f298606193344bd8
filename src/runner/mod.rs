pub mod context;
pub mod state;
pub mod steps;

use anyhow::Result;
use colored::Colorize;

use crate::api::ApiClient;
use crate::utils::config::VerifyConfig;
pub use context::SessionContext;
pub use state::*;
use steps::StepError;

/// Run the CRUD verification against the configured API
pub async fn run_verification(config: &VerifyConfig) -> Result<VerificationRun> {
    let client = ApiClient::new(config)?;
    Ok(run_with_client(&client, config).await)
}

/// Execute every step in order with an explicit session context.
///
/// Only a failed health check stops the run; every other failure is recorded
/// and the remaining steps decide for themselves whether to run.
pub async fn run_with_client(client: &ApiClient, config: &VerifyConfig) -> VerificationRun {
    let mut run = VerificationRun::new();
    let mut ctx = SessionContext::new();

    run.start();
    log::info!("Starting FlixMate Data Persistence Test Suite");
    log::info!("Target API: {}", client.base_url());
    log::info!("{}", "=".repeat(60));

    // 1. Health
    run.step_mut(Step::Health).start();
    let health = steps::check_health(client).await;
    record(&mut run, Step::Health, health);
    if !run.passed(Step::Health) {
        log::error!("❌ Database health check failed. Cannot proceed with tests.");
        run.abort("database health check failed");
        run.finish();
        return run;
    }

    // 2. Authenticate
    run.step_mut(Step::Authenticate).start();
    let auth = steps::authenticate(client, config, &mut ctx).await;
    record(&mut run, Step::Authenticate, auth);
    if !ctx.is_authenticated() {
        log::warn!("⚠️ Admin authentication failed. Skipping CREATE/UPDATE/DELETE tests.");
        log::info!("Note: You may need to update the admin credentials.");
    }

    // 3. Read
    run.step_mut(Step::Read).start();
    let read = steps::read_movies(client).await;
    record(&mut run, Step::Read, read);
    if !run.passed(Step::Read) {
        log::warn!("⚠️ Basic READ operation failed. Check if application is running.");
    }

    // 4. Create
    if ctx.is_authenticated() {
        run.step_mut(Step::Create).start();
        let create = steps::create_movie(client, config, &mut ctx).await;
        record(&mut run, Step::Create, create);
    } else {
        run.step_mut(Step::Create).skip("not authenticated".to_string());
    }

    // 5+6. Locate (if needed) and update
    if run.passed(Step::Create) {
        tokio::time::sleep(config.step_pause()).await;
        run.step_mut(Step::Update).start();
        let update = steps::update_movie(client, config, &mut ctx).await;
        record(&mut run, Step::Update, update);
    } else {
        run.step_mut(Step::Update).skip("create did not succeed".to_string());
    }

    // 7. Delete
    if run.passed(Step::Update) {
        tokio::time::sleep(config.step_pause()).await;
        run.step_mut(Step::Delete).start();
        let delete = steps::delete_movie(client, config, &mut ctx).await;
        record(&mut run, Step::Delete, delete);
    } else {
        run.step_mut(Step::Delete).skip("update did not succeed".to_string());
    }

    // 8. Persistence
    tokio::time::sleep(config.persistence_pause()).await;
    run.step_mut(Step::Persistence).start();
    let persistence = steps::verify_persistence(client, &ctx).await;
    record(&mut run, Step::Persistence, persistence);

    run.finish();
    run
}

fn record<T>(run: &mut VerificationRun, step: Step, result: Result<T, StepError>) {
    let state = run.step_mut(step);
    match result {
        Ok(_) => state.pass(),
        Err(e) if e.is_skip() => state.skip(e.to_string()),
        Err(e) => state.fail(e.to_string()),
    }
}

/// Log the per-step results and the overall verdict
pub fn print_summary(run: &VerificationRun) {
    log::info!("{}", "=".repeat(60));
    log::info!("Test Results Summary:");
    for state in &run.steps {
        let marker = match &state.status {
            StepStatus::Passed => "✅".to_string(),
            StepStatus::Failed { .. } => "❌".to_string(),
            StepStatus::Skipped { reason } => format!("⏭ ({})", reason),
            StepStatus::Pending | StepStatus::Running => "○".to_string(),
        };
        log::info!("{}: {}", state.step.display_name(), marker);
    }

    let summary = run.summary();
    if summary.success {
        log::info!("🎉 All CRUD operations successful! Data persistence is working correctly.");
    } else {
        log::warn!("⚠️ Some operations failed. Check the logs above for details.");
    }

    println!();
    println!(
        "  Steps: {} passed, {} failed, {} skipped",
        summary.passed.to_string().green(),
        summary.failed.to_string().red(),
        summary.skipped.to_string().yellow()
    );
    if let Some(ms) = summary.total_duration_ms {
        println!("  Duration: {}ms", ms);
    }
}
