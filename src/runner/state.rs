use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Steps of the CRUD verification, in execution order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Health,
    Authenticate,
    Read,
    Create,
    Update,
    Delete,
    Persistence,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::Health,
        Step::Authenticate,
        Step::Read,
        Step::Create,
        Step::Update,
        Step::Delete,
        Step::Persistence,
    ];

    /// Label used in the console summary and JUnit test case names
    pub fn display_name(&self) -> &'static str {
        match self {
            Step::Health => "Database Health",
            Step::Authenticate => "Admin Authentication",
            Step::Read => "READ Operation",
            Step::Create => "CREATE Operation",
            Step::Update => "UPDATE Operation",
            Step::Delete => "DELETE Operation",
            Step::Persistence => "Data Persistence",
        }
    }
}

/// Step execution status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Passed,
    Failed { error: String },
    Skipped { reason: String },
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepStatus::Passed | StepStatus::Failed { .. } | StepStatus::Skipped { .. }
        )
    }
}

/// State for a single step
#[derive(Debug, Clone)]
pub struct StepState {
    pub step: Step,
    pub status: StepStatus,
    pub started_at: Option<Instant>,
    pub duration_ms: Option<u64>,
}

impl StepState {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            status: StepStatus::Pending,
            started_at: None,
            duration_ms: None,
        }
    }

    pub fn start(&mut self) {
        self.status = StepStatus::Running;
        self.started_at = Some(Instant::now());
    }

    pub fn pass(&mut self) {
        self.finish(StepStatus::Passed);
    }

    pub fn fail(&mut self, error: String) {
        self.finish(StepStatus::Failed { error });
    }

    pub fn skip(&mut self, reason: String) {
        self.finish(StepStatus::Skipped { reason });
    }

    fn finish(&mut self, status: StepStatus) {
        self.status = status;
        if let Some(start) = self.started_at {
            self.duration_ms = Some(start.elapsed().as_millis() as u64);
        }
    }

    pub fn to_report(&self) -> StepReport {
        StepReport {
            step: self.step,
            name: self.step.display_name().to_string(),
            status: self.status.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub step: Step,
    pub name: String,
    pub status: StepStatus,
    pub duration_ms: Option<u64>,
}

/// State for one verification run
#[derive(Debug, Clone)]
pub struct VerificationRun {
    pub run_id: String,
    pub steps: Vec<StepState>,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    /// Set when the health check fails and the run stops early
    pub aborted: bool,
}

impl Default for VerificationRun {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationRun {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            steps: Step::ALL.iter().map(|s| StepState::new(*s)).collect(),
            started_at: None,
            finished_at: None,
            aborted: false,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Instant::now());
    }

    pub fn step(&self, step: Step) -> &StepState {
        // Every Step variant is seeded in new()
        &self.steps[Self::index(step)]
    }

    pub fn step_mut(&mut self, step: Step) -> &mut StepState {
        &mut self.steps[Self::index(step)]
    }

    fn index(step: Step) -> usize {
        Step::ALL.iter().position(|s| *s == step).unwrap_or(0)
    }

    pub fn passed(&self, step: Step) -> bool {
        self.step(step).status == StepStatus::Passed
    }

    /// Stop the run: every step still pending is skipped with `reason`
    pub fn abort(&mut self, reason: &str) {
        self.aborted = true;
        for state in &mut self.steps {
            if !state.status.is_terminal() {
                state.skip(reason.to_string());
            }
        }
    }

    /// Create, update, delete and persistence must all have passed
    pub fn is_success(&self) -> bool {
        !self.aborted
            && [Step::Create, Step::Update, Step::Delete, Step::Persistence]
                .iter()
                .all(|s| self.passed(*s))
    }

    pub fn summary(&self) -> RunSummary {
        let (mut passed, mut failed, mut skipped) = (0, 0, 0);
        for state in &self.steps {
            match state.status {
                StepStatus::Passed => passed += 1,
                StepStatus::Failed { .. } => failed += 1,
                StepStatus::Skipped { .. } => skipped += 1,
                _ => {}
            }
        }

        let total_duration_ms = self.started_at.map(|start| {
            self.finished_at
                .unwrap_or_else(Instant::now)
                .duration_since(start)
                .as_millis() as u64
        });

        RunSummary {
            run_id: self.run_id.clone(),
            total_steps: self.steps.len() as u32,
            passed,
            failed,
            skipped,
            total_duration_ms,
            success: self.is_success(),
        }
    }

    pub fn to_report(&self) -> RunReport {
        RunReport {
            run_id: self.run_id.clone(),
            steps: self.steps.iter().map(|s| s.to_report()).collect(),
            summary: self.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run_id: String,
    pub total_steps: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total_duration_ms: Option<u64>,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub steps: Vec<StepReport>,
    pub summary: RunSummary,
}
