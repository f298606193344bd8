//! End-to-end CRUD verification runs against a wiremock FlixMate API.

use flixmate_qa::api::ApiClient;
use flixmate_qa::runner::{run_with_client, Step, StepStatus};
use flixmate_qa::utils::VerifyConfig;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> VerifyConfig {
    VerifyConfig {
        base_url: format!("{}/api", server.uri()),
        step_pause_ms: 0,
        persistence_pause_ms: 0,
        ..VerifyConfig::default()
    }
}

async fn mount_health(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/health/database"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Database connection successful",
                "movieCount": 3
            })),
        )
        .mount(server)
        .await;
}

async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "token": "admin-token"})),
        )
        .mount(server)
        .await;
}

async fn run(server: &MockServer) -> flixmate_qa::runner::VerificationRun {
    let config = config_for(server);
    let client = ApiClient::new(&config).expect("client");
    run_with_client(&client, &config).await
}

#[tokio::test]
async fn test_full_crud_uses_id_from_create_response() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_login_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"movieId": 1, "title": "Inception"}])),
        )
        // Initial read and persistence check only: no lookup scan
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movies"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"movieId": 42})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/movies/42"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/movies/42"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let run = run(&server).await;

    for step in Step::ALL {
        assert_eq!(run.step(step).status, StepStatus::Passed, "{:?}", step);
    }
    assert!(run.is_success());
    assert_eq!(run.summary().passed, 7);
}

#[tokio::test]
async fn test_auth_failure_is_overall_failure() {
    let server = MockServer::start().await;
    mount_health(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movies"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let run = run(&server).await;

    assert!(!run.is_success());
    assert!(run.passed(Step::Health));
    assert!(run.passed(Step::Read));
    assert!(run.passed(Step::Persistence));
    assert!(matches!(
        run.step(Step::Authenticate).status,
        StepStatus::Failed { ref error } if error.contains("401")
    ));
    for step in [Step::Create, Step::Update, Step::Delete] {
        assert!(
            matches!(run.step(step).status, StepStatus::Skipped { .. }),
            "{:?}",
            step
        );
    }
}

#[tokio::test]
async fn test_health_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health/database"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let run = run(&server).await;

    assert!(run.aborted);
    assert!(!run.is_success());
    let summary = run.summary();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 6);
}

#[tokio::test]
async fn test_lookup_fallback_takes_first_of_duplicate_test_movies() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_login_ok(&server).await;

    // Two leftover test movies from earlier runs; listed until the delete
    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"movieId": 1, "title": "Inception"},
            {"movieId": 7, "title": "Test Movie 1700000000"},
            {"movieId": 9, "title": "Test Movie 1700000100"}
        ])))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"movieId": 1, "title": "Inception"},
            {"movieId": 9, "title": "Test Movie 1700000100"}
        ])))
        .mount(&server)
        .await;

    // No id in the create response
    Mock::given(method("POST"))
        .and(path("/api/admin/movies"))
        .respond_with(ResponseTemplate::new(201).set_body_string("Movie created"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/movies/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/movies/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let run = run(&server).await;

    assert!(run.is_success());
}

#[tokio::test]
async fn test_deleted_movie_still_listed_fails_persistence() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_login_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"movieId": 42, "title": "Updated Test Movie 1"}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"movieId": 42})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/movies/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/movies/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let run = run(&server).await;

    assert!(run.passed(Step::Delete));
    assert!(matches!(
        run.step(Step::Persistence).status,
        StepStatus::Failed { ref error } if error.contains("42")
    ));
    assert!(!run.is_success());
}

#[tokio::test]
async fn test_update_failure_skips_delete() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_login_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"movieId": 5})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/movies/5"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/movies/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let run = run(&server).await;

    assert!(run.passed(Step::Create));
    assert!(matches!(run.step(Step::Update).status, StepStatus::Failed { .. }));
    assert!(matches!(run.step(Step::Delete).status, StepStatus::Skipped { .. }));
    assert!(run.passed(Step::Persistence));
    assert!(!run.is_success());
}

#[tokio::test]
async fn test_missing_test_movie_skips_update() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_login_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"movieId": 1, "title": "Inception"}])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let run = run(&server).await;

    assert_eq!(
        run.step(Step::Update).status,
        StepStatus::Skipped {
            reason: "no test movie found".to_string()
        }
    );
    assert!(matches!(run.step(Step::Delete).status, StepStatus::Skipped { .. }));
    assert!(!run.is_success());
}

#[tokio::test]
async fn test_failed_lookup_read_skips_update() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_login_ok(&server).await;

    // Initial read succeeds, every later listing fails
    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/public/movies"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movies"))
        .respond_with(ResponseTemplate::new(201).set_body_string("Movie created"))
        .mount(&server)
        .await;

    let run = run(&server).await;

    assert!(run.passed(Step::Read));
    assert!(run.passed(Step::Create));
    assert!(matches!(
        run.step(Step::Update).status,
        StepStatus::Skipped { ref reason } if reason.starts_with("test movie lookup failed")
    ));
    assert!(matches!(run.step(Step::Delete).status, StepStatus::Skipped { .. }));
    assert!(!run.is_success());
}
