mod common;

use axum::http::StatusCode;
use common::{parse_body, workshop_payload, TestApp};
use event_report_backend::background::run_pending_jobs;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_create_delivers_webhook() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let event = parse_body(app.request("POST", "/api/v1/events", Some(&cookie), Some(workshop_payload())).await).await;

    let jobs = parse_body(app.request("GET", "/api/v1/jobs", Some(&cookie), None).await).await;
    assert_eq!(jobs.as_array().unwrap().len(), 1);
    assert_eq!(jobs[0]["status"], "PENDING");
    assert_eq!(jobs[0]["job_type"], "WEBHOOK");

    run_pending_jobs(&app.state).await;

    let received = app.webhook.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["baserowId"], 1000);
    assert_eq!(received[0]["title"], "Workshop");
    assert_eq!(received[0]["id"], event["id"]);

    let res = app.request("GET", "/api/v1/jobs", Some(&cookie), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let jobs = parse_body(res).await;
    assert_eq!(jobs[0]["status"], "COMPLETED");
}

#[tokio::test]
async fn test_failed_webhook_marks_job_failed() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    app.webhook.failing.store(true, Ordering::SeqCst);

    let res = app.request("POST", "/api/v1/events", Some(&cookie), Some(workshop_payload())).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    run_pending_jobs(&app.state).await;

    let jobs = parse_body(app.request("GET", "/api/v1/jobs", Some(&cookie), None).await).await;
    assert_eq!(jobs[0]["status"], "FAILED");
    assert!(jobs[0]["error_message"].as_str().unwrap().contains("webhook down"));
}

#[tokio::test]
async fn test_no_jobs_without_webhook() {
    let app = TestApp::without_webhook().await;
    let cookie = app.login().await;

    let res = app.request("POST", "/api/v1/events", Some(&cookie), Some(workshop_payload())).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let jobs = parse_body(app.request("GET", "/api/v1/jobs", Some(&cookie), None).await).await;
    assert!(jobs.as_array().unwrap().is_empty());
}
