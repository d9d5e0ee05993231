use crate::e2e::helpers;

use chatterbox_serverless::domain::synthesis::{JobResponse, JobStatus};
use helpers::assertions::{assert_error_body, assert_synthesis_output};
use helpers::fake_model::FakeSpeechModel;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_complete_a_job(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/runsync",
            &json!({
                "id": "job-abc",
                "input": {
                    "text": "Hola como esta?",
                    "language_id": "es"
                }
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body();
    assert_eq!(body["id"], "job-abc");
    assert_eq!(body["status"], "COMPLETED");
    assert!(body.get("error").is_none());
    assert_synthesis_output(&body["output"], 24_000);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_request_id_when_job_has_no_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_headers(
            "/runsync",
            &json!({"input": {"text": "Hello world", "language_id": "en"}}),
            &[("x-request-id", "platform-42")],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let job: JobResponse = response.json().unwrap();
    assert_eq!(job.id, "platform-42");
    assert_eq!(job.status, JobStatus::Completed);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_job_without_input(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/runsync", &json!({"id": "job-empty"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.body();
    assert_eq!(body["id"], "job-empty");
    assert_eq!(body["status"], "FAILED");
    assert!(body.get("output").is_none());
    assert_error_body(&body["error"], "invalid_input");
    assert_eq!(ctx.model.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_job_with_unsupported_language(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/runsync",
            &json!({"id": "job-xx", "input": {"text": "Bonjour", "language_id": "xx"}}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.body()["status"], "FAILED");
    assert_error_body(&response.body()["error"], "invalid_input");
    assert_eq!(ctx.model.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_job_with_malformed_envelope(ctx: &TestContext) {
    let response = ctx.client.post_raw("/runsync", "not json").await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.body();
    assert_eq!(body["status"], "FAILED");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_error_body(&body["error"], "invalid_input");
}

#[tokio::test]
async fn it_should_fail_job_when_model_fails() {
    let ctx = TestContext::with_model(FakeSpeechModel::failing("model exception"))
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            "/runsync",
            &json!({"id": "job-oom", "input": {"text": "Hello world", "language_id": "en"}}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.body();
    assert_eq!(body["status"], "FAILED");
    assert!(body.get("output").is_none());
    assert_error_body(&body["error"], "inference_error");
    assert_eq!(ctx.model.calls(), 1);
}
