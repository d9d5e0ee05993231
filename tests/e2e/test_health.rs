use crate::e2e::helpers;

use helpers::fake_model::FakeSpeechModel;
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_ready_when_model_answers(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("model").and_then(|v| v.as_str()), Some("fake"));
    assert_eq!(body.get("sample_rate").and_then(|v| v.as_u64()), Some(24_000));
}

#[tokio::test]
async fn it_should_report_not_ready_when_model_is_down() {
    let ctx = TestContext::with_model(FakeSpeechModel::not_ready())
        .await
        .unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.body().get("status").and_then(|v| v.as_str()),
        Some("not_ready")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_routes(ctx: &TestContext) {
    let response = ctx.client.get("/does-not-exist").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
