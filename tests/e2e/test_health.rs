use crate::e2e::helpers;

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
async fn it_should_return_ready_status(ctx: &TestContext) {

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();

    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("bucket").and_then(|v| v.as_str()), Some("speech-audio"));
    assert_eq!(body.get("voices").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(body.get("engine").and_then(|v| v.as_str()), Some("standard"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_check_origin_for_health_checks(ctx: &TestContext) {

    let response = ctx
        .client
        .get_with_headers("/health", &[("Origin", "https://elsewhere.example.org")])
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
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
async fn it_should_echo_caller_request_id(ctx: &TestContext) {

    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", "edge-7f3a_01")])
        .await
        .unwrap();
    response.assert_header("x-request-id", "edge-7f3a_01");

    // Unusable IDs are replaced with a fresh one
    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", "not acceptable")])
        .await
        .unwrap();
    let request_id = response.header("x-request-id").unwrap();
    assert_ne!(request_id, "not acceptable");
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_health_checks(ctx: &TestContext) {

    let mut futures = Vec::new();
    for _ in 0..10 {
        let client = ctx.client.clone();
        futures.push(async move { client.get("/health").await });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::OK);
    }
}
