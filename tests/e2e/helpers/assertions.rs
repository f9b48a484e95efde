use super::api_client::ApiResponse;
use hyper::StatusCode;

/// Assert a `{errorKind, message}` error body with the given status and kind
pub fn assert_error_kind(response: &ApiResponse, status: StatusCode, expected_kind: &str) {
    response.assert_status(status);

    let body = response.body.as_ref().expect("Missing error body");
    assert_eq!(
        body.get("errorKind").and_then(|v| v.as_str()),
        Some(expected_kind),
        "Error kind mismatch. Body: {}",
        body
    );
    assert!(
        body.get("message").and_then(|v| v.as_str()).is_some(),
        "Missing error message"
    );
}

/// Assert the shape of a successful synthesis response and return its object key
pub fn assert_speech_response(response: &ApiResponse, expected_extension: &str) -> String {
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().expect("Missing response body");
    let url = body.get("url").and_then(|v| v.as_str()).expect("Missing url");
    let key = body.get("key").and_then(|v| v.as_str()).expect("Missing key");

    assert!(!url.is_empty());
    assert!(
        key.starts_with("audio/") && key.ends_with(&format!(".{}", expected_extension)),
        "Unexpected object key {}",
        key
    );
    assert!(url.contains(key), "URL {} does not point at {}", url, key);
    assert!(body.get("expiresAt").and_then(|v| v.as_str()).is_some());
    assert!(body.get("contentType").and_then(|v| v.as_str()).is_some());

    key.to_string()
}
