//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use regex::Regex;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a PDF attachment and return its download filename
pub fn assert_pdf_attachment(response: &TestResponse) -> String {
    assert_ok(response);
    assert!(
        response.is_pdf(),
        "Expected PDF, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("application/pdf"),
        "Expected Content-Type: application/pdf"
    );

    let disposition = response
        .header("content-disposition")
        .expect("Missing Content-Disposition");
    let re = Regex::new(r#"^attachment; filename="(project_review_\d{8}_\d{6}\.pdf)"$"#).unwrap();
    let captures = re
        .captures(disposition)
        .unwrap_or_else(|| panic!("Unexpected Content-Disposition: {disposition}"));

    captures[1].to_string()
}

/// Assert response is a JSON error with the expected status
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    assert_eq!(response.header("content-type"), Some("application/json"));

    let json: serde_json::Value = response.json();
    let object = json.as_object().expect("Expected JSON object");
    assert_eq!(object.len(), 1, "Expected only an error key: {json}");

    json["error"]
        .as_str()
        .expect("Expected error to be a string")
        .to_string()
}
