use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::Validation("test".into()).status_code(), 400);
    assert_eq!(AppError::NotFound("test".into()).status_code(), 404);
    assert_eq!(AppError::PayloadTooLarge("test".into()).status_code(), 413);
    assert_eq!(
        AppError::external_service("test", "detail").status_code(),
        500
    );
    assert_eq!(AppError::internal("test", "detail").status_code(), 500);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(AppError::NotFound("test".into()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::PayloadTooLarge("test".into()).error_code(),
        "PAYLOAD_TOO_LARGE"
    );
    assert_eq!(
        AppError::external_service("test", "detail").error_code(),
        "EXTERNAL_SERVICE_ERROR"
    );
    assert_eq!(
        AppError::internal("test", "detail").error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::validation("msg")),
        "Validation error: msg"
    );
    assert_eq!(
        format!("{}", AppError::NotFound("msg".into())),
        "Not found: msg"
    );
    assert_eq!(
        format!("{}", AppError::external_service("Upload failed", "timeout")),
        "External service error: Upload failed: timeout"
    );
    assert_eq!(
        format!("{}", AppError::internal("boom", "panic")),
        "Internal error: boom: panic"
    );
}

#[test]
fn test_app_error_message_and_details() {
    let err = AppError::validation("No file uploaded");
    assert_eq!(err.message(), "No file uploaded");
    assert_eq!(err.details(), None);

    let err = AppError::external_service("Delete failed", "connection reset");
    assert_eq!(err.message(), "Delete failed");
    assert_eq!(err.details(), Some("connection reset"));
}
