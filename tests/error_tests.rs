use mapdiff::{AccessError, ParseError};

#[test]
fn test_parse_error_display() {
    let err = ParseError::file_not_found("test.json");
    assert_eq!(err.to_string(), "File not found: test.json");
}

#[test]
fn test_unknown_format_error() {
    let err = ParseError::unknown_format("/path/to/file.txt");
    assert!(err.to_string().contains("Could not detect file format"));
    assert!(err.to_string().contains("/path/to/file.txt"));
}

#[test]
fn test_access_error_display() {
    let err = AccessError::missing_key("metadata");
    assert_eq!(err.to_string(), "Key metadata does not exist");
}

#[test]
fn test_errors_keep_message_through_anyhow() {
    let err = anyhow::Error::new(ParseError::file_not_found("test.json"))
        .context("Failed to load old document");
    assert_eq!(err.root_cause().to_string(), "File not found: test.json");
    assert!(err.downcast_ref::<ParseError>().is_some());
}
