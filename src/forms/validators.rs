//! Field validators
//!
//! Pure checks for single fields. None of them return `Result`: invalid
//! input is an expected value, not an error.

use super::field::UploadedFile;
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum number of characters in a password
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Largest accepted upload (5 MiB)
pub const FILE_SIZE_LIMIT: u64 = 5 * 1024 * 1024;

/// Media types accepted for uploads
pub const ALLOWED_FILE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/pdf",
    "image/webp",
];

/// File extensions accepted for uploads
pub const ALLOWED_FILE_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "pdf", "webp"];

/// A failed check, optionally tied to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    /// Error that is not tied to a particular field
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Error for a named field
    pub fn for_field(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Attach a field name, keeping the message
    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

// U+FEFF counts as whitespace in submitted form text but is not in `\s`
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap()
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\x{FEFF}\-()]{10,}$").unwrap());

/// Check for the `local@domain.tld` shape: one `@`, no whitespace, and a dot
/// with text on both sides somewhere after the `@`.
pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Check for a loose phone number: an optional leading `+` followed by at
/// least ten digits, whitespace, hyphens or parentheses.
pub fn validate_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Check password strength.
///
/// Rules are applied in a fixed order and only the first failure is
/// reported: length, uppercase letter, digit, special character.
pub fn validate_password(value: &str) -> Option<ValidationError> {
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        return Some(ValidationError::new(format!(
            "Password must be at least {PASSWORD_MIN_LENGTH} characters long"
        )));
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some(ValidationError::new(
            "Password must contain at least one uppercase letter",
        ));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Some(ValidationError::new(
            "Password must contain at least one number",
        ));
    }
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(ValidationError::new(
            "Password must contain at least one special character",
        ));
    }
    None
}

/// Check an upload against the size ceiling and the type allow-list.
///
/// Size is checked first. The type check passes if either the declared
/// media type or the extension is allowed.
pub fn validate_file(file: &UploadedFile) -> Option<ValidationError> {
    if file.byte_size > FILE_SIZE_LIMIT {
        return Some(ValidationError::new("File size must be less than 5MB"));
    }

    let type_ok = ALLOWED_FILE_TYPES.contains(&file.mime_type.as_str());
    let ext = file.extension.to_ascii_lowercase();
    let ext_ok = ALLOWED_FILE_EXTENSIONS.contains(&ext.as_str());
    if !type_ok && !ext_ok {
        return Some(ValidationError::new(
            "Only JPG, PNG, WEBP, and PDF files are allowed",
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(byte_size: u64, mime_type: &str, extension: &str) -> UploadedFile {
        UploadedFile {
            name: format!("upload.{extension}"),
            byte_size,
            mime_type: mime_type.to_string(),
            extension: extension.to_string(),
        }
    }

    mod email {
        use super::*;

        #[test]
        fn test_accepts_plain_address() {
            assert!(validate_email("user@example.com"));
            assert!(validate_email("first.last@mail.college.edu"));
        }

        #[test]
        fn test_rejects_double_at() {
            assert!(!validate_email("user@@example"));
            assert!(!validate_email("a@b@example.com"));
        }

        #[test]
        fn test_rejects_missing_at() {
            assert!(!validate_email("plainstring"));
        }

        #[test]
        fn test_rejects_missing_dot_after_at() {
            assert!(!validate_email("user@localhost"));
            assert!(!validate_email("user.name@localhost"));
        }

        #[test]
        fn test_rejects_whitespace() {
            assert!(!validate_email("us er@example.com"));
            assert!(!validate_email(" user@example.com"));
        }

        #[test]
        fn test_rejects_empty_parts() {
            assert!(!validate_email("@example.com"));
            assert!(!validate_email("user@.com"));
            assert!(!validate_email("user@example."));
            assert!(!validate_email(""));
        }

        #[test]
        fn test_rejects_tab_and_unicode_whitespace() {
            assert!(!validate_email("user\t@example.com"));
            assert!(!validate_email("user\u{a0}@example.com"));
            assert!(!validate_email("user\u{feff}@example.com"));
            assert!(!validate_email("user@example.com\n"));
        }

        #[test]
        fn test_accepts_leading_dot_when_another_dot_splits_domain() {
            assert!(validate_email("user@.example.com"));
        }
    }

    mod phone {
        use super::*;

        #[test]
        fn test_accepts_ten_digits() {
            assert!(validate_phone("9876543210"));
        }

        #[test]
        fn test_accepts_formatting_characters() {
            assert!(validate_phone("+91 (987) 654-3210"));
            assert!(validate_phone("(022) 1234-5678"));
        }

        #[test]
        fn test_rejects_short_numbers() {
            assert!(!validate_phone("12345"));
            assert!(!validate_phone("+123456789"));
        }

        #[test]
        fn test_rejects_letters() {
            assert!(!validate_phone("98765abc43210"));
        }

        #[test]
        fn test_accepts_tab_and_unicode_whitespace_separators() {
            assert!(validate_phone("98765\t43210"));
            assert!(validate_phone("98765\u{a0}43210"));
            assert!(validate_phone("98765\u{feff}43210"));
        }

        #[test]
        fn test_rejects_non_ascii_digits() {
            // Devanagari ९८७६५४३२१०
            assert!(!validate_phone("\u{096f}\u{096e}\u{096d}\u{096c}\u{096b}\u{096a}\u{0969}\u{0968}\u{0967}\u{0966}"));
        }

        #[test]
        fn test_rejects_plus_in_middle() {
            assert!(!validate_phone("98765+43210"));
        }
    }

    mod password {
        use super::*;

        fn message(value: &str) -> Option<String> {
            validate_password(value).map(|e| e.message)
        }

        #[test]
        fn test_short_password_reports_length_first() {
            for short in ["", "a", "abc", "Ab1!", "A1!a1!a"] {
                assert_eq!(
                    message(short).as_deref(),
                    Some("Password must be at least 8 characters long"),
                    "input {short:?}"
                );
            }
        }

        #[test]
        fn test_missing_uppercase_reported_before_digit_and_special() {
            assert_eq!(
                message("abcdefgh").as_deref(),
                Some("Password must contain at least one uppercase letter")
            );
        }

        #[test]
        fn test_missing_digit_reported_before_special() {
            assert_eq!(
                message("Abcdefgh").as_deref(),
                Some("Password must contain at least one number")
            );
        }

        #[test]
        fn test_missing_special_character() {
            assert_eq!(
                message("Abcdefg1").as_deref(),
                Some("Password must contain at least one special character")
            );
        }

        #[test]
        fn test_strong_password_passes() {
            assert!(validate_password("Abcdef1!").is_none());
            assert!(validate_password("Finance#2025").is_none());
        }

        #[test]
        fn test_non_ascii_counts_as_special() {
            assert!(validate_password("Abcdefg1é").is_none());
        }

        #[test]
        fn test_password_errors_have_no_field() {
            assert!(validate_password("x").unwrap().field.is_none());
        }
    }

    mod upload {
        use super::*;

        #[test]
        fn test_oversized_allowed_type_rejected_for_size() {
            let err = validate_file(&file(6 * 1024 * 1024, "image/png", "png")).unwrap();
            assert_eq!(err.message, "File size must be less than 5MB");
        }

        #[test]
        fn test_oversized_disallowed_type_still_reports_size() {
            let err = validate_file(&file(6 * 1024 * 1024, "application/x-msdownload", "exe"))
                .unwrap();
            assert_eq!(err.message, "File size must be less than 5MB");
        }

        #[test]
        fn test_small_executable_rejected_for_type() {
            let err = validate_file(&file(1024, "application/x-msdownload", "exe")).unwrap();
            assert_eq!(err.message, "Only JPG, PNG, WEBP, and PDF files are allowed");
        }

        #[test]
        fn test_exactly_at_limit_is_accepted() {
            assert!(validate_file(&file(FILE_SIZE_LIMIT, "application/pdf", "pdf")).is_none());
        }

        #[test]
        fn test_allowed_extension_rescues_unknown_type() {
            assert!(validate_file(&file(1024, "application/octet-stream", "JPG")).is_none());
        }

        #[test]
        fn test_allowed_type_rescues_unknown_extension() {
            assert!(validate_file(&file(1024, "image/webp", "bin")).is_none());
        }
    }
}
