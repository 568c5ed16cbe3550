//! Input validation for dashboard entities

use thiserror::Error;
use url::Url;

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trim a required text field, rejecting blank values
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Validate an absolute http(s) URL with a host
pub fn validate_http_url(field: &str, value: &str) -> ValidationResult<String> {
    let trimmed = validate_required(field, value)?;
    let parsed = Url::parse(&trimmed)
        .map_err(|e| ValidationError::new(field, format!("Invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::new(
                field,
                format!("Unsupported URL scheme '{}', expected http or https", other),
            ))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::new(field, "URL must include a host"));
    }

    Ok(trimmed)
}

/// Validate a CSS hex color in `#RGB` or `#RRGGBB` form
pub fn validate_hex_color(field: &str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or("");
    let valid_len = digits.len() == 3 || digits.len() == 6;

    if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::new(
            field,
            "Color must be a hex value such as #3B82F6",
        ));
    }

    Ok(trimmed.to_string())
}

/// Blank optional text is stored as NULL
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply a patch value to an optional field.
///
/// `None` keeps the current value, a blank string clears it.
pub fn patch_optional(current: Option<String>, patch: Option<String>) -> Option<String> {
    match patch {
        None => current,
        Some(value) => normalize_optional(Some(value)),
    }
}

/// Apply a patch value to a required field, rejecting blank replacements
pub fn patch_required(field: &str, current: String, patch: Option<String>) -> ValidationResult<String> {
    match patch {
        None => Ok(current),
        Some(value) => validate_required(field, &value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_trims() {
        assert_eq!(validate_required("name", "  Plex  ").unwrap(), "Plex");
    }

    #[test]
    fn test_validate_required_rejects_blank() {
        let err = validate_required("name", "   ").unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_validate_http_url_valid() {
        assert!(validate_http_url("url", "http://192.168.1.10:32400").is_ok());
        assert!(validate_http_url("url", "https://grafana.example.com/d/abc").is_ok());
    }

    #[test]
    fn test_validate_http_url_rejects_other_schemes() {
        assert!(validate_http_url("url", "ftp://files.example.com").is_err());
        assert!(validate_http_url("url", "javascript:alert(1)").is_err());
    }

    #[test]
    fn test_validate_http_url_rejects_relative() {
        assert!(validate_http_url("url", "/admin").is_err());
        assert!(validate_http_url("url", "").is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("color", "#3B82F6").is_ok());
        assert!(validate_hex_color("color", "#fff").is_ok());
        assert!(validate_hex_color("color", "3B82F6").is_err());
        assert!(validate_hex_color("color", "#3B82F").is_err());
        assert!(validate_hex_color("color", "#GGGGGG").is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("".into())), None);
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" 8080 ".into())), Some("8080".into()));
    }

    #[test]
    fn test_patch_optional() {
        let current = Some("Hetzner".to_string());
        assert_eq!(patch_optional(current.clone(), None), current);
        assert_eq!(patch_optional(current.clone(), Some(String::new())), None);
        assert_eq!(
            patch_optional(current, Some("OVH".into())),
            Some("OVH".into())
        );
    }

    #[test]
    fn test_patch_required() {
        assert_eq!(patch_required("name", "a".into(), None).unwrap(), "a");
        assert_eq!(patch_required("name", "a".into(), Some("b".into())).unwrap(), "b");
        assert!(patch_required("name", "a".into(), Some(" ".into())).is_err());
    }
}
