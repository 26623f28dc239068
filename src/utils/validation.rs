use crate::utils::error::{GuardError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GuardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Endpoint templates are URLs with a `{handle}` placeholder.
pub fn validate_endpoint_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains("{handle}") {
        return Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: "Template must contain the {handle} placeholder".to_string(),
        });
    }
    validate_url(field_name, &template.replace("{handle}", "probe"))
}

/// Shape check only: one `@`, non-empty local part, dotted domain.
pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    let invalid = |reason: &str| GuardError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: email.to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("Email address cannot contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("Email address must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("Email address is malformed"));
    }

    match domain.split_once('.') {
        Some((head, tail)) if !head.is_empty() && !tail.is_empty() && !domain.ends_with('.') => {
            Ok(())
        }
        _ => Err(invalid("Email domain must contain a dot")),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| GuardError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_markers(field_name: &str, markers: &[String]) -> Result<()> {
    if markers.is_empty() {
        return Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one suspicious marker is required".to_string(),
        });
    }

    if let Some(blank) = markers.iter().find(|m| m.trim().is_empty()) {
        return Err(GuardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: blank.clone(),
            reason: "Markers cannot be empty or whitespace-only".to_string(),
        });
    }

    Ok(())
}
