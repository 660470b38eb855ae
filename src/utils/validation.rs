use crate::utils::error::{ArgumentErrorKind, GsdError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid_value(field_name: &str, value: &str, reason: &str) -> GsdError {
    GsdError::InvalidArgument {
        kind: ArgumentErrorKind::InvalidValue,
        message: format!("Invalid value for {} ({:?}): {}", field_name, value, reason),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();

    if raw.is_empty() {
        return Err(invalid_value(field_name, &raw, "Path cannot be empty"));
    }

    if raw.contains('\0') {
        return Err(invalid_value(field_name, &raw, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid_value(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Trim and lowercase a domain. `None` when nothing is left.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().to_lowercase();
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}
