//! Request input validation helpers.
//!
//! Request DTOs derive [`validator::Validate`]; handlers run them through
//! [`validate_input`] before any mutation so a failure names every
//! offending field in a single [`CoreError::Validation`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Validate a DTO, converting failures to [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe_errors(&errors)))
}

/// Render validation errors as `field: message; field: message`, sorted by
/// field name so the output is stable.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let detail = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{field}: {detail}")
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Validate that every tag is non-blank and at most `max_len` characters.
pub fn validate_tags(tags: &[String], max_len: usize) -> Result<(), CoreError> {
    for tag in tags {
        let len = tag.chars().count();
        if tag.trim().is_empty() || len > max_len {
            return Err(CoreError::Validation(format!(
                "tags: each tag must be 1 to {max_len} characters, got '{tag}'"
            )));
        }
    }
    Ok(())
}
