use validator::ValidationError;

/// Text fields are stored trimmed, so whitespace-only input counts as empty.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
