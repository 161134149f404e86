/// Parse one extension argument; a missing leading `.` is added.
///
/// # Errors
/// Returns an error for an empty or whitespace-only value.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Err("extension must not be empty".to_string());
    }
    if trimmed.starts_with('.') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!(".{trimmed}"))
    }
}
