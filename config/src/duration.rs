use std::time::Duration;

/// Parses an offset such as `90s`, `20m` or `1h30m`.
///
/// Surrounding whitespace is ignored. An empty string is not a valid offset;
/// callers treat empty values as "not set" before getting here.
pub fn parse_offset(value: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(value.trim())
}

/// Treats empty strings in the YAML the same as missing keys.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
