//! Allowlist helpers shared by the resource bindings.

/// Canonical form of a scheduler state: trimmed and upper-cased.
#[must_use]
pub fn normalize_state(state: &str) -> String {
    state.trim().to_ascii_uppercase()
}

/// Whether `state` is in `allowed`, ignoring case. An empty allowlist admits
/// everything.
pub fn state_allowed(allowed: &[String], state: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|s| s.trim().eq_ignore_ascii_case(state.trim()))
}

/// Whether `name` is in `allowed`. An empty allowlist admits everything.
pub fn name_allowed(allowed: &[String], name: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|n| n == name)
}

/// Whether `value` equals `wanted`, when a value is wanted at all.
pub fn matches_optional(wanted: Option<&str>, value: &str) -> bool {
    wanted.is_none_or(|w| w == value)
}

/// Whether every required tag is present in `tags`.
pub fn has_all(required: &[String], tags: &[String]) -> bool {
    required.iter().all(|r| tags.contains(r))
}
