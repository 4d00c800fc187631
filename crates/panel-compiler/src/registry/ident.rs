//! Backend identifier sanitation.

/// Hard identifier ceiling of the downstream firmware compiler.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Strips characters outside `[A-Za-z0-9_]` from `raw`, then truncates the
/// stripped prefix so that prefix plus `suffix` fit in 63 characters.
///
/// The suffix is appended verbatim and is never truncated.
#[must_use]
pub fn sanitize_identifier(raw: &str, suffix: &str) -> String {
    let budget = MAX_IDENTIFIER_LEN.saturating_sub(suffix.len());
    let mut out: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .take(budget)
        .collect();
    out.push_str(suffix);
    out
}

/// Identifier derived from an entity id: `sensor.living-room` becomes
/// `sensor_living_room`, then bounded like [`sanitize_identifier`].
#[must_use]
pub fn entity_identifier(entity_id: &str, suffix: &str) -> String {
    let replaced: String = entity_id
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    sanitize_identifier(&replaced, suffix)
}

/// Lowercased `[a-z0-9_]` slug used inside generated ids.
#[must_use]
pub fn slug(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
