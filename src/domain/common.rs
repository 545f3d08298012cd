use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Slices `value` by character positions the way the ledger file's date keys are cut.
///
/// Out-of-range bounds are clamped, so short or malformed dates yield a shorter
/// (possibly empty) string instead of failing.
pub fn char_slice(value: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    value.chars().skip(start).take(end - start).collect()
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;

#[cfg(test)]
mod tests {
    use super::char_slice;

    #[test]
    fn char_slice_clamps_short_values() {
        assert_eq!(char_slice("2024-01-15", 0, 4), "2024");
        assert_eq!(char_slice("2024-01-15", 5, 7), "01");
        assert_eq!(char_slice("2024", 5, 7), "");
        assert_eq!(char_slice("2024-1", 5, 7), "1");
    }
}
