//! License plate normalization

/// Canonical form of a plate for equality comparison: trimmed, all
/// whitespace removed, lowercased. Two plates are the same iff their
/// normalized forms are equal; there is no fuzzy matching.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
