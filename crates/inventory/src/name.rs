//! Name normalization: the identity key for "is this the same item".

/// Normalize a display name into its comparison key (trim + lowercase).
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trim a user-supplied name, returning `None` if nothing is left.
pub(crate) fn trimmed(name: &str) -> Option<&str> {
    let t = name.trim();
    if t.is_empty() { None } else { Some(t) }
}
