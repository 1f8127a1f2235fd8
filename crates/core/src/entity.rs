//! Entity trait: persisted identity plus a stable name for logs and errors.

/// A persisted record with a store-assigned identity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Lowercase singular name, e.g. `"product"`.
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Human-readable "not found" message for this entity kind.
    fn not_found_message() -> String {
        let mut kind = Self::KIND.to_string();
        if let Some(first) = kind.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        format!("{kind} not found")
    }
}
