//! Stable identity derivation for hierarchy items.
//!
//! An item's identity is a pure function of its `(module_id, node_id)` marker
//! pair: never of its position, content, or children. The same pair always
//! produces the same identity string, across rebuilds and across process
//! restarts, which is what lets a selection survive a wholesale snapshot
//! replacement.

/// Derive the identity string for a `(module_id, node_id)` pair.
///
/// A 31-multiplier rolling hash over the two fields, folded over a unit
/// separator so that `("ab", "c")` and `("a", "bc")` hash differently,
/// normalized to a non-negative decimal string. There is no error path:
/// every pair of strings maps to some identity.
pub fn node_identity(module_id: &str, node_id: &str) -> String {
    let mut hash: u32 = 0;
    for byte in module_id.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
    }
    // Unit separator between the fields
    hash = hash.wrapping_mul(31).wrapping_add(0x1f);
    for byte in node_id.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
    }
    hash.to_string()
}
