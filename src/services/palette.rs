//! Stable subject color assignment.
//!
//! Subjects keep the same color across variants, re-renders and sessions
//! because the assignment is a pure function of the subject key alone: a
//! 32-bit polynomial rolling hash over the key's UTF-16 code units, reduced
//! modulo the palette size. Collisions between distinct subjects are
//! acceptable — this is a display aid, not an identity system.

/// Fixed display palette. Size and order are part of the assignment
/// contract: reordering would recolor every subject.
pub const PALETTE: [&str; 12] = [
    "#1f77b4", // Blue
    "#ff7f0e", // Orange
    "#2ca02c", // Green
    "#d62728", // Red
    "#9467bd", // Purple
    "#8c564b", // Brown
    "#e377c2", // Pink
    "#7f7f7f", // Gray
    "#bcbd22", // Olive
    "#17becf", // Cyan
    "#aec7e8", // Light blue
    "#ffbb78", // Light orange
];

/// Deterministic palette slot for a subject key.
///
/// `h = h * 31 + code_unit` with wrapping 32-bit arithmetic, then
/// `|h| mod PALETTE.len()`. No seed, no ordering dependence.
pub fn palette_index(subject_key: &str) -> usize {
    let mut h: i32 = 0;
    for unit in subject_key.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    h.unsigned_abs() as usize % PALETTE.len()
}

/// Display color for a subject key.
pub fn palette_color(subject_key: &str) -> &'static str {
    PALETTE[palette_index(subject_key)]
}
