//! Level derivation. A level spans a flat 100 XP.

/// XP per level.
pub const XP_PER_LEVEL: u32 = 100;

/// Level reached with `xp` total XP (level 1 at 0 XP).
pub fn level_from_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Total XP at which the next level starts.
pub fn xp_for_next_level(xp: u32) -> u32 {
    level_from_xp(xp).saturating_mul(XP_PER_LEVEL)
}

/// Percent (0..100) of the way through the current level.
pub fn xp_progress_in_level(xp: u32) -> f64 {
    let level_start = (level_from_xp(xp) - 1) * XP_PER_LEVEL;
    let have = xp - level_start;
    (have as f64 / XP_PER_LEVEL as f64) * 100.0
}
