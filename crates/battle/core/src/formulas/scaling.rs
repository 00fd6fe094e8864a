//! Encounter level scaling. Only enemies scale; heroes never do.

/// `2^(level − 1)`; levels below 1 count as level 1.
pub fn level_multiplier(level: u32) -> f64 {
    if level <= 1 {
        return 1.0;
    }
    2f64.powi(level.saturating_sub(1).min(1023) as i32)
}

/// Scales a base enemy stat and rounds to the nearest integer.
pub fn scale_enemy_stat(base: f64, level: u32) -> f64 {
    (base * level_multiplier(level)).round()
}
