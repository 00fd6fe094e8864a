//! Idle action progress: a bar that fills over a fixed duration and counts
//! how many times it filled while the player was away.

/// Slowest rate honoured, so a zero or negative modifier cannot stall the bar.
const MIN_RATE_MODIFIER: f64 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdleProgress {
    /// Fill of the current bar in `[0, 1]`.
    pub progress: f64,
    /// Bars completed during the advance.
    pub completions: u64,
}

/// Advances `progress` by `elapsed_secs` for an action taking `duration_secs`
/// at `rate_modifier` speed.
pub fn advance_idle(
    progress: f64,
    elapsed_secs: f64,
    duration_secs: f64,
    rate_modifier: f64,
) -> IdleProgress {
    let effective = duration_secs / rate_modifier.max(MIN_RATE_MODIFIER);
    if !effective.is_finite() || effective <= 0.0 {
        return IdleProgress {
            progress: progress.clamp(0.0, 1.0),
            completions: 0,
        };
    }

    let mut remaining = progress * effective + elapsed_secs.max(0.0);
    let mut completions = (remaining / effective).floor();
    remaining -= completions * effective;
    // Division can land one bar short of an exact multiple.
    if remaining >= effective {
        completions += 1.0;
        remaining -= effective;
    }

    IdleProgress {
        progress: (remaining / effective).clamp(0.0, 1.0),
        completions: completions.max(0.0) as u64,
    }
}

/// Timestamp form of [`advance_idle`], in milliseconds. A clock that went
/// backwards counts as no time passed.
pub fn advance_idle_between(
    progress: f64,
    last_ms: i64,
    now_ms: i64,
    duration_secs: f64,
    rate_modifier: f64,
) -> IdleProgress {
    let elapsed_secs = now_ms.saturating_sub(last_ms) as f64 / 1000.0;
    advance_idle(progress, elapsed_secs, duration_secs, rate_modifier)
}
