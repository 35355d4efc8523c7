/// Share of the global timeline over which character start times are spread.
pub const STAGGER_FRACTION: f64 = 0.5;

/// Share of the global timeline each character spends animating once it has started.
pub const ACTIVE_DURATION: f64 = 1.0 - STAGGER_FRACTION;

/// Map global progress to one character's local progress in `[0, 1]`.
///
/// Start delays are spaced linearly in reading order from `0` (first character) to
/// [`STAGGER_FRACTION`] (last character), so the reveal sweeps across the text. With zero or one
/// character there is nothing to stagger and the global progress passes through untouched.
pub fn local_progress(global: f64, index: usize, total: usize) -> f64 {
    if total <= 1 {
        return global;
    }
    let delay = (index as f64 / (total - 1) as f64) * STAGGER_FRACTION;
    ((global - delay) / ACTIVE_DURATION).clamp(0.0, 1.0)
}

/// Global progress at which the character at `index` starts moving.
pub fn start_delay(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 0.0;
    }
    (index as f64 / (total - 1) as f64) * STAGGER_FRACTION
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
