//! Bounding helpers shared by every scorer.
//!
//! All sub-scores pass through here before they leave a component, so the
//! `[0,1]` / `[0,100]` output contract is enforced in one place.

/// Clamps to `[0.0, 1.0]`. `NaN` maps to `0.0` so results stay serializable.
pub fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Converts a unit score to an integer percentage: `round(unit(value) * 100)`.
pub fn percent(value: f64) -> u32 {
    (unit(value) * 100.0).round() as u32
}

/// Rounds and clamps to an inclusive integer range. `NaN` maps to `lo`.
pub fn within(value: f64, lo: u32, hi: u32) -> u32 {
    if value.is_nan() {
        return lo;
    }
    (value.round().max(lo as f64).min(hi as f64)) as u32
}

/// Ratio guarded against an empty denominator: `numerator / max(1, denominator)`.
pub fn coverage(numerator: f64, denominator: usize) -> f64 {
    unit(numerator / denominator.max(1) as f64)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}
