//! Seeded pseudo-randomness.
//!
//! Every "random" choice in the engine is a pure function of a floating
//! point seed. The mapping is a trigonometric hash, `fract(sin(seed) * 10000)`,
//! which spreads neighbouring seeds to decorrelated outputs while staying
//! exactly replayable. Saved designs store only their seed, so this mapping
//! (and the per-draw multipliers used by callers) must not change.
//!
//! Callers derive independent draws from one base seed by scaling it with
//! distinct multipliers (`seed * 0.9`, `seed * 1.3`, ...).

/// Multiplier applied to `sin(seed)` before taking the fractional part.
const SPREAD: f64 = 10_000.0;

/// Maps a seed to a reproducible value in `[0, 1)`.
pub fn seeded_unit(seed: f64) -> f64 {
    if !seed.is_finite() {
        return 0.0;
    }
    let x = seed.sin() * SPREAD;
    let frac = x - x.floor();
    // Guard the open upper bound against rounding.
    if frac >= 1.0 { 0.0 } else { frac }
}

/// Maps a seed to a reproducible value in `[min, max)`.
///
/// When `min > max` the bounds are used as given, so the result lies in
/// `(max, min]`.
pub fn random_in_range(min: f64, max: f64, seed: f64) -> f64 {
    (max - min).mul_add(seeded_unit(seed), min)
}

/// Returns a value in `[-span, span)`.
pub fn jitter(span: f64, seed: f64) -> f64 {
    random_in_range(-span, span, seed)
}

/// Picks one element of a non-empty slice.
///
/// Returns `None` for an empty slice.
pub fn pick<T>(options: &[T], seed: f64) -> Option<&T> {
    if options.is_empty() {
        return None;
    }
    let idx = (seeded_unit(seed) * options.len() as f64) as usize;
    options.get(idx.min(options.len() - 1))
}

/// Returns true with the given probability.
pub fn roll(probability: f64, seed: f64) -> bool {
    seeded_unit(seed) < probability
}
