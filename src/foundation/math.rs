/// Wrap `v` into `[0, 1)`, treating the unit interval as a circle.
pub(crate) fn wrap01(v: f64) -> f64 {
    let r = v.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if r >= 1.0 { 0.0 } else { r }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Uniform sample between `lo` and `hi`, in `[lo, hi)`. A reversed range
/// (`hi < lo`) samples `(hi, lo]`, and `lo == hi` always returns `lo`.
pub(crate) fn uniform(rng: &mut dyn rand::RngCore, lo: f64, hi: f64) -> f64 {
    use rand::Rng as _;
    lo + rng.random::<f64>() * (hi - lo)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
