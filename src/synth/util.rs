//! Small numeric guards for signal outputs.

/// Replace non-finite values with `fallback`.
#[inline(always)]
pub fn flush_non_finite(x: f64, fallback: f64) -> f64 {
    if x.is_finite() { x } else { fallback }
}

/// Clamp that tolerates inverted bounds instead of panicking.
#[inline]
pub fn clamp_loose(x: f64, a: f64, b: f64) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    x.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_loose_accepts_inverted_bounds() {
        assert_eq!(clamp_loose(5.0, 10.0, 0.0), 5.0);
        assert_eq!(clamp_loose(-1.0, 10.0, 0.0), 0.0);
        assert_eq!(clamp_loose(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn flush_replaces_nan_and_inf() {
        assert_eq!(flush_non_finite(f64::NAN, 3.0), 3.0);
        assert_eq!(flush_non_finite(f64::NEG_INFINITY, 3.0), 3.0);
        assert_eq!(flush_non_finite(1.5, 3.0), 1.5);
    }
}
