use std::f64::consts::TAU;

#[inline]
pub fn wrap_0_tau(x: f64) -> f64 {
    x.rem_euclid(TAU)
}

/// Normalize a compass angle to the range [0, 360).
#[inline]
pub fn wrap_degrees(x: f64) -> f64 {
    let w = x.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if w >= 360.0 { 0.0 } else { w }
}

/// Fraction of the current cycle, in [0, 1).
#[inline]
pub fn cycle_fraction(x: f64) -> f64 {
    wrap_0_tau(x) / TAU
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn wrap_0_tau_in_range() {
        let values = [-10.0 * TAU, -TAU, -PI, -0.1, 0.0, PI, TAU, 3.5 * TAU, 1.0e9];
        for v in values {
            let w = wrap_0_tau(v);
            assert!((0.0..TAU).contains(&w), "wrap_0_tau out of range: {w}");
        }
    }

    #[test]
    fn wrap_degrees_in_range() {
        let values = [-720.5, -360.0, -1e-15, 0.0, 359.9, 360.0, 721.0];
        for v in values {
            let w = wrap_degrees(v);
            assert!((0.0..360.0).contains(&w), "wrap_degrees out of range: {w}");
        }
        assert_eq!(wrap_degrees(370.0), 10.0);
    }

    #[test]
    fn cycle_fraction_is_periodic() {
        let a = cycle_fraction(1.0);
        let b = cycle_fraction(1.0 + TAU);
        assert!((a - b).abs() < 1e-9);
        assert!((0.0..1.0).contains(&a));
    }
}
