//! Scalar helpers shared by the force formulas and the scales.

/// Sign with `sign(0) == 0`, unlike `f64::signum` which maps `+0.0` to `1.0`.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `log2(max(|x|, 1))`: zero inside the unit interval, never negative.
#[inline]
pub fn clamped_log2(x: f64) -> f64 {
    x.abs().max(1.0).log2()
}

/// `sqrt(|x|)`.
#[inline]
pub fn sqrt_abs(x: f64) -> f64 {
    x.abs().sqrt()
}

/// Linear interpolation of `x` on the segment `(x0, y0) → (x1, y1)`.
///
/// A zero-length segment returns `y0`.
#[inline]
pub fn lerp(x0: f64, x1: f64, y0: f64, y1: f64, x: f64) -> f64 {
    let dx = x1 - x0;
    if dx == 0.0 {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / dx
}

/// Index `i` with `xs[i - 1] <= x < xs[i]`, clamped to `1..=len-1` so the
/// caller always gets a segment (extrapolating past the ends). `xs.len() >= 2`.
#[inline]
pub(crate) fn bracket(xs: &[f64], x: f64) -> usize {
    debug_assert!(xs.len() >= 2);
    let i = xs.partition_point(|&v| v <= x);
    i.clamp(1, xs.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_is_zero_at_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-1e-300), -1.0);
    }

    #[test]
    fn clamped_log_floors_at_zero() {
        assert_eq!(clamped_log2(0.25), 0.0);
        assert_eq!(clamped_log2(-8.0), 3.0);
        assert!((clamped_log2(1024.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn bracket_extrapolates_to_edge_segments() {
        let xs = [0.0, 10.0, 20.0];
        assert_eq!(bracket(&xs, -5.0), 1);
        assert_eq!(bracket(&xs, 0.0), 1);
        assert_eq!(bracket(&xs, 10.0), 2);
        assert_eq!(bracket(&xs, 15.0), 2);
        assert_eq!(bracket(&xs, 99.0), 2);
        assert_eq!(lerp(0.0, 10.0, 100.0, 200.0, 2.5), 125.0);
        assert_eq!(lerp(3.0, 3.0, 7.0, 9.0, 3.0), 7.0);
    }
}
