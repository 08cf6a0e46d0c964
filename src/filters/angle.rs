/// Returns `true` when `x` cannot be used as a measurement.
///
/// NaN and both infinities count as missing. Every update path checks this
/// before touching filter state.
#[inline]
pub fn is_missing(x: f64) -> bool {
    !x.is_finite()
}

/// Reduces an angle in degrees to the canonical interval `(-180, 180]`.
///
/// Values already inside the interval are returned untouched, so the
/// function is idempotent bit for bit. Missing values (see [`is_missing`])
/// pass through unchanged.
pub fn normalize_degrees(angle: f64) -> f64 {
    if is_missing(angle) {
        return angle;
    }
    if angle > -180.0 && angle <= 180.0 {
        return angle;
    }

    let wrapped = 180.0 - (180.0 - angle).rem_euclid(360.0);
    // rem_euclid can round a tiny negative remainder up to exactly 360
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Signed shortest arc from `from` to `to`, in degrees.
#[inline]
pub fn shortest_arc(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_cases() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(540.0), 180.0);
        assert_eq!(normalize_degrees(-540.0), 180.0);
        assert_eq!(normalize_degrees(270.0), -90.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
    }

    #[test]
    fn in_range_values_are_untouched() {
        for x in [1e-20, -1e-20, 179.999_999_999, -179.999_999_999, 42.125, -0.5] {
            assert_eq!(normalize_degrees(x).to_bits(), x.to_bits(), "x={x}");
        }
    }

    #[test]
    fn output_in_range_and_idempotent() {
        let mut x = -10_000.0;
        while x <= 10_000.0 {
            let n = normalize_degrees(x);
            assert!(n > -180.0 && n <= 180.0, "x={x} n={n}");
            assert_eq!(normalize_degrees(n), n, "x={x}");
            x += 7.3;
        }

        for x in [-1e-13 - 180.0, 180.0 + 1e-13, 1e12, -1e12, 359.999_999_999_9] {
            let n = normalize_degrees(x);
            assert!(n > -180.0 && n <= 180.0, "x={x} n={n}");
            assert_eq!(normalize_degrees(n), n);
        }
    }

    #[test]
    fn missing_values_pass_through() {
        assert!(normalize_degrees(f64::NAN).is_nan());
        assert_eq!(normalize_degrees(f64::INFINITY), f64::INFINITY);
        assert_eq!(normalize_degrees(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn missing_predicate() {
        assert!(is_missing(f64::NAN));
        assert!(is_missing(f64::INFINITY));
        assert!(is_missing(f64::NEG_INFINITY));
        assert!(!is_missing(0.0));
        assert!(!is_missing(-1e300));
        assert!(!is_missing(f64::MIN_POSITIVE));
    }

    #[test]
    fn shortest_arc_crosses_the_seam() {
        assert_eq!(shortest_arc(179.0, -179.0), 2.0);
        assert_eq!(shortest_arc(-179.0, 179.0), -2.0);
        assert_eq!(shortest_arc(10.0, 20.0), 10.0);
    }
}
