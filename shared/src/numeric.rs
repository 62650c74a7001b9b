//! Rounding and flooring helpers shared by the calculator stages.
//!
//! Every helper lets NaN through unchanged, so a bad input surfaces as a
//! non-finite plan field instead of being silently replaced by a floor.

/// Round to the nearest integer, halves toward positive infinity.
///
/// `2.5` rounds to `3`, `-2.5` rounds to `-2`.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Raise `value` to `floor` when it is smaller. NaN stays NaN.
#[inline]
pub fn at_least(value: f64, floor: f64) -> f64 {
    if value < floor {
        floor
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.4, 2.0)]
    #[case(2.5, 3.0)]
    #[case(-2.5, -2.0)]
    #[case(-2.6, -3.0)]
    #[case(0.0, 0.0)]
    fn test_round_half_up(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(round_half_up(input), expected);
    }

    #[test]
    fn test_at_least_keeps_nan() {
        assert!(at_least(f64::NAN, 400.0).is_nan());
        assert!(round_half_up(f64::NAN).is_nan());
    }

    #[test]
    fn test_at_least() {
        assert_eq!(at_least(120.0, 400.0), 400.0);
        assert_eq!(at_least(900.0, 400.0), 900.0);
    }
}
