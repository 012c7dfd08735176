//! Piecewise-linear membership curves.

use crate::error::FuzzyError;
use crate::value::FuzzyValue;

/// A point of a membership curve: input `x` maps to `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub value: FuzzyValue,
}

/// Membership function defined by anchors with strictly increasing `x`.
///
/// Between anchors μ and ν are interpolated linearly; outside the anchor
/// range the nearest end anchor applies. Interpolating two valid values is
/// a convex combination, so every output satisfies `mu + nu <= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipCurve {
    anchors: Vec<Anchor>,
}

impl MembershipCurve {
    /// Build from `(x, mu, nu)` triples.
    pub fn new(points: &[(f64, f64, f64)]) -> Result<Self, FuzzyError> {
        if points.is_empty() {
            return Err(FuzzyError::InvalidCurve);
        }
        let mut anchors = Vec::with_capacity(points.len());
        for &(x, mu, nu) in points {
            if !x.is_finite() {
                return Err(FuzzyError::InvalidCurve);
            }
            if let Some(prev) = anchors.last().map(|a: &Anchor| a.x) {
                if x <= prev {
                    return Err(FuzzyError::InvalidCurve);
                }
            }
            anchors.push(Anchor {
                x,
                value: FuzzyValue::new(mu, nu)?,
            });
        }
        Ok(Self { anchors })
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Evaluate the curve at `x`. NaN reads as the first anchor.
    pub fn eval(&self, x: f64) -> FuzzyValue {
        let first = self.anchors[0];
        let last = self.anchors[self.anchors.len() - 1];
        if !(x > first.x) {
            return first.value;
        }
        if x >= last.x {
            return last.value;
        }

        // first.x < x < last.x, so 1 <= idx < len.
        let idx = self.anchors.partition_point(|a| a.x <= x);
        let lo = self.anchors[idx - 1];
        let hi = self.anchors[idx];
        let t = (x - lo.x) / (hi.x - lo.x);

        let mu = lo.value.mu + (hi.value.mu - lo.value.mu) * t;
        let nu = lo.value.nu + (hi.value.nu - lo.value.nu) * t;
        FuzzyValue::rounded(mu, nu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling() -> MembershipCurve {
        MembershipCurve::new(&[(0.0, 0.9, 0.05), (10.0, 0.5, 0.4), (20.0, 0.1, 0.8)]).unwrap()
    }

    #[test]
    fn test_curve_interpolates() {
        let c = falling();
        let mid = c.eval(5.0);
        assert!((mid.mu() - 0.7).abs() < 1e-12);
        assert!((mid.nu() - 0.225).abs() < 1e-12);
        assert_eq!(c.eval(10.0), FuzzyValue::new(0.5, 0.4).unwrap());
    }

    #[test]
    fn test_curve_clamps_outside_range() {
        let c = falling();
        assert_eq!(c.eval(-100.0), c.anchors()[0].value);
        assert_eq!(c.eval(1e9), c.anchors()[2].value);
        assert_eq!(c.eval(f64::NAN), c.anchors()[0].value);
    }

    #[test]
    fn test_curve_monotone_between_monotone_anchors() {
        let c = falling();
        let mut prev = f64::INFINITY;
        for i in 0..=200 {
            let s = c.eval(i as f64 * 0.1).score();
            assert!(s <= prev + 1e-12);
            prev = s;
        }
    }

    #[test]
    fn test_curve_rejects_bad_anchors() {
        assert_eq!(MembershipCurve::new(&[]), Err(FuzzyError::InvalidCurve));
        assert_eq!(
            MembershipCurve::new(&[(1.0, 0.5, 0.4), (1.0, 0.4, 0.5)]),
            Err(FuzzyError::InvalidCurve)
        );
        assert!(matches!(
            MembershipCurve::new(&[(0.0, 0.8, 0.8)]),
            Err(FuzzyError::InvalidFuzzyValue { .. })
        ));
    }
}
