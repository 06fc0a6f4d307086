use crate::{CfError, CfResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> CfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CfError::NonFinite { what, value: v })
    }
}

/// Quotient with the divisor checked before dividing.
pub fn safe_div(num: Real, den: Real, what: &'static str) -> CfResult<Real> {
    if den == 0.0 || !den.is_finite() {
        return Err(CfError::DivisionByZero { what });
    }
    ensure_finite(num / den, what)
}

/// Natural logarithm, defined only for positive arguments.
pub fn safe_ln(x: Real, what: &'static str) -> CfResult<Real> {
    if x.is_nan() || x <= 0.0 || x.is_infinite() {
        return Err(CfError::LogDomain { what, value: x });
    }
    Ok(x.ln())
}

/// Square root that absorbs tiny negative rounding residue.
///
/// `scale` is the magnitude of the terms whose difference produced `x`;
/// a negative `x` within `Tolerances::default().rel * scale` is clamped to zero.
pub fn safe_sqrt(x: Real, scale: Real, what: &'static str) -> CfResult<Real> {
    if x.is_nan() {
        return Err(CfError::SqrtDomain { what, value: x });
    }
    if x >= 0.0 {
        return ensure_finite(x.sqrt(), what);
    }
    let slack = Tolerances::default().rel * scale.abs().max(1.0);
    if -x <= slack {
        Ok(0.0)
    } else {
        Err(CfError::SqrtDomain { what, value: x })
    }
}

/// `base^exp` for a non-negative base, as used by fractional-power roots.
pub fn safe_root(base: Real, exp: Real, what: &'static str) -> CfResult<Real> {
    if base < 0.0 || base.is_nan() {
        return Err(CfError::SqrtDomain { what, value: base });
    }
    ensure_finite(base.powf(exp), what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn safe_div_rejects_zero_divisor() {
        assert_eq!(safe_div(6.0, 3.0, "x").unwrap(), 2.0);
        let err = safe_div(1.0, 0.0, "gravity × height").unwrap_err();
        assert_eq!(
            err,
            CfError::DivisionByZero {
                what: "gravity × height"
            }
        );
        assert!(safe_div(1.0, -0.0, "x").is_err());
    }

    #[test]
    fn safe_div_rejects_overflowing_quotient() {
        assert!(matches!(
            safe_div(1e308, 1e-308, "x"),
            Err(CfError::NonFinite { .. })
        ));
    }

    #[test]
    fn safe_ln_domain() {
        assert!(nearly_equal(
            safe_ln(std::f64::consts::E, "x").unwrap(),
            1.0,
            Tolerances::default()
        ));
        assert!(matches!(safe_ln(0.0, "ratio"), Err(CfError::LogDomain { .. })));
        assert!(matches!(safe_ln(-2.0, "ratio"), Err(CfError::LogDomain { .. })));
        assert!(safe_ln(Real::NAN, "ratio").is_err());
    }

    #[test]
    fn safe_sqrt_clamps_rounding_residue() {
        assert_eq!(safe_sqrt(9.0, 9.0, "x").unwrap(), 3.0);
        assert_eq!(safe_sqrt(-1e-3, 4.0e13, "R² − d²").unwrap(), 0.0);
        assert!(matches!(
            safe_sqrt(-1.0, 1.0, "x"),
            Err(CfError::SqrtDomain { .. })
        ));
    }

    #[test]
    fn safe_root_requires_non_negative_base() {
        assert!(nearly_equal(
            safe_root(16.0, 0.25, "x").unwrap(),
            2.0,
            Tolerances::default()
        ));
        assert!(safe_root(-16.0, 0.25, "x").is_err());
    }
}
