use crate::{HfError, HfResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> HfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero; physical building/datasheet inputs.
pub fn ensure_positive(v: Real, what: &'static str) -> HfResult<Real> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HfError::NonPositive { what, value: v })
    }
}

/// Finite and not below zero; rate-like inputs that may legitimately be zero.
pub fn ensure_non_negative(v: Real, what: &'static str) -> HfResult<Real> {
    ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(HfError::NonPositive { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1.0, "test").is_ok());
        assert!(ensure_positive(0.0, "test").is_err());
        assert!(ensure_positive(-3.0, "test").is_err());
        assert!(ensure_positive(Real::INFINITY, "test").is_err());
    }

    #[test]
    fn ensure_non_negative_admits_zero() {
        assert!(ensure_non_negative(0.0, "test").is_ok());
        assert!(ensure_non_negative(2.5, "test").is_ok());
        assert!(ensure_non_negative(-0.1, "test").is_err());
        assert!(ensure_non_negative(Real::NAN, "test").is_err());
    }
}
