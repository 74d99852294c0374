use crate::NseError;

/// Floating point type used throughout system
pub type Real = f64;

/// Pass finite values through untouched.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, NseError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NseError::NonFinite { what, value: v })
    }
}

/// Reject NaN/inf and anything not strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, NseError> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(NseError::Domain {
            what,
            value: v,
            requirement: "must be finite and > 0",
        })
    }
}

/// Reject anything outside the open unit interval (0, 1).
pub fn ensure_open_unit(v: Real, what: &'static str) -> Result<Real, NseError> {
    if v.is_finite() && v > 0.0 && v < 1.0 {
        Ok(v)
    } else {
        Err(NseError::Domain {
            what,
            value: v,
            requirement: "must lie strictly between 0 and 1",
        })
    }
}
