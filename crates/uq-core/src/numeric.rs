//! Float helpers shared by the propagation rules and their tests.

use crate::UqError;

pub type Real = f64;

/// Absolute and relative slack for comparing propagated results.
///
/// `abs` catches results near zero, where a relative bound is meaningless.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::worked_example()
    }
}

impl Tolerances {
    /// Converting between absolute and percent uncertainty costs a few ulps.
    pub const fn round_trip() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-12,
        }
    }

    /// Chained expressions checked against published lab values.
    pub const fn worked_example() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `a` and `b` agree within either bound of `tol`. NaN never agrees.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let gap = (a - b).abs();
    gap <= tol.abs || gap <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, UqError> {
    if v.is_finite() {
        return Ok(v);
    }
    Err(UqError::NonFinite { what, value: v })
}

/// Combine two independent spreads in quadrature: `sqrt(a² + b²)`.
#[inline]
pub fn quadrature(a: Real, b: Real) -> Real {
    (a * a + b * b).sqrt()
}
