//! Measured values carrying their propagated uncertainty.
//!
//! An [`UncertainQuantity`] stores a central value and an absolute
//! uncertainty. The percent view is always derived from those two, so the
//! two representations can never disagree.
//!
//! Propagation rules for independent operands:
//! - Addition/Subtraction: absolute uncertainties add in quadrature
//! - Multiplication/Division: percent uncertainties add in quadrature
//! - Power: percent uncertainty scales linearly with the exponent
//! - Plain `f64` operands are exact (zero uncertainty)

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::config::PropagationConfig;
use crate::error::UqResult;
use crate::numeric::{Real, Tolerances, nearly_equal, quadrature};

/// A measured value together with its absolute uncertainty.
///
/// Every arithmetic operation returns a new quantity; operands are never
/// modified, so chained expressions are free of aliasing effects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UncertainQuantity {
    value: Real,
    absolute_uncertainty: Real,
}

/// Right-hand side of a binary operation: another measurement or an exact number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Quantity(UncertainQuantity),
    /// Dimensionless constant with zero uncertainty.
    Exact(Real),
}

impl Operand {
    /// Central value of the operand.
    pub fn value(self) -> Real {
        match self {
            Self::Quantity(q) => q.value,
            Self::Exact(c) => c,
        }
    }
}

impl From<UncertainQuantity> for Operand {
    fn from(q: UncertainQuantity) -> Self {
        Self::Quantity(q)
    }
}

impl From<Real> for Operand {
    fn from(c: Real) -> Self {
        Self::Exact(c)
    }
}

impl Default for UncertainQuantity {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl UncertainQuantity {
    /// Create a quantity without validation.
    ///
    /// A zero `value` makes the percent view undefined (inf/NaN); use
    /// [`UncertainQuantity::try_new`] to reject it up front.
    pub const fn new(value: Real, absolute_uncertainty: Real) -> Self {
        Self {
            value,
            absolute_uncertainty,
        }
    }

    /// Create a quantity, rejecting zero or non-finite values and negative
    /// or non-finite uncertainties.
    pub fn try_new(value: Real, absolute_uncertainty: Real) -> UqResult<Self> {
        PropagationConfig::strict().validate(Self::new(value, absolute_uncertainty), "quantity")
    }

    /// Create a quantity from a value and a percent uncertainty.
    pub fn from_percent(value: Real, percent_uncertainty: Real) -> Self {
        Self::new(value, 0.0).with_percent_uncertainty(percent_uncertainty)
    }

    pub fn value(&self) -> Real {
        self.value
    }

    pub fn absolute_uncertainty(&self) -> Real {
        self.absolute_uncertainty
    }

    /// `100 * absolute / value`.
    pub fn percent_uncertainty(&self) -> Real {
        100.0 * (self.absolute_uncertainty / self.value)
    }

    /// `absolute / value`, as a fraction.
    pub fn relative_uncertainty(&self) -> Real {
        self.absolute_uncertainty / self.value
    }

    /// Replace the central value, keeping the absolute uncertainty.
    pub fn set_value(&mut self, value: Real) {
        self.value = value;
    }

    pub fn set_absolute_uncertainty(&mut self, absolute_uncertainty: Real) {
        self.absolute_uncertainty = absolute_uncertainty;
    }

    /// Store the uncertainty as a percentage of the current value.
    pub fn set_percent_uncertainty(&mut self, percent_uncertainty: Real) {
        self.absolute_uncertainty = (percent_uncertainty * self.value) / 100.0;
    }

    pub fn with_value(mut self, value: Real) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_absolute_uncertainty(mut self, absolute_uncertainty: Real) -> Self {
        self.set_absolute_uncertainty(absolute_uncertainty);
        self
    }

    pub fn with_percent_uncertainty(mut self, percent_uncertainty: Real) -> Self {
        self.set_percent_uncertainty(percent_uncertainty);
        self
    }

    /// True when value, absolute and percent views are all finite.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
            && self.absolute_uncertainty.is_finite()
            && self.percent_uncertainty().is_finite()
    }

    /// Compare value, absolute and percent views within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: Tolerances) -> bool {
        nearly_equal(self.value, other.value, tol)
            && nearly_equal(self.absolute_uncertainty, other.absolute_uncertainty, tol)
            && nearly_equal(self.percent_uncertainty(), other.percent_uncertainty(), tol)
    }

    fn combine_additive(self, other: Operand, op: fn(Real, Real) -> Real) -> Self {
        match other {
            Operand::Quantity(rhs) => Self::new(
                op(self.value, rhs.value),
                quadrature(self.absolute_uncertainty, rhs.absolute_uncertainty),
            ),
            Operand::Exact(c) => Self::new(op(self.value, c), self.absolute_uncertainty),
        }
    }

    fn combine_multiplicative(self, other: Operand, op: fn(Real, Real) -> Real) -> Self {
        match other {
            Operand::Quantity(rhs) => Self::from_percent(
                op(self.value, rhs.value),
                quadrature(self.percent_uncertainty(), rhs.percent_uncertainty()),
            ),
            // Scaling by a constant scales the absolute uncertainty the same way.
            Operand::Exact(c) => Self::new(op(self.value, c), op(self.absolute_uncertainty, c)),
        }
    }

    /// `self + other`.
    pub fn plus(self, other: impl Into<Operand>) -> Self {
        self.combine_additive(other.into(), |a, b| a + b)
    }

    /// `self - other`.
    pub fn minus(self, other: impl Into<Operand>) -> Self {
        self.combine_additive(other.into(), |a, b| a - b)
    }

    /// `self * other`.
    pub fn times(self, other: impl Into<Operand>) -> Self {
        self.combine_multiplicative(other.into(), |a, b| a * b)
    }

    /// `self / other`.
    pub fn divided_by(self, other: impl Into<Operand>) -> Self {
        self.combine_multiplicative(other.into(), |a, b| a / b)
    }

    /// `lhs - self` for an exact `lhs`.
    pub fn rsub(self, lhs: Real) -> Self {
        Self::new(lhs - self.value, self.absolute_uncertainty)
    }

    /// `lhs / self` for an exact `lhs`. The percent uncertainty carries over
    /// unchanged; only the value respects operand order.
    pub fn rdiv(self, lhs: Real) -> Self {
        Self::from_percent(lhs / self.value, self.percent_uncertainty())
    }

    /// Raise to an exact power. Percent uncertainty scales by `exponent`.
    pub fn pow(self, exponent: Real) -> Self {
        Self::from_percent(
            self.value.powf(exponent),
            self.percent_uncertainty() * exponent,
        )
    }

    pub fn powi(self, exponent: i32) -> Self {
        self.pow(Real::from(exponent))
    }

    /// Propagate through a nonlinear `f` with a symmetric finite difference:
    ///
    /// ```text
    /// upper = f(v + u) - f(v)
    /// lower = f(v - u) - f(v)
    /// u'    = (upper + lower) / 2
    /// ```
    ///
    /// This is an approximation, not exact propagation. It degrades for
    /// strongly nonlinear `f` over wide uncertainty intervals, and for
    /// near-linear `f` the two deltas largely cancel.
    pub fn apply_special_function<F>(self, f: F) -> Self
    where
        F: Fn(Real) -> Real,
    {
        let center = f(self.value);
        let upper = f(self.value + self.absolute_uncertainty) - center;
        let lower = f(self.value - self.absolute_uncertainty) - center;
        Self::new(center, (upper + lower) / 2.0)
    }

    pub fn sin(self) -> Self {
        self.apply_special_function(Real::sin)
    }

    pub fn cos(self) -> Self {
        self.apply_special_function(Real::cos)
    }

    pub fn tan(self) -> Self {
        self.apply_special_function(Real::tan)
    }

    pub fn exp(self) -> Self {
        self.apply_special_function(Real::exp)
    }

    pub fn ln(self) -> Self {
        self.apply_special_function(Real::ln)
    }

    pub fn log10(self) -> Self {
        self.apply_special_function(Real::log10)
    }

    pub fn sqrt(self) -> Self {
        self.apply_special_function(Real::sqrt)
    }
}

impl fmt::Display for UncertainQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(
                f,
                "{:.p$} ± {:.p$}",
                self.value, self.absolute_uncertainty
            ),
            None => write!(f, "{} ± {}", self.value, self.absolute_uncertainty),
        }
    }
}

impl Add for UncertainQuantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl Add<Real> for UncertainQuantity {
    type Output = Self;

    fn add(self, rhs: Real) -> Self {
        self.plus(rhs)
    }
}

impl Add<UncertainQuantity> for Real {
    type Output = UncertainQuantity;

    fn add(self, rhs: UncertainQuantity) -> UncertainQuantity {
        rhs.plus(self)
    }
}

impl Sub for UncertainQuantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl Sub<Real> for UncertainQuantity {
    type Output = Self;

    fn sub(self, rhs: Real) -> Self {
        self.minus(rhs)
    }
}

impl Sub<UncertainQuantity> for Real {
    type Output = UncertainQuantity;

    fn sub(self, rhs: UncertainQuantity) -> UncertainQuantity {
        rhs.rsub(self)
    }
}

impl Mul for UncertainQuantity {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.times(rhs)
    }
}

impl Mul<Real> for UncertainQuantity {
    type Output = Self;

    fn mul(self, rhs: Real) -> Self {
        self.times(rhs)
    }
}

impl Mul<UncertainQuantity> for Real {
    type Output = UncertainQuantity;

    fn mul(self, rhs: UncertainQuantity) -> UncertainQuantity {
        rhs.times(self)
    }
}

impl Div for UncertainQuantity {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.divided_by(rhs)
    }
}

impl Div<Real> for UncertainQuantity {
    type Output = Self;

    fn div(self, rhs: Real) -> Self {
        self.divided_by(rhs)
    }
}

impl Div<UncertainQuantity> for Real {
    type Output = UncertainQuantity;

    fn div(self, rhs: UncertainQuantity) -> UncertainQuantity {
        rhs.rdiv(self)
    }
}

impl Neg for UncertainQuantity {
    type Output = Self;

    fn neg(self) -> Self {
        self.rsub(0.0)
    }
}
