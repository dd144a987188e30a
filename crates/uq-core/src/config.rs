//! Propagation settings.
//!
//! The operator overloads on [`UncertainQuantity`] always follow IEEE-754
//! and let inf/NaN flow through silently. A [`PropagationConfig`] decides
//! which of those conditions the fallible [`crate::Propagator`] path turns
//! into errors instead.

use crate::error::{UqError, UqResult};
use crate::numeric::ensure_finite;
use crate::quantity::UncertainQuantity;

/// What to do when a quantity's central value is zero, or a divisor is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZeroValuePolicy {
    /// Let the division produce inf/NaN.
    #[default]
    Propagate,
    /// Fail with [`UqError::ZeroValue`] / [`UqError::DivisionByZero`].
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PropagationConfig {
    pub zero_value: ZeroValuePolicy,
    /// Reject NaN/inf inputs and results.
    pub require_finite: bool,
    /// Accept negative absolute uncertainties on inputs. Results are never
    /// sign-checked: negative values, negative constants and the
    /// finite-difference rule on concave functions all yield a negative
    /// absolute uncertainty from well-posed inputs.
    pub allow_negative_uncertainty: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

impl PropagationConfig {
    /// Nothing is checked; results match the operator overloads exactly.
    pub const fn permissive() -> Self {
        Self {
            zero_value: ZeroValuePolicy::Propagate,
            require_finite: false,
            allow_negative_uncertainty: true,
        }
    }

    pub const fn strict() -> Self {
        Self {
            zero_value: ZeroValuePolicy::Reject,
            require_finite: true,
            allow_negative_uncertainty: false,
        }
    }

    pub fn rejects_zero(&self) -> bool {
        self.zero_value == ZeroValuePolicy::Reject
    }

    /// Check an input quantity against this config, returning it unchanged on success.
    pub fn validate(&self, q: UncertainQuantity, what: &'static str) -> UqResult<UncertainQuantity> {
        let q = self.validate_result(q, what)?;
        if !self.allow_negative_uncertainty && q.absolute_uncertainty() < 0.0 {
            return Err(UqError::NegativeUncertainty {
                what,
                value: q.absolute_uncertainty(),
            });
        }
        Ok(q)
    }

    /// Check a propagated result: finiteness and zero value only.
    pub fn validate_result(
        &self,
        q: UncertainQuantity,
        what: &'static str,
    ) -> UqResult<UncertainQuantity> {
        if self.require_finite {
            ensure_finite(q.value(), what)?;
            ensure_finite(q.absolute_uncertainty(), what)?;
        }
        if self.rejects_zero() && q.value() == 0.0 {
            return Err(UqError::ZeroValue { what });
        }
        Ok(q)
    }

    /// Check an exact operand or exponent.
    pub fn validate_exact(&self, c: f64, what: &'static str) -> UqResult<f64> {
        if self.require_finite {
            ensure_finite(c, what)?;
        }
        Ok(c)
    }

    /// Check a divisor's central value.
    pub fn validate_divisor(&self, divisor: f64, what: &'static str) -> UqResult<f64> {
        if self.rejects_zero() && divisor == 0.0 {
            return Err(UqError::DivisionByZero { what });
        }
        Ok(divisor)
    }
}
