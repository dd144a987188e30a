//! Fallible propagation driven by a [`PropagationConfig`].
//!
//! Every operation validates its inputs, computes the same result as the
//! matching operator overload, and validates the result.

use tracing::{debug, warn};

use crate::config::PropagationConfig;
use crate::error::UqResult;
use crate::numeric::Real;
use crate::quantity::{Operand, UncertainQuantity};

#[derive(Clone, Copy, Debug, Default)]
pub struct Propagator {
    config: PropagationConfig,
}

impl Propagator {
    pub fn new(config: PropagationConfig) -> Self {
        Self { config }
    }

    pub fn strict() -> Self {
        Self::new(PropagationConfig::strict())
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    pub fn quantity(&self, value: Real, absolute_uncertainty: Real) -> UqResult<UncertainQuantity> {
        let q = UncertainQuantity::new(value, absolute_uncertainty);
        self.guard(self.config.validate(q, "quantity"))?;
        self.finish(q, "quantity")
    }

    pub fn add(&self, lhs: UncertainQuantity, rhs: impl Into<Operand>) -> UqResult<UncertainQuantity> {
        let rhs = self.operands(lhs, rhs.into())?;
        self.finish(lhs.plus(rhs), "sum")
    }

    pub fn sub(&self, lhs: UncertainQuantity, rhs: impl Into<Operand>) -> UqResult<UncertainQuantity> {
        let rhs = self.operands(lhs, rhs.into())?;
        self.finish(lhs.minus(rhs), "difference")
    }

    pub fn mul(&self, lhs: UncertainQuantity, rhs: impl Into<Operand>) -> UqResult<UncertainQuantity> {
        let rhs = self.operands(lhs, rhs.into())?;
        self.finish(lhs.times(rhs), "product")
    }

    pub fn div(&self, lhs: UncertainQuantity, rhs: impl Into<Operand>) -> UqResult<UncertainQuantity> {
        let rhs = self.operands(lhs, rhs.into())?;
        self.guard(self.config.validate_divisor(rhs.value(), "divisor"))?;
        self.finish(lhs.divided_by(rhs), "quotient")
    }

    /// `lhs - rhs` with an exact left operand.
    pub fn rsub(&self, lhs: Real, rhs: UncertainQuantity) -> UqResult<UncertainQuantity> {
        self.operands(rhs, Operand::Exact(lhs))?;
        self.finish(rhs.rsub(lhs), "difference")
    }

    /// `lhs / rhs` with an exact left operand.
    pub fn rdiv(&self, lhs: Real, rhs: UncertainQuantity) -> UqResult<UncertainQuantity> {
        self.operands(rhs, Operand::Exact(lhs))?;
        self.guard(self.config.validate_divisor(rhs.value(), "divisor"))?;
        self.finish(rhs.rdiv(lhs), "quotient")
    }

    pub fn pow(&self, base: UncertainQuantity, exponent: Real) -> UqResult<UncertainQuantity> {
        self.guard(self.config.validate(base, "base"))?;
        self.guard(self.config.validate_exact(exponent, "exponent"))?;
        self.finish(base.pow(exponent), "power")
    }

    /// Only the argument's sign is checked. The finite-difference rule gives
    /// a negative uncertainty for any concave `f` (`ln`, `sqrt`, ...), so the
    /// result is checked for finiteness and zero value alone.
    pub fn apply_special_function<F>(&self, arg: UncertainQuantity, f: F) -> UqResult<UncertainQuantity>
    where
        F: Fn(Real) -> Real,
    {
        self.guard(self.config.validate(arg, "argument"))?;
        self.finish(arg.apply_special_function(f), "special function")
    }

    fn operands(&self, lhs: UncertainQuantity, rhs: Operand) -> UqResult<Operand> {
        self.guard(self.config.validate(lhs, "left operand"))?;
        match rhs {
            Operand::Quantity(q) => {
                self.guard(self.config.validate(q, "right operand"))?;
            }
            Operand::Exact(c) => {
                self.guard(self.config.validate_exact(c, "right operand"))?;
            }
        }
        Ok(rhs)
    }

    fn guard<T>(&self, checked: UqResult<T>) -> UqResult<T> {
        if let Err(err) = &checked {
            debug!(error = %err, "uncertainty propagation rejected");
        }
        checked
    }

    fn finish(&self, result: UncertainQuantity, what: &'static str) -> UqResult<UncertainQuantity> {
        let q = self.guard(self.config.validate_result(result, what))?;
        if !q.is_finite() {
            warn!(
                what,
                value = q.value(),
                absolute_uncertainty = q.absolute_uncertainty(),
                "non-finite uncertainty propagated"
            );
        }
        Ok(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UqError;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn permissive_matches_operators() {
        let p = Propagator::default();
        let a = UncertainQuantity::new(44.8, 0.2);
        let b = UncertainQuantity::new(3.21, 0.02);
        assert_eq!(p.add(a, b).unwrap(), a + b);
        assert_eq!(p.sub(a, 2.0).unwrap(), a - 2.0);
        assert_eq!(p.mul(a, b).unwrap(), a * b);
        assert_eq!(p.div(a, b).unwrap(), a / b);
        assert_eq!(p.rsub(10.0, b).unwrap(), 10.0 - b);
        assert_eq!(p.rdiv(10.0, b).unwrap(), 10.0 / b);
        assert_eq!(p.pow(b, 2.0).unwrap(), b.pow(2.0));
        assert_eq!(
            p.apply_special_function(b, f64::ln).unwrap(),
            b.apply_special_function(f64::ln)
        );
    }

    #[test]
    fn permissive_lets_infinity_through() {
        let p = Propagator::default();
        let r = p.div(UncertainQuantity::new(1.0, 0.1), 0.0).unwrap();
        assert!(r.value().is_infinite());
    }

    #[test]
    fn strict_rejects_division_by_zero_constant() {
        let p = Propagator::strict();
        let err = p.div(UncertainQuantity::new(1.0, 0.1), 0.0).unwrap_err();
        assert_eq!(err, UqError::DivisionByZero { what: "divisor" });
    }

    #[test]
    fn strict_rejects_zero_valued_operand() {
        let p = Propagator::strict();
        let zero = UncertainQuantity::new(0.0, 0.1);
        let err = p.mul(UncertainQuantity::new(2.0, 0.1), zero).unwrap_err();
        assert_eq!(err, UqError::ZeroValue { what: "right operand" });
        assert!(p.rdiv(1.0, zero).is_err());
    }

    #[test]
    fn strict_rejects_zero_valued_result() {
        let p = Propagator::strict();
        let a = UncertainQuantity::new(5.0, 0.1);
        let err = p.sub(a, a).unwrap_err();
        assert_eq!(err, UqError::ZeroValue { what: "difference" });
    }

    #[test]
    fn strict_accepts_negative_scaling() {
        let p = Propagator::strict();
        let r = p.mul(UncertainQuantity::new(5.0, 0.1), -2.0).unwrap();
        assert_eq!(r, UncertainQuantity::new(5.0, 0.1) * -2.0);
    }

    #[test]
    fn strict_rejects_negative_input_uncertainty() {
        let p = Propagator::strict();
        assert!(matches!(
            p.quantity(2.0, -0.1),
            Err(UqError::NegativeUncertainty { what: "quantity", .. })
        ));
        let err = p.add(UncertainQuantity::new(2.0, -0.1), 1.0).unwrap_err();
        assert!(matches!(err, UqError::NegativeUncertainty { what: "left operand", .. }));
    }

    #[test]
    fn strict_handles_negative_valued_quantities() {
        let p = Propagator::strict();
        let b = p.quantity(-2.0, 0.1).unwrap();

        let squared = p.pow(b, 2.0).unwrap();
        assert_eq!(squared, b.pow(2.0));
        assert!(nearly_equal(squared.value(), 4.0, Tolerances::default()));

        let product = p.mul(UncertainQuantity::new(5.0, 0.1), b).unwrap();
        assert_eq!(product, UncertainQuantity::new(5.0, 0.1) * b);
        assert_eq!(product.value(), -10.0);
    }

    #[test]
    fn strict_accepts_concave_special_functions() {
        let p = Propagator::strict();
        let x = p.quantity(10.0, 0.1).unwrap();

        let ln = p.apply_special_function(x, f64::ln).unwrap();
        assert_eq!(ln, x.ln());
        assert!(ln.absolute_uncertainty() < 0.0);

        let root = p.apply_special_function(p.quantity(4.0, 0.1).unwrap(), f64::sqrt).unwrap();
        assert!(nearly_equal(root.value(), 2.0, Tolerances::default()));
        assert!(p.apply_special_function(x, f64::log10).is_ok());
        assert!(p.apply_special_function(p.quantity(1.0, 0.1).unwrap(), f64::sin).is_ok());
    }

    #[test]
    fn strict_rejects_nan_exponent() {
        let p = Propagator::strict();
        let err = p.pow(UncertainQuantity::new(5.0, 0.1), f64::NAN).unwrap_err();
        assert!(matches!(err, UqError::NonFinite { what: "exponent", .. }));
    }

    #[test]
    fn strict_accepts_well_posed_chain() {
        let p = Propagator::strict();
        let x = p.quantity(44.8, 0.2).unwrap();
        let t = p.quantity(3.21, 0.02).unwrap();
        let t2 = p.pow(t, 2.0).unwrap();
        let res = p.div(x, t2).unwrap();
        assert!(nearly_equal(res.value(), 4.3477838918488754, Tolerances::default()));
    }

    #[test]
    fn strict_special_function_rejects_nan_result() {
        let p = Propagator::strict();
        // ln(v - u) is ln of a negative number.
        let err = p
            .apply_special_function(UncertainQuantity::new(0.5, 1.0), f64::ln)
            .unwrap_err();
        assert!(matches!(err, UqError::NonFinite { what: "special function", .. }));
    }
}
