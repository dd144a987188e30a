use thiserror::Error;

pub type UqResult<T> = Result<T, UqError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UqError {
    #[error("Zero central value for {what}: percent uncertainty is undefined")]
    ZeroValue { what: &'static str },

    #[error("Division by zero: {what}")]
    DivisionByZero { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative absolute uncertainty for {what}: {value}")]
    NegativeUncertainty { what: &'static str, value: f64 },
}
