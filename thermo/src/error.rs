use thiserror::Error;

use crate::{
    variable::{LockMode, StateVariable},
    Scalar,
};

/// Bad arguments handed to a constructor or to `lock`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("must specify exactly two of T, P, V; {given} given")]
    StateArity { given: usize },
    #[error("invalid variable '{raw}'; expected one of P, T, V")]
    UnknownVariable { raw: String },
    #[error("{quantity} must be finite and positive, got {value}")]
    NonPhysical {
        quantity: &'static str,
        value: Scalar,
    },
    #[error("heat capacity ratio must be greater than 1, got {gamma}")]
    HeatCapacityRatio { gamma: Scalar },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GasError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("cannot change {variable} in {process} process")]
    LockViolation {
        variable: StateVariable,
        process: LockMode,
    },

    /// A setter argument, or the state it leads to, is not a usable
    /// temperature, pressure or volume.
    #[error("cannot set {variable} to {value}: result is not a finite positive state")]
    InvalidValue {
        variable: StateVariable,
        value: Scalar,
    },

    /// Raised when a transition breaks the constraints of its own process.
    /// This is a defect in the transition table, never a caller mistake.
    #[error("internal invariant broken: {reason}")]
    Invariant { reason: String },
}

impl GasError {
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::Invariant {
            reason: reason.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_violation_names_variable_and_process() {
        let err = GasError::LockViolation {
            variable: StateVariable::Temperature,
            process: LockMode::HeldT,
        };
        assert_eq!(
            err.to_string(),
            "cannot change Temperature in Isothermal process"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn configuration_errors_are_transparent() {
        let err: GasError = ConfigurationError::StateArity { given: 3 }.into();
        assert_eq!(err.to_string(), "must specify exactly two of T, P, V; 3 given");
    }

    #[test]
    fn invariant_is_fatal() {
        assert!(GasError::invariant("boom").is_fatal());
    }
}
