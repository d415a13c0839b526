//! One mole of an ideal gas driven through isobaric, isothermal, isometric
//! and adiabatic transitions, with entropy and work bookkeeping.

#![forbid(unsafe_code)]

pub mod config;
pub mod eos;
pub mod error;
pub mod fluid;
pub mod gas;
pub mod ledger;
pub mod process;
pub mod variable;

pub type Scalar = f64;

/// Molar gas constant, J / (mol K).
pub const GAS_CONSTANT: Scalar = 8.314;

pub const STANDARD_TEMPERATURE_K: Scalar = 300.0;
pub const STANDARD_PRESSURE_PA: Scalar = 100_000.0;

pub use config::GasConfig;
pub use eos::GasState;
pub use error::{ConfigurationError, GasError};
pub use fluid::GasDefinition;
pub use gas::Gas;
pub use ledger::{IsothermalWork, Ledger, LedgerEntry};
pub use process::{ProcessPath, Transition};
pub use variable::{LockMode, StateVariable};
