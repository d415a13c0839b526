use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::error::{ConfigurationError, GasError};

/// One of the three coupled state variables of the gas.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum StateVariable {
    #[strum(serialize = "T")]
    #[serde(rename = "T")]
    Temperature,
    #[strum(serialize = "P")]
    #[serde(rename = "P")]
    Pressure,
    #[strum(serialize = "V")]
    #[serde(rename = "V")]
    Volume,
}

impl StateVariable {
    /// Accepts the single-letter symbols `T`, `P` and `V`.
    pub fn parse(raw: &str) -> Result<Self, GasError> {
        Self::from_str(raw).map_err(|_| {
            ConfigurationError::UnknownVariable {
                raw: raw.to_string(),
            }
            .into()
        })
    }

    pub fn symbol(self) -> &'static str {
        self.into()
    }

    pub const fn long_name(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Pressure => "Pressure",
            Self::Volume => "Volume",
        }
    }
}

impl fmt::Display for StateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// Which variable, if any, is held constant across the next transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
pub enum LockMode {
    /// Nothing held, no heat exchanged.
    #[default]
    Unlocked,
    HeldP,
    HeldT,
    HeldV,
}

impl LockMode {
    pub const fn holding(variable: StateVariable) -> Self {
        match variable {
            StateVariable::Temperature => Self::HeldT,
            StateVariable::Pressure => Self::HeldP,
            StateVariable::Volume => Self::HeldV,
        }
    }

    pub const fn held_variable(self) -> Option<StateVariable> {
        match self {
            Self::Unlocked => None,
            Self::HeldP => Some(StateVariable::Pressure),
            Self::HeldT => Some(StateVariable::Temperature),
            Self::HeldV => Some(StateVariable::Volume),
        }
    }

    pub const fn process_name(self) -> &'static str {
        match self {
            Self::Unlocked => "Adiabatic",
            Self::HeldP => "Isobaric",
            Self::HeldT => "Isothermal",
            Self::HeldV => "Isometric",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.process_name())
    }
}
