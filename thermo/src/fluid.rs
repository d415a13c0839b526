use serde::{Deserialize, Serialize};

use crate::Scalar;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasDefinition {
    pub name: String,
    pub molar_mass_g: Scalar,
    pub specific_heat_ratio: Scalar,
}

impl GasDefinition {
    pub fn new(name: impl Into<String>, molar_mass_g: Scalar, specific_heat_ratio: Scalar) -> Self {
        Self {
            name: name.into(),
            molar_mass_g,
            specific_heat_ratio,
        }
    }

    /// Dry air, treated as diatomic.
    pub fn air() -> Self {
        Self::new("air", AIR_MOLAR_MASS_G, AIR_SPECIFIC_HEAT_RATIO)
    }

    pub fn molar_mass_kg(&self) -> Scalar {
        self.molar_mass_g / 1000.0
    }
}

impl Default for GasDefinition {
    fn default() -> Self {
        Self::air()
    }
}

pub const AIR_MOLAR_MASS_G: Scalar = 28.97;
pub const AIR_SPECIFIC_HEAT_RATIO: Scalar = 1.4;
