use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thermo::{GasDefinition, IsothermalWork, Scalar};
use tracing::info;

use crate::error::SimError;

pub const BAR_PA: Scalar = 100_000.0;

/// Reservoirs and pressure bounds of a Carnot engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub gas: GasDefinition,
    pub hot_temperature_k: Scalar,
    pub cold_temperature_k: Scalar,
    /// Pressure at the start of the isothermal expansion.
    pub high_pressure_pa: Scalar,
    /// Pressure at the start of the isothermal compression.
    pub low_pressure_pa: Scalar,
    pub isothermal_work: IsothermalWork,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            gas: GasDefinition::air(),
            hot_temperature_k: 600.0,
            cold_temperature_k: 300.0,
            high_pressure_pa: 20.0 * BAR_PA,
            low_pressure_pa: BAR_PA,
            isothermal_work: IsothermalWork::default(),
        }
    }
}

impl CycleConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| SimError::io(path, err))?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;

        info!(path = %path.display(), "loaded cycle config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("hot temperature", self.hot_temperature_k),
            ("cold temperature", self.cold_temperature_k),
            ("high pressure", self.high_pressure_pa),
            ("low pressure", self.low_pressure_pa),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid_cycle(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        if self.cold_temperature_k >= self.hot_temperature_k {
            return Err(SimError::invalid_cycle(format!(
                "cold reservoir ({} K) must be colder than hot reservoir ({} K)",
                self.cold_temperature_k, self.hot_temperature_k
            )));
        }

        if self.low_pressure_pa >= self.high_pressure_pa {
            return Err(SimError::invalid_cycle(format!(
                "low pressure ({} Pa) must be below high pressure ({} Pa)",
                self.low_pressure_pa, self.high_pressure_pa
            )));
        }

        Ok(())
    }
}
