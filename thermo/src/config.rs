use serde::{Deserialize, Serialize};

use crate::{
    error::GasError,
    fluid::GasDefinition,
    gas::Gas,
    ledger::IsothermalWork,
    Scalar, STANDARD_PRESSURE_PA, STANDARD_TEMPERATURE_K,
};

/// Serializable description of a gas to construct. Exactly two of the three
/// state fields must be set when [`GasConfig::build`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasConfig {
    pub gas: GasDefinition,
    pub temperature_k: Option<Scalar>,
    pub pressure_pa: Option<Scalar>,
    pub volume_m3: Option<Scalar>,
    pub isothermal_work: IsothermalWork,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            gas: GasDefinition::air(),
            temperature_k: Some(STANDARD_TEMPERATURE_K),
            pressure_pa: Some(STANDARD_PRESSURE_PA),
            volume_m3: None,
            isothermal_work: IsothermalWork::default(),
        }
    }
}

impl GasConfig {
    pub fn build(&self) -> Result<Gas, GasError> {
        Gas::from_definition(
            &self.gas,
            self.temperature_k,
            self.pressure_pa,
            self.volume_m3,
        )
        .map(|gas| gas.with_isothermal_work(self.isothermal_work))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn default_builds_stp_air() {
        let gas = GasConfig::default().build().unwrap();
        assert_eq!(gas, Gas::stp_air());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GasConfig = serde_json::from_str(
            r#"{ "temperature_k": 600.0, "pressure_pa": 2000000.0, "isothermal_work": "dimensional" }"#,
        )
        .unwrap();

        assert_eq!(config.gas, GasDefinition::air());
        let gas = config.build().unwrap();
        assert_eq!(gas.temperature(), 600.0);
        assert_eq!(gas.isothermal_work(), IsothermalWork::Dimensional);
    }

    #[test]
    fn three_state_fields_is_a_configuration_error() {
        let config = GasConfig {
            volume_m3: Some(0.02),
            ..GasConfig::default()
        };
        assert_eq!(
            config.build(),
            Err(GasError::Configuration(ConfigurationError::StateArity { given: 3 }))
        );
    }

    #[test]
    fn custom_gas_definition() {
        let config: GasConfig = serde_json::from_str(
            r#"{
                "gas": { "name": "argon", "molar_mass_g": 39.95, "specific_heat_ratio": 1.667 },
                "temperature_k": 300.0,
                "volume_m3": 0.01,
                "pressure_pa": null
            }"#,
        )
        .unwrap();

        let gas = config.build().unwrap();
        assert_eq!(gas.gamma(), 1.667);
        assert!((gas.density() - 3995.0).abs() < 1e-9);
    }
}
