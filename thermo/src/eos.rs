use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigurationError, GasError},
    variable::StateVariable,
    Scalar, GAS_CONSTANT,
};

/// Temperature, pressure and volume of one mole of gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasState {
    pub temperature_k: Scalar,
    pub pressure_pa: Scalar,
    pub volume_m3: Scalar,
}

impl GasState {
    pub fn from_temperature_pressure(temperature_k: Scalar, pressure_pa: Scalar) -> Self {
        Self {
            temperature_k,
            pressure_pa,
            volume_m3: GAS_CONSTANT * temperature_k / pressure_pa,
        }
    }

    pub fn from_temperature_volume(temperature_k: Scalar, volume_m3: Scalar) -> Self {
        Self {
            temperature_k,
            pressure_pa: GAS_CONSTANT * temperature_k / volume_m3,
            volume_m3,
        }
    }

    pub fn from_pressure_volume(pressure_pa: Scalar, volume_m3: Scalar) -> Self {
        Self {
            temperature_k: pressure_pa * volume_m3 / GAS_CONSTANT,
            pressure_pa,
            volume_m3,
        }
    }

    pub fn get(&self, variable: StateVariable) -> Scalar {
        match variable {
            StateVariable::Temperature => self.temperature_k,
            StateVariable::Pressure => self.pressure_pa,
            StateVariable::Volume => self.volume_m3,
        }
    }

    /// `P·V − R·T`; zero for a state on the ideal gas surface.
    pub fn residual(&self) -> Scalar {
        self.pressure_pa * self.volume_m3 - GAS_CONSTANT * self.temperature_k
    }

    /// Residual relative to `R·T`, so it can be compared against a fixed tolerance.
    pub fn relative_residual(&self) -> Scalar {
        (self.residual() / (GAS_CONSTANT * self.temperature_k)).abs()
    }

    pub fn is_physical(&self) -> bool {
        [self.temperature_k, self.pressure_pa, self.volume_m3]
            .iter()
            .all(|value| is_positive_finite(*value))
    }
}

pub(crate) fn is_positive_finite(value: Scalar) -> bool {
    value.is_finite() && value > 0.0
}

fn require_physical(
    quantity: &'static str,
    value: Option<Scalar>,
) -> Result<Option<Scalar>, GasError> {
    match value {
        Some(value) if !is_positive_finite(value) => {
            Err(ConfigurationError::NonPhysical { quantity, value }.into())
        }
        _ => Ok(value),
    }
}

/// Derives the missing member of `{T, P, V}` from `P·V = R·T` with n = 1 mol.
///
/// Exactly two of the three arguments must be given.
pub fn solve(
    temperature_k: Option<Scalar>,
    pressure_pa: Option<Scalar>,
    volume_m3: Option<Scalar>,
) -> Result<GasState, GasError> {
    let given = [temperature_k, pressure_pa, volume_m3]
        .iter()
        .filter(|value| value.is_some())
        .count();
    if given != 2 {
        return Err(ConfigurationError::StateArity { given }.into());
    }

    let temperature_k = require_physical("temperature", temperature_k)?;
    let pressure_pa = require_physical("pressure", pressure_pa)?;
    let volume_m3 = require_physical("volume", volume_m3)?;

    match (temperature_k, pressure_pa, volume_m3) {
        (Some(t), Some(p), None) => Ok(GasState::from_temperature_pressure(t, p)),
        (Some(t), None, Some(v)) => Ok(GasState::from_temperature_volume(t, v)),
        (None, Some(p), Some(v)) => Ok(GasState::from_pressure_volume(p, v)),
        _ => Err(ConfigurationError::StateArity { given }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Scalar, b: Scalar) {
        assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn solve_each_missing_variable() {
        let from_tp = solve(Some(300.0), Some(100_000.0), None).unwrap();
        assert_close(from_tp.volume_m3, 0.024942);

        let from_tv = solve(Some(300.0), None, Some(from_tp.volume_m3)).unwrap();
        assert_close(from_tv.pressure_pa, 100_000.0);

        let from_pv = solve(None, Some(100_000.0), Some(from_tp.volume_m3)).unwrap();
        assert_close(from_pv.temperature_k, 300.0);

        for state in [from_tp, from_tv, from_pv] {
            assert!(state.relative_residual() < 1e-12);
        }
    }

    #[test]
    fn solve_requires_exactly_two() {
        let cases = [
            (None, None, None, 0),
            (Some(300.0), None, None, 1),
            (None, None, Some(0.02), 1),
            (Some(300.0), Some(1e5), Some(0.02), 3),
        ];

        for (t, p, v, given) in cases {
            assert_eq!(
                solve(t, p, v),
                Err(GasError::Configuration(ConfigurationError::StateArity { given }))
            );
        }
    }

    #[test]
    fn solve_rejects_non_physical_values() {
        assert_eq!(
            solve(Some(-1.0), Some(1e5), None),
            Err(GasError::Configuration(ConfigurationError::NonPhysical {
                quantity: "temperature",
                value: -1.0
            }))
        );
        assert!(solve(Some(300.0), Some(0.0), None).is_err());
        assert!(solve(Some(300.0), None, Some(Scalar::INFINITY)).is_err());
        assert!(solve(None, Some(Scalar::NAN), Some(0.02)).is_err());
    }

    #[test]
    fn get_reads_by_variable() {
        let state = GasState::from_temperature_pressure(600.0, 2e6);
        assert_eq!(state.get(StateVariable::Temperature), 600.0);
        assert_eq!(state.get(StateVariable::Pressure), 2e6);
        assert_eq!(state.get(StateVariable::Volume), state.volume_m3);
    }
}
