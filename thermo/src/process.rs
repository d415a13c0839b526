use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    eos::{is_positive_finite, GasState},
    error::GasError,
    variable::{LockMode, StateVariable},
    Scalar,
};

/// The classical process a transition follows, fixed by the lock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessPath {
    Isobaric,
    Isothermal,
    Isometric,
    Adiabatic,
}

impl From<LockMode> for ProcessPath {
    fn from(lock: LockMode) -> Self {
        match lock {
            LockMode::Unlocked => Self::Adiabatic,
            LockMode::HeldP => Self::Isobaric,
            LockMode::HeldT => Self::Isothermal,
            LockMode::HeldV => Self::Isometric,
        }
    }
}

impl fmt::Display for ProcessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Isobaric => "Isobaric",
            Self::Isothermal => "Isothermal",
            Self::Isometric => "Isometric",
            Self::Adiabatic => "Adiabatic",
        };
        f.write_str(name)
    }
}

/// A staged jump between two equilibrium states. Nothing is committed until
/// the ledger has accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub driven: StateVariable,
    pub path: ProcessPath,
    pub from: GasState,
    pub to: GasState,
}

pub fn check_lock_mode(lock: LockMode, variable: StateVariable) -> Result<(), GasError> {
    if lock.held_variable() == Some(variable) {
        return Err(GasError::LockViolation {
            variable,
            process: lock,
        });
    }

    Ok(())
}

/// Computes the state reached by driving `driven` to `value` under `lock`.
pub fn plan_transition(
    lock: LockMode,
    gamma: Scalar,
    from: &GasState,
    driven: StateVariable,
    value: Scalar,
) -> Result<Transition, GasError> {
    check_lock_mode(lock, driven)?;

    if !is_positive_finite(value) {
        return Err(GasError::InvalidValue {
            variable: driven,
            value,
        });
    }

    let GasState {
        temperature_k: t,
        pressure_pa: p,
        volume_m3: v,
    } = *from;

    let to = match (driven, lock) {
        // PV ~ T
        (StateVariable::Temperature, LockMode::HeldP) => GasState {
            temperature_k: value,
            pressure_pa: p,
            volume_m3: v * (value / t),
        },
        (StateVariable::Temperature, LockMode::HeldV) => GasState {
            temperature_k: value,
            pressure_pa: p * (value / t),
            volume_m3: v,
        },
        (StateVariable::Temperature, LockMode::Unlocked) => {
            let ratio = t / value;
            GasState {
                temperature_k: value,
                pressure_pa: p * ratio.powf(gamma / (1.0 - gamma)),
                volume_m3: v * ratio.powf(1.0 / (gamma - 1.0)),
            }
        }

        (StateVariable::Pressure, LockMode::HeldV) => GasState {
            temperature_k: t * (value / p),
            pressure_pa: value,
            volume_m3: v,
        },
        (StateVariable::Pressure, LockMode::HeldT) => GasState {
            temperature_k: t,
            pressure_pa: value,
            volume_m3: v * (p / value),
        },
        (StateVariable::Pressure, LockMode::Unlocked) => {
            let ratio = p / value;
            GasState {
                temperature_k: t * ratio.powf((1.0 - gamma) / gamma),
                pressure_pa: value,
                volume_m3: v * ratio.powf(1.0 / gamma),
            }
        }

        (StateVariable::Volume, LockMode::HeldP) => GasState {
            temperature_k: t * (value / v),
            pressure_pa: p,
            volume_m3: value,
        },
        (StateVariable::Volume, LockMode::HeldT) => GasState {
            temperature_k: t,
            pressure_pa: p * (v / value),
            volume_m3: value,
        },
        (StateVariable::Volume, LockMode::Unlocked) => {
            let ratio = v / value;
            GasState {
                temperature_k: t * ratio.powf(gamma - 1.0),
                pressure_pa: p * ratio.powf(gamma),
                volume_m3: value,
            }
        }

        (StateVariable::Temperature, LockMode::HeldT)
        | (StateVariable::Pressure, LockMode::HeldP)
        | (StateVariable::Volume, LockMode::HeldV) => {
            return Err(GasError::invariant(format!(
                "held variable {} reached the transition table",
                driven
            )));
        }
    };

    if !to.is_physical() {
        return Err(GasError::InvalidValue {
            variable: driven,
            value,
        });
    }

    Ok(Transition {
        driven,
        path: lock.into(),
        from: *from,
        to,
    })
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    const GAMMA: Scalar = 1.4;

    fn stp() -> GasState {
        GasState::from_temperature_pressure(300.0, 100_000.0)
    }

    fn assert_close(a: Scalar, b: Scalar) {
        assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn every_legal_combination_stays_on_the_gas_surface() {
        let from = stp();
        for lock in LockMode::iter() {
            for driven in StateVariable::iter() {
                if lock.held_variable() == Some(driven) {
                    continue;
                }

                let value = from.get(driven) * 1.7;
                let transition = plan_transition(lock, GAMMA, &from, driven, value).unwrap();
                assert_eq!(transition.to.get(driven), value);
                assert!(
                    transition.to.relative_residual() < 1e-12,
                    "{:?} driving {:?} left the surface: {:?}",
                    lock,
                    driven,
                    transition.to
                );

                if let Some(held) = lock.held_variable() {
                    assert_eq!(transition.to.get(held), from.get(held));
                }
            }
        }
    }

    #[test]
    fn held_variable_is_a_lock_violation() {
        let from = stp();
        for driven in StateVariable::iter() {
            let lock = LockMode::holding(driven);
            let err = plan_transition(lock, GAMMA, &from, driven, 1.0).unwrap_err();
            assert_eq!(
                err,
                GasError::LockViolation {
                    variable: driven,
                    process: lock
                }
            );
        }
    }

    #[test]
    fn isobaric_temperature_scales_volume() {
        let from = stp();
        let transition =
            plan_transition(LockMode::HeldP, GAMMA, &from, StateVariable::Temperature, 600.0)
                .unwrap();
        assert_close(transition.to.volume_m3, from.volume_m3 * 2.0);
        assert_eq!(transition.path, ProcessPath::Isobaric);
    }

    #[test]
    fn isothermal_pressure_scales_volume_inversely() {
        let from = stp();
        let transition =
            plan_transition(LockMode::HeldT, GAMMA, &from, StateVariable::Pressure, 400_000.0)
                .unwrap();
        assert_close(transition.to.volume_m3, from.volume_m3 / 4.0);
        assert_eq!(transition.to.temperature_k, 300.0);
    }

    #[test]
    fn adiabatic_volume_keeps_pv_gamma() {
        let from = stp();
        let transition =
            plan_transition(LockMode::Unlocked, GAMMA, &from, StateVariable::Volume, 0.01)
                .unwrap();
        let before = from.pressure_pa * from.volume_m3.powf(GAMMA);
        let after = transition.to.pressure_pa * transition.to.volume_m3.powf(GAMMA);
        assert_close(after, before);
        assert!(transition.to.temperature_k > from.temperature_k);
    }

    #[test]
    fn adiabatic_pressure_keeps_tv_gamma_minus_one() {
        let from = stp();
        let transition =
            plan_transition(LockMode::Unlocked, GAMMA, &from, StateVariable::Pressure, 50_000.0)
                .unwrap();
        let before = from.temperature_k * from.volume_m3.powf(GAMMA - 1.0);
        let after = transition.to.temperature_k * transition.to.volume_m3.powf(GAMMA - 1.0);
        assert_close(after, before);
    }

    #[test]
    fn non_physical_targets_are_rejected() {
        let from = stp();
        for value in [0.0, -5.0, Scalar::NAN, Scalar::INFINITY] {
            let err = plan_transition(LockMode::HeldV, GAMMA, &from, StateVariable::Temperature, value)
                .unwrap_err();
            assert!(matches!(err, GasError::InvalidValue { .. }));
        }
    }
}
