use core::fmt;

use tracing::{debug, warn};

use crate::{
    eos::{self, GasState},
    error::{ConfigurationError, GasError},
    fluid::GasDefinition,
    ledger::{IsothermalWork, Ledger, LedgerEntry},
    process::{self, Transition},
    variable::{LockMode, StateVariable},
    Scalar, GAS_CONSTANT, STANDARD_PRESSURE_PA, STANDARD_TEMPERATURE_K,
};

/// One mole of an ideal gas.
///
/// State only changes through [`Gas::set`] and its per-variable wrappers.
/// Each call stages a transition, prices it in the ledger and only then
/// swaps the new state in, so an error leaves the gas exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Gas {
    gamma: Scalar,
    atomic_mass: Scalar,
    c_v: Scalar,
    state: GasState,
    lock: LockMode,
    ledger: Ledger,
    isothermal_work: IsothermalWork,
}

impl Gas {
    pub fn new(
        gamma: Scalar,
        atomic_mass: Scalar,
        temperature_k: Option<Scalar>,
        pressure_pa: Option<Scalar>,
        volume_m3: Option<Scalar>,
    ) -> Result<Self, GasError> {
        let state = eos::solve(temperature_k, pressure_pa, volume_m3)?;

        if !(gamma.is_finite() && gamma > 1.0) {
            return Err(ConfigurationError::HeatCapacityRatio { gamma }.into());
        }
        if !(atomic_mass.is_finite() && atomic_mass > 0.0) {
            return Err(ConfigurationError::NonPhysical {
                quantity: "atomic mass",
                value: atomic_mass,
            }
            .into());
        }

        Ok(Self::from_parts(gamma, atomic_mass, state))
    }

    pub fn from_definition(
        definition: &GasDefinition,
        temperature_k: Option<Scalar>,
        pressure_pa: Option<Scalar>,
        volume_m3: Option<Scalar>,
    ) -> Result<Self, GasError> {
        Self::new(
            definition.specific_heat_ratio,
            definition.molar_mass_g,
            temperature_k,
            pressure_pa,
            volume_m3,
        )
    }

    /// Air at 300 K and 100 kPa.
    pub fn stp_air() -> Self {
        let air = GasDefinition::air();
        Self::from_parts(
            air.specific_heat_ratio,
            air.molar_mass_g,
            GasState::from_temperature_pressure(STANDARD_TEMPERATURE_K, STANDARD_PRESSURE_PA),
        )
    }

    fn from_parts(gamma: Scalar, atomic_mass: Scalar, state: GasState) -> Self {
        Self {
            gamma,
            atomic_mass,
            c_v: GAS_CONSTANT / (gamma - 1.0),
            state,
            lock: LockMode::Unlocked,
            ledger: Ledger::new(),
            isothermal_work: IsothermalWork::default(),
        }
    }

    pub fn with_isothermal_work(mut self, isothermal_work: IsothermalWork) -> Self {
        self.isothermal_work = isothermal_work;
        self
    }

    pub fn gamma(&self) -> Scalar {
        self.gamma
    }

    pub fn atomic_mass(&self) -> Scalar {
        self.atomic_mass
    }

    pub fn c_v(&self) -> Scalar {
        self.c_v
    }

    pub fn state(&self) -> GasState {
        self.state
    }

    pub fn temperature(&self) -> Scalar {
        self.state.temperature_k
    }

    pub fn pressure(&self) -> Scalar {
        self.state.pressure_pa
    }

    pub fn volume(&self) -> Scalar {
        self.state.volume_m3
    }

    pub fn lock_mode(&self) -> LockMode {
        self.lock
    }

    pub fn isothermal_work(&self) -> IsothermalWork {
        self.isothermal_work
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// U = R·T / (γ − 1)
    pub fn internal_energy(&self) -> Scalar {
        GAS_CONSTANT * self.state.temperature_k / (self.gamma - 1.0)
    }

    /// H = U + P·V
    pub fn enthalpy(&self) -> Scalar {
        self.internal_energy() + self.state.pressure_pa * self.state.volume_m3
    }

    pub fn density(&self) -> Scalar {
        self.atomic_mass / self.state.volume_m3
    }

    /// Holds `variable` constant for every following transition.
    pub fn lock(&mut self, variable: StateVariable) {
        self.lock = LockMode::holding(variable);
    }

    /// Same as [`Gas::lock`], taking the variable's symbol (`"P"`, `"T"` or `"V"`).
    pub fn lock_by_name(&mut self, name: &str) -> Result<(), GasError> {
        let variable = StateVariable::parse(name)?;
        self.lock(variable);
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.lock = LockMode::Unlocked;
    }

    pub fn check_lock_mode(&self, variable: StateVariable) -> Result<(), GasError> {
        process::check_lock_mode(self.lock, variable)
    }

    pub fn set_temperature(&mut self, temperature_k: Scalar) -> Result<(), GasError> {
        self.set(StateVariable::Temperature, temperature_k)
    }

    pub fn set_pressure(&mut self, pressure_pa: Scalar) -> Result<(), GasError> {
        self.set(StateVariable::Pressure, pressure_pa)
    }

    pub fn set_volume(&mut self, volume_m3: Scalar) -> Result<(), GasError> {
        self.set(StateVariable::Volume, volume_m3)
    }

    /// Drives `variable` to `value` along the process chosen by the lock mode.
    pub fn set(&mut self, variable: StateVariable, value: Scalar) -> Result<(), GasError> {
        let transition = match self.stage(variable, value) {
            Ok(transition) => transition,
            Err(err) => {
                if let GasError::LockViolation { .. } = err {
                    warn!(%err, "rejected transition");
                }
                return Err(err);
            }
        };

        let entry = LedgerEntry::for_transition(&transition, self.gamma, self.isothermal_work)?;
        self.commit(&transition, &entry);

        Ok(())
    }

    /// Computes the transition `set` would perform without touching the gas.
    pub fn stage(&self, variable: StateVariable, value: Scalar) -> Result<Transition, GasError> {
        process::plan_transition(self.lock, self.gamma, &self.state, variable, value)
    }

    fn commit(&mut self, transition: &Transition, entry: &LedgerEntry) {
        debug!(
            process = %transition.path,
            driven = transition.driven.symbol(),
            temperature_k = transition.to.temperature_k,
            pressure_pa = transition.to.pressure_pa,
            volume_m3 = transition.to.volume_m3,
            delta_entropy = entry.delta_entropy,
            delta_work = entry.delta_work,
            "committed transition"
        );

        self.ledger.record(entry);
        self.state = transition.to;
    }

    /// Entropy change since the last drain. Reading it resets it to zero.
    pub fn drain_entropy(&mut self) -> Scalar {
        self.ledger.drain_entropy()
    }

    /// Work done since the last drain. Reading it resets it to zero.
    pub fn drain_work(&mut self) -> Scalar {
        self.ledger.drain_work()
    }

    pub fn absolute_entropy(&mut self) -> Scalar {
        self.ledger.absolute_entropy()
    }

    pub fn absolute_work(&mut self) -> Scalar {
        self.ledger.absolute_work()
    }

    pub fn pending_entropy(&self) -> Scalar {
        self.ledger.pending_entropy()
    }

    pub fn pending_work(&self) -> Scalar {
        self.ledger.pending_work()
    }
}

impl Default for Gas {
    fn default() -> Self {
        Self::stp_air()
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gas(T={:.1}K, P={:.1}kPa, V={:.1}L, S={:.1} + C J/K, mode={})",
            self.state.temperature_k,
            self.state.pressure_pa / 1000.0,
            self.state.volume_m3 * 1000.0,
            self.ledger.running_entropy(),
            self.lock
        )
    }
}
