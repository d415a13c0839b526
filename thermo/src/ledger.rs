use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::GasError,
    process::{ProcessPath, Transition},
    Scalar, GAS_CONSTANT,
};

/// Relative tolerance for the per-transition consistency checks.
const CONSISTENCY_TOLERANCE: Scalar = 1e-9;

/// How work along an isothermal path is computed.
///
/// `Literal` is `T'·ln(V'/V)`, which omits the gas constant and is what every
/// efficiency figure produced so far is based on. `Dimensional` is
/// `R·T'·ln(V'/V)`, the energy in joules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsothermalWork {
    #[default]
    Literal,
    Dimensional,
}

impl IsothermalWork {
    pub fn work(self, temperature_k: Scalar, volume_ratio: Scalar) -> Scalar {
        let literal = temperature_k * volume_ratio.ln();
        match self {
            Self::Literal => literal,
            Self::Dimensional => GAS_CONSTANT * literal,
        }
    }
}

/// Entropy and work implied by one transition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub delta_entropy: Scalar,
    pub delta_work: Scalar,
}

impl LedgerEntry {
    pub fn for_transition(
        transition: &Transition,
        gamma: Scalar,
        isothermal_work: IsothermalWork,
    ) -> Result<Self, GasError> {
        check_consistency(transition, gamma)?;

        let from = &transition.from;
        let to = &transition.to;
        let c_v = GAS_CONSTANT / (gamma - 1.0);

        let delta_entropy = c_v * (to.temperature_k / from.temperature_k).ln()
            + GAS_CONSTANT * (to.volume_m3 / from.volume_m3).ln();

        let delta_work = match transition.path {
            ProcessPath::Isometric => 0.0,
            ProcessPath::Isobaric => from.pressure_pa * (to.volume_m3 - from.volume_m3),
            // Equals P'V'^γ(V'^(1-γ) - V^(1-γ))/(1-γ) while PV^γ is held,
            // without raising a raw volume to a power.
            ProcessPath::Adiabatic => {
                (to.pressure_pa * to.volume_m3 - from.pressure_pa * from.volume_m3) / (1.0 - gamma)
            }
            ProcessPath::Isothermal => {
                isothermal_work.work(to.temperature_k, to.volume_m3 / from.volume_m3)
            }
        };

        if !delta_entropy.is_finite() || !delta_work.is_finite() {
            return Err(GasError::invariant(format!(
                "{} transition produced dS={} dW={}",
                transition.path, delta_entropy, delta_work
            )));
        }

        Ok(Self {
            delta_entropy,
            delta_work,
        })
    }
}

fn relative_drift(before: Scalar, after: Scalar) -> Scalar {
    ((after - before) / before).abs()
}

/// The path's own constraint and the equation of state must both hold on the
/// staged state; anything else means the transition table is wrong.
fn check_consistency(transition: &Transition, gamma: Scalar) -> Result<(), GasError> {
    let from = &transition.from;
    let to = &transition.to;

    let drift = match transition.path {
        ProcessPath::Isometric => relative_drift(from.volume_m3, to.volume_m3),
        ProcessPath::Isobaric => relative_drift(from.pressure_pa, to.pressure_pa),
        ProcessPath::Isothermal => relative_drift(from.temperature_k, to.temperature_k),
        // ln of (P'V'^γ)/(PV^γ), built from ratios so extreme volumes stay finite
        ProcessPath::Adiabatic => ((to.pressure_pa / from.pressure_pa).ln()
            + gamma * (to.volume_m3 / from.volume_m3).ln())
        .abs(),
    };

    if !drift.is_finite() || drift > CONSISTENCY_TOLERANCE {
        return Err(GasError::invariant(format!(
            "{} transition driving {:?} drifted its held quantity by {:e}",
            transition.path, transition.driven, drift
        )));
    }

    if to.relative_residual() > CONSISTENCY_TOLERANCE {
        return Err(GasError::invariant(format!(
            "{} transition left the ideal gas surface: {:?}",
            transition.path, to
        )));
    }

    Ok(())
}

/// Running and cumulative entropy/work. The difference between the two is
/// the undrained delta, and reading a delta drains it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ledger {
    current_entropy: Scalar,
    entropy: Scalar,
    current_work: Scalar,
    work: Scalar,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: &LedgerEntry) {
        self.current_entropy += entry.delta_entropy;
        self.current_work += entry.delta_work;
    }

    pub fn drain_entropy(&mut self) -> Scalar {
        let delta = self.current_entropy - self.entropy;
        self.entropy = self.current_entropy;
        trace!(delta, total = self.entropy, "drained entropy");
        delta
    }

    pub fn drain_work(&mut self) -> Scalar {
        let delta = self.current_work;
        self.work += self.current_work;
        self.current_work = 0.0;
        trace!(delta, total = self.work, "drained work");
        delta
    }

    /// Drains the entropy delta, then returns the cumulative entropy.
    pub fn absolute_entropy(&mut self) -> Scalar {
        self.drain_entropy();
        self.entropy
    }

    /// Drains the work delta, then returns the cumulative work.
    pub fn absolute_work(&mut self) -> Scalar {
        self.drain_work();
        self.work
    }

    pub fn pending_entropy(&self) -> Scalar {
        self.current_entropy - self.entropy
    }

    pub fn pending_work(&self) -> Scalar {
        self.current_work
    }

    /// Entropy change since creation, drained or not.
    pub fn running_entropy(&self) -> Scalar {
        self.current_entropy
    }
}
