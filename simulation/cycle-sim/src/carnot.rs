use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thermo::{Gas, GasState, Scalar, StateVariable};
use tracing::info;

use crate::{
    config::CycleConfig,
    error::SimError,
    logging::{CycleLogger, StrokeRecord},
};

/// The four legs of the cycle, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Stroke {
    /// 1 -> 2 at the hot reservoir
    IsothermalExpansion,
    /// 2 -> 3
    AdiabaticExpansion,
    /// 3 -> 4 at the cold reservoir
    IsothermalCompression,
    /// 4 -> 1
    AdiabaticCompression,
}

impl Stroke {
    pub fn held_variable(self) -> Option<StateVariable> {
        match self {
            Self::IsothermalExpansion | Self::IsothermalCompression => {
                Some(StateVariable::Temperature)
            }
            Self::AdiabaticExpansion | Self::AdiabaticCompression => None,
        }
    }

    /// Index into the corner states of where this stroke ends.
    pub fn end_corner(self) -> usize {
        match self {
            Self::IsothermalExpansion => 1,
            Self::AdiabaticExpansion => 2,
            Self::IsothermalCompression => 3,
            Self::AdiabaticCompression => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarnotReport {
    pub corners: [GasState; 4],
    /// Heat taken from the hot reservoir.
    pub qh: Scalar,
    /// Heat rejected to the cold reservoir.
    pub qc: Scalar,
    pub w_23: Scalar,
    pub w_41: Scalar,
    pub total_work: Scalar,
    pub total_entropy: Scalar,
    pub efficiency_work: Scalar,
    pub efficiency_heat: Scalar,
    pub efficiency_carnot: Scalar,
    /// State and drained deltas after each stroke of this run, in order.
    pub strokes: Vec<StrokeRecord>,
}

#[derive(Debug, Clone)]
pub struct CarnotCycle {
    config: CycleConfig,
    corners: [GasState; 4],
}

impl CarnotCycle {
    /// Works out the four corner states from the reservoir temperatures and
    /// pressure bounds by running each adiabat on a scratch gas.
    pub fn plan(config: CycleConfig) -> Result<Self, SimError> {
        config.validate()?;

        let hot = config.hot_temperature_k;
        let cold = config.cold_temperature_k;

        // 1 -> 4 (adiabatic)
        let mut from_high =
            Gas::from_definition(&config.gas, Some(hot), Some(config.high_pressure_pa), None)?;
        let corner_1 = from_high.state();
        from_high.set_temperature(cold)?;
        let corner_4 = from_high.state();

        // 3 -> 2 (adiabatic)
        let mut from_low =
            Gas::from_definition(&config.gas, Some(cold), Some(config.low_pressure_pa), None)?;
        let corner_3 = from_low.state();
        from_low.set_temperature(hot)?;
        let corner_2 = from_low.state();

        if corner_2.volume_m3 <= corner_1.volume_m3 {
            return Err(SimError::invalid_cycle(format!(
                "adiabats leave no room for isothermal expansion (V1={:.4} m3, V2={:.4} m3); \
                 widen the pressure ratio",
                corner_1.volume_m3, corner_2.volume_m3
            )));
        }

        Ok(Self {
            config,
            corners: [corner_1, corner_2, corner_3, corner_4],
        })
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn corners(&self) -> &[GasState; 4] {
        &self.corners
    }

    pub fn run(&self) -> Result<CarnotReport, SimError> {
        self.run_logged(&mut CycleLogger::new())
    }

    /// Runs all four strokes on one gas, driving only its volume.
    pub fn run_logged(&self, logger: &mut CycleLogger) -> Result<CarnotReport, SimError> {
        let start = self.corners[0];
        let mut gas = Gas::from_definition(
            &self.config.gas,
            None,
            Some(start.pressure_pa),
            Some(start.volume_m3),
        )?
        .with_isothermal_work(self.config.isothermal_work);

        let mut strokes = Vec::with_capacity(4);
        for stroke in Stroke::iter() {
            match stroke.held_variable() {
                Some(variable) => gas.lock(variable),
                None => gas.unlock(),
            }

            gas.set_volume(self.corners[stroke.end_corner()].volume_m3)?;

            let delta_entropy = gas.drain_entropy();
            let delta_work = gas.drain_work();

            info!(?stroke, %gas, delta_entropy, delta_work, "finished stroke");
            let record = StrokeRecord::new(stroke, &gas, delta_entropy, delta_work);
            logger.log_stroke(record.clone());
            strokes.push(record);
        }

        let stroke_work: Vec<Scalar> = strokes.iter().map(|record| record.delta_work).collect();
        let qh = stroke_work[0];
        let qc = -stroke_work[2];
        let total_work = gas.absolute_work();

        Ok(CarnotReport {
            corners: self.corners,
            qh,
            qc,
            w_23: stroke_work[1],
            w_41: stroke_work[3],
            total_work,
            total_entropy: gas.absolute_entropy(),
            efficiency_work: total_work / qh,
            efficiency_heat: 1.0 - qc / qh,
            efficiency_carnot: 1.0
                - self.config.cold_temperature_k / self.config.hot_temperature_k,
            strokes,
        })
    }
}

#[cfg(test)]
mod tests {
    use thermo::GAS_CONSTANT;

    use super::*;

    #[test]
    fn corners_sit_on_their_isotherms() {
        let cycle = CarnotCycle::plan(CycleConfig::default()).unwrap();
        let [c1, c2, c3, c4] = *cycle.corners();

        assert_eq!(c1.temperature_k, 600.0);
        assert!((c2.temperature_k - 600.0).abs() < 1e-9);
        assert_eq!(c3.temperature_k, 300.0);
        assert!((c4.temperature_k - 300.0).abs() < 1e-9);

        assert!(c1.volume_m3 < c2.volume_m3);
        assert!(c2.volume_m3 < c3.volume_m3);
        assert!(c4.volume_m3 < c3.volume_m3);
    }

    #[test]
    fn stroke_order_closes_the_loop() {
        let ends: Vec<usize> = Stroke::iter().map(Stroke::end_corner).collect();
        assert_eq!(ends, vec![1, 2, 3, 0]);
    }

    #[test]
    fn report_carries_only_this_runs_strokes() {
        let cycle = CarnotCycle::plan(CycleConfig::default()).unwrap();
        let mut logger = CycleLogger::new();
        cycle.run_logged(&mut logger).unwrap();
        let report = cycle.run_logged(&mut logger).unwrap();

        assert_eq!(logger.num_strokes(), 8);
        assert_eq!(report.strokes.as_slice(), &logger.records()[4..]);

        let order: Vec<Stroke> = report.strokes.iter().map(|record| record.stroke).collect();
        assert_eq!(order, Stroke::iter().collect::<Vec<_>>());

        for record in &report.strokes {
            let corner = cycle.corners()[record.stroke.end_corner()];
            assert!((record.state.volume_m3 - corner.volume_m3).abs() < 1e-12);
        }
        assert_eq!(report.strokes[0].delta_work, report.qh);
        assert_eq!(report.strokes[2].delta_work, -report.qc);
        assert_eq!(report.strokes[1].delta_work, report.w_23);
        assert_eq!(report.strokes[3].delta_work, report.w_41);
    }

    #[test]
    fn narrow_pressure_ratio_is_rejected() {
        let config = CycleConfig {
            high_pressure_pa: 5.0 * crate::config::BAR_PA,
            ..CycleConfig::default()
        };
        let err = CarnotCycle::plan(config).unwrap_err();
        assert!(matches!(err, SimError::InvalidCycle { .. }));
    }

    #[test]
    fn adiabatic_strokes_cancel() {
        let report = CarnotCycle::plan(CycleConfig::default()).unwrap().run().unwrap();
        let c_v = GAS_CONSTANT / (1.4 - 1.0);

        assert!((report.w_23 - c_v * 300.0).abs() < 1e-6);
        assert!((report.w_23 + report.w_41).abs() < 1e-6);
    }

    #[test]
    fn dimensional_work_scales_heat_but_not_efficiency() {
        let literal = CarnotCycle::plan(CycleConfig::default()).unwrap().run().unwrap();
        let dimensional = CarnotCycle::plan(CycleConfig {
            isothermal_work: thermo::IsothermalWork::Dimensional,
            ..CycleConfig::default()
        })
        .unwrap()
        .run()
        .unwrap();

        assert!((dimensional.qh - GAS_CONSTANT * literal.qh).abs() < 1e-6);
        assert!((dimensional.efficiency_work - dimensional.efficiency_carnot).abs() < 1e-9);
        assert!((literal.efficiency_work - literal.efficiency_carnot).abs() < 1e-9);
    }
}
