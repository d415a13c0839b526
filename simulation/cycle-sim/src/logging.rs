use std::{fs::File, io::Write, path::Path};

use serde::{Deserialize, Serialize};
use thermo::{Gas, GasState, LockMode, Scalar};

use crate::{carnot::Stroke, error::SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord {
    pub stroke: Stroke,
    pub process: LockMode,
    pub state: GasState,
    pub delta_entropy: Scalar,
    pub delta_work: Scalar,
}

impl StrokeRecord {
    /// Snapshot of `gas` right after `stroke`, with the deltas drained for it.
    pub fn new(stroke: Stroke, gas: &Gas, delta_entropy: Scalar, delta_work: Scalar) -> Self {
        Self {
            stroke,
            process: gas.lock_mode(),
            state: gas.state(),
            delta_entropy,
            delta_work,
        }
    }
}

/// Keeps the state reached after every stroke so a run can be replayed or
/// plotted later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleLogger {
    records: Vec<StrokeRecord>,
}

impl CycleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_stroke(&mut self, record: StrokeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StrokeRecord] {
        &self.records
    }

    pub fn num_strokes(&self) -> usize {
        self.records.len()
    }

    /// (V, P) pairs in stroke order, for a PV diagram.
    pub fn pv_points(&self) -> Vec<(Scalar, Scalar)> {
        self.records
            .iter()
            .map(|record| (record.state.volume_m3, record.state.pressure_pa))
            .collect()
    }

    pub fn dump_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        let mut file = File::create(path).map_err(|err| SimError::io(path, err))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|err| SimError::io(path, err))?;

        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| SimError::io(path, err))?;

        Ok(serde_json::from_reader(file)?)
    }
}
