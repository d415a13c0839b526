#![allow(non_snake_case)]

use pyo3::{
    exceptions::{PyRuntimeError, PyValueError},
    prelude::*,
    types::PyDict,
};
use thermo::{Gas, GasError, IsothermalWork, Scalar, StateVariable};

use crate::{
    carnot::CarnotCycle,
    config::CycleConfig,
    error::SimError,
    ser::{dict_from_obj, obj_from_dict},
};

fn gas_err(err: GasError) -> PyErr {
    if err.is_fatal() {
        PyRuntimeError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

impl From<SimError> for PyErr {
    fn from(err: SimError) -> Self {
        match err {
            SimError::Gas(err) => gas_err(err),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

#[pyclass(name = "Gas")]
pub struct PyGas {
    inner: Gas,
}

#[pymethods]
impl PyGas {
    #[new]
    #[pyo3(signature = (gamma = 1.4, atomic_mass = 28.97, T = None, P = None, V = None, dimensional_work = false))]
    pub fn new(
        gamma: Scalar,
        atomic_mass: Scalar,
        T: Option<Scalar>,
        P: Option<Scalar>,
        V: Option<Scalar>,
        dimensional_work: bool,
    ) -> PyResult<Self> {
        let isothermal_work = if dimensional_work {
            IsothermalWork::Dimensional
        } else {
            IsothermalWork::Literal
        };

        let inner = Gas::new(gamma, atomic_mass, T, P, V)
            .map_err(gas_err)?
            .with_isothermal_work(isothermal_work);

        Ok(Self { inner })
    }

    #[staticmethod]
    pub fn stp_air() -> Self {
        Self {
            inner: Gas::stp_air(),
        }
    }

    #[getter(T)]
    fn temperature(&self) -> Scalar {
        self.inner.temperature()
    }

    #[setter(T)]
    fn set_temperature(&mut self, value: Scalar) -> PyResult<()> {
        self.inner.set_temperature(value).map_err(gas_err)
    }

    #[getter(P)]
    fn pressure(&self) -> Scalar {
        self.inner.pressure()
    }

    #[setter(P)]
    fn set_pressure(&mut self, value: Scalar) -> PyResult<()> {
        self.inner.set_pressure(value).map_err(gas_err)
    }

    #[getter(V)]
    fn volume(&self) -> Scalar {
        self.inner.volume()
    }

    #[setter(V)]
    fn set_volume(&mut self, value: Scalar) -> PyResult<()> {
        self.inner.set_volume(value).map_err(gas_err)
    }

    #[getter(U)]
    fn internal_energy(&self) -> Scalar {
        self.inner.internal_energy()
    }

    #[getter(H)]
    fn enthalpy(&self) -> Scalar {
        self.inner.enthalpy()
    }

    #[getter]
    fn density(&self) -> Scalar {
        self.inner.density()
    }

    #[getter]
    fn mode(&self) -> &'static str {
        self.inner.lock_mode().process_name()
    }

    fn lock(&mut self, var: &str) -> PyResult<()> {
        self.inner.lock_by_name(var).map_err(gas_err)
    }

    fn unlock(&mut self) {
        self.inner.unlock();
    }

    fn is_locked(&self, var: &str) -> PyResult<bool> {
        let variable = StateVariable::parse(var).map_err(gas_err)?;
        Ok(self.inner.lock_mode().held_variable() == Some(variable))
    }

    fn drain_entropy(&mut self) -> Scalar {
        self.inner.drain_entropy()
    }

    fn drain_work(&mut self) -> Scalar {
        self.inner.drain_work()
    }

    fn absolute_entropy(&mut self) -> Scalar {
        self.inner.absolute_entropy()
    }

    fn absolute_work(&mut self) -> Scalar {
        self.inner.absolute_work()
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

/// Runs a Carnot cycle and returns the report as a dict. Missing config keys
/// fall back to the 600 K / 300 K, 20 bar / 1 bar air cycle.
#[pyfunction]
#[pyo3(signature = (config = None))]
fn run_carnot(py: Python, config: Option<&PyDict>) -> PyResult<PyObject> {
    let config = match config {
        Some(dict) => obj_from_dict::<CycleConfig>(py, dict)?,
        None => CycleConfig::default(),
    };

    let report = CarnotCycle::plan(config)?.run()?;
    Ok(dict_from_obj(py, &report)?.into())
}

#[pymodule]
fn cycle_sim(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGas>()?;
    m.add_function(wrap_pyfunction!(run_carnot, m)?)?;
    Ok(())
}
