use pyo3::{
    exceptions::PyValueError,
    types::{PyDict, PyList},
    PyErr, PyObject, PyResult, Python, ToPyObject,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

fn json_err(err: serde_json::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn dict_from_obj<'py, T: Serialize>(py: Python<'py>, obj: &T) -> PyResult<&'py PyDict> {
    let value = serde_json::to_value(obj).map_err(json_err)?;
    let map = value
        .as_object()
        .ok_or_else(|| PyValueError::new_err(format!("expected an object, got {}", value)))?;

    let dict = PyDict::new(py);
    for (key, value) in map {
        dict.set_item(key, object_from_value(py, value)?)?;
    }

    Ok(dict)
}

fn object_from_value(py: Python, value: &Value) -> PyResult<PyObject> {
    let object = match value {
        Value::Null => py.None(),
        Value::Bool(value) => value.to_object(py),
        Value::Number(number) => match number.as_i64() {
            Some(value) => value.to_object(py),
            None => number.as_f64().unwrap_or(f64::NAN).to_object(py),
        },
        Value::String(value) => value.to_object(py),
        Value::Array(values) => {
            let list = PyList::empty(py);
            for value in values {
                list.append(object_from_value(py, value)?)?;
            }
            list.into()
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, value) in map {
                dict.set_item(key, object_from_value(py, value)?)?;
            }
            dict.into()
        }
    };

    Ok(object)
}

/// Round-trips the dict through Python's own json module, so `True`/`None`
/// and nested containers come out as valid JSON.
pub fn obj_from_dict<T: DeserializeOwned>(py: Python, dict: &PyDict) -> PyResult<T> {
    let json: String = py
        .import("json")?
        .call_method1("dumps", (dict,))?
        .extract()?;

    serde_json::from_str(&json).map_err(json_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CycleConfig;

    #[test]
    fn config_survives_a_dict_round_trip() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let config = CycleConfig {
                hot_temperature_k: 900.0,
                isothermal_work: thermo::IsothermalWork::Dimensional,
                ..CycleConfig::default()
            };

            let dict = dict_from_obj(py, &config).unwrap();
            let gas = dict.get_item("gas").unwrap();
            assert!(gas.downcast::<PyDict>().is_ok());

            let back: CycleConfig = obj_from_dict(py, dict).unwrap();
            assert_eq!(back, config);
        });
    }

    #[test]
    fn bad_dict_is_a_value_error() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("hot_temperature_k", "hot").unwrap();

            let err = obj_from_dict::<CycleConfig>(py, dict).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }
}
