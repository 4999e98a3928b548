//! Python Bindings
//!
//! Exposes the change-set trackers to Python. Python values are converted to
//! [`Value`]s on the way in:
//!
//! - `None`, `bool`, `int`, `float` and `str` compare by value,
//! - every other object compares by identity (`is`).
//!
//! On the way out, identity-compared objects are handed back unchanged.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyString};

use crate::diff::{ArityPolicy, ChangeSet, Deps, DepsTracker, ForeignRef, Props, PropsTracker, Value};
use crate::error::InspectError;

impl From<InspectError> for PyErr {
    fn from(err: InspectError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn policy(strict: bool) -> ArityPolicy {
    if strict {
        ArityPolicy::Strict
    } else {
        ArityPolicy::Lenient
    }
}

fn to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    // bool is a subclass of int, so it goes first.
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if obj.is_instance_of::<PyInt>() {
        if let Ok(n) = obj.extract::<i128>() {
            return Ok(Value::BigInt(n));
        }
    } else if obj.is_instance_of::<PyFloat>() {
        return Ok(Value::Number(obj.extract::<f64>()?));
    } else if obj.is_instance_of::<PyString>() {
        return Ok(Value::from(obj.extract::<String>()?));
    }

    let label = obj
        .repr()
        .map(|r| r.to_string())
        .unwrap_or_else(|_| "<object>".to_string());
    Ok(Value::Foreign(ForeignRef::new(
        obj.as_ptr() as usize,
        &label,
        obj.clone().unbind(),
    )))
}

fn to_py(py: Python<'_>, value: &Value) -> PyObject {
    match value {
        Value::Undefined | Value::Null => py.None(),
        Value::Bool(b) => (*b).into_py(py),
        Value::Number(n) => (*n).into_py(py),
        Value::BigInt(n) => (*n).into_py(py),
        Value::Str(s) => PyString::new_bound(py, s).into_py(py),
        Value::Foreign(foreign) => match foreign.downcast_ref::<Py<PyAny>>() {
            Some(obj) => obj.clone_ref(py),
            None => foreign.label().into_py(py),
        },
        other => other.to_string().into_py(py),
    }
}

fn changes_to_dict<'py>(py: Python<'py>, changes: &ChangeSet) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (key, change) in changes {
        let entry = PyDict::new_bound(py);
        entry.set_item("previous", to_py(py, &change.previous))?;
        entry.set_item("new", to_py(py, &change.current))?;
        dict.set_item(key, entry)?;
    }
    Ok(dict)
}

/// Tracks a prop mapping across calls.
#[pyclass(name = "PropsTracker")]
pub struct PyPropsTracker {
    inner: PropsTracker,
}

#[pymethods]
impl PyPropsTracker {
    #[new]
    fn new() -> Self {
        Self {
            inner: PropsTracker::default(),
        }
    }

    /// Compare `props` with the previous call and remember it.
    fn track<'py>(&mut self, py: Python<'py>, props: &Bound<'py, PyDict>) -> PyResult<Bound<'py, PyDict>> {
        let mut current = Props::new();
        for (key, value) in props.iter() {
            current.insert(key.str()?.to_string(), to_value(&value)?);
        }
        let changes = self.inner.track(&current)?;
        changes_to_dict(py, &changes)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn __repr__(&self) -> String {
        let tracked = self.inner.committed().map_or(0, Props::len);
        format!("PropsTracker(tracked={})", tracked)
    }
}

/// Tracks an ordered dependency list across calls.
#[pyclass(name = "DepsTracker")]
pub struct PyDepsTracker {
    inner: DepsTracker,
}

#[pymethods]
impl PyDepsTracker {
    #[new]
    #[pyo3(signature = (strict = true))]
    fn new(strict: bool) -> Self {
        Self {
            inner: DepsTracker::new(policy(strict)),
        }
    }

    /// Compare `deps` with the previous call and remember it.
    ///
    /// Raises `ValueError` when the length changed and the tracker is strict.
    fn track<'py>(&mut self, py: Python<'py>, deps: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyDict>> {
        let mut current = Deps::new();
        for item in deps.iter()? {
            current.push(to_value(&item?)?);
        }
        let changes = self.inner.track(&current)?;
        changes_to_dict(py, &changes)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn __repr__(&self) -> String {
        let tracked = self.inner.committed().map_or(0, Deps::len);
        let strict = self.inner.policy() == ArityPolicy::Strict;
        format!("DepsTracker(tracked={}, strict={})", tracked, strict)
    }
}
