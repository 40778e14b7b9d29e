// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Translation of the interpreter's error indicator into [`Error`] values.
//!
//! Every function here leaves the indicator cleared: once an exception has been turned
//! into an [`Error`], nothing pending remains for the next unrelated call to trip over.

use pyo3::{exceptions::PyUnicodeError, prelude::*};
use tracing::trace;

use crate::error::{Error, ForeignException};

/// Fetches and clears the pending exception, if any.
pub fn take_pending(py: Python<'_>) -> Option<Error> {
	PyErr::take(py).map(|err| from_pyerr(py, err))
}

/// The pending exception, or [`Error::ForeignConstructionFailed`] when a constructor for
/// `target` returned null without raising.
pub fn fetch(py: Python<'_>, target: &'static str) -> Error {
	take_pending(py).unwrap_or(Error::ForeignConstructionFailed {
		target,
	})
}

pub fn from_pyerr(py: Python<'_>, err: PyErr) -> Error {
	let exception = describe(py, &err);
	trace!(exception = %exception.type_name, "translated interpreter exception");

	if err.is_instance_of::<PyUnicodeError>(py) {
		return Error::Encoding {
			message: exception.to_string(),
		};
	}
	Error::ForeignRuntime(exception)
}

fn describe(py: Python<'_>, err: &PyErr) -> ForeignException {
	let type_name = err
		.get_type_bound(py)
		.qualname()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|_| "<unknown>".to_string());

	let message = err.value_bound(py).str().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

	let traceback = err.traceback_bound(py).and_then(|tb| tb.format().ok());

	ForeignException {
		type_name,
		message,
		traceback,
	}
}
