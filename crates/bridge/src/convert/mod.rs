// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Conversion between host [`Value`]s and interpreter objects.
//!
//! Methods taking a [`Python`] token are the already-locked forms: the caller holds the
//! interpreter lock and a whole conversion tree is built under that one acquisition.
//! The `*_locked` methods and the free functions acquire the lock themselves and may be
//! called from any thread. The `*_on` functions hand the work to the designated thread
//! and block until it answers.

use pybridge_runtime::{GlobalLock, MainThread};
use pybridge_type::{Map, Value};
use pyo3::prelude::*;
use tracing::instrument;

use crate::{config::ConvertConfig, error::Result, handle::Handle};

mod to_foreign;
mod to_host;

use to_foreign::ToForeign;
use to_host::ToHost;

#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
	config: ConvertConfig,
}

impl Converter {
	pub fn new(config: ConvertConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &ConvertConfig {
		&self.config
	}

	/// Builds a new interpreter object from `value`.
	///
	/// On failure every object allocated along the way has already been released and no
	/// exception is left pending.
	#[instrument(name = "bridge::convert::to_foreign", level = "trace", skip_all, fields(kind = %value.get_type()))]
	pub fn to_foreign(&self, py: Python<'_>, value: &Value) -> Result<Handle> {
		ToForeign::new(py, self.config.max_depth).convert(value, 0)
	}

	/// Builds an interpreter `dict` from `map`.
	pub fn map_to_foreign(&self, py: Python<'_>, map: &Map) -> Result<Handle> {
		ToForeign::new(py, self.config.max_depth).map(map, 0)
	}

	/// Reads the object referenced by `handle` back into a host value. The handle keeps
	/// its reference.
	#[instrument(name = "bridge::convert::to_host", level = "trace", skip_all)]
	pub fn to_host(&self, py: Python<'_>, handle: &Handle) -> Result<Value> {
		self.to_host_bound(handle.bind(py)?)
	}

	pub fn to_host_bound(&self, obj: &Bound<'_, PyAny>) -> Result<Value> {
		ToHost::new(obj.py(), self.config.max_depth).convert(obj, 0)
	}

	pub fn to_foreign_locked(&self, value: &Value) -> Result<Handle> {
		GlobalLock::with(|py| self.to_foreign(py, value))
	}

	pub fn to_host_locked(&self, handle: &Handle) -> Result<Value> {
		GlobalLock::with(|py| self.to_host(py, handle))
	}
}

/// [`Converter::to_foreign`] with the default configuration, acquiring the lock.
pub fn to_foreign(value: &Value) -> Result<Handle> {
	Converter::default().to_foreign_locked(value)
}

/// [`Converter::to_host`] with the default configuration, acquiring the lock.
pub fn to_host(handle: &Handle) -> Result<Value> {
	Converter::default().to_host_locked(handle)
}

pub fn to_foreign_in(py: Python<'_>, value: &Value) -> Result<Handle> {
	Converter::default().to_foreign(py, value)
}

pub fn to_host_in(py: Python<'_>, handle: &Handle) -> Result<Value> {
	Converter::default().to_host(py, handle)
}

/// Converts `value` on the designated thread.
pub fn to_foreign_on(main: &MainThread, value: Value) -> Result<Handle> {
	main.run(move |py| to_foreign_in(py, &value))?
}

/// Converts the object behind `handle` on the designated thread. The handle is released
/// there once read.
pub fn to_host_on(main: &MainThread, handle: Handle) -> Result<Value> {
	main.run(move |py| {
		let value = to_host_in(py, &handle);
		handle.release(py);
		value
	})?
}

#[cfg(test)]
mod tests {
	use pybridge_runtime::WorkerConfig;
	use pybridge_type::{Blob, Timestamp};

	use super::*;
	use crate::error::{Error, ErrorKind};

	fn sample() -> Value {
		Value::map([
			("a", Value::array([Value::int(1), Value::map([("b", Value::int(2))])])),
			("blob", Value::blob(Blob::empty())),
			("at", Value::timestamp(Timestamp::from_unix(1_430_490_420, 123_456_789).unwrap())),
			("none", Value::Null),
		])
	}

	#[test]
	fn test_round_trip_truncates() {
		let value = sample();
		let handle = to_foreign(&value).unwrap();
		let back = to_host(&handle).unwrap();
		handle.release_locked();

		assert_eq!(back, value.truncated());
		assert_ne!(back, value);
	}

	#[test]
	fn test_already_locked_forms() {
		Python::with_gil(|py| {
			let handle = to_foreign_in(py, &Value::string("ABC")).unwrap();
			assert_eq!(to_host_in(py, &handle).unwrap(), Value::string("ABC"));
			handle.release(py);
		});
	}

	#[test]
	fn test_to_host_of_empty_handle() {
		assert_eq!(to_host(&Handle::empty()).unwrap_err(), Error::InvalidHandle);
	}

	#[test]
	fn test_configured_depth() {
		let converter = Converter::new(ConvertConfig::new().max_depth(1));
		let err = converter.to_foreign_locked(&Value::array([Value::array([])])).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::DepthExceeded);
	}

	#[test]
	fn test_on_designated_thread() {
		let main = MainThread::new(WorkerConfig::default()).unwrap();
		let value = sample().truncated();

		let handle = to_foreign_on(&main, value.clone()).unwrap();
		assert_eq!(to_host_on(&main, handle).unwrap(), value);
	}
}
