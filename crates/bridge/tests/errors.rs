// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pybridge::{
	ConvertConfig, Converter, Error, ErrorKind, GlobalLock, Handle, MainThread, Module, Timestamp, Value, WorkerConfig,
	WorkerError, to_foreign_on,
};
use pybridge_testing::{fixture, init_tracing};
use pyo3::{PyErr, Python};

fn deep_array(depth: usize) -> Value {
	(0..depth).fold(Value::Null, |inner, _| Value::array([inner]))
}

#[test]
fn test_no_exception_left_pending() {
	init_tracing();
	let module = Module::from_code("errors_returns", fixture::RETURNS).unwrap();
	let converter = Converter::default();

	GlobalLock::with(|py| {
		for name in ["return_object", "return_big_int", "return_surrogate", "raise_error", "not_callable", "missing"]
		{
			assert!(module.call_in(py, name, &[]).is_err(), "{name}");
			assert!(PyErr::take(py).is_none(), "{name} left an exception pending");
		}

		let ts = Value::timestamp(Timestamp::from_unix(569_000_000_000, 0).unwrap());
		assert!(converter.to_foreign(py, &ts).is_err());
		assert!(PyErr::take(py).is_none());
	});
}

#[test]
fn test_depth_exceeded_both_directions() {
	init_tracing();
	let converter = Converter::new(ConvertConfig::new().max_depth(16));

	assert!(converter.to_foreign_locked(&deep_array(16)).is_ok());
	assert_eq!(
		converter.to_foreign_locked(&deep_array(17)).unwrap_err(),
		Error::DepthExceeded {
			limit: 16
		}
	);

	Python::with_gil(|py| {
		let source = format!("{}{}", "[".repeat(17), "]".repeat(17));
		let obj = py.eval_bound(&source, None, None).unwrap();
		let err = converter.to_host_bound(&obj).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::DepthExceeded);
	});
}

#[test]
fn test_default_depth_limit() {
	let err = pybridge::to_foreign(&deep_array(1_000)).unwrap_err();
	assert_eq!(
		err,
		Error::DepthExceeded {
			limit: 256
		}
	);
}

#[test]
fn test_invalid_handle() {
	assert_eq!(pybridge::to_host(&Handle::empty()).unwrap_err().kind(), ErrorKind::InvalidHandle);
}

#[test]
fn test_stopped_designated_thread() {
	let main = MainThread::new(WorkerConfig::default()).unwrap();
	main.stop();

	let err = to_foreign_on(&main, Value::int(1)).unwrap_err();
	assert_eq!(err, Error::Worker(WorkerError::Stopped));
	assert_eq!(err.kind(), ErrorKind::Worker);
}
