// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host value to interpreter object.
//!
//! Scalars and containers are built with the interpreter's raw constructors so that a
//! null result without a pending exception can be told apart from a raised one.

use std::{
	os::raw::{c_char, c_long},
	ptr,
};

use chrono::{Datelike, Timelike};
use pybridge_type::{Blob, Map, Timestamp, Value};
use pyo3::{
	ffi,
	prelude::*,
	types::{PyDateTime, timezone_utc_bound},
};

use crate::{
	error::{Error, Result, bridge},
	handle::Handle,
};

pub(crate) struct ToForeign<'py> {
	py: Python<'py>,
	max_depth: usize,
}

impl<'py> ToForeign<'py> {
	pub(crate) fn new(py: Python<'py>, max_depth: usize) -> Self {
		Self {
			py,
			max_depth,
		}
	}

	pub(crate) fn convert(&self, value: &Value, depth: usize) -> Result<Handle> {
		match value {
			Value::Null => Ok(Handle::from_py(self.py.None())),
			// SAFETY: every raw constructor below returns a new reference or null.
			Value::Bool(v) => unsafe { self.construct("bool", ffi::PyBool_FromLong(c_long::from(*v))) },
			Value::Int(v) => unsafe { self.construct("int", ffi::PyLong_FromLongLong(*v)) },
			Value::Float(v) => unsafe { self.construct("float", ffi::PyFloat_FromDouble(*v)) },
			Value::String(v) => self.text(v),
			Value::Blob(v) => self.bytes(v),
			Value::Timestamp(v) => self.timestamp(v),
			Value::Array(items) => self.array(items, depth),
			Value::Map(entries) => self.map(entries, depth),
		}
	}

	/// # Safety
	///
	/// `ptr` must be null or a new reference.
	unsafe fn construct(&self, target: &'static str, ptr: *mut ffi::PyObject) -> Result<Handle> {
		let handle = unsafe { Handle::from_owned_ptr(self.py, ptr) };
		if handle.is_empty() {
			return Err(bridge::fetch(self.py, target));
		}
		Ok(handle)
	}

	fn text(&self, text: &str) -> Result<Handle> {
		// Built from pointer and length: interior NUL bytes are kept.
		unsafe {
			self.construct(
				"str",
				ffi::PyUnicode_FromStringAndSize(text.as_ptr() as *const c_char, text.len() as ffi::Py_ssize_t),
			)
		}
	}

	fn bytes(&self, blob: &Blob) -> Result<Handle> {
		let data = if blob.is_empty() {
			ptr::null()
		} else {
			blob.as_bytes().as_ptr() as *const c_char
		};
		unsafe { self.construct("bytes", ffi::PyBytes_FromStringAndSize(data, blob.len() as ffi::Py_ssize_t)) }
	}

	fn timestamp(&self, timestamp: &Timestamp) -> Result<Handle> {
		let py = self.py;
		let datetime = timestamp.truncate_to_micros();
		let datetime = datetime.as_datetime();
		// a leap second is carried in the sub-second part
		let microsecond = (datetime.nanosecond() / 1_000).min(999_999);

		let utc = timezone_utc_bound(py);
		let result = PyDateTime::new_bound(
			py,
			datetime.year(),
			datetime.month() as u8,
			datetime.day() as u8,
			datetime.hour() as u8,
			datetime.minute() as u8,
			datetime.second() as u8,
			microsecond,
			Some(&utc),
		);

		match result {
			Ok(datetime) => Ok(Handle::from_bound(datetime.into_any())),
			Err(err) => Err(bridge::from_pyerr(py, err)),
		}
	}

	fn array(&self, items: &[Value], depth: usize) -> Result<Handle> {
		self.descend(depth)?;

		let list = unsafe { self.construct("list", ffi::PyList_New(items.len() as ffi::Py_ssize_t))? };
		for (idx, item) in items.iter().enumerate() {
			// On failure `list` is dropped, and with it every child already inserted.
			let child = self.convert(item, depth + 1)?;
			// PyList_SetItem steals the child reference, also when it fails.
			let rc = unsafe { ffi::PyList_SetItem(list.as_ptr(), idx as ffi::Py_ssize_t, child.into_ptr()) };
			if rc != 0 {
				return Err(bridge::fetch(self.py, "list"));
			}
		}
		Ok(list)
	}

	pub(crate) fn map(&self, entries: &Map, depth: usize) -> Result<Handle> {
		self.descend(depth)?;

		let dict = unsafe { self.construct("dict", ffi::PyDict_New())? };
		for (key, value) in entries {
			let key = self.text(key)?;
			let value = self.convert(value, depth + 1)?;
			// PyDict_SetItem takes its own references.
			let rc = unsafe { ffi::PyDict_SetItem(dict.as_ptr(), key.as_ptr(), value.as_ptr()) };
			key.release(self.py);
			value.release(self.py);
			if rc != 0 {
				return Err(bridge::fetch(self.py, "dict"));
			}
		}
		Ok(dict)
	}

	fn descend(&self, depth: usize) -> Result<()> {
		if depth >= self.max_depth {
			return Err(Error::DepthExceeded {
				limit: self.max_depth,
			});
		}
		Ok(())
	}
}
