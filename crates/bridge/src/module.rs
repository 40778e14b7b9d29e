// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Loaded python modules and calls into them.

use std::ptr;

use pybridge_runtime::GlobalLock;
use pybridge_type::{Map, Value};
use pyo3::{ffi, prelude::*, types::PyList};
use tracing::{debug, instrument};

use crate::{
	convert::Converter,
	error::{Error, Result, bridge},
	handle::Handle,
};

#[derive(Debug)]
pub struct Module {
	name: String,
	handle: Handle,
	converter: Converter,
}

impl Module {
	/// Imports `name` through the regular import machinery.
	pub fn import(name: &str) -> Result<Self> {
		GlobalLock::with(|py| Self::import_in(py, name))
	}

	#[instrument(name = "bridge::module::import", level = "debug", skip(py))]
	pub fn import_in(py: Python<'_>, name: &str) -> Result<Self> {
		let module = PyModule::import_bound(py, name).map_err(|err| bridge::from_pyerr(py, err))?;
		debug!(module = name, "imported");
		Ok(Self::new(name, Handle::from_bound(module.into_any())))
	}

	/// Executes `source` as a new module registered under `name`.
	#[instrument(name = "bridge::module::from_code", level = "debug", skip(source))]
	pub fn from_code(name: &str, source: &str) -> Result<Self> {
		GlobalLock::with(|py| {
			let module = PyModule::from_code_bound(py, source, &format!("{name}.py"), name)
				.map_err(|err| bridge::from_pyerr(py, err))?;
			Ok(Self::new(name, Handle::from_bound(module.into_any())))
		})
	}

	fn new(name: &str, handle: Handle) -> Self {
		Self {
			name: name.to_string(),
			handle,
			converter: Converter::default(),
		}
	}

	pub fn with_converter(mut self, converter: Converter) -> Self {
		self.converter = converter;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn handle(&self) -> &Handle {
		&self.handle
	}

	/// Looks up a callable attribute of the module.
	pub fn lookup(&self, py: Python<'_>, name: &str) -> Result<Handle> {
		let attr = self.handle.bind(py)?.getattr(name).map_err(|err| bridge::from_pyerr(py, err))?;
		if !attr.is_callable() {
			let type_name = Handle::from_bound(attr).type_name(py)?;
			return Err(Error::unsupported(type_name, format!("{}.{name} is not callable", self.name)));
		}
		Ok(Handle::from_bound(attr))
	}

	/// Calls the function `name` with converted `args` and converts its result back.
	pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
		GlobalLock::with(|py| self.call_in(py, name, args))
	}

	#[instrument(name = "bridge::module::call", level = "debug", skip(self, args, kwargs), fields(module = %self.name))]
	pub fn call_with_kwargs(&self, name: &str, args: &[Value], kwargs: &Map) -> Result<Value> {
		GlobalLock::with(|py| {
			let kwargs = self.converter.map_to_foreign(py, kwargs)?;
			self.call_with(py, name, args, Some(kwargs))
		})
	}

	#[instrument(name = "bridge::module::call", level = "debug", skip(self, py, args), fields(module = %self.name))]
	pub fn call_in(&self, py: Python<'_>, name: &str, args: &[Value]) -> Result<Value> {
		self.call_with(py, name, args, None)
	}

	fn call_with(&self, py: Python<'_>, name: &str, args: &[Value], kwargs: Option<Handle>) -> Result<Value> {
		let callable = self.lookup(py, name)?;
		let args = args.iter().map(|arg| self.converter.to_foreign(py, arg)).collect::<Result<Vec<_>>>()?;

		let result = invoke(py, &callable, args, kwargs)?;
		let value = self.converter.to_host(py, &result);

		result.release(py);
		callable.release(py);
		value
	}

	pub fn release(self, py: Python<'_>) {
		self.handle.release(py);
	}

	pub fn release_locked(self) {
		self.handle.release_locked();
	}
}

/// Calls `callable` with positional `args` and optional keyword arguments.
///
/// The argument handles are consumed: each one is moved into the argument tuple, which
/// is released after the call together with `kwargs`.
pub fn invoke(py: Python<'_>, callable: &Handle, args: Vec<Handle>, kwargs: Option<Handle>) -> Result<Handle> {
	if callable.is_empty() {
		return Err(Error::InvalidHandle);
	}

	let tuple = unsafe { Handle::from_owned_ptr(py, ffi::PyTuple_New(args.len() as ffi::Py_ssize_t)) };
	if tuple.is_empty() {
		return Err(bridge::fetch(py, "tuple"));
	}
	for (idx, arg) in args.into_iter().enumerate() {
		if arg.is_empty() {
			return Err(Error::InvalidHandle);
		}
		// steals the reference
		let rc = unsafe { ffi::PyTuple_SetItem(tuple.as_ptr(), idx as ffi::Py_ssize_t, arg.into_ptr()) };
		if rc != 0 {
			return Err(bridge::fetch(py, "tuple"));
		}
	}

	let kwargs_ptr = kwargs.as_ref().map_or(ptr::null_mut(), Handle::as_ptr);
	let result = unsafe { Handle::from_owned_ptr(py, ffi::PyObject_Call(callable.as_ptr(), tuple.as_ptr(), kwargs_ptr)) };

	tuple.release(py);
	if let Some(kwargs) = kwargs {
		kwargs.release(py);
	}

	if result.is_empty() {
		return Err(bridge::fetch(py, "call result"));
	}
	Ok(result)
}

/// Appends `path` to the interpreter's module search path.
pub fn append_sys_path(path: &str) -> Result<()> {
	GlobalLock::with(|py| {
		let sys_path = PyModule::import_bound(py, "sys")
			.and_then(|sys| sys.getattr("path"))
			.and_then(|path| path.downcast_into::<PyList>().map_err(PyErr::from))
			.map_err(|err| bridge::from_pyerr(py, err))?;

		if !sys_path.contains(path).map_err(|err| bridge::from_pyerr(py, err))? {
			sys_path.append(path).map_err(|err| bridge::from_pyerr(py, err))?;
			debug!(path, "appended to sys.path");
		}
		Ok(())
	})
}
