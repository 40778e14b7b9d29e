// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Owning wrapper around a single interpreter object reference.

use std::{
	fmt,
	fmt::{Debug, Formatter},
	ptr,
};

use pybridge_runtime::GlobalLock;
use pyo3::{ffi, prelude::*};

use crate::error::{Error, Result, bridge};

/// Owns exactly one reference to an interpreter object, or nothing.
///
/// The reference is given back exactly once: by [`Handle::release`] when the caller
/// already holds the interpreter lock, by [`Handle::release_locked`] from any other
/// thread, or on drop. Moving a handle into a container (see the converters) transfers
/// the reference, so the handle cannot be released a second time.
pub struct Handle {
	obj: Option<Py<PyAny>>,
}

impl Handle {
	/// A handle that references nothing.
	pub fn empty() -> Self {
		Self {
			obj: None,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.obj.is_none()
	}

	pub fn from_bound(obj: Bound<'_, PyAny>) -> Self {
		Self {
			obj: Some(obj.unbind()),
		}
	}

	pub fn from_py(obj: Py<PyAny>) -> Self {
		Self {
			obj: Some(obj),
		}
	}

	/// Takes ownership of a new reference returned by a raw constructor. A null pointer
	/// yields an empty handle.
	///
	/// # Safety
	///
	/// `ptr` must be null or a strong reference the caller owns.
	pub(crate) unsafe fn from_owned_ptr(py: Python<'_>, ptr: *mut ffi::PyObject) -> Self {
		Self {
			obj: unsafe { Py::from_owned_ptr_or_opt(py, ptr) },
		}
	}

	/// Borrowed raw pointer, null for an empty handle.
	pub fn as_ptr(&self) -> *mut ffi::PyObject {
		self.obj.as_ref().map_or(ptr::null_mut(), Py::as_ptr)
	}

	/// Gives up ownership without touching the reference count. The caller becomes
	/// responsible for the reference, typically by passing it to a stealing call.
	pub(crate) fn into_ptr(mut self) -> *mut ffi::PyObject {
		self.obj.take().map_or(ptr::null_mut(), Py::into_ptr)
	}

	pub fn bind<'py>(&self, py: Python<'py>) -> Result<&Bound<'py, PyAny>> {
		self.obj.as_ref().map(|obj| obj.bind(py)).ok_or(Error::InvalidHandle)
	}

	/// A second handle owning its own reference to the same object.
	pub fn clone_ref(&self, py: Python<'_>) -> Self {
		Self {
			obj: self.obj.as_ref().map(|obj| obj.clone_ref(py)),
		}
	}

	/// Current reference count of the object, zero for an empty handle.
	pub fn ref_count(&self, py: Python<'_>) -> isize {
		self.obj.as_ref().map_or(0, |obj| obj.get_refcnt(py))
	}

	/// Qualified type name of the referenced object.
	pub fn type_name(&self, py: Python<'_>) -> Result<String> {
		let name = self.bind(py)?.get_type().qualname().map_err(|err| bridge::from_pyerr(py, err))?;
		Ok(name.to_string_lossy().into_owned())
	}

	/// Releases the reference. The caller holds the interpreter lock, as proven by `py`.
	pub fn release(mut self, py: Python<'_>) {
		if let Some(obj) = self.obj.take() {
			drop(obj.into_bound(py));
		}
	}

	/// Releases the reference, acquiring the interpreter lock for the duration of the
	/// decrement. Callable from any thread.
	pub fn release_locked(mut self) {
		if let Some(obj) = self.obj.take() {
			GlobalLock::with(|py| drop(obj.into_bound(py)));
		}
	}
}

impl Default for Handle {
	fn default() -> Self {
		Self::empty()
	}
}

impl Drop for Handle {
	fn drop(&mut self) {
		if let Some(obj) = self.obj.take() {
			GlobalLock::with(|py| drop(obj.into_bound(py)));
		}
	}
}

impl Debug for Handle {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Handle").field(&self.as_ptr()).finish()
	}
}

impl From<Bound<'_, PyAny>> for Handle {
	fn from(obj: Bound<'_, PyAny>) -> Self {
		Self::from_bound(obj)
	}
}
