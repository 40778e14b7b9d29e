// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Guard around the interpreter's global execution lock.
//!
//! Every reference-count change and every object construction must happen while the
//! lock is held. [`GlobalLock::with`] is the locked form usable from any thread; code
//! that already holds the lock receives a [`Python`] token and passes it down instead
//! of acquiring again.

use std::cell::Cell;

use pyo3::{Python, ffi};
use tracing::trace;

thread_local! {
	static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// The interpreter's global execution lock.
pub struct GlobalLock;

impl GlobalLock {
	/// Runs `f` while holding the lock, acquiring it first if the calling thread does not
	/// already own it. The lock is released when `f` returns or unwinds.
	///
	/// Nesting on one thread is allowed.
	pub fn with<F, R>(f: F) -> R
	where
		F: for<'py> FnOnce(Python<'py>) -> R,
	{
		trace!(depth = Self::depth(), "interpreter lock acquire");
		Python::with_gil(|py| {
			let _depth = DepthGuard::enter();
			f(py)
		})
	}

	/// Whether the current thread is inside a [`GlobalLock::with`] scope.
	pub fn is_held() -> bool {
		Self::depth() > 0
	}

	/// Nesting depth of [`GlobalLock::with`] scopes on the current thread.
	pub fn depth() -> usize {
		DEPTH.with(Cell::get)
	}

	fn held_by_interpreter() -> bool {
		// SAFETY: both only read interpreter state and may be called without the lock.
		// PyGILState_Check is meaningless before initialization, when nobody can hold the lock.
		unsafe { ffi::Py_IsInitialized() != 0 && ffi::PyGILState_Check() == 1 }
	}

	/// Runs `f` with the lock temporarily given up if the current thread holds it.
	///
	/// Used around blocking waits so another thread can take the lock meanwhile. Ownership
	/// is asked of the interpreter itself, so a lock taken outside [`GlobalLock::with`]
	/// (a plain `Python::with_gil`, or a token handed in by the interpreter) is given up
	/// too.
	pub fn suspend<F, T>(f: F) -> T
	where
		F: FnOnce() -> T + Send,
		T: Send,
	{
		if !Self::is_held() && !Self::held_by_interpreter() {
			return f();
		}

		Python::with_gil(|py| {
			let _suspended = SuspendGuard::enter();
			py.allow_threads(f)
		})
	}
}

struct DepthGuard;

impl DepthGuard {
	fn enter() -> Self {
		DEPTH.with(|depth| depth.set(depth.get() + 1));
		Self
	}
}

impl Drop for DepthGuard {
	fn drop(&mut self) {
		DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
	}
}

struct SuspendGuard {
	saved: usize,
}

impl SuspendGuard {
	fn enter() -> Self {
		let saved = DEPTH.with(|depth| depth.replace(0));
		trace!(depth = saved, "interpreter lock suspend");
		Self {
			saved,
		}
	}
}

impl Drop for SuspendGuard {
	fn drop(&mut self) {
		DEPTH.with(|depth| depth.set(self.saved));
	}
}
