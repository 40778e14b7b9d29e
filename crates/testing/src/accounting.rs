// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Interpreter-side allocation accounting for leak tests.
//!
//! A snapshot records the number of memory blocks the interpreter's allocator has
//! handed out, taken after a full collection. A workload repeated many times between
//! two snapshots leaks when the count grows with the repetitions; free lists and caches
//! filling up only account for a bounded amount.

use parking_lot::{Mutex, MutexGuard};
use pyo3::prelude::*;

/// Blocks a leak-free workload may still gain between two snapshots.
pub const TOLERANCE: isize = 128;

static SERIAL: Mutex<()> = Mutex::new(());

/// Serialise tests that compare snapshots. Parallel test threads would otherwise move
/// the counters in between.
pub fn serial() -> MutexGuard<'static, ()> {
	SERIAL.lock()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accounting {
	pub allocated_blocks: isize,
}

impl Accounting {
	/// Run a full collection, then record the counters.
	pub fn capture(py: Python<'_>) -> PyResult<Self> {
		py.import_bound("gc")?.call_method0("collect")?;
		let allocated_blocks = py.import_bound("sys")?.call_method0("getallocatedblocks")?.extract()?;

		Ok(Self {
			allocated_blocks,
		})
	}

	/// Blocks allocated since `before` and still alive.
	pub fn growth_since(&self, before: &Accounting) -> isize {
		self.allocated_blocks - before.allocated_blocks
	}

	/// Whether the growth since `before` stays within [`TOLERANCE`].
	pub fn is_balanced_with(&self, before: &Accounting) -> bool {
		self.growth_since(before) <= TOLERANCE
	}
}
