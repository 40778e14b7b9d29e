// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Configuration for the designated interpreter thread.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
	/// Name given to the OS thread.
	///
	/// Default: "pybridge-main"
	pub thread_name: String,
	/// Capacity of the request channel. 0 = unbounded.
	///
	/// Default: 0 (unbounded)
	pub channel_capacity: usize,
}

impl Default for WorkerConfig {
	fn default() -> Self {
		Self {
			thread_name: "pybridge-main".to_string(),
			channel_capacity: 0,
		}
	}
}

impl WorkerConfig {
	/// Create a new config with default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the OS thread name.
	pub fn thread_name(mut self, name: impl Into<String>) -> Self {
		self.thread_name = name.into();
		self
	}

	/// Set the request channel capacity. 0 = unbounded.
	pub fn channel_capacity(mut self, capacity: usize) -> Self {
		self.channel_capacity = capacity;
		self
	}
}
