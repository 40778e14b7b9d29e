// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Configuration for value conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertConfig {
	/// Deepest container nesting accepted in either direction.
	///
	/// Default: 256
	pub max_depth: usize,
}

impl Default for ConvertConfig {
	fn default() -> Self {
		Self {
			max_depth: 256,
		}
	}
}

impl ConvertConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}
