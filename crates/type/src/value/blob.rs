// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter, Write},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

/// A binary large object: an owned, possibly empty, byte sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Blob(Vec<u8>);

impl Blob {
	pub fn new(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}

	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.0
	}

	pub fn to_hex(&self) -> String {
		let mut result = String::with_capacity(2 + self.0.len() * 2);
		result.push_str("0x");
		for byte in &self.0 {
			let _ = write!(result, "{byte:02x}");
		}
		result
	}
}

impl Deref for Blob {
	type Target = [u8];

	fn deref(&self) -> &[u8] {
		&self.0
	}
}

impl From<Vec<u8>> for Blob {
	fn from(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}
}

impl From<&[u8]> for Blob {
	fn from(bytes: &[u8]) -> Self {
		Self(bytes.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(bytes: &[u8; N]) -> Self {
		Self(bytes.to_vec())
	}
}

impl Display for Blob {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_hex())
	}
}
