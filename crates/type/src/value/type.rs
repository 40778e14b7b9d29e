// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The variant tag of a [`Value`](crate::Value).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Null,
	Bool,
	Int,
	Float,
	String,
	Blob,
	Timestamp,
	Array,
	Map,
}

impl Type {
	pub fn as_str(&self) -> &'static str {
		match self {
			Type::Null => "null",
			Type::Bool => "bool",
			Type::Int => "int",
			Type::Float => "float",
			Type::String => "string",
			Type::Blob => "blob",
			Type::Timestamp => "timestamp",
			Type::Array => "array",
			Type::Map => "map",
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(Type::Timestamp.to_string(), "timestamp");
		assert_eq!(Type::Blob.to_string(), "blob");
	}
}
