// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeMap,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

pub mod blob;
mod into;
mod json;
pub mod timestamp;
mod r#type;

pub use blob::Blob;
pub use timestamp::Timestamp;
pub use r#type::Type;

/// String-keyed mapping of values. Keys are unique; iteration order carries no meaning.
pub type Map = BTreeMap<String, Value>;

/// A host value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Absence of a value
	Null,
	/// A boolean: true or false.
	Bool(bool),
	/// An 8-byte signed integer
	Int(i64),
	/// An 8-byte floating point
	Float(f64),
	/// A UTF-8 encoded text
	String(String),
	/// A binary large object (BLOB)
	Blob(Blob),
	/// An absolute instant in UTC
	Timestamp(Timestamp),
	/// An ordered sequence of values
	Array(Vec<Value>),
	/// A mapping from string keys to values
	Map(Map),
}

impl Value {
	pub fn null() -> Self {
		Value::Null
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Bool(v.into())
	}

	pub fn int(v: impl Into<i64>) -> Self {
		Value::Int(v.into())
	}

	pub fn float(v: impl Into<f64>) -> Self {
		Value::Float(v.into())
	}

	pub fn string(v: impl Into<String>) -> Self {
		Value::String(v.into())
	}

	pub fn blob(v: impl Into<Blob>) -> Self {
		Value::Blob(v.into())
	}

	pub fn timestamp(v: impl Into<Timestamp>) -> Self {
		Value::Timestamp(v.into())
	}

	pub fn array(v: impl IntoIterator<Item = Value>) -> Self {
		Value::Array(v.into_iter().collect())
	}

	pub fn map<K: Into<String>>(v: impl IntoIterator<Item = (K, Value)>) -> Self {
		Value::Map(v.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Null => Type::Null,
			Value::Bool(_) => Type::Bool,
			Value::Int(_) => Type::Int,
			Value::Float(_) => Type::Float,
			Value::String(_) => Type::String,
			Value::Blob(_) => Type::Blob,
			Value::Timestamp(_) => Type::Timestamp,
			Value::Array(_) => Type::Array,
			Value::Map(_) => Type::Map,
		}
	}

	/// Returns the value with every nested timestamp truncated to whole microseconds.
	///
	/// This is exactly what a round trip through the interpreter yields.
	pub fn truncated(&self) -> Value {
		match self {
			Value::Timestamp(ts) => Value::Timestamp(ts.truncate_to_micros()),
			Value::Array(items) => Value::Array(items.iter().map(Value::truncated).collect()),
			Value::Map(entries) => {
				Value::Map(entries.iter().map(|(k, v)| (k.clone(), v.truncated())).collect())
			}
			other => other.clone(),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(true) => f.write_str("true"),
			Value::Bool(false) => f.write_str("false"),
			Value::Int(value) => Display::fmt(value, f),
			Value::Float(value) => Display::fmt(value, f),
			Value::String(value) => Display::fmt(value, f),
			Value::Blob(value) => Display::fmt(value, f),
			Value::Timestamp(value) => Display::fmt(value, f),
			Value::Array(items) => {
				f.write_str("[")?;
				for (idx, item) in items.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					Display::fmt(item, f)?;
				}
				f.write_str("]")
			}
			Value::Map(entries) => {
				f.write_str("{")?;
				for (idx, (key, value)) in entries.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key}: {value}")?;
				}
				f.write_str("}")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_type() {
		assert_eq!(Value::Null.get_type(), Type::Null);
		assert_eq!(Value::int(1).get_type(), Type::Int);
		assert_eq!(Value::array([]).get_type(), Type::Array);
		assert_eq!(Value::map::<&str>([]).get_type(), Type::Map);
	}

	#[test]
	fn test_display_nested() {
		let value = Value::map([(
			"a",
			Value::array([Value::int(1), Value::map([("b", Value::int(2))]), Value::Null]),
		)]);
		assert_eq!(value.to_string(), "{a: [1, {b: 2}, null]}");
	}

	#[test]
	fn test_truncated_reaches_nested_timestamps() {
		let ts = Timestamp::from_unix(1_430_490_420, 123_456_789).unwrap();
		let value = Value::map([("at", Value::array([Value::timestamp(ts)]))]);

		let expected = Value::map([(
			"at",
			Value::array([Value::timestamp(Timestamp::from_unix(1_430_490_420, 123_456_000).unwrap())]),
		)]);
		assert_eq!(value.truncated(), expected);
	}

	#[test]
	fn test_truncated_leaves_scalars() {
		let value = Value::array([Value::float(0.5), Value::string("x"), Value::blob(vec![1u8, 2])]);
		assert_eq!(value.truncated(), value);
	}
}
