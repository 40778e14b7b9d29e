// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Blob, Map, Timestamp, Value};

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v.into())
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl From<Blob> for Value {
	fn from(v: Blob) -> Self {
		Value::Blob(v)
	}
}

impl From<Timestamp> for Value {
	fn from(v: Timestamp) -> Self {
		Value::Timestamp(v)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::Array(v)
	}
}

impl From<Map> for Value {
	fn from(v: Map) -> Self {
		Value::Map(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		match v {
			Some(v) => v.into(),
			None => Value::Null,
		}
	}
}
