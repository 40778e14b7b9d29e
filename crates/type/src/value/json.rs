// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Value;

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(v) => Value::Bool(v),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(v) => Value::Int(v),
				None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
			},
			serde_json::Value::String(v) => Value::String(v),
			serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
			serde_json::Value::Object(entries) => {
				Value::Map(entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
			}
		}
	}
}
