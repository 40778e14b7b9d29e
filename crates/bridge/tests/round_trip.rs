// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pybridge::{Blob, Converter, GlobalLock, Timestamp, Value, to_foreign, to_host};
use pybridge_testing::init_tracing;
use serde_json::json;

fn round_trip(value: &Value) -> Value {
	let handle = to_foreign(value).unwrap();
	let back = to_host(&handle).unwrap();
	handle.release_locked();
	back
}

#[test]
fn test_scalars_round_trip() {
	init_tracing();

	let values = [
		Value::Null,
		Value::bool(true),
		Value::bool(false),
		Value::int(0),
		Value::int(i64::MAX),
		Value::int(i64::MIN),
		Value::float(0.9),
		Value::float(-1.5e300),
		Value::float(f64::INFINITY),
		Value::string(""),
		Value::string("ABC"),
		Value::string("日本語 ✓"),
		Value::string("nul\0inside"),
		Value::blob(b"abcdefg"),
		Value::blob(vec![0u8, 255, 0]),
		Value::timestamp(Timestamp::from_unix(1_430_490_420, 500_000_000).unwrap()),
		Value::timestamp(Timestamp::from_unix(-1, 0).unwrap()),
	];

	for value in &values {
		assert_eq!(&round_trip(value), value, "round trip of {value}");
	}
}

#[test]
fn test_nan_round_trips_as_nan() {
	match round_trip(&Value::float(f64::NAN)) {
		Value::Float(v) => assert!(v.is_nan()),
		other => panic!("expected float, got {other:?}"),
	}
}

#[test]
fn test_timestamp_truncated_not_rounded() {
	let ts = Timestamp::from_unix(1_430_490_420, 123_456_789).unwrap();

	let back = round_trip(&Value::timestamp(ts));
	let Value::Timestamp(back) = back else {
		panic!("expected timestamp, got {back:?}");
	};
	assert_eq!(back.microsecond(), 123_456);
	assert_eq!(back.nanosecond(), 123_456_000);

	let ts = Timestamp::from_unix(0, 999_999_999).unwrap();
	assert_eq!(round_trip(&Value::timestamp(ts)), Value::timestamp(Timestamp::from_unix(0, 999_999_000).unwrap()));
}

#[test]
fn test_empty_blob() {
	assert_eq!(round_trip(&Value::blob(Blob::empty())), Value::blob(Blob::empty()));
}

#[test]
fn test_nested_containers() {
	let value = Value::map([("a", Value::array([Value::int(1), Value::map([("b", Value::int(2))])]))]);
	assert_eq!(round_trip(&value), value);
}

#[test]
fn test_empty_containers() {
	assert_eq!(round_trip(&Value::array([])), Value::array([]));
	assert_eq!(round_trip(&Value::map::<&str>([])), Value::map::<&str>([]));
}

#[test]
fn test_deeply_nested() {
	let mut value = Value::string("leaf");
	for level in 0..200 {
		value = if level % 2 == 0 {
			Value::array([value, Value::int(level)])
		} else {
			Value::map([("level", Value::int(level)), ("inner", value)])
		};
	}
	assert_eq!(round_trip(&value), value);
}

#[test]
fn test_json_document() {
	let value = Value::from(json!({
		"name": "sensor",
		"readings": [1, 2.5, null, true],
		"meta": { "tags": ["a", "b"], "limits": { "max": 10, "min": -10 } }
	}));
	assert_eq!(round_trip(&value), value);
}

#[test]
fn test_mixed_tree_with_timestamps() {
	let value = Value::array([
		Value::timestamp(Timestamp::from_unix(1_700_000_000, 1).unwrap()),
		Value::map([("at", Value::timestamp(Timestamp::from_unix(1_700_000_000, 999).unwrap()))]),
	]);
	assert_eq!(round_trip(&value), value.truncated());
}

#[test]
fn test_single_lock_for_whole_tree() {
	let converter = Converter::default();
	let value = Value::array((0..100).map(Value::int));

	let back = GlobalLock::with(|py| {
		let handle = converter.to_foreign(py, &value).unwrap();
		let back = converter.to_host(py, &handle).unwrap();
		handle.release(py);
		back
	});
	assert_eq!(back, value);
}
