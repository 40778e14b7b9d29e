// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use chrono::{DateTime, SecondsFormat, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// An absolute point in time, normalized to UTC.
///
/// Stored with nanosecond precision. The interpreter only keeps microseconds, so
/// anything below that is dropped on the way over (truncated, never rounded).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
	/// Creates a timestamp from seconds and nanoseconds since the unix epoch.
	///
	/// Returns `None` when the instant is out of range.
	pub fn from_unix(seconds: i64, nanos: u32) -> Option<Self> {
		DateTime::from_timestamp(seconds, nanos).map(Self)
	}

	pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
		Self(datetime.with_timezone(&Utc))
	}

	pub fn now() -> Self {
		Self(Utc::now())
	}

	pub fn as_datetime(&self) -> &DateTime<Utc> {
		&self.0
	}

	/// Sub-second part in nanoseconds.
	pub fn nanosecond(&self) -> u32 {
		self.0.timestamp_subsec_nanos()
	}

	/// Sub-second part in whole microseconds.
	pub fn microsecond(&self) -> u32 {
		self.0.timestamp_subsec_micros()
	}

	pub fn has_sub_micros(&self) -> bool {
		self.nanosecond() % 1_000 != 0
	}

	pub fn truncate_to_micros(&self) -> Self {
		let nanos = self.0.nanosecond();
		self.0.with_nanosecond(nanos - nanos % 1_000).map(Self).unwrap_or(*self)
	}
}

impl From<DateTime<Utc>> for Timestamp {
	fn from(datetime: DateTime<Utc>) -> Self {
		Self(datetime)
	}
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
	}
}
