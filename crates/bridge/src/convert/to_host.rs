// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use pybridge_type::{Blob, Map, Timestamp, Value};
use pyo3::{
	prelude::*,
	types::{
		PyBool, PyByteArray, PyBytes, PyDateAccess, PyDateTime, PyDict, PyFloat, PyList, PyLong, PyString,
		PyTimeAccess, PyTuple, PyTzInfoAccess, timezone_utc_bound,
	},
};

use crate::error::{Error, Result, bridge};

pub(crate) struct ToHost<'py> {
	py: Python<'py>,
	max_depth: usize,
}

impl<'py> ToHost<'py> {
	pub(crate) fn new(py: Python<'py>, max_depth: usize) -> Self {
		Self {
			py,
			max_depth,
		}
	}

	pub(crate) fn convert(&self, obj: &Bound<'py, PyAny>, depth: usize) -> Result<Value> {
		if obj.is_none() {
			return Ok(Value::Null);
		}
		// bool is a subclass of int
		if let Ok(v) = obj.downcast::<PyBool>() {
			return Ok(Value::Bool(v.is_true()));
		}
		if obj.is_instance_of::<PyLong>() {
			return obj.extract::<i64>().map(Value::Int).map_err(|err| bridge::from_pyerr(self.py, err));
		}
		if let Ok(v) = obj.downcast::<PyFloat>() {
			return Ok(Value::Float(v.value()));
		}
		if let Ok(v) = obj.downcast::<PyString>() {
			return self.text(v).map(Value::String);
		}
		if let Ok(v) = obj.downcast::<PyBytes>() {
			return Ok(Value::Blob(Blob::from(v.as_bytes())));
		}
		if let Ok(v) = obj.downcast::<PyByteArray>() {
			return Ok(Value::Blob(Blob::new(v.to_vec())));
		}
		if let Ok(v) = obj.downcast::<PyDateTime>() {
			return self.timestamp(v).map(Value::Timestamp);
		}
		if let Ok(v) = obj.downcast::<PyList>() {
			self.descend(depth)?;
			return v.iter().map(|item| self.convert(&item, depth + 1)).collect::<Result<_>>().map(Value::Array);
		}
		if let Ok(v) = obj.downcast::<PyTuple>() {
			self.descend(depth)?;
			return v.iter().map(|item| self.convert(&item, depth + 1)).collect::<Result<_>>().map(Value::Array);
		}
		if let Ok(v) = obj.downcast::<PyDict>() {
			self.descend(depth)?;
			return self.map(v, depth).map(Value::Map);
		}

		Err(self.unsupported(obj))
	}

	fn text(&self, text: &Bound<'py, PyString>) -> Result<String> {
		text.to_str().map(str::to_string).map_err(|err| bridge::from_pyerr(self.py, err))
	}

	fn map(&self, dict: &Bound<'py, PyDict>, depth: usize) -> Result<Map> {
		let mut result = Map::new();
		for (key, value) in dict.iter() {
			let key = match key.downcast::<PyString>() {
				Ok(key) => self.text(key)?,
				Err(_) => {
					let (type_name, detail) = self.describe(&key);
					return Err(Error::unsupported(type_name, format!("map key {detail} is not a string")));
				}
			};
			result.insert(key, self.convert(&value, depth + 1)?);
		}
		Ok(result)
	}

	fn timestamp(&self, datetime: &Bound<'py, PyDateTime>) -> Result<Timestamp> {
		let py = self.py;

		// Aware values are moved to UTC, naive ones are taken to already be UTC.
		let utc = if datetime.get_tzinfo_bound().is_some() {
			datetime
				.call_method1("astimezone", (timezone_utc_bound(py),))
				.and_then(|obj| obj.downcast_into::<PyDateTime>().map_err(PyErr::from))
				.map_err(|err| bridge::from_pyerr(py, err))?
		} else {
			datetime.clone()
		};

		let date = NaiveDate::from_ymd_opt(utc.get_year(), u32::from(utc.get_month()), u32::from(utc.get_day()));
		let time = NaiveTime::from_hms_micro_opt(
			u32::from(utc.get_hour()),
			u32::from(utc.get_minute()),
			u32::from(utc.get_second()),
			utc.get_microsecond(),
		);

		match (date, time) {
			(Some(date), Some(time)) => {
				Ok(Timestamp::from(Utc.from_utc_datetime(&NaiveDateTime::new(date, time))))
			}
			_ => Err(Error::unsupported("datetime", format!("{datetime} is not a representable instant"))),
		}
	}

	fn unsupported(&self, obj: &Bound<'py, PyAny>) -> Error {
		let (type_name, detail) = self.describe(obj);
		Error::unsupported(type_name, detail)
	}

	/// Type name and `str()` of an object that has no host counterpart.
	fn describe(&self, obj: &Bound<'py, PyAny>) -> (String, String) {
		let type_name = obj
			.get_type()
			.qualname()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|_| "<unknown>".to_string());
		// str() may raise; the failure is swallowed so no exception stays pending.
		let detail = obj
			.str()
			.map(|s| s.to_string_lossy().into_owned())
			.unwrap_or_else(|_| format!("<{type_name} object>"));
		(type_name, detail)
	}

	fn descend(&self, depth: usize) -> Result<()> {
		if depth >= self.max_depth {
			return Err(Error::DepthExceeded {
				limit: self.max_depth,
			});
		}
		Ok(())
	}
}
