// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
};

use pybridge_runtime::WorkerError;

pub mod bridge;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	UnsupportedType,
	ForeignConstructionFailed,
	ForeignRuntime,
	Encoding,
	DepthExceeded,
	InvalidHandle,
	Worker,
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ErrorKind::UnsupportedType => f.write_str("UNSUPPORTED_TYPE"),
			ErrorKind::ForeignConstructionFailed => f.write_str("FOREIGN_CONSTRUCTION_FAILED"),
			ErrorKind::ForeignRuntime => f.write_str("FOREIGN_RUNTIME_ERROR"),
			ErrorKind::Encoding => f.write_str("ENCODING_ERROR"),
			ErrorKind::DepthExceeded => f.write_str("DEPTH_EXCEEDED"),
			ErrorKind::InvalidHandle => f.write_str("INVALID_HANDLE"),
			ErrorKind::Worker => f.write_str("WORKER_ERROR"),
		}
	}
}

/// A python exception, captured as text so it can outlive the interpreter lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignException {
	/// Qualified name of the exception type, e.g. `ValueError`.
	pub type_name: String,
	pub message: String,
	/// Formatted traceback, when the exception carried one.
	pub traceback: Option<String>,
}

impl Display for ForeignException {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if self.message.is_empty() {
			f.write_str(&self.type_name)?;
		} else {
			write!(f, "{}: {}", self.type_name, self.message)?;
		}
		if let Some(traceback) = &self.traceback {
			write!(f, "\n{}", traceback.trim_end())?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("unsupported type {type_name}: {detail}")]
	UnsupportedType {
		type_name: String,
		detail: String,
	},

	#[error("interpreter failed to construct {target} without raising an exception")]
	ForeignConstructionFailed {
		target: &'static str,
	},

	#[error("{0}")]
	ForeignRuntime(ForeignException),

	#[error("encoding error: {message}")]
	Encoding {
		message: String,
	},

	#[error("nesting deeper than {limit} levels")]
	DepthExceeded {
		limit: usize,
	},

	#[error("handle does not reference an object")]
	InvalidHandle,

	#[error(transparent)]
	Worker(#[from] WorkerError),
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::UnsupportedType {
				..
			} => ErrorKind::UnsupportedType,
			Error::ForeignConstructionFailed {
				..
			} => ErrorKind::ForeignConstructionFailed,
			Error::ForeignRuntime(_) => ErrorKind::ForeignRuntime,
			Error::Encoding {
				..
			} => ErrorKind::Encoding,
			Error::DepthExceeded {
				..
			} => ErrorKind::DepthExceeded,
			Error::InvalidHandle => ErrorKind::InvalidHandle,
			Error::Worker(_) => ErrorKind::Worker,
		}
	}

	pub(crate) fn unsupported(type_name: impl Into<String>, detail: impl Into<String>) -> Self {
		Error::UnsupportedType {
			type_name: type_name.into(),
			detail: detail.into(),
		}
	}

	/// The captured python exception, if this error carries one.
	pub fn exception(&self) -> Option<&ForeignException> {
		match self {
			Error::ForeignRuntime(exception) => Some(exception),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_exception_display_with_traceback() {
		let err = Error::ForeignRuntime(ForeignException {
			type_name: "ValueError".to_string(),
			message: "bad value".to_string(),
			traceback: Some("Traceback (most recent call last):\n  File \"<x>\", line 1\n".to_string()),
		});
		assert_eq!(
			err.to_string(),
			"ValueError: bad value\nTraceback (most recent call last):\n  File \"<x>\", line 1"
		);
		assert_eq!(err.kind(), ErrorKind::ForeignRuntime);
	}

	#[test]
	fn test_exception_display_without_message() {
		let exception = ForeignException {
			type_name: "StopIteration".to_string(),
			message: String::new(),
			traceback: None,
		};
		assert_eq!(exception.to_string(), "StopIteration");
	}

	#[test]
	fn test_unsupported_names_type() {
		let err = Error::unsupported("FailureTest", "FailureTest instance");
		assert_eq!(err.kind(), ErrorKind::UnsupportedType);
		assert!(err.to_string().contains("FailureTest"));
		assert!(err.exception().is_none());
	}

	#[test]
	fn test_worker_error_converts() {
		let err: Error = WorkerError::Stopped.into();
		assert_eq!(err.kind(), ErrorKind::Worker);
	}
}
