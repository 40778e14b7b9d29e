// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Exchange of host values with an embedded python interpreter.
//!
//! [`Value`]s become interpreter objects owned by [`Handle`]s and come back the same
//! way. Every reference a handle owns is given back exactly once, and every interpreter
//! exception is turned into an [`Error`] with the interpreter's error state cleared.

pub mod config;
pub mod convert;
pub mod error;
pub mod handle;
pub mod module;

pub use config::ConvertConfig;
pub use convert::{Converter, to_foreign, to_foreign_in, to_foreign_on, to_host, to_host_in, to_host_on};
pub use error::{Error, ErrorKind, ForeignException, Result};
pub use handle::Handle;
pub use module::{Module, append_sys_path, invoke};
pub use pybridge_runtime::{GlobalLock, MainThread, WorkerConfig, WorkerError};
pub use pybridge_type::{Blob, Map, Timestamp, Type, Value};
