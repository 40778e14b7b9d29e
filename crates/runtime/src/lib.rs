// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Execution-lock discipline for the embedded interpreter.
//!
//! - [`GlobalLock`]: runs a closure while the interpreter lock is held, from any thread
//! - [`MainThread`]: a designated OS thread that executes work handed to it, one request at a time

pub mod config;
pub mod error;
pub mod lock;
pub mod thread;

pub use config::WorkerConfig;
pub use error::WorkerError;
pub use lock::GlobalLock;
pub use thread::MainThread;
