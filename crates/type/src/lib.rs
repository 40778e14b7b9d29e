// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Host-side data model.
//!
//! [`Value`] is the tagged union that crosses the boundary to the embedded
//! interpreter. It has no knowledge of the interpreter itself.

pub mod value;

pub use value::{Blob, Map, Timestamp, Type, Value};
