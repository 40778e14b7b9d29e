// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
	#[error("failed to spawn designated thread: {0}")]
	Spawn(String),

	#[error("designated thread has stopped")]
	Stopped,

	#[error("job panicked on designated thread: {0}")]
	Panicked(String),
}
