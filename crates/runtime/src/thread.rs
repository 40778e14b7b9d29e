// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Designated interpreter thread.
//!
//! Work submitted from arbitrary threads is handed to one dedicated OS thread, executed
//! there under the interpreter lock, and the result is handed back over a one-shot
//! channel. The submitting thread blocks until the answer arrives.

use std::{
	any::Any,
	panic::{AssertUnwindSafe, catch_unwind},
	thread::{self, JoinHandle, ThreadId},
};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use pyo3::Python;
use tracing::{debug, warn};

use crate::{config::WorkerConfig, error::WorkerError, lock::GlobalLock};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Message types for worker communication.
enum WorkerRequest {
	Run(Job),
	Stop,
}

static GLOBAL: OnceCell<MainThread> = OnceCell::new();

/// Interpreter work running in its own OS thread.
pub struct MainThread {
	tx: Sender<WorkerRequest>,
	thread_id: ThreadId,
	handle: Mutex<Option<JoinHandle<()>>>,
}

impl MainThread {
	/// Create a new designated thread.
	pub fn new(config: WorkerConfig) -> Result<Self, WorkerError> {
		let (tx, rx) = if config.channel_capacity == 0 {
			unbounded()
		} else {
			bounded(config.channel_capacity)
		};

		let thread_name = config.thread_name;
		let name = thread_name.clone();
		let handle = thread::Builder::new()
			.name(thread_name)
			.spawn(move || {
				debug!(thread = %name, "designated interpreter thread starting");
				Self::worker_thread(rx);
				debug!(thread = %name, "designated interpreter thread stopped");
			})
			.map_err(|e| WorkerError::Spawn(e.to_string()))?;

		Ok(Self {
			tx,
			thread_id: handle.thread().id(),
			handle: Mutex::new(Some(handle)),
		})
	}

	/// The process-wide designated thread, started on first use.
	pub fn global() -> Result<&'static MainThread, WorkerError> {
		GLOBAL.get_or_try_init(|| Self::new(WorkerConfig::default()))
	}

	/// Whether the calling thread is this designated thread.
	pub fn is_current(&self) -> bool {
		thread::current().id() == self.thread_id
	}

	/// Execute `f` on the designated thread under the interpreter lock and wait for its
	/// result.
	///
	/// Called from the designated thread itself, `f` runs inline. If the caller holds the
	/// lock it is given up while waiting, so the designated thread can take it.
	pub fn run<F, R>(&self, f: F) -> Result<R, WorkerError>
	where
		F: for<'py> FnOnce(Python<'py>) -> R + Send + 'static,
		R: Send + 'static,
	{
		if self.is_current() {
			return Ok(GlobalLock::with(f));
		}

		let (response, rx) = bounded(1);
		let job: Job = Box::new(move || {
			let result = catch_unwind(AssertUnwindSafe(|| GlobalLock::with(f)))
				.map_err(|panic| WorkerError::Panicked(panic_message(panic)));
			response.send(result).ok();
		});

		let tx = &self.tx;
		GlobalLock::suspend(|| tx.send(WorkerRequest::Run(job))).map_err(|_| WorkerError::Stopped)?;

		GlobalLock::suspend(|| rx.recv()).map_err(|_| WorkerError::Stopped)?
	}

	/// Stop the worker thread.
	pub fn stop(&self) {
		self.tx.send(WorkerRequest::Stop).ok();

		let handle = self.handle.lock().take();
		if let Some(handle) = handle {
			if self.is_current() {
				// joining ourselves would never return
				return;
			}
			if GlobalLock::suspend(|| handle.join()).is_err() {
				warn!("designated interpreter thread terminated abnormally");
			}
		}
	}

	/// Worker thread main loop.
	fn worker_thread(rx: Receiver<WorkerRequest>) {
		while let Ok(req) = rx.recv() {
			match req {
				WorkerRequest::Run(job) => job(),
				WorkerRequest::Stop => break,
			}
		}
	}
}

impl Drop for MainThread {
	fn drop(&mut self) {
		self.stop();
	}
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
	if let Some(s) = panic.downcast_ref::<&str>() {
		s.to_string()
	} else if let Some(s) = panic.downcast_ref::<String>() {
		s.clone()
	} else {
		"Unknown panic".to_string()
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::{
			Arc,
			atomic::{AtomicUsize, Ordering},
		},
		thread,
		time::Duration,
	};

	use super::*;

	#[test]
	fn test_run_executes_on_designated_thread() {
		let main = MainThread::new(WorkerConfig::default().thread_name("test-main")).unwrap();

		let name = main.run(|_| thread::current().name().map(str::to_string)).unwrap();
		assert_eq!(name.as_deref(), Some("test-main"));
	}

	#[test]
	fn test_run_holds_lock() {
		let main = MainThread::new(WorkerConfig::default()).unwrap();
		assert!(main.run(|_| GlobalLock::is_held()).unwrap());
	}

	#[test]
	fn test_nested_run_is_inline() {
		let main = Arc::new(MainThread::new(WorkerConfig::default()).unwrap());
		let inner = Arc::clone(&main);

		let result = main.run(move |_| inner.run(|_| 41).map(|v| v + 1)).unwrap();
		assert_eq!(result, Ok(42));
	}

	#[test]
	fn test_panic_is_reported_and_worker_survives() {
		let main = MainThread::new(WorkerConfig::default()).unwrap();

		let result: Result<(), _> = main.run(|_| panic!("job failed"));
		assert_eq!(result, Err(WorkerError::Panicked("job failed".to_string())));

		assert_eq!(main.run(|_| 1).unwrap(), 1);
	}

	#[test]
	fn test_run_after_stop() {
		let main = MainThread::new(WorkerConfig::default()).unwrap();
		main.stop();

		assert_eq!(main.run(|_| ()), Err(WorkerError::Stopped));
	}

	#[test]
	fn test_run_while_holding_lock() {
		let main = MainThread::new(WorkerConfig::default().channel_capacity(1)).unwrap();

		let result = GlobalLock::with(|_| main.run(|_| 5));
		assert_eq!(result, Ok(5));
	}

	#[test]
	fn test_run_while_holding_lock_outside_guard() {
		let (tx, rx) = bounded(1);
		thread::spawn(move || {
			let main = MainThread::new(WorkerConfig::default()).unwrap();
			let result = Python::with_gil(|_| main.run(|_| 5));
			tx.send(result).ok();
		});

		assert_eq!(rx.recv_timeout(Duration::from_secs(10)), Ok(Ok(5)));
	}

	#[test]
	fn test_concurrent_callers() {
		let main = Arc::new(MainThread::new(WorkerConfig::default()).unwrap());
		let counter = Arc::new(AtomicUsize::new(0));

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let main = Arc::clone(&main);
				let counter = Arc::clone(&counter);
				thread::spawn(move || {
					for _ in 0..50 {
						let counter = Arc::clone(&counter);
						main.run(move |_| counter.fetch_add(1, Ordering::SeqCst)).unwrap();
					}
				})
			})
			.collect();

		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(counter.load(Ordering::SeqCst), 400);
	}

	#[test]
	fn test_global_is_shared() {
		let a = MainThread::global().unwrap();
		let b = MainThread::global().unwrap();
		assert!(std::ptr::eq(a, b));
		assert!(!a.is_current());
	}
}
