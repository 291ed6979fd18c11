//! Logging prelude and sinks.
//!
//! Library code logs through the re-exported tracing macros:
//!
//! ```ignore
//! use crate::logging::*;
//!
//! info!("This is an info message");
//! debug!("Debug information");
//! ```
//!
//! Applied sync actions go through an injected [`ActionLogger`] instead, so an
//! embedding program decides where those records end up.

pub use tracing::{debug, error, info, warn};

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::SyncError;

/// Receives one human readable line per applied sync action
pub trait ActionLogger: Send + Sync {
	fn info(&self, message: &str);
}

/// Forwards action records to the tracing subscriber at INFO level
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl ActionLogger for TracingLogger {
	fn info(&self, message: &str) {
		info!(target: "mirrorsync::action", "{}", message);
	}
}

/// Keeps action records in memory; clones share the same buffer
#[derive(Clone, Debug, Default)]
pub struct RecordingLogger {
	lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of all recorded lines
	pub fn lines(&self) -> Vec<String> {
		match self.lines.lock() {
			Ok(guard) => guard.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}

	pub fn clear(&self) {
		match self.lines.lock() {
			Ok(mut guard) => guard.clear(),
			Err(poisoned) => poisoned.into_inner().clear(),
		}
	}
}

impl ActionLogger for RecordingLogger {
	fn info(&self, message: &str) {
		match self.lines.lock() {
			Ok(mut guard) => guard.push(message.to_string()),
			Err(poisoned) => poisoned.into_inner().push(message.to_string()),
		}
	}
}

/// Initialize the tracing subscriber.
///
/// Lines go to stderr and, when `log_file` is given, are appended to that file
/// as well. Both sinks use the same format so they carry identical content.
/// `RUST_LOG` overrides `level`:
///
/// ```bash
/// RUST_LOG=debug mirrorsync src dst 10 sync.log
/// RUST_LOG=mirrorsync::engine=trace mirrorsync src dst 10 sync.log
/// ```
pub fn init(level: &str, log_file: Option<&Path>) -> Result<(), SyncError> {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(level))
		.map_err(|e| SyncError::Logging { message: e.to_string() })?;

	let console = fmt::layer().with_ansi(false).with_target(false).with_writer(std::io::stderr);

	let file_layer = match log_file {
		Some(path) => {
			let file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(path)
				.map_err(|e| SyncError::io("open log", path, e))?;
			Some(fmt::layer().with_ansi(false).with_target(false).with_writer(Mutex::new(file)))
		}
		None => None,
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(console)
		.with(file_layer)
		.try_init()
		.map_err(|e| SyncError::Logging { message: e.to_string() })
}


// vim: ts=4
