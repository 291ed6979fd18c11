//! Fixed-interval pass loop
//!
//! Runs a pass, waits for the interval, repeats. A failed pass is logged and
//! the loop carries on. Passes never overlap: the next wait only starts once
//! the previous pass has returned.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::SyncEngine;
use crate::error::SyncError;
use crate::logging::*;

/// Totals over the lifetime of a scheduler run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerSummary {
	pub passes: u64,
	pub failed_passes: u64,
	pub actions: u64,
}

pub struct Scheduler {
	engine: Arc<SyncEngine>,
	source: PathBuf,
	replica: PathBuf,
	interval: Duration,
	max_passes: Option<u64>,
}

impl Scheduler {
	pub fn new(engine: SyncEngine, source: PathBuf, replica: PathBuf, interval: Duration) -> Self {
		Scheduler { engine: Arc::new(engine), source, replica, interval, max_passes: None }
	}

	/// Stop after this many passes (None = run until a shutdown signal)
	pub fn max_passes(mut self, max_passes: Option<u64>) -> Self {
		self.max_passes = max_passes;
		self
	}

	/// Run until SIGINT/SIGTERM or the pass limit
	pub async fn run(self) -> SchedulerSummary {
		self.run_until(shutdown_signal()).await
	}

	/// Run until `shutdown` resolves or the pass limit is reached.
	///
	/// `shutdown` is only polled between passes; a running pass always completes.
	pub async fn run_until<F>(self, shutdown: F) -> SchedulerSummary
	where
		F: Future<Output = ()>,
	{
		tokio::pin!(shutdown);
		let mut summary = SchedulerSummary::default();

		loop {
			let engine = Arc::clone(&self.engine);
			let source = self.source.clone();
			let replica = self.replica.clone();
			let result = tokio::task::spawn_blocking(move || engine.sync(&source, &replica))
				.await
				.unwrap_or_else(|e| Err(SyncError::Task { message: e.to_string() }));

			summary.passes += 1;
			match result {
				Ok(report) => {
					summary.actions += report.count() as u64;
					info!(
						"Pass {} complete: {} actions in {:.2?}",
						summary.passes,
						report.count(),
						report.elapsed
					);
				}
				Err(e) => {
					summary.failed_passes += 1;
					error!("Pass {} failed: {}", summary.passes, e);
				}
			}

			if self.max_passes.map_or(false, |max| summary.passes >= max) {
				break;
			}

			tokio::select! {
				_ = tokio::time::sleep(self.interval) => {}
				_ = &mut shutdown => {
					info!("Shutdown requested, stopping after {} passes", summary.passes);
					break;
				}
			}
		}

		summary
	}
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() {
	let interrupt = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			warn!("Failed to setup SIGINT handler: {}. Process will not handle SIGINT gracefully.", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		use tokio::signal::unix::{signal, SignalKind};
		match signal(SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(e) => {
				warn!(
					"Failed to setup SIGTERM handler: {}. Process will not handle SIGTERM gracefully.",
					e
				);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = interrupt => debug!("Received SIGINT"),
		_ = terminate => debug!("Received SIGTERM"),
	}
}

// vim: ts=4
