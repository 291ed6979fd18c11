//! # mirrorsync - One-way Periodic Directory Mirroring
//!
//! Keeps a replica directory tree in step with a source tree. Each pass
//! creates missing directories, replaces structurally different ones, copies
//! files whose size differs and removes top-level replica entries that no
//! longer exist in the source. Every applied change is reported through an
//! [`ActionLogger`](logging::ActionLogger).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mirrorsync::engine::SyncEngine;
//! use mirrorsync::logging::TracingLogger;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = SyncEngine::new(Box::new(TracingLogger));
//!     let report = engine.sync("./source".as_ref(), "./replica".as_ref())?;
//!     println!("Applied {} actions", report.count());
//!     Ok(())
//! }
//! ```
//!
//! ## Running Periodically
//!
//! ```rust,ignore
//! use mirrorsync::engine::SyncEngine;
//! use mirrorsync::logging::TracingLogger;
//! use mirrorsync::scheduler::Scheduler;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = SyncEngine::new(Box::new(TracingLogger));
//!     let summary = Scheduler::new(engine, "./source".into(), "./replica".into(), Duration::from_secs(60))
//!         .run()
//!         .await;
//!     println!("{} passes", summary.passes);
//! }
//! ```

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod fs_ops;
pub mod logging;
pub mod scheduler;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use compare::TreeComparator;
pub use config::Config;
pub use engine::SyncEngine;
pub use error::SyncError;
pub use types::{EntryKind, SyncAction, SyncReport};

// vim: ts=4
