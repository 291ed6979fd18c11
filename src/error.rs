//! Error types for mirroring operations

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::validation::ValidationError;

/// Main error type for sync operations
#[derive(Debug)]
pub enum SyncError {
	/// A source or replica root is missing, not a directory, or overlaps the other root
	InvalidRoot { path: PathBuf, reason: String },

	/// Filesystem operation failed
	Io { op: &'static str, path: PathBuf, source: io::Error },

	/// Tree is deeper than the configured limit (possible symlink loop)
	DepthExceeded { path: PathBuf, limit: usize },

	/// Invalid configuration
	InvalidConfig { message: String },

	/// Validation failed (nested)
	Validation(ValidationError),

	/// Log subscriber could not be installed
	Logging { message: String },

	/// Background task failed to complete
	Task { message: String },
}

impl SyncError {
	pub fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
		SyncError::Io { op, path: path.to_path_buf(), source }
	}

	pub fn invalid_root(path: &Path, reason: impl Into<String>) -> Self {
		SyncError::InvalidRoot { path: path.to_path_buf(), reason: reason.into() }
	}
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::InvalidRoot { path, reason } => {
				write!(f, "Invalid root {}: {}", path.display(), reason)
			}
			SyncError::Io { op, path, source } => {
				write!(f, "Failed to {} {}: {}", op, path.display(), source)
			}
			SyncError::DepthExceeded { path, limit } => {
				write!(f, "Directory depth limit {} exceeded at {}", limit, path.display())
			}
			SyncError::InvalidConfig { message } => {
				write!(f, "Invalid configuration: {}", message)
			}
			SyncError::Validation(e) => write!(f, "{}", e),
			SyncError::Logging { message } => write!(f, "Logging setup failed: {}", message),
			SyncError::Task { message } => write!(f, "Sync task failed: {}", message),
		}
	}
}

impl Error for SyncError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			SyncError::Io { source, .. } => Some(source),
			SyncError::Validation(e) => Some(e),
			_ => None,
		}
	}
}

impl From<ValidationError> for SyncError {
	fn from(e: ValidationError) -> Self {
		SyncError::Validation(e)
	}
}

/// Reasons a structural comparison could not classify an entry.
///
/// Never surfaced to callers: the comparator treats each of these as a mismatch.
#[derive(Debug)]
pub enum ComparisonError {
	/// Directory listing failed
	ListFailed { path: PathBuf, source: io::Error },

	/// Entry type could not be determined (vanished, permission denied)
	Unclassifiable { path: PathBuf, source: io::Error },

	/// Recursion went past the depth limit
	TooDeep { path: PathBuf, limit: usize },
}

impl fmt::Display for ComparisonError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ComparisonError::ListFailed { path, source } => {
				write!(f, "Cannot list {}: {}", path.display(), source)
			}
			ComparisonError::Unclassifiable { path, source } => {
				write!(f, "Cannot classify {}: {}", path.display(), source)
			}
			ComparisonError::TooDeep { path, limit } => {
				write!(f, "Comparison depth limit {} reached at {}", limit, path.display())
			}
		}
	}
}

impl Error for ComparisonError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			ComparisonError::ListFailed { source, .. }
			| ComparisonError::Unclassifiable { source, .. } => Some(source),
			ComparisonError::TooDeep { .. } => None,
		}
	}
}


// vim: ts=4
