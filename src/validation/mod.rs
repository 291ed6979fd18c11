//! Setting and root checks
//!
//! [`config`] covers the numeric and textual settings, [`path`] the two
//! roots. The engine repeats the root checks at the start of every pass.

use std::error::Error;
use std::fmt;

pub mod config;
pub mod path;

pub use config::*;
pub use path::*;

/// A rejected setting or root, with a short human readable reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
	ConfigError(String),
	/// Root missing, not a directory, or nested in the other root
	PathError(String),
}

impl ValidationError {
	/// Reason only, as embedded in `SyncError::InvalidRoot`
	pub fn message(&self) -> &str {
		match self {
			ValidationError::ConfigError(msg) | ValidationError::PathError(msg) => msg,
		}
	}
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValidationError::ConfigError(msg) => write!(f, "Config validation error: {}", msg),
			ValidationError::PathError(msg) => write!(f, "Path validation error: {}", msg),
		}
	}
}

impl Error for ValidationError {}

/// Implemented by settings that can be checked as a whole
pub trait Validator {
	/// Reports the first invalid field
	fn validate(&self) -> Result<(), ValidationError>;
}


// vim: ts=4
