//! Configuration for mirrorsync
//!
//! The configuration follows a priority chain:
//! 1. Built-in defaults (Config::default())
//! 2. Config file (`--config`; `.toml` is TOML, anything else JSON5)
//! 3. CLI arguments (highest priority)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::compare::DEFAULT_MAX_DEPTH;
use crate::error::SyncError;
use crate::validation::{self, ValidationError, Validator};

/// Runtime configuration of the mirroring loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	/// Directory mirrored from
	pub source: PathBuf,

	/// Directory kept in sync with the source
	pub replica: PathBuf,

	/// Seconds to wait between passes
	pub interval_secs: u64,

	/// Append-only log file, in addition to the console
	pub log_file: Option<PathBuf>,

	/// Default log filter (trace, debug, info, warn, error)
	pub log_level: String,

	/// Recursion bound for walks, copies and comparisons
	pub max_depth: usize,

	/// Run a single pass and exit
	pub once: bool,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			source: PathBuf::new(),
			replica: PathBuf::new(),
			interval_secs: 60,
			log_file: None,
			log_level: "info".to_string(),
			max_depth: DEFAULT_MAX_DEPTH,
			once: false,
		}
	}
}

impl Config {
	/// Load a config file, choosing the parser by extension
	pub fn load(path: &Path) -> Result<Self, SyncError> {
		let text = fs::read_to_string(path).map_err(|e| SyncError::io("read config", path, e))?;
		let is_toml = path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
		if is_toml {
			Self::from_toml_str(&text)
		} else {
			Self::from_json5_str(&text)
		}
	}

	pub fn from_toml_str(text: &str) -> Result<Self, SyncError> {
		toml::from_str(text).map_err(|e| SyncError::InvalidConfig { message: e.to_string() })
	}

	pub fn from_json5_str(text: &str) -> Result<Self, SyncError> {
		json5::from_str(text).map_err(|e| SyncError::InvalidConfig { message: e.to_string() })
	}

	pub fn interval(&self) -> Duration {
		Duration::from_secs(self.interval_secs)
	}

	/// Apply CLI-level overrides on top of this configuration
	pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
		if let Some(source) = overrides.source {
			self.source = source;
		}
		if let Some(replica) = overrides.replica {
			self.replica = replica;
		}
		if let Some(interval_secs) = overrides.interval_secs {
			self.interval_secs = interval_secs;
		}
		if let Some(log_file) = overrides.log_file {
			self.log_file = Some(log_file);
		}
		if let Some(log_level) = overrides.log_level {
			self.log_level = log_level;
		}
		if let Some(max_depth) = overrides.max_depth {
			self.max_depth = max_depth;
		}
		if overrides.once {
			self.once = true;
		}
		self
	}
}

impl Validator for Config {
	fn validate(&self) -> Result<(), ValidationError> {
		if self.source.as_os_str().is_empty() {
			return Err(ValidationError::ConfigError("source directory is required".to_string()));
		}
		if self.replica.as_os_str().is_empty() {
			return Err(ValidationError::ConfigError("replica directory is required".to_string()));
		}
		validation::validate_interval_secs(self.interval_secs)?;
		validation::validate_max_depth(self.max_depth)?;
		validation::validate_log_level(&self.log_level)?;
		Ok(())
	}
}

/// Values given on the command line; `None` leaves the lower layer untouched
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub source: Option<PathBuf>,
	pub replica: Option<PathBuf>,
	pub interval_secs: Option<u64>,
	pub log_file: Option<PathBuf>,
	pub log_level: Option<String>,
	pub max_depth: Option<usize>,
	pub once: bool,
}


// vim: ts=4
