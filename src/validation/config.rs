//! Configuration validation functions

use super::ValidationError;

/// Log levels accepted as the default filter directive
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate the interval between passes
pub fn validate_interval_secs(interval_secs: u64) -> Result<(), ValidationError> {
	if interval_secs == 0 {
		return Err(ValidationError::ConfigError(
			"Sync interval must be a positive number of seconds".to_string(),
		));
	}
	Ok(())
}

/// Validate the recursion bound used by walks, copies and comparisons
pub fn validate_max_depth(max_depth: usize) -> Result<(), ValidationError> {
	if max_depth == 0 {
		return Err(ValidationError::ConfigError("max_depth must be at least 1".to_string()));
	}
	Ok(())
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
	if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
		return Err(ValidationError::ConfigError(format!(
			"Unknown log level: {}. Valid options: {}",
			level,
			LOG_LEVELS.join(", ")
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validate_interval() {
		assert!(validate_interval_secs(1).is_ok());
		assert!(validate_interval_secs(3600).is_ok());
		assert!(validate_interval_secs(0).is_err());
	}

	#[test]
	fn test_validate_max_depth() {
		assert!(validate_max_depth(1).is_ok());
		assert!(validate_max_depth(0).is_err());
	}

	#[test]
	fn test_validate_log_level() {
		assert!(validate_log_level("info").is_ok());
		assert!(validate_log_level("DEBUG").is_ok());
		let err = validate_log_level("verbose").unwrap_err();
		assert!(err.to_string().contains("Unknown log level"));
	}
}

// vim: ts=4
