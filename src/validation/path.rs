//! Path validation functions

use std::fs;
use std::path::Path;

use super::ValidationError;

/// Check if path is within a root directory
///
/// A path is considered within itself.
pub fn is_path_within_root(path: &Path, root: &Path) -> bool {
	path.starts_with(root)
}

/// Validate that `path` exists and is a directory (symlinks to directories are accepted)
pub fn validate_root_dir(path: &Path) -> Result<(), ValidationError> {
	match fs::metadata(path) {
		Ok(meta) if meta.is_dir() => Ok(()),
		Ok(_) => Err(ValidationError::PathError("not a directory".to_string())),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
			Err(ValidationError::PathError("does not exist".to_string()))
		}
		Err(e) => Err(ValidationError::PathError(format!("cannot access: {}", e))),
	}
}

/// Validate that neither root contains the other
///
/// Both paths must exist. They are compared in canonical form so that
/// relative paths and symlinked roots are caught too.
pub fn validate_roots_disjoint(source: &Path, replica: &Path) -> Result<(), ValidationError> {
	let canonical = |p: &Path| {
		fs::canonicalize(p).map_err(|e| {
			ValidationError::PathError(format!("cannot resolve {}: {}", p.display(), e))
		})
	};
	let source = canonical(source)?;
	let replica = canonical(replica)?;

	if source == replica {
		return Err(ValidationError::PathError(
			"source and replica are the same directory".to_string(),
		));
	}
	if is_path_within_root(&replica, &source) {
		return Err(ValidationError::PathError(format!(
			"replica {:?} lies inside source {:?}",
			replica, source
		)));
	}
	if is_path_within_root(&source, &replica) {
		return Err(ValidationError::PathError(format!(
			"source {:?} lies inside replica {:?}",
			source, replica
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn test_is_path_within_root_true() {
		let root = Path::new("/home/user/sync");
		assert!(is_path_within_root(Path::new("/home/user/sync/file.txt"), root));
		assert!(is_path_within_root(Path::new("/home/user/sync/dir/file.txt"), root));
	}

	#[test]
	fn test_is_path_within_root_false() {
		let root = Path::new("/home/user/sync");
		assert!(!is_path_within_root(Path::new("/home/user/other/file.txt"), root));
		assert!(!is_path_within_root(Path::new("/home/user/syncer"), root));
	}

	#[test]
	fn test_validate_root_dir_ok() {
		let dir = TempDir::new().unwrap();
		assert!(validate_root_dir(dir.path()).is_ok());
	}

	#[test]
	fn test_validate_root_dir_missing() {
		let dir = TempDir::new().unwrap();
		let result = validate_root_dir(&dir.path().join("missing"));
		assert_eq!(result, Err(ValidationError::PathError("does not exist".to_string())));
	}

	#[test]
	fn test_validate_root_dir_file() {
		let dir = TempDir::new().unwrap();
		let file = dir.path().join("file.txt");
		fs::write(&file, b"data").unwrap();
		let result = validate_root_dir(&file);
		assert_eq!(result, Err(ValidationError::PathError("not a directory".to_string())));
	}

	#[test]
	fn test_validate_roots_disjoint_ok() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		assert!(validate_roots_disjoint(a.path(), b.path()).is_ok());
	}

	#[test]
	fn test_validate_roots_same_dir() {
		let a = TempDir::new().unwrap();
		let err = validate_roots_disjoint(a.path(), a.path()).unwrap_err();
		assert!(err.message().contains("same directory"));
	}

	#[test]
	fn test_validate_roots_nested() {
		let a = TempDir::new().unwrap();
		let inner = a.path().join("inner");
		fs::create_dir(&inner).unwrap();

		let err = validate_roots_disjoint(a.path(), &inner).unwrap_err();
		assert!(err.message().contains("inside source"));

		let err = validate_roots_disjoint(&inner, a.path()).unwrap_err();
		assert!(err.message().contains("inside replica"));
	}
}

// vim: ts=4
