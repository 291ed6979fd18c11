//! Structural comparison of two directory trees
//!
//! Two trees are structurally equal when every directory level holds the same
//! entry names with the same entry kinds. File contents and sizes are not
//! looked at here; the engine applies its own per-file policy.

use std::io;
use std::path::Path;

use crate::error::{ComparisonError, SyncError};
use crate::logging::*;
use crate::types::{DirectorySnapshot, EntryKind};

/// Default recursion bound for comparisons, walks and bulk copies
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Read-only structural comparator
#[derive(Clone, Copy, Debug)]
pub struct TreeComparator {
	max_depth: usize,
}

impl TreeComparator {
	pub fn new(max_depth: usize) -> Self {
		TreeComparator { max_depth }
	}

	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Returns true if `a` and `b` are structurally identical.
	///
	/// Anything that prevents a clean comparison (listing failure, vanished
	/// entry, depth limit) counts as a mismatch.
	pub fn equal(&self, a: &Path, b: &Path) -> bool {
		match self.compare(a, b, 0) {
			Ok(eq) => eq,
			Err(e) => {
				debug!("Treating {} and {} as different: {}", a.display(), b.display(), e);
				false
			}
		}
	}

	/// Compare two trees that already sit `depth` levels below their roots.
	///
	/// Listing and classification failures still count as a mismatch, but
	/// running out of depth is an error: the trees may well be identical, and
	/// the caller must not act on an answer that was never computed.
	pub fn equal_at(&self, a: &Path, b: &Path, depth: usize) -> Result<bool, SyncError> {
		match self.compare(a, b, depth) {
			Ok(eq) => Ok(eq),
			Err(ComparisonError::TooDeep { path, limit }) => Err(SyncError::DepthExceeded { path, limit }),
			Err(e) => {
				debug!("Treating {} and {} as different: {}", a.display(), b.display(), e);
				Ok(false)
			}
		}
	}

	fn compare(&self, a: &Path, b: &Path, depth: usize) -> Result<bool, ComparisonError> {
		if depth > self.max_depth {
			return Err(ComparisonError::TooDeep { path: a.to_path_buf(), limit: self.max_depth });
		}

		let left = snapshot(a)?;
		let right = snapshot(b)?;

		if left.only_in(&right).next().is_some() || right.only_in(&left).next().is_some() {
			return Ok(false);
		}

		// Same name set; kinds must agree entry by entry
		for (name, kind) in left.iter() {
			if right.kind(name) != Some(kind) {
				return Ok(false);
			}
		}

		for name in left.dirs() {
			if !self.compare(&a.join(name), &b.join(name), depth + 1)? {
				return Ok(false);
			}
		}

		Ok(true)
	}
}

impl Default for TreeComparator {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_DEPTH)
	}
}

fn snapshot(dir: &Path) -> Result<DirectorySnapshot, ComparisonError> {
	let kind = EntryKind::of(dir)
		.map_err(|source| ComparisonError::Unclassifiable { path: dir.to_path_buf(), source })?;
	if kind != EntryKind::Dir {
		return Err(ComparisonError::ListFailed {
			path: dir.to_path_buf(),
			source: io::Error::new(io::ErrorKind::Other, "not a directory"),
		});
	}

	DirectorySnapshot::read(dir).map_err(|e| match e {
		SyncError::Io { op: "stat", path, source } => {
			ComparisonError::Unclassifiable { path, source }
		}
		SyncError::Io { path, source, .. } => ComparisonError::ListFailed { path, source },
		other => ComparisonError::ListFailed {
			path: dir.to_path_buf(),
			source: io::Error::new(io::ErrorKind::Other, other.to_string()),
		},
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::TempDir;

	fn tree(root: &Path, dirs: &[&str], files: &[&str]) {
		for d in dirs {
			fs::create_dir_all(root.join(d)).unwrap();
		}
		for f in files {
			fs::write(root.join(f), b"x").unwrap();
		}
	}

	#[test]
	fn test_empty_dirs_are_equal() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		assert!(TreeComparator::default().equal(a.path(), b.path()));
	}

	#[test]
	fn test_dir_equals_itself() {
		let a = TempDir::new().unwrap();
		tree(a.path(), &["x/y"], &["x/y/f", "g"]);
		assert!(TreeComparator::default().equal(a.path(), a.path()));
	}

	#[test]
	fn test_file_contents_are_ignored() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		fs::write(a.path().join("f"), b"short").unwrap();
		fs::write(b.path().join("f"), b"much longer content").unwrap();
		assert!(TreeComparator::default().equal(a.path(), b.path()));
	}

	#[test]
	fn test_type_mismatch_is_unequal() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		tree(a.path(), &["n"], &[]);
		tree(b.path(), &[], &["n"]);
		assert!(!TreeComparator::default().equal(a.path(), b.path()));
	}

	#[test]
	fn test_missing_side_is_unequal() {
		let a = TempDir::new().unwrap();
		assert!(!TreeComparator::default().equal(a.path(), &a.path().join("missing")));
	}

	#[test]
	fn test_file_instead_of_dir_root_is_unequal() {
		let a = TempDir::new().unwrap();
		let file = a.path().join("f");
		fs::write(&file, b"x").unwrap();
		let b = TempDir::new().unwrap();
		assert!(!TreeComparator::default().equal(b.path(), &file));
	}

	#[test]
	fn test_depth_limit_is_unequal() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		tree(a.path(), &["1/2/3"], &[]);
		tree(b.path(), &["1/2/3"], &[]);

		assert!(TreeComparator::new(3).equal(a.path(), b.path()));
		assert!(!TreeComparator::new(2).equal(a.path(), b.path()));
	}

	#[test]
	fn test_equal_at_reports_depth_limit() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		tree(a.path(), &["1/2"], &[]);
		tree(b.path(), &["1/2"], &[]);

		// Starting one level down, "2" lands on depth 3
		assert!(TreeComparator::new(3).equal_at(a.path(), b.path(), 1).unwrap());
		let err = TreeComparator::new(2).equal_at(a.path(), b.path(), 1).unwrap_err();
		assert!(matches!(err, SyncError::DepthExceeded { limit: 2, .. }));
	}

	#[test]
	fn test_equal_at_mismatch_is_not_an_error() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		tree(a.path(), &["x"], &[]);
		assert!(!TreeComparator::default().equal_at(a.path(), b.path(), 0).unwrap());
		assert!(!TreeComparator::default().equal_at(a.path(), &b.path().join("gone"), 0).unwrap());
	}
}

// vim: ts=4
