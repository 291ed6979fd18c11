//! Filesystem primitives used by the sync engine
//!
//! Every failure is wrapped into `SyncError::Io` with the operation and path.

use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;

use crate::error::SyncError;
use crate::logging::*;
use crate::types::{DirectorySnapshot, EntryKind};

/// Copy a single file, overwriting `dst`, and carry over access/modification times
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, SyncError> {
	let bytes = fs::copy(src, dst).map_err(|e| SyncError::io("copy", src, e))?;
	let meta = fs::metadata(src).map_err(|e| SyncError::io("stat", src, e))?;
	set_times_like(&meta, dst)?;
	Ok(bytes)
}

/// Recursively copy the directory `src` to the not yet existing `dst`.
///
/// Regular files and directories are copied; symlinks and special files are
/// skipped. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path, max_depth: usize) -> Result<u64, SyncError> {
	copy_tree_at(src, dst, 0, max_depth)
}

/// Like [`copy_tree`], for a `src` that already sits `depth` levels below its root
pub fn copy_tree_at(src: &Path, dst: &Path, depth: usize, max_depth: usize) -> Result<u64, SyncError> {
	if depth > max_depth {
		return Err(SyncError::DepthExceeded { path: src.to_path_buf(), limit: max_depth });
	}

	let snapshot = DirectorySnapshot::read(src)?;
	fs::create_dir(dst).map_err(|e| SyncError::io("create", dst, e))?;

	let mut copied = 0;
	for (name, kind) in snapshot.iter() {
		let from = src.join(name);
		let to = dst.join(name);
		match kind {
			EntryKind::File => {
				copy_file(&from, &to)?;
				copied += 1;
			}
			EntryKind::Dir => copied += copy_tree_at(&from, &to, depth + 1, max_depth)?,
			EntryKind::Other => warn!("Skipping special file {}", from.display()),
		}
	}

	// Children are written first, so the directory times stick
	let meta = fs::metadata(src).map_err(|e| SyncError::io("stat", src, e))?;
	set_times_like(&meta, dst)?;

	Ok(copied)
}

/// Remove whatever is at `path`: real directories recursively, anything else as a file
pub fn remove_entry(path: &Path) -> Result<EntryKind, SyncError> {
	let kind = EntryKind::of(path).map_err(|e| SyncError::io("stat", path, e))?;
	match kind {
		EntryKind::Dir => fs::remove_dir_all(path),
		EntryKind::File | EntryKind::Other => fs::remove_file(path),
	}
	.map_err(|e| SyncError::io("remove", path, e))?;
	Ok(kind)
}

fn set_times_like(meta: &fs::Metadata, dst: &Path) -> Result<(), SyncError> {
	let accessed = FileTime::from_last_access_time(meta);
	let modified = FileTime::from_last_modification_time(meta);
	set_file_times(dst, accessed, modified).map_err(|e| SyncError::io("set times on", dst, e))
}


// vim: ts=4
