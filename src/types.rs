//! Core data types shared by the comparator and the sync engine

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SyncError;

/// Kind of a directory entry, determined without following symlinks
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryKind {
	File,
	Dir,
	/// Symlinks, sockets, FIFOs and device nodes
	Other,
}

impl EntryKind {
	pub fn from_file_type(ft: fs::FileType) -> Self {
		if ft.is_dir() {
			EntryKind::Dir
		} else if ft.is_file() {
			EntryKind::File
		} else {
			EntryKind::Other
		}
	}

	/// Classify the entry at `path` (lstat semantics)
	pub fn of(path: &Path) -> std::io::Result<Self> {
		fs::symlink_metadata(path).map(|m| Self::from_file_type(m.file_type()))
	}
}

impl fmt::Display for EntryKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EntryKind::File => write!(f, "file"),
			EntryKind::Dir => write!(f, "directory"),
			EntryKind::Other => write!(f, "special file"),
		}
	}
}

/// Entry names of one directory at one instant, sorted by name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
	entries: BTreeMap<OsString, EntryKind>,
}

impl DirectorySnapshot {
	/// List `dir` and classify each entry
	pub fn read(dir: &Path) -> Result<Self, SyncError> {
		let mut entries = BTreeMap::new();
		let rd = fs::read_dir(dir).map_err(|e| SyncError::io("list", dir, e))?;
		for entry in rd {
			let entry = entry.map_err(|e| SyncError::io("list", dir, e))?;
			let ft = entry.file_type().map_err(|e| SyncError::io("stat", &entry.path(), e))?;
			entries.insert(entry.file_name(), EntryKind::from_file_type(ft));
		}
		Ok(DirectorySnapshot { entries })
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn kind(&self, name: &OsString) -> Option<EntryKind> {
		self.entries.get(name).copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&OsString, EntryKind)> {
		self.entries.iter().map(|(n, k)| (n, *k))
	}

	pub fn dirs(&self) -> impl Iterator<Item = &OsString> {
		self.entries.iter().filter(|(_, k)| **k == EntryKind::Dir).map(|(n, _)| n)
	}

	pub fn files(&self) -> impl Iterator<Item = &OsString> {
		self.entries.iter().filter(|(_, k)| **k == EntryKind::File).map(|(n, _)| n)
	}

	/// Names present here but absent from `other`
	pub fn only_in<'a>(&'a self, other: &'a DirectorySnapshot) -> impl Iterator<Item = &'a OsString> {
		self.entries.keys().filter(move |n| !other.entries.contains_key(*n))
	}
}

/// A mutating action applied to the replica.
///
/// Paths are relative to the replica root. Entries that need no change
/// produce no action at all.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SyncAction {
	CreateDir(PathBuf),
	ReplaceDir(PathBuf),
	CopyFile(PathBuf),
	DeleteFile(PathBuf),
	DeleteDir(PathBuf),
}

impl SyncAction {
	pub fn path(&self) -> &Path {
		match self {
			SyncAction::CreateDir(p)
			| SyncAction::ReplaceDir(p)
			| SyncAction::CopyFile(p)
			| SyncAction::DeleteFile(p)
			| SyncAction::DeleteDir(p) => p,
		}
	}

	pub fn is_delete(&self) -> bool {
		matches!(self, SyncAction::DeleteFile(_) | SyncAction::DeleteDir(_))
	}
}

impl fmt::Display for SyncAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncAction::CreateDir(p) => write!(f, "Directory created: {}", p.display()),
			SyncAction::ReplaceDir(p) => write!(f, "Directory updated: {}", p.display()),
			SyncAction::CopyFile(p) => write!(f, "File created/updated: {}", p.display()),
			SyncAction::DeleteFile(p) => write!(f, "File deleted: {}", p.display()),
			SyncAction::DeleteDir(p) => write!(f, "Directory deleted: {}", p.display()),
		}
	}
}

/// Outcome of one completed pass
#[derive(Clone, Debug, Default)]
pub struct SyncReport {
	pub actions: Vec<SyncAction>,
	pub elapsed: Duration,
}

impl SyncReport {
	/// Number of applied actions
	pub fn count(&self) -> usize {
		self.actions.len()
	}

	pub fn is_noop(&self) -> bool {
		self.actions.is_empty()
	}

	/// Log lines in the order they were emitted
	pub fn lines(&self) -> Vec<String> {
		self.actions.iter().map(|a| a.to_string()).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn test_action_display() {
		assert_eq!(SyncAction::CreateDir(PathBuf::from("a")).to_string(), "Directory created: a");
		assert_eq!(SyncAction::ReplaceDir(PathBuf::from("a")).to_string(), "Directory updated: a");
		assert_eq!(
			SyncAction::CopyFile(PathBuf::from("b.txt")).to_string(),
			"File created/updated: b.txt"
		);
		assert_eq!(SyncAction::DeleteFile(PathBuf::from("x")).to_string(), "File deleted: x");
		assert_eq!(SyncAction::DeleteDir(PathBuf::from("y")).to_string(), "Directory deleted: y");
	}

	#[test]
	fn test_action_is_delete() {
		assert!(SyncAction::DeleteDir(PathBuf::from("y")).is_delete());
		assert!(!SyncAction::CopyFile(PathBuf::from("y")).is_delete());
	}

	#[test]
	fn test_snapshot_classifies_entries() {
		let dir = TempDir::new().unwrap();
		fs::create_dir(dir.path().join("sub")).unwrap();
		fs::write(dir.path().join("file.txt"), b"x").unwrap();

		let snap = DirectorySnapshot::read(dir.path()).unwrap();
		assert_eq!(snap.len(), 2);
		assert_eq!(snap.kind(&OsString::from("sub")), Some(EntryKind::Dir));
		assert_eq!(snap.kind(&OsString::from("file.txt")), Some(EntryKind::File));
		assert_eq!(snap.dirs().count(), 1);
		assert_eq!(snap.files().count(), 1);
	}

	#[cfg(unix)]
	#[test]
	fn test_snapshot_symlink_is_other() {
		let dir = TempDir::new().unwrap();
		fs::create_dir(dir.path().join("target")).unwrap();
		std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();

		let snap = DirectorySnapshot::read(dir.path()).unwrap();
		assert_eq!(snap.kind(&OsString::from("link")), Some(EntryKind::Other));
	}

	#[test]
	fn test_snapshot_only_in() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		fs::write(a.path().join("common"), b"").unwrap();
		fs::write(b.path().join("common"), b"").unwrap();
		fs::write(a.path().join("left"), b"").unwrap();
		fs::write(b.path().join("right"), b"").unwrap();

		let sa = DirectorySnapshot::read(a.path()).unwrap();
		let sb = DirectorySnapshot::read(b.path()).unwrap();
		let left: Vec<_> = sa.only_in(&sb).collect();
		let right: Vec<_> = sb.only_in(&sa).collect();
		assert_eq!(left, vec![&OsString::from("left")]);
		assert_eq!(right, vec![&OsString::from("right")]);
	}

	#[test]
	fn test_snapshot_missing_dir_is_io_error() {
		let dir = TempDir::new().unwrap();
		let err = DirectorySnapshot::read(&dir.path().join("missing")).unwrap_err();
		assert!(matches!(err, SyncError::Io { op: "list", .. }));
	}
}

// vim: ts=4
