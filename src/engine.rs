//! One-way mirroring pass
//!
//! A pass walks the source tree top-down, one directory listing at a time.
//! For every subdirectory it decides between create, replace and leave alone;
//! for every file between copy and leave alone. Directories that were bulk
//! copied are not descended into. Top-level replica entries with no source
//! counterpart are collected before the walk and removed after it.
//!
//! File equality is decided by byte size only. Two files with the same size
//! but different content are considered in sync.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::compare::{TreeComparator, DEFAULT_MAX_DEPTH};
use crate::error::SyncError;
use crate::fs_ops;
use crate::logging::*;
use crate::types::{DirectorySnapshot, EntryKind, SyncAction, SyncReport};
use crate::validation;

/// Reconciles a replica tree against a source tree
pub struct SyncEngine {
	logger: Box<dyn ActionLogger>,
	comparator: TreeComparator,
}

impl SyncEngine {
	pub fn new(logger: Box<dyn ActionLogger>) -> Self {
		SyncEngine { logger, comparator: TreeComparator::new(DEFAULT_MAX_DEPTH) }
	}

	/// Bound the recursion depth of walks, copies and comparisons
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.comparator = TreeComparator::new(max_depth);
		self
	}

	pub fn max_depth(&self) -> usize {
		self.comparator.max_depth()
	}

	/// Run one pass.
	///
	/// Stops at the first filesystem error. Whatever was applied up to that
	/// point stays; the next pass picks up from the on-disk state.
	pub fn sync(&self, source: &Path, replica: &Path) -> Result<SyncReport, SyncError> {
		let started = Instant::now();
		check_roots(source, replica)?;

		let source_top = DirectorySnapshot::read(source)?;
		let replica_top = DirectorySnapshot::read(replica)?;
		let orphans: Vec<OsString> = replica_top.only_in(&source_top).cloned().collect();
		debug!(
			"Pass start: {} -> {} ({} top-level orphans)",
			source.display(),
			replica.display(),
			orphans.len()
		);

		let mut pass = Pass { engine: self, source, replica, actions: Vec::new() };
		pass.walk(Path::new(""), source_top, 0)?;
		for name in &orphans {
			pass.delete_orphan(name)?;
		}

		Ok(SyncReport { actions: pass.actions, elapsed: started.elapsed() })
	}
}

fn check_roots(source: &Path, replica: &Path) -> Result<(), SyncError> {
	validation::validate_root_dir(source)
		.map_err(|e| SyncError::invalid_root(source, e.message()))?;
	validation::validate_root_dir(replica)
		.map_err(|e| SyncError::invalid_root(replica, e.message()))?;
	validation::validate_roots_disjoint(source, replica)
		.map_err(|e| SyncError::invalid_root(replica, e.message()))
}

/// Kind of the replica entry at `path`, or None if there is nothing there
fn replica_kind(path: &Path) -> Result<Option<EntryKind>, SyncError> {
	match EntryKind::of(path) {
		Ok(kind) => Ok(Some(kind)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(SyncError::io("stat", path, e)),
	}
}

struct Pass<'a> {
	engine: &'a SyncEngine,
	source: &'a Path,
	replica: &'a Path,
	actions: Vec<SyncAction>,
}

impl Pass<'_> {
	fn record(&mut self, action: SyncAction) {
		self.engine.logger.info(&action.to_string());
		self.actions.push(action);
	}

	fn walk(&mut self, rel: &Path, listing: DirectorySnapshot, depth: usize) -> Result<(), SyncError> {
		let max_depth = self.engine.max_depth();
		if depth > max_depth {
			return Err(SyncError::DepthExceeded { path: self.source.join(rel), limit: max_depth });
		}

		let mut descend: Vec<PathBuf> = Vec::new();
		for name in listing.dirs() {
			let rel_dir = rel.join(name);
			if self.sync_dir(&rel_dir, depth + 1)? {
				descend.push(rel_dir);
			}
		}

		for (name, kind) in listing.iter() {
			match kind {
				EntryKind::File => self.sync_file(&rel.join(name))?,
				EntryKind::Dir => {}
				EntryKind::Other => {
					warn!("Skipping special file {}", self.source.join(rel).join(name).display())
				}
			}
		}

		for rel_dir in descend {
			let child = DirectorySnapshot::read(&self.source.join(&rel_dir))?;
			self.walk(&rel_dir, child, depth + 1)?;
		}
		Ok(())
	}

	/// Reconcile one directory at `depth` below the roots; returns true if
	/// the walk should descend into it
	fn sync_dir(&mut self, rel: &Path, depth: usize) -> Result<bool, SyncError> {
		let src = self.source.join(rel);
		let dst = self.replica.join(rel);
		let max_depth = self.engine.max_depth();

		let kind = match replica_kind(&dst)? {
			None => {
				fs_ops::copy_tree_at(&src, &dst, depth, max_depth)?;
				self.record(SyncAction::CreateDir(rel.to_path_buf()));
				return Ok(false);
			}
			Some(kind) => kind,
		};

		// Decided before anything is removed
		if kind == EntryKind::Dir && self.engine.comparator.equal_at(&src, &dst, depth)? {
			return Ok(true);
		}

		debug!("Replacing {} ({}) with source directory", dst.display(), kind);
		fs_ops::remove_entry(&dst)?;
		fs_ops::copy_tree_at(&src, &dst, depth, max_depth)?;
		self.record(SyncAction::ReplaceDir(rel.to_path_buf()));
		Ok(false)
	}

	fn sync_file(&mut self, rel: &Path) -> Result<(), SyncError> {
		let src = self.source.join(rel);
		let dst = self.replica.join(rel);

		let needs_copy = match replica_kind(&dst)? {
			None => true,
			Some(EntryKind::File) => {
				let src_len = fs::metadata(&src).map_err(|e| SyncError::io("stat", &src, e))?.len();
				let dst_len = fs::metadata(&dst).map_err(|e| SyncError::io("stat", &dst, e))?.len();
				src_len != dst_len
			}
			Some(kind) => {
				debug!("Replacing {} ({}) with source file", dst.display(), kind);
				fs_ops::remove_entry(&dst)?;
				true
			}
		};

		if needs_copy {
			fs_ops::copy_file(&src, &dst)?;
			self.record(SyncAction::CopyFile(rel.to_path_buf()));
		}
		Ok(())
	}

	fn delete_orphan(&mut self, name: &OsString) -> Result<(), SyncError> {
		let rel = PathBuf::from(name);
		let action = match fs_ops::remove_entry(&self.replica.join(&rel))? {
			EntryKind::Dir => SyncAction::DeleteDir(rel),
			EntryKind::File | EntryKind::Other => SyncAction::DeleteFile(rel),
		};
		self.record(action);
		Ok(())
	}
}


// vim: ts=4
