//! Site tree reorganization.
//!
//! Runs the plan's steps in order under a site root: create target
//! directories, move pages, move deploy scripts, archive documents, merge
//! image folders. Individual moves never abort the run.

pub mod mover;

pub use mover::{MoveOutcome, MoveRecord, Step, move_file, relative};

use crate::config::{ArchiveSource, ImageMerge, Plan};
use crate::error::{Result, RerouteError};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a reorganize run did.
#[derive(Debug, Clone, Default)]
pub struct ReorgReport {
	/// Target directories, relative to the root, that were created or already existed.
	pub directories: Vec<PathBuf>,

	pub moves: Vec<MoveRecord>,

	/// Whether the merged image folder was removed. `None` when there was
	/// nothing to merge or the merge is disabled.
	pub images_removed: Option<bool>,
}

impl ReorgReport {
	pub fn moved(&self) -> usize {
		self.count(|o| matches!(o, MoveOutcome::Moved))
	}

	pub fn missing(&self) -> usize {
		self.count(|o| matches!(o, MoveOutcome::Missing))
	}

	pub fn skipped(&self) -> usize {
		self.count(|o| matches!(o, MoveOutcome::Skipped))
	}

	pub fn failed(&self) -> usize {
		self.count(|o| matches!(o, MoveOutcome::Failed(_)))
	}

	fn count(&self, pred: impl Fn(&MoveOutcome) -> bool) -> usize {
		self.moves.iter().filter(|m| pred(&m.outcome)).count()
	}
}

/// Run every step of `plan` under `root`.
///
/// Fails only if the root is missing or a target directory cannot be created.
pub fn reorganize(root: &Path, plan: &Plan) -> Result<ReorgReport> {
	if !root.is_dir() {
		return Err(RerouteError::RootNotFound {
			path: root.to_path_buf(),
		});
	}

	let mut report = ReorgReport {
		directories: ensure_directories(root, plan)?,
		..Default::default()
	};

	report
		.moves
		.extend(move_listed(root, Step::Page, &plan.pages, &plan.pages_dir));
	report.moves.extend(move_listed(
		root,
		Step::DeployScript,
		&plan.deploy_scripts,
		&plan.deploy_dir,
	));
	for source in &plan.archive {
		report
			.moves
			.extend(archive_matching(root, source, &plan.archive_dir)?);
	}
	if plan.images.enabled {
		let (moves, removed) = consolidate_images(root, &plan.images)?;
		report.moves.extend(moves);
		report.images_removed = removed;
	} else {
		tracing::debug!("image merge disabled by plan");
	}

	Ok(report)
}

/// Create the pages, deploy and archive directories.
pub fn ensure_directories(root: &Path, plan: &Plan) -> Result<Vec<PathBuf>> {
	let dirs = [&plan.pages_dir, &plan.deploy_dir, &plan.archive_dir];
	for dir in dirs {
		create_dir(root, dir)?;
	}
	Ok(dirs.into_iter().cloned().collect())
}

/// Move each named file from the root into `dest`.
pub fn move_listed(root: &Path, step: Step, names: &[String], dest: &Path) -> Vec<MoveRecord> {
	names
		.iter()
		.map(|name| move_file(root, step, PathBuf::from(name), relative(dest, name)))
		.collect()
}

/// Move files directly inside `source.from` whose names match a pattern into `dest`.
pub fn archive_matching(
	root: &Path,
	source: &ArchiveSource,
	dest: &Path,
) -> Result<Vec<MoveRecord>> {
	let patterns = source
		.patterns
		.iter()
		.map(|p| {
			glob::Pattern::new(p).map_err(|e| RerouteError::InvalidGlob {
				pattern: p.clone(),
				source: e,
			})
		})
		.collect::<Result<Vec<_>>>()?;

	let names = regular_files(&root.join(&source.from));
	Ok(names
		.iter()
		.filter(|name| patterns.iter().any(|p| p.matches(name)))
		.map(|name| {
			move_file(
				root,
				Step::Archive,
				relative(&source.from, name),
				relative(dest, name),
			)
		})
		.collect())
}

/// Move every file of `images.from` into `images.into`, then remove
/// `images.from` if nothing is left in it.
pub fn consolidate_images(
	root: &Path,
	images: &ImageMerge,
) -> Result<(Vec<MoveRecord>, Option<bool>)> {
	let from_dir = root.join(&images.from);
	if !from_dir.is_dir() {
		tracing::debug!(path = %images.from.display(), "no image folder to merge");
		return Ok((Vec::new(), None));
	}
	create_dir(root, &images.into)?;

	let moves = regular_files(&from_dir)
		.iter()
		.map(|name| {
			move_file(
				root,
				Step::Image,
				relative(&images.from, name),
				relative(&images.into, name),
			)
		})
		.collect();

	let removed = match fs::remove_dir(&from_dir) {
		Ok(()) => {
			tracing::info!(path = %images.from.display(), "removed merged image folder");
			true
		}
		Err(e) => {
			tracing::warn!(path = %images.from.display(), error = %e, "could not remove image folder (not empty?)");
			false
		}
	};

	Ok((moves, Some(removed)))
}

fn create_dir(root: &Path, dir: &Path) -> Result<()> {
	let path = root.join(dir);
	fs::create_dir_all(&path).map_err(|source| RerouteError::CreateDir { path, source })
}

/// Names of the regular files directly inside `dir`, sorted. Unreadable
/// directories and entries are logged and skipped.
fn regular_files(dir: &Path) -> Vec<String> {
	let entries = match fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) => {
			tracing::debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
			return Vec::new();
		}
	};

	let mut names: Vec<String> = entries
		.filter_map(|entry| entry.ok())
		.filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
		.filter_map(|entry| match entry.file_name().into_string() {
			Ok(name) => Some(name),
			Err(name) => {
				tracing::debug!(name = ?name, dir = %dir.display(), "skipping non-UTF-8 file name");
				None
			}
		})
		.collect();
	names.sort();
	names
}
