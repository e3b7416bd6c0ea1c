//! In-place rewriting of relative asset paths in HTML files.
//!
//! This module handles:
//! - Listing the `.html` files directly inside a directory
//! - Decoding, rewriting and conditionally writing back each file
//! - Per-file reports and the run summary

pub mod decode;
pub mod transform;

pub use decode::{DecodeMode, Decoded};
pub use transform::{Rewrite, rewrite_text};

use crate::error::{Result, RerouteError};
use crate::rules::RuleSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension of the files the rewriter touches.
pub const HTML_EXTENSION: &str = "html";

/// Options for a rewrite run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
	pub decode: DecodeMode,

	/// Report changes without writing anything.
	pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
	Updated,
	Unchanged,
	Error(String),
}

/// Per-file result of a rewrite run.
#[derive(Debug, Clone)]
pub struct FileReport {
	pub path: PathBuf,
	pub outcome: FileOutcome,

	/// Substitutions per rule, in rule order. Empty when the file errored.
	pub counts: Vec<usize>,

	/// Invalid UTF-8 was replaced while decoding.
	pub lossy: bool,
}

impl FileReport {
	pub fn file_name(&self) -> String {
		self.path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| self.path.display().to_string())
	}

	pub fn changes(&self) -> usize {
		self.counts.iter().sum()
	}
}

impl fmt::Display for FileReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.outcome {
			FileOutcome::Updated => {
				write!(
					f,
					"{} updated ({} substitutions",
					self.file_name(),
					self.changes()
				)?;
				if self.lossy {
					write!(f, ", lossy decode")?;
				}
				write!(f, ")")
			}
			FileOutcome::Unchanged if self.lossy => {
				write!(f, "{} unchanged (lossy decode)", self.file_name())
			}
			FileOutcome::Unchanged => write!(f, "{} unchanged", self.file_name()),
			FileOutcome::Error(message) => write!(f, "{} error: {}", self.file_name(), message),
		}
	}
}

/// Aggregate of a rewrite run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
	pub files: Vec<FileReport>,
}

impl RunSummary {
	pub fn total(&self) -> usize {
		self.files.len()
	}

	pub fn updated(&self) -> usize {
		self.count(|o| matches!(o, FileOutcome::Updated))
	}

	pub fn unchanged(&self) -> usize {
		self.count(|o| matches!(o, FileOutcome::Unchanged))
	}

	pub fn errored(&self) -> usize {
		self.count(|o| matches!(o, FileOutcome::Error(_)))
	}

	/// Files whose invalid UTF-8 was replaced while decoding.
	pub fn lossy(&self) -> usize {
		self.files.iter().filter(|r| r.lossy).count()
	}

	/// Substitutions across every file that was updated.
	pub fn total_changes(&self) -> usize {
		self.files
			.iter()
			.filter(|r| r.outcome == FileOutcome::Updated)
			.map(FileReport::changes)
			.sum()
	}

	fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
		self.files.iter().filter(|r| pred(&r.outcome)).count()
	}
}

impl fmt::Display for RunSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}/{} files updated, {} substitutions",
			self.updated(),
			self.total(),
			self.total_changes()
		)
	}
}

/// List the `.html` files directly inside `dir`, sorted by name.
///
/// Fails only when the directory itself cannot be read.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
	let unreadable = |source| RerouteError::DirectoryUnreadable {
		path: dir.to_path_buf(),
		source,
	};

	let mut files = Vec::new();
	for entry in std::fs::read_dir(dir).map_err(unreadable)? {
		let entry = entry.map_err(unreadable)?;
		let path = entry.path();
		let is_html = path.extension().is_some_and(|ext| ext == HTML_EXTENSION);
		if is_html && path.is_file() {
			files.push(path);
		}
	}
	files.sort();
	Ok(files)
}

/// The rewrite of one file, and whether decoding it replaced invalid bytes.
#[derive(Debug, Clone)]
pub struct FileRewrite {
	pub rewrite: Rewrite,
	pub lossy: bool,
}

/// Rewrite one file in place.
///
/// The file is only written when at least one substitution applied.
pub fn rewrite_file(path: &Path, rules: &RuleSet, options: RewriteOptions) -> Result<FileRewrite> {
	let bytes = std::fs::read(path).map_err(|source| RerouteError::FileRead {
		path: path.to_path_buf(),
		source,
	})?;
	let decoded = options
		.decode
		.decode(&bytes)
		.map_err(|source| RerouteError::Decode {
			path: path.to_path_buf(),
			source,
		})?;

	if decoded.lossy {
		tracing::warn!(file = %path.display(), "invalid UTF-8 replaced with U+FFFD");
	}

	let rewrite = rewrite_text(&decoded.text, rules);

	if rewrite.changed() && !options.dry_run {
		std::fs::write(path, &rewrite.text).map_err(|source| RerouteError::FileWrite {
			path: path.to_path_buf(),
			source,
		})?;
	}

	Ok(FileRewrite {
		rewrite,
		lossy: decoded.lossy,
	})
}

/// Rewrite every HTML file in `dir`, one after another.
///
/// Per-file failures are recorded in the summary and never stop the run.
/// `on_file` is called as each file finishes.
pub fn rewrite_directory(
	dir: &Path,
	rules: &RuleSet,
	options: RewriteOptions,
	mut on_file: impl FnMut(&FileReport),
) -> Result<RunSummary> {
	let mut summary = RunSummary::default();

	for path in list_html_files(dir)? {
		let report = match rewrite_file(&path, rules, options) {
			Ok(FileRewrite { rewrite, lossy }) => FileReport {
				outcome: if rewrite.changed() {
					FileOutcome::Updated
				} else {
					FileOutcome::Unchanged
				},
				counts: rewrite.counts,
				lossy,
				path,
			},
			Err(e) => {
				tracing::warn!(file = %path.display(), error = %error_message(&e), "rewrite failed");
				FileReport {
					outcome: FileOutcome::Error(error_message(&e)),
					counts: Vec::new(),
					lossy: false,
					path,
				}
			}
		};
		on_file(&report);
		summary.files.push(report);
	}

	Ok(summary)
}

/// The error and its source chain on one line.
fn error_message(error: &RerouteError) -> String {
	let mut message = error.to_string();
	let mut source = std::error::Error::source(error);
	while let Some(cause) = source {
		message.push_str(": ");
		message.push_str(&cause.to_string());
		source = std::error::Error::source(cause);
	}
	message
}
