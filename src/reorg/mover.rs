use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Which reorganize step a move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Page,
	DeployScript,
	Archive,
	Image,
}

impl Step {
	pub fn as_str(&self) -> &'static str {
		match self {
			Step::Page => "page",
			Step::DeployScript => "deploy",
			Step::Archive => "archive",
			Step::Image => "image",
		}
	}
}

/// What happened to one requested move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
	Moved,

	/// The source did not exist.
	Missing,

	/// The destination already existed and was kept.
	Skipped,

	Failed(String),
}

/// One move, with paths relative to the site root.
#[derive(Debug, Clone)]
pub struct MoveRecord {
	pub step: Step,
	pub from: PathBuf,
	pub to: PathBuf,
	pub outcome: MoveOutcome,
}

impl fmt::Display for MoveRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let step = self.step.as_str();
		let (from, to) = (self.from.display(), self.to.display());
		match &self.outcome {
			MoveOutcome::Moved => write!(f, "[{step}] moved {from} -> {to}"),
			MoveOutcome::Missing => write!(f, "[{step}] not found: {from}"),
			MoveOutcome::Skipped => write!(f, "[{step}] skipped {from} ({to} already exists)"),
			MoveOutcome::Failed(message) => write!(f, "[{step}] failed {from} -> {to}: {message}"),
		}
	}
}

/// `base/name`, without a leading `./` when `base` is the current directory.
pub fn relative(base: &Path, name: &str) -> PathBuf {
	if base.as_os_str().is_empty() || base == Path::new(".") {
		PathBuf::from(name)
	} else {
		base.join(name)
	}
}

/// Move `root/from` to `root/to`, never replacing an existing destination.
pub fn move_file(root: &Path, step: Step, from: PathBuf, to: PathBuf) -> MoveRecord {
	let src = root.join(&from);
	let dst = root.join(&to);

	let outcome = if fs::symlink_metadata(&src).is_err() {
		tracing::warn!(path = %from.display(), "source not found");
		MoveOutcome::Missing
	} else if fs::symlink_metadata(&dst).is_ok() {
		tracing::debug!(from = %from.display(), to = %to.display(), "destination exists, skipping");
		MoveOutcome::Skipped
	} else {
		match rename_or_copy(&src, &dst) {
			Ok(()) => {
				tracing::info!(from = %from.display(), to = %to.display(), "moved");
				MoveOutcome::Moved
			}
			Err(e) => {
				tracing::warn!(from = %from.display(), to = %to.display(), error = %e, "move failed");
				MoveOutcome::Failed(e.to_string())
			}
		}
	};

	MoveRecord {
		step,
		from,
		to,
		outcome,
	}
}

/// Rename, falling back to copy and delete only when source and destination
/// are on different filesystems. Exactly one copy is left behind either way.
fn rename_or_copy(src: &Path, dst: &Path) -> std::io::Result<()> {
	match fs::rename(src, dst) {
		Ok(()) => Ok(()),
		Err(e) if needs_copy(&e) => {
			fs::copy(src, dst)?;
			if let Err(e) = fs::remove_file(src) {
				let _ = fs::remove_file(dst);
				return Err(e);
			}
			Ok(())
		}
		Err(e) => Err(e),
	}
}

fn needs_copy(error: &std::io::Error) -> bool {
	error.kind() == std::io::ErrorKind::CrossesDevices
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_move_file_moves() {
		let root = tempfile::tempdir().unwrap();
		fs::write(root.path().join("a.html"), "a").unwrap();
		fs::create_dir(root.path().join("pages")).unwrap();

		let record = move_file(
			root.path(),
			Step::Page,
			PathBuf::from("a.html"),
			PathBuf::from("pages/a.html"),
		);

		assert_eq!(record.outcome, MoveOutcome::Moved);
		assert!(!root.path().join("a.html").exists());
		assert_eq!(
			fs::read_to_string(root.path().join("pages/a.html")).unwrap(),
			"a"
		);
		assert_eq!(record.to_string(), "[page] moved a.html -> pages/a.html");
	}

	#[test]
	fn test_move_file_missing_source() {
		let root = tempfile::tempdir().unwrap();
		let record = move_file(
			root.path(),
			Step::DeployScript,
			PathBuf::from("deploy.ps1"),
			PathBuf::from("scripts/deploy/deploy.ps1"),
		);
		assert_eq!(record.outcome, MoveOutcome::Missing);
		assert_eq!(record.to_string(), "[deploy] not found: deploy.ps1");
	}

	#[test]
	fn test_move_file_never_overwrites() {
		let root = tempfile::tempdir().unwrap();
		fs::create_dir(root.path().join("img")).unwrap();
		fs::write(root.path().join("logo.png"), "new").unwrap();
		fs::write(root.path().join("img/logo.png"), "old").unwrap();

		let record = move_file(
			root.path(),
			Step::Image,
			PathBuf::from("logo.png"),
			PathBuf::from("img/logo.png"),
		);

		assert_eq!(record.outcome, MoveOutcome::Skipped);
		assert_eq!(
			fs::read_to_string(root.path().join("img/logo.png")).unwrap(),
			"old"
		);
		assert!(root.path().join("logo.png").exists());
	}

	#[test]
	fn test_move_file_into_missing_dir_fails() {
		let root = tempfile::tempdir().unwrap();
		fs::write(root.path().join("a.md"), "").unwrap();

		let record = move_file(
			root.path(),
			Step::Archive,
			PathBuf::from("a.md"),
			PathBuf::from("no/such/dir/a.md"),
		);
		assert!(matches!(record.outcome, MoveOutcome::Failed(_)));
		assert!(root.path().join("a.md").exists());
	}

	#[test]
	fn test_only_cross_device_rename_falls_back_to_copy() {
		use std::io::{Error, ErrorKind};

		assert!(needs_copy(&Error::from(ErrorKind::CrossesDevices)));
		assert!(!needs_copy(&Error::from(ErrorKind::PermissionDenied)));
		assert!(!needs_copy(&Error::from(ErrorKind::NotFound)));
	}

	#[cfg(unix)]
	#[test]
	fn test_failed_rename_leaves_single_copy() {
		use std::os::unix::fs::PermissionsExt;

		let root = tempfile::tempdir().unwrap();
		fs::write(root.path().join("a.html"), "a").unwrap();
		let locked = root.path().join("locked");
		fs::create_dir(&locked).unwrap();
		fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

		// Privileged users ignore directory modes, so there is nothing to check.
		if fs::write(locked.join("write-check"), "").is_ok() {
			return;
		}

		let record = move_file(
			root.path(),
			Step::Page,
			PathBuf::from("a.html"),
			PathBuf::from("locked/a.html"),
		);
		fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

		assert!(matches!(record.outcome, MoveOutcome::Failed(_)));
		assert!(root.path().join("a.html").exists());
		assert!(!locked.join("a.html").exists());
	}

	#[test]
	fn test_relative_strips_current_dir() {
		assert_eq!(relative(Path::new("."), "a.md"), PathBuf::from("a.md"));
		assert_eq!(relative(Path::new(""), "a.md"), PathBuf::from("a.md"));
		assert_eq!(relative(Path::new("docs"), "a.md"), PathBuf::from("docs/a.md"));
	}
}
