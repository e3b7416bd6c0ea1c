use std::path::PathBuf;

/// Library-level structured errors for reroute.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RerouteError {
	#[error("Directory not found or unreadable: {path}")]
	DirectoryUnreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Site root not found: {path}")]
	RootNotFound { path: PathBuf },

	#[error("Failed to create directory: {path}")]
	CreateDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read file: {path}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	FileWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("File is not valid UTF-8: {path}")]
	Decode {
		path: PathBuf,
		#[source]
		source: std::str::Utf8Error,
	},

	#[error("Failed to read plan file: {path}")]
	PlanReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse plan file: {path}")]
	PlanParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid plan entry {field}: {reason}")]
	InvalidPlan { field: String, reason: String },

	#[error("Invalid glob pattern in plan: {pattern}")]
	InvalidGlob {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// Result type alias using RerouteError.
pub type Result<T> = std::result::Result<T, RerouteError>;
