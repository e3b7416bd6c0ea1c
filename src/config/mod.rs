//! Reorganization plan loading for reroute.
//!
//! This module handles:
//! - TOML plan file parsing and validation
//! - Falling back to the built-in site layout
//! - The `--init` template

pub mod parser;
pub mod template;
pub mod types;

pub use parser::{load_plan, parse_plan_file, parse_plan_str};
pub use template::generate_plan_template;
pub use types::{ArchiveSource, ImageMerge, LoadedPlan, PLAN_FILE_NAME, Plan};
