use crate::config::types::{LoadedPlan, PLAN_FILE_NAME, Plan};
use crate::error::{Result, RerouteError};
use std::path::Path;

/// Parse a plan file from the given path.
pub fn parse_plan_file(path: &Path) -> Result<Plan> {
	let content = std::fs::read_to_string(path).map_err(|source| RerouteError::PlanReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_plan_str(&content, path)
}

/// Parse a plan from a string (useful for testing).
pub fn parse_plan_str(content: &str, path: &Path) -> Result<Plan> {
	let plan: Plan = toml::from_str(content).map_err(|source| RerouteError::PlanParseError {
		path: path.to_path_buf(),
		source,
	})?;

	plan.validate()?;

	Ok(plan)
}

/// Load the plan for a site root.
///
/// An explicit path must exist. Otherwise `<root>/.reroute.toml` is used when
/// present, falling back to the built-in layout.
pub fn load_plan(root: &Path, explicit: Option<&Path>) -> Result<LoadedPlan> {
	let path = match explicit {
		Some(path) => path.to_path_buf(),
		None => {
			let candidate = root.join(PLAN_FILE_NAME);
			if !candidate.is_file() {
				return Ok(LoadedPlan {
					plan: Plan::default(),
					path: None,
				});
			}
			candidate
		}
	};

	let plan = parse_plan_file(&path)?;
	Ok(LoadedPlan {
		plan,
		path: Some(path),
	})
}
