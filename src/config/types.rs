use crate::error::RerouteError;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// File name of the per-site plan override.
pub const PLAN_FILE_NAME: &str = ".reroute.toml";

/// Layout driving the reorganize step, from a `.reroute.toml` file.
///
/// Every field falls back to the built-in layout when omitted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Plan {
	/// Directory HTML pages are moved into.
	pub pages_dir: PathBuf,

	/// Page file names, relative to the site root.
	pub pages: Vec<String>,

	/// Directory deployment scripts are moved into.
	pub deploy_dir: PathBuf,

	/// Deployment script file names, relative to the site root.
	pub deploy_scripts: Vec<String>,

	/// Directory matched documentation is archived into.
	pub archive_dir: PathBuf,

	/// Where to look for documents to archive, and what to match.
	pub archive: Vec<ArchiveSource>,

	/// Image folder merged into another one.
	pub images: ImageMerge,
}

/// Files directly inside `from` matching any of `patterns` get archived.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArchiveSource {
	#[serde(default = "current_dir")]
	pub from: PathBuf,
	pub patterns: Vec<String>,
}

/// Move every file of `from` into `into`, then drop `from` if empty.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImageMerge {
	/// `false` skips the merge entirely.
	pub enabled: bool,
	pub from: PathBuf,
	pub into: PathBuf,
}

impl Default for ImageMerge {
	fn default() -> Self {
		ImageMerge {
			enabled: true,
			from: PathBuf::from("assets/images"),
			into: PathBuf::from("assets/img"),
		}
	}
}

/// A plan with the path it was loaded from, if any.
#[derive(Debug, Clone)]
pub struct LoadedPlan {
	pub plan: Plan,

	/// `None` when the built-in layout is in use.
	pub path: Option<PathBuf>,
}

fn current_dir() -> PathBuf {
	PathBuf::from(".")
}

fn strings(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| s.to_string()).collect()
}

impl Default for Plan {
	fn default() -> Self {
		Plan {
			pages_dir: PathBuf::from("pages"),
			pages: strings(&[
				"reportes.html",
				"configuracion.html",
				"inventario.html",
				"CXP.html",
				"CXC.html",
				"diesel.html",
				"facturacion.html",
				"logistica.html",
				"mantenimiento.html",
				"operadores.html",
				"trafico.html",
				"tesoreria.html",
				"menu.html",
				"demo.html",
				"tests.html",
				"dashboard-integrado.html",
				"sincronizacion.html",
				"admin-licencias.html",
			]),
			deploy_dir: PathBuf::from("scripts/deploy"),
			deploy_scripts: strings(&[
				"deploy.ps1",
				"deploy-simple.ps1",
				"ejecutar-deploy.ps1",
				"verificar-deploy.ps1",
			]),
			archive_dir: PathBuf::from("docs/archive"),
			archive: vec![
				ArchiveSource {
					from: current_dir(),
					patterns: strings(&[
						"REFACTORIZACION_*.md",
						"LINEAS_EXACTAS_*.md",
						"LISTA_LINEAS_ELIMINAR.txt",
						"ERRORES_Y_PRUEBAS.md",
						"ERP_STATE_MIGRATION.md",
					]),
				},
				ArchiveSource {
					from: PathBuf::from("docs"),
					patterns: strings(&["REFACTORIZACION_*.md"]),
				},
			],
			images: ImageMerge::default(),
		}
	}
}

impl Plan {
	/// Check that every path stays inside the site root and every pattern compiles.
	pub fn validate(&self) -> Result<(), RerouteError> {
		check_dir("pages-dir", &self.pages_dir)?;
		check_dir("deploy-dir", &self.deploy_dir)?;
		check_dir("archive-dir", &self.archive_dir)?;

		for name in self.pages.iter().chain(&self.deploy_scripts) {
			check_file_name(name)?;
		}

		for source in &self.archive {
			check_dir("archive.from", &source.from)?;
			for pattern in &source.patterns {
				glob::Pattern::new(pattern).map_err(|source| RerouteError::InvalidGlob {
					pattern: pattern.clone(),
					source,
				})?;
			}
		}

		check_dir("images.from", &self.images.from)?;
		check_dir("images.into", &self.images.into)?;

		Ok(())
	}
}

fn check_dir(field: &str, path: &Path) -> Result<(), RerouteError> {
	let escapes = path
		.components()
		.any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
	if escapes {
		return Err(RerouteError::InvalidPlan {
			field: field.to_string(),
			reason: format!("{} must be relative to the site root", path.display()),
		});
	}
	Ok(())
}

fn check_file_name(name: &str) -> Result<(), RerouteError> {
	let bare = Path::new(name).file_name().is_some_and(|n| n == name);
	if !bare {
		return Err(RerouteError::InvalidPlan {
			field: "file list".to_string(),
			reason: format!("{name} must be a bare file name"),
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_plan_is_valid() {
		let plan = Plan::default();
		assert!(plan.validate().is_ok());
		assert_eq!(plan.pages.len(), 18);
		assert_eq!(plan.deploy_scripts.len(), 4);
		assert!(!plan.pages.iter().any(|p| p == "index.html"));
	}

	#[test]
	fn test_parent_dir_rejected() {
		let plan = Plan {
			pages_dir: PathBuf::from("../pages"),
			..Default::default()
		};
		match plan.validate().unwrap_err() {
			RerouteError::InvalidPlan { field, .. } => assert_eq!(field, "pages-dir"),
			e => panic!("Expected InvalidPlan error, got {e:?}"),
		}
	}

	#[test]
	fn test_absolute_dir_rejected() {
		let plan = Plan {
			images: ImageMerge {
				from: PathBuf::from("/tmp/images"),
				..Default::default()
			},
			..Default::default()
		};
		assert!(plan.validate().is_err());
	}

	#[test]
	fn test_nested_file_name_rejected() {
		let plan = Plan {
			pages: vec!["sub/page.html".to_string()],
			..Default::default()
		};
		assert!(matches!(
			plan.validate(),
			Err(RerouteError::InvalidPlan { .. })
		));
	}

	#[test]
	fn test_bad_glob_rejected() {
		let plan = Plan {
			archive: vec![ArchiveSource {
				from: current_dir(),
				patterns: vec!["[".to_string()],
			}],
			..Default::default()
		};
		assert!(matches!(
			plan.validate(),
			Err(RerouteError::InvalidGlob { .. })
		));
	}
}
