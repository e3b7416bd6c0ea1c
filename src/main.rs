use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use reroute_cli::config::{PLAN_FILE_NAME, generate_plan_template, load_plan};
use reroute_cli::reorg::reorganize;
use reroute_cli::rewrite::{DecodeMode, RewriteOptions, rewrite_directory};
use reroute_cli::rules::RuleSet;

#[derive(Parser)]
#[command(name = "reroute")]
#[command(
	author,
	version,
	about = "CLI tool for reorganizing a static site tree and rewriting relative asset paths in HTML"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .reroute.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .reroute.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Log more (-v for moves, -vv for skipped files); RUST_LOG overrides
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Rewrite asset paths in every .html file directly inside DIR
	Rewrite {
		/// Directory holding the moved HTML pages
		dir: PathBuf,

		/// Treat files that are not valid UTF-8 as errors instead of decoding lossily
		#[arg(long)]
		strict: bool,

		/// Report what would change without writing any file
		#[arg(long)]
		dry_run: bool,
	},
	/// Move pages, deploy scripts, archived docs and images into place under ROOT
	Reorganize {
		/// Site root
		root: PathBuf,

		/// Plan file to use instead of ROOT/.reroute.toml
		#[arg(long, value_name = "FILE")]
		plan: Option<PathBuf>,

		/// Rewrite asset paths in the pages directory afterwards
		#[arg(long)]
		rewrite: bool,

		/// With --rewrite, treat files that are not valid UTF-8 as errors
		#[arg(long, requires = "rewrite")]
		strict: bool,
	},
	/// List the built-in path substitution rules
	Rules,
	/// Reorganization plan commands
	Plan {
		#[command(subcommand)]
		action: PlanAction,
	},
}

#[derive(Subcommand)]
enum PlanAction {
	/// Display the effective plan and where it came from
	Show {
		/// Site root
		#[arg(default_value = ".")]
		root: PathBuf,

		/// Plan file to use instead of ROOT/.reroute.toml
		#[arg(long, value_name = "FILE")]
		plan: Option<PathBuf>,
	},
	/// Check the plan for errors without moving anything
	Validate {
		/// Site root
		#[arg(default_value = ".")]
		root: PathBuf,

		/// Plan file to use instead of ROOT/.reroute.toml
		#[arg(long, value_name = "FILE")]
		plan: Option<PathBuf>,
	},
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	let Some(command) = cli.command else {
		// No command specified - this shouldn't happen due to arg_required_else_help
		return Ok(ExitCode::SUCCESS);
	};

	match command {
		Commands::Rewrite {
			dir,
			strict,
			dry_run,
		} => {
			let options = RewriteOptions {
				decode: decode_mode(strict),
				dry_run,
			};
			handle_rewrite(&dir, options, cli.verbose)
		}
		Commands::Reorganize {
			root,
			plan,
			rewrite,
			strict,
		} => handle_reorganize(
			&root,
			plan.as_deref(),
			rewrite.then(|| RewriteOptions {
				decode: decode_mode(strict),
				dry_run: false,
			}),
			cli.verbose,
		),
		Commands::Rules => handle_rules(),
		Commands::Plan { action } => match action {
			PlanAction::Show { root, plan } => handle_plan_show(&root, plan.as_deref()),
			PlanAction::Validate { root, plan } => handle_plan_validate(&root, plan.as_deref()),
		},
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.init();
}

fn decode_mode(strict: bool) -> DecodeMode {
	if strict {
		DecodeMode::Strict
	} else {
		DecodeMode::Lossy
	}
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let plan_path = PathBuf::from(PLAN_FILE_NAME);

	if plan_path.exists() && !force {
		anyhow::bail!("{PLAN_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&plan_path, generate_plan_template())
		.with_context(|| format!("Failed to write {}", plan_path.display()))?;

	println!("Created {PLAN_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_rewrite(dir: &Path, options: RewriteOptions, verbose: u8) -> Result<ExitCode> {
	let clean = run_rewrite(dir, options, verbose)?;
	Ok(if clean {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

/// Rewrite one directory and print the report. Returns false if any file errored.
fn run_rewrite(dir: &Path, options: RewriteOptions, verbose: u8) -> Result<bool> {
	let rules = RuleSet::builtin().context("Failed to compile path rules")?;

	println!("Rewriting asset paths in {}", dir.display());

	let summary = rewrite_directory(dir, &rules, options, |report| {
		println!("  {report}");
		if verbose > 0 {
			for (rule, count) in rules.rules().iter().zip(&report.counts) {
				if *count > 0 {
					println!(
						"      {} -> {}: {}",
						rule.rule.pattern, rule.rule.replacement, count
					);
				}
			}
		}
	})
	.with_context(|| format!("Failed to rewrite {}", dir.display()))?;

	println!(
		"{} updated, {} unchanged, {} errors",
		summary.updated(),
		summary.unchanged(),
		summary.errored()
	);
	if summary.lossy() > 0 {
		println!(
			"{} files had invalid UTF-8 replaced (lossy decode)",
			summary.lossy()
		);
	}
	println!("{summary}");
	if options.dry_run {
		println!("Dry run: no files were written.");
	}

	Ok(summary.errored() == 0)
}

fn handle_reorganize(
	root: &Path,
	plan_path: Option<&Path>,
	rewrite: Option<RewriteOptions>,
	verbose: u8,
) -> Result<ExitCode> {
	let loaded = load_plan(root, plan_path).context("Failed to load plan")?;
	match loaded.path {
		Some(ref path) => println!("Using plan {}", path.display()),
		None => println!("Using built-in plan"),
	}

	let report = reorganize(root, &loaded.plan)
		.with_context(|| format!("Failed to reorganize {}", root.display()))?;

	for dir in &report.directories {
		println!("  [dir] {}", dir.display());
	}
	for record in &report.moves {
		println!("  {record}");
	}
	match report.images_removed {
		Some(true) => println!("  [image] removed empty source folder"),
		Some(false) => println!("  [image] source folder not removed (not empty)"),
		None => {}
	}
	println!(
		"{} moved, {} skipped, {} not found, {} failed",
		report.moved(),
		report.skipped(),
		report.missing(),
		report.failed()
	);

	let mut clean = report.failed() == 0;
	if let Some(options) = rewrite {
		println!();
		clean &= run_rewrite(&root.join(&loaded.plan.pages_dir), options, verbose)?;
	}

	Ok(if clean {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

fn handle_rules() -> Result<ExitCode> {
	let rules = RuleSet::builtin().context("Failed to compile path rules")?;

	for (i, rule) in rules.rules().iter().enumerate() {
		println!(
			"{:>2}. {:<24} -> {}",
			i + 1,
			rule.rule.pattern,
			rule.rule.replacement
		);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_plan_show(root: &Path, plan_path: Option<&Path>) -> Result<ExitCode> {
	let loaded = load_plan(root, plan_path).context("Failed to load plan")?;

	match loaded.path {
		Some(ref path) => println!("# Source: {}", path.display()),
		None => println!("# Source: built-in"),
	}
	let rendered = toml::to_string_pretty(&loaded.plan).context("Failed to render plan")?;
	print!("{rendered}");

	Ok(ExitCode::SUCCESS)
}

fn handle_plan_validate(root: &Path, plan_path: Option<&Path>) -> Result<ExitCode> {
	match load_plan(root, plan_path) {
		Ok(loaded) => {
			match loaded.path {
				Some(path) => println!("Plan is valid: {}", path.display()),
				None => println!("No plan file found; the built-in plan will be used."),
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Plan error: {:#}", anyhow::Error::new(e));
			Ok(ExitCode::FAILURE)
		}
	}
}
