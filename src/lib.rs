//! Reroute - CLI tool for reorganizing a static site tree and fixing the
//! relative asset paths in its HTML pages.
//!
//! This library provides the core functionality for reroute, including:
//! - The fixed table of `href`/`src` path substitutions
//! - A pure text rewrite plus an in-place, per-directory driver
//! - Reorganization plan loading and the move/archive/merge steps
//!
//! # Example
//!
//! ```no_run
//! use reroute_cli::rewrite::{RewriteOptions, rewrite_directory};
//! use reroute_cli::rules::RuleSet;
//! use std::path::Path;
//!
//! let rules = RuleSet::builtin().unwrap();
//! let summary = rewrite_directory(
//!     Path::new("site/pages"),
//!     &rules,
//!     RewriteOptions::default(),
//!     |report| println!("{report}"),
//! )
//! .unwrap();
//!
//! println!("{summary}");
//! ```

pub mod config;
pub mod error;
pub mod reorg;
pub mod rewrite;
pub mod rules;

pub use error::{RerouteError, Result};
