//! Substitution rules for asset path rewriting.
//!
//! This module handles:
//! - The built-in table of attribute-prefix substitutions
//! - Compiling rules into an ordered rule set

pub mod matcher;
pub mod table;

pub use matcher::{CompiledRule, RuleSet};
pub use table::{SubstitutionRule, default_rules};
