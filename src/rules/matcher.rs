use crate::error::{Result, RerouteError};
use crate::rules::table::{SubstitutionRule, default_rules};
use regex::Regex;

/// A rule with its pattern compiled, ready to apply.
#[derive(Debug)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: SubstitutionRule,

	/// The pattern as an escaped literal regex.
	pub regex: Regex,
}

impl CompiledRule {
	/// Compile a single rule. The pattern is matched literally and case-sensitively.
	pub fn compile(rule: &SubstitutionRule) -> Result<Self> {
		let regex = compile_regex(&regex::escape(&rule.pattern))?;
		Ok(CompiledRule {
			rule: rule.clone(),
			regex,
		})
	}

	pub fn replacement(&self) -> &str {
		&self.rule.replacement
	}
}

/// An ordered, compiled set of substitution rules.
#[derive(Debug)]
pub struct RuleSet {
	rules: Vec<CompiledRule>,
}

impl RuleSet {
	/// Compile rules in order.
	pub fn compile(rules: &[SubstitutionRule]) -> Result<Self> {
		let rules = rules
			.iter()
			.map(CompiledRule::compile)
			.collect::<Result<Vec<_>>>()?;
		Ok(RuleSet { rules })
	}

	/// The built-in path rules.
	pub fn builtin() -> Result<Self> {
		Self::compile(&default_rules())
	}

	pub fn rules(&self) -> &[CompiledRule] {
		&self.rules
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// True when no replacement contains any rule's pattern, so a second
	/// pass over rewritten text finds nothing to do.
	pub fn is_idempotent(&self) -> bool {
		self.rules.iter().all(|target| {
			self.rules
				.iter()
				.all(|rule| !rule.regex.is_match(target.replacement()))
		})
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| RerouteError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}
