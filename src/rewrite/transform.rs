use crate::rules::RuleSet;
use regex::NoExpand;

/// Result of applying a rule set to a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	/// The rewritten text.
	pub text: String,

	/// Substitutions applied per rule, in rule order.
	pub counts: Vec<usize>,
}

impl Rewrite {
	/// Total substitutions across all rules.
	pub fn total(&self) -> usize {
		self.counts.iter().sum()
	}

	pub fn changed(&self) -> bool {
		self.total() > 0
	}
}

/// Apply every rule in order, replacing all non-overlapping matches.
pub fn rewrite_text(text: &str, rules: &RuleSet) -> Rewrite {
	let mut current = text.to_string();
	let mut counts = Vec::with_capacity(rules.len());

	for rule in rules.rules() {
		let hits = rule.regex.find_iter(&current).count();
		if hits > 0 {
			current = rule
				.regex
				.replace_all(&current, NoExpand(rule.replacement()))
				.into_owned();
		}
		counts.push(hits);
	}

	Rewrite {
		text: current,
		counts,
	}
}
