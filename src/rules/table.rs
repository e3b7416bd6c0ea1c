/// A literal substitution: every occurrence of `pattern` becomes `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
	/// Quoted attribute-value prefix to match, e.g. `src="assets/images/`.
	pub pattern: String,

	/// Literal text inserted in place of each match.
	pub replacement: String,
}

impl SubstitutionRule {
	pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
		SubstitutionRule {
			pattern: pattern.into(),
			replacement: replacement.into(),
		}
	}
}

/// Pages moved one level down into `pages/` need a `../` in front of every
/// asset reference, and `assets/images/` was merged into `assets/img/`.
const PATH_RULES: &[(&str, &str)] = &[
	// images
	(r#"href="assets/images/"#, r#"href="../assets/img/"#),
	(r#"src="assets/images/"#, r#"src="../assets/img/"#),
	(r#"href='assets/images/"#, r#"href='../assets/img/"#),
	(r#"src='assets/images/"#, r#"src='../assets/img/"#),
	// scripts
	(r#"src="assets/scripts/"#, r#"src="../assets/scripts/"#),
	(r#"src='assets/scripts/"#, r#"src='../assets/scripts/"#),
	(r#"href="assets/scripts/"#, r#"href="../assets/scripts/"#),
	(r#"href='assets/scripts/"#, r#"href='../assets/scripts/"#),
	// styles
	(r#"href="assets/styles/"#, r#"href="../assets/styles/"#),
	(r#"href='assets/styles/"#, r#"href='../assets/styles/"#),
	// compiled stylesheets
	(r#"href="styles/"#, r#"href="../styles/"#),
	(r#"href='styles/"#, r#"href='../styles/"#),
];

/// The built-in rule table, in application order.
pub fn default_rules() -> Vec<SubstitutionRule> {
	PATH_RULES
		.iter()
		.map(|(pattern, replacement)| SubstitutionRule::new(*pattern, *replacement))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_rules_cover_both_quote_styles() {
		let rules = default_rules();
		for rule in &rules {
			let flipped = if rule.pattern.contains('"') {
				rule.pattern.replace('"', "'")
			} else {
				rule.pattern.replace('\'', "\"")
			};
			assert!(
				rules.iter().any(|r| r.pattern == flipped),
				"missing quote variant for {}",
				rule.pattern
			);
		}
	}

	#[test]
	fn test_default_rules_patterns_are_unique() {
		let rules = default_rules();
		let mut patterns: Vec<_> = rules.iter().map(|r| r.pattern.as_str()).collect();
		patterns.sort();
		patterns.dedup();
		assert_eq!(patterns.len(), rules.len());
	}

	#[test]
	fn test_replacements_only_prepend_parent_or_rename_images() {
		for rule in default_rules() {
			let (attr, rest) = rule.pattern.split_at(rule.pattern.find('=').unwrap() + 2);
			let expected = format!("{attr}../{}", rest.replace("assets/images/", "assets/img/"));
			assert_eq!(rule.replacement, expected);
		}
	}
}
