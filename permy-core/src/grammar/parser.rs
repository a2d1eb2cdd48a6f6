use crate::error::GrammarError;

/// A piece of a compact alternation string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
	/// Text outside any parenthesis, kept verbatim.
	Literal(String),
	/// A `(a|b|c)` group, holding its alternatives in order.
	Group(Vec<String>),
}

/// Splits an alternation string into literal and group parts.
///
/// - A `(` opens a group and the next `)` closes it; groups do not nest.
/// - `|` separates alternatives inside a group and is plain text outside.
/// - Empty literal runs (between two adjacent groups) are dropped.
///
/// # Errors
/// Returns `GrammarError::Parse` on a nested `(`, a stray `)` or an
/// unclosed group.
pub fn parse(text: &str) -> Result<Vec<Part>, GrammarError> {
	let mut parts = Vec::new();
	let mut current = String::new();
	// Offset of the `(` of the group being read, if any
	let mut open: Option<usize> = None;

	for (position, c) in text.chars().enumerate() {
		match (c, open) {
			('(', None) => {
				if !current.is_empty() {
					parts.push(Part::Literal(std::mem::take(&mut current)));
				}
				open = Some(position);
			}
			('(', Some(_)) => return Err(GrammarError::parse(position, "nested groups are not supported")),
			(')', Some(_)) => {
				let group = std::mem::take(&mut current);
				parts.push(Part::Group(group.split('|').map(str::to_owned).collect()));
				open = None;
			}
			(')', None) => return Err(GrammarError::parse(position, "unmatched ')'")),
			_ => current.push(c),
		}
	}

	if let Some(position) = open {
		return Err(GrammarError::parse(position, "unclosed '('"));
	}
	if !current.is_empty() {
		parts.push(Part::Literal(current));
	}

	Ok(parts)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn group(alternatives: &[&str]) -> Part {
		Part::Group(alternatives.iter().map(|s| s.to_string()).collect())
	}

	#[test]
	fn splits_literals_and_groups_in_order() {
		let parts = parse("I (like|love) (cats|dogs|birds)").unwrap();
		assert_eq!(
			parts,
			vec![
				Part::Literal("I ".to_owned()),
				group(&["like", "love"]),
				Part::Literal(" ".to_owned()),
				group(&["cats", "dogs", "birds"]),
			]
		);
	}

	#[test]
	fn adjacent_groups_have_no_empty_literal() {
		assert_eq!(parse("(a|b)(c|d)").unwrap(), vec![group(&["a", "b"]), group(&["c", "d"])]);
	}

	#[test]
	fn empty_group_and_empty_alternatives_are_kept() {
		assert_eq!(parse("()").unwrap(), vec![group(&[""])]);
		assert_eq!(parse("(a|)").unwrap(), vec![group(&["a", ""])]);
	}

	#[test]
	fn pipe_outside_group_is_text() {
		assert_eq!(parse("a|b").unwrap(), vec![Part::Literal("a|b".to_owned())]);
	}

	#[test]
	fn empty_input_has_no_parts() {
		assert!(parse("").unwrap().is_empty());
	}

	#[test]
	fn reports_unbalanced_parentheses() {
		assert_eq!(parse("(a|b"), Err(GrammarError::parse(0, "unclosed '('")));
		assert_eq!(parse("a)b"), Err(GrammarError::parse(1, "unmatched ')'")));
		assert!(matches!(parse("(a|(b))"), Err(GrammarError::Parse { position: 3, .. })));
	}

	#[test]
	fn offsets_count_characters_not_bytes() {
		assert!(matches!(parse("é)"), Err(GrammarError::Parse { position: 1, .. })));
	}
}
