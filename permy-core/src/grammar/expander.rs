use rand::Rng;

/// A directive-free node, ready to be expanded.
///
/// Produced by the resolver from a `Node`: literals and sub-branches are
/// split once so that neither expansion mode has to filter alternatives.
///
/// The strings generated at this position are every literal (or `""` when
/// there is none) followed, when sub-branches exist, by one string generated
/// by one of the sub-branches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Expansion {
	literals: Vec<String>,
	branches: Vec<Expansion>,
}

impl Expansion {
	pub(crate) fn push_literal(&mut self, literal: String) {
		self.literals.push(literal);
	}

	pub(crate) fn push_branch(&mut self, branch: Expansion) {
		self.branches.push(branch);
	}

	pub(crate) fn text(text: &str) -> Self {
		Self { literals: vec![text.to_owned()], branches: Vec::new() }
	}

	/// Attaches `tail` after every terminal path.
	///
	/// A position without sub-branches receives `tail` as its only
	/// sub-branch; otherwise the tail is pushed down into every sub-branch.
	pub(crate) fn graft(&mut self, tail: &Expansion) {
		if self.branches.is_empty() {
			self.branches.push(tail.clone());
		} else {
			for branch in &mut self.branches {
				branch.graft(tail);
			}
		}
	}

	/// Collects generated strings depth-first, in insertion order, stopping
	/// once `out` holds `limit` strings.
	pub(crate) fn enumerate_into(&self, prefix: &str, out: &mut Vec<String>, limit: usize) {
		for literal in self.prefixes() {
			if out.len() >= limit {
				return;
			}
			let current = format!("{prefix}{literal}");
			if self.branches.is_empty() {
				out.push(current);
				continue;
			}
			for branch in &self.branches {
				branch.enumerate_into(&current, out, limit);
			}
		}
	}

	/// Picks one literal, then one sub-branch, uniformly at each level.
	pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		let mut word = String::new();
		let mut node = self;
		loop {
			if !node.literals.is_empty() {
				word.push_str(&node.literals[rng.random_range(0..node.literals.len())]);
			}
			if node.branches.is_empty() {
				return word;
			}
			node = &node.branches[rng.random_range(0..node.branches.len())];
		}
	}

	fn prefixes(&self) -> Vec<&str> {
		if self.literals.is_empty() {
			vec![""]
		} else {
			self.literals.iter().map(String::as_str).collect()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn node(literals: &[&str], branches: Vec<Expansion>) -> Expansion {
		Expansion { literals: literals.iter().map(|s| s.to_string()).collect(), branches }
	}

	fn all(expansion: &Expansion) -> Vec<String> {
		let mut out = Vec::new();
		expansion.enumerate_into("", &mut out, usize::MAX);
		out
	}

	#[test]
	fn literals_alone_enumerate_to_themselves() {
		assert_eq!(all(&node(&["a", "b"], vec![])), vec!["a", "b"]);
	}

	#[test]
	fn empty_node_yields_one_empty_string() {
		assert_eq!(all(&Expansion::default()), vec![""]);
		assert_eq!(Expansion::default().sample(&mut StdRng::seed_from_u64(1)), "");
	}

	#[test]
	fn cross_product_keeps_insertion_order() {
		let expansion = node(&["a", "b"], vec![node(&["c"], vec![]), node(&["d", "e"], vec![])]);
		assert_eq!(all(&expansion), vec!["ac", "ad", "ae", "bc", "bd", "be"]);
	}

	#[test]
	fn duplicates_are_kept() {
		assert_eq!(all(&node(&["a", "a"], vec![])), vec!["a", "a"]);
	}

	#[test]
	fn limit_stops_early() {
		let expansion = node(&["a", "b"], vec![node(&["c", "d"], vec![])]);
		let mut out = Vec::new();
		expansion.enumerate_into("", &mut out, 3);
		assert_eq!(out, vec!["ac", "ad", "bc"]);
	}

	#[test]
	fn graft_reaches_every_terminal_path() {
		let mut expansion = node(&[], vec![node(&["a"], vec![]), node(&["b", "c"], vec![])]);
		expansion.graft(&Expansion::text("D"));
		assert_eq!(all(&expansion), vec!["aD", "bD", "cD"]);
	}

	#[test]
	fn sample_is_always_enumerated() {
		let expansion = node(&["x", "y"], vec![node(&["1", "2"], vec![node(&["!"], vec![])]), node(&["3"], vec![])]);
		let every = all(&expansion);
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..200 {
			assert!(every.contains(&expansion.sample(&mut rng)));
		}
	}
}
