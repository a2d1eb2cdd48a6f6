use std::collections::HashMap;

use log::trace;

use super::compiled::{CompiledGrammar, MAIN};
use super::node::{Alternative, Continuation, Directive, Node};
use super::parser::Part;

/// Incrementally turns parsed parts into a branch dictionary.
///
/// Each group is registered as its own named branch and chained after
/// everything already in `main`, so the compiled grammar yields the
/// left-to-right concatenation of one independent choice per group.
///
/// ## Invariants
/// - Generated names are never reused and never collide with `main`
/// - `main` is never stored in `branches` before `finish`
#[derive(Debug, Default)]
pub struct TreeBuilder {
	branches: HashMap<String, Node>,
	main: Node,
	/// Monotonic suffix for generated branch names.
	counter: usize,
}

impl TreeBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends one part after everything pushed so far.
	pub fn push(&mut self, part: Part) {
		let tail = match part {
			Part::Group(alternatives) => {
				let name = self.unique_branch_name("group");
				self.branches.insert(name.clone(), Node::literals(alternatives));
				Node::reference(&name, None)
			}
			Part::Literal(text) if self.main.is_empty() => {
				self.main = Node::literals([text]);
				return;
			}
			Part::Literal(text) => Node::literals([text]),
		};

		let mut main = std::mem::take(&mut self.main);
		self.graft(&mut main, &tail);
		self.main = main;
	}

	/// Attaches `tail` after every path through `node`.
	///
	/// - Terminal node: `tail` becomes an extra sub-branch, so it follows
	///   whichever literal is chosen.
	/// - Otherwise literals are left alone (a sub-branch always follows them),
	///   nested branches receive the tail recursively, and each directive is
	///   moved into a fresh auxiliary branch referenced with `then: tail`.
	fn graft(&mut self, node: &mut Node, tail: &Node) {
		if node.is_terminal() {
			node.push(Alternative::Branch(tail.clone()));
			return;
		}

		for alternative in node.alternatives_mut().iter_mut() {
			match alternative {
				Alternative::Literal(_) => (),
				Alternative::Branch(sub) => self.graft(sub, tail),
				Alternative::Directive(_) => {
					let name = self.unique_branch_name("then");
					let reference = Alternative::Directive(Directive::Branch {
						name: name.clone(),
						then: Some(Continuation::Node(tail.clone())),
					});
					let wrapped = std::mem::replace(alternative, reference);
					trace!("synthesized branch '{name}' for a pending continuation");
					self.branches.insert(name, Node::new(vec![wrapped]));
				}
			}
		}
	}

	/// Returns a branch name absent from the dictionary.
	fn unique_branch_name(&mut self, prefix: &str) -> String {
		loop {
			self.counter += 1;
			let name = format!("{prefix}-{}", self.counter);
			if name != MAIN && !self.branches.contains_key(&name) {
				return name;
			}
		}
	}

	/// Seals the dictionary, storing the accumulated sequence as `main`.
	pub fn finish(mut self) -> CompiledGrammar {
		self.branches.insert(MAIN.to_owned(), self.main);
		CompiledGrammar::from_branches(self.branches, MAIN)
	}
}

/// Builds a grammar from parts in one go.
pub fn build(parts: impl IntoIterator<Item = Part>) -> CompiledGrammar {
	let mut builder = TreeBuilder::new();
	for part in parts {
		builder.push(part);
	}
	builder.finish()
}
