use super::compiled::{CompiledGrammar, MAIN};
use super::expander::Expansion;
use super::node::{Alternative, Continuation, Directive, Node};
use crate::error::GrammarError;

/// Turns a grammar node into a directive-free `Expansion`.
///
/// The grammar is only ever borrowed: every referenced branch is rebuilt
/// into a fresh owned `Expansion` before a continuation is grafted onto it,
/// so two references to the same branch never observe each other.
///
/// `path` holds the branch names currently being resolved; meeting one of
/// them again is a cycle.
pub(crate) struct Resolver<'g> {
	grammar: &'g CompiledGrammar,
	path: Vec<String>,
}

impl<'g> Resolver<'g> {
	pub(crate) fn new(grammar: &'g CompiledGrammar) -> Self {
		Self { grammar, path: Vec::new() }
	}

	/// Resolves the named branch, then grafts `then` after all its paths.
	///
	/// # Errors
	/// - `UnknownBranch` if `name` is not in the grammar
	/// - `CyclicGrammar` if `name` is already being resolved on this path
	pub(crate) fn resolve_branch(&mut self, name: &str, then: Option<&Continuation>) -> Result<Expansion, GrammarError> {
		if self.path.iter().any(|visited| visited == name) {
			return Err(GrammarError::CyclicGrammar(name.to_owned()));
		}
		let node = self
			.grammar
			.branch(name)
			.ok_or_else(|| GrammarError::UnknownBranch(name.to_owned()))?;

		self.path.push(name.to_owned());
		let resolved = self.resolve_node(node);
		self.path.pop();
		let mut resolved = resolved?;

		if let Some(then) = then {
			let tail = match then {
				Continuation::Text(text) => Expansion::text(text),
				Continuation::Node(node) => self.resolve_node(node)?,
			};
			resolved.graft(&tail);
		}

		Ok(resolved)
	}

	pub(crate) fn resolve_node(&mut self, node: &Node) -> Result<Expansion, GrammarError> {
		let mut expansion = Expansion::default();
		for alternative in node.alternatives() {
			match alternative {
				Alternative::Literal(text) => expansion.push_literal(text.clone()),
				Alternative::Branch(sub) => expansion.push_branch(self.resolve_node(sub)?),
				Alternative::Directive(directive) => expansion.push_branch(self.resolve_directive(directive)?),
			}
		}
		Ok(expansion)
	}

	fn resolve_directive(&mut self, directive: &Directive) -> Result<Expansion, GrammarError> {
		match directive {
			Directive::Branch { name, then } => self.resolve_branch(name, then.as_ref()),
			Directive::Script(text) => {
				// Inline scripts compile to their own dictionary; names never leak across.
				let nested = CompiledGrammar::from_script(text)?;
				Resolver::new(&nested).resolve_branch(MAIN, None)
			}
		}
	}
}
