use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::builder;
use super::expander::Expansion;
use super::node::Node;
use super::parser;
use super::resolver::Resolver;
use crate::error::GrammarError;

/// Name of the default entry point of every compiled grammar.
pub const MAIN: &str = "main";

/// Input accepted by `CompiledGrammar::compile`.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
	/// Compact alternation syntax, e.g. `"I (like|love) (cats|dogs)"`.
	Script(String),
	/// Prebuilt structure as stored in dictionary assets.
	Prebuilt(Value),
}

impl From<&str> for Source {
	fn from(text: &str) -> Self {
		Self::Script(text.to_owned())
	}
}

impl From<String> for Source {
	fn from(text: String) -> Self {
		Self::Script(text)
	}
}

impl From<Value> for Source {
	fn from(value: Value) -> Self {
		Self::Prebuilt(value)
	}
}

/// A branch dictionary with a distinguished entry point.
///
/// Immutable once built. Expansion borrows it and resolves directives
/// again on every call, so a grammar can be expanded any number of times
/// (and from several threads) with identical results for `enumerate`.
///
/// # Example
/// ```ignore
/// let grammar = CompiledGrammar::compile("(a|b)(c|d)")?;
/// assert_eq!(grammar.enumerate()?, ["ac", "ad", "bc", "bd"]);
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompiledGrammar {
	branches: HashMap<String, Node>,
	entry: String,
}

impl CompiledGrammar {
	pub(crate) fn from_branches(branches: HashMap<String, Node>, entry: &str) -> Self {
		Self { branches, entry: entry.to_owned() }
	}

	/// Compiles a script or a prebuilt structure.
	///
	/// # Errors
	/// - `GrammarError::Parse` on malformed alternation syntax
	/// - `GrammarError::Structure` on a malformed prebuilt structure
	pub fn compile(source: impl Into<Source>) -> Result<Self, GrammarError> {
		match source.into() {
			Source::Script(text) => Self::from_script(&text),
			Source::Prebuilt(value) => Self::from_json(&value),
		}
	}

	/// Parses and builds a compact alternation string.
	pub fn from_script(text: &str) -> Result<Self, GrammarError> {
		Ok(builder::build(parser::parse(text)?))
	}

	/// Reads a prebuilt structure.
	///
	/// An object with a `main` key is a full dictionary, whatever its other
	/// branches are called. An object with a `branch`, `script` or `ps` key
	/// and no `main` is a directive; any other object is a dictionary missing
	/// `main`. Every non-object value is the `main` node itself.
	pub fn from_json(value: &Value) -> Result<Self, GrammarError> {
		match value {
			Value::Object(map) if map.contains_key(MAIN) || !is_directive(map) => {
				if !map.contains_key(MAIN) {
					return Err(GrammarError::structure("", format!("dictionary has no '{MAIN}' branch")));
				}
				let branches = map
					.iter()
					.map(|(name, node)| {
						let node = Node::from_json(node).map_err(|err| prefix_path(err, name))?;
						Ok((name.clone(), node))
					})
					.collect::<Result<HashMap<_, _>, GrammarError>>()?;
				Ok(Self::from_branches(branches, MAIN))
			}
			_ => {
				let main = Node::from_json(value)?;
				Ok(Self::from_branches(HashMap::from([(MAIN.to_owned(), main)]), MAIN))
			}
		}
	}

	/// Writes every branch back to the prebuilt JSON dictionary form.
	pub fn to_json(&self) -> Value {
		let map: Map<String, Value> = self
			.branches
			.iter()
			.map(|(name, node)| (name.clone(), node.to_json()))
			.collect();
		Value::Object(map)
	}

	pub fn entry(&self) -> &str {
		&self.entry
	}

	pub fn branch(&self, name: &str) -> Option<&Node> {
		self.branches.get(name)
	}

	pub fn branch_names(&self) -> impl Iterator<Item = &str> {
		self.branches.keys().map(String::as_str)
	}

	/// Every string the grammar generates from its entry point, in a
	/// deterministic order. Duplicates are kept.
	pub fn enumerate(&self) -> Result<Vec<String>, GrammarError> {
		self.enumerate_from(&self.entry)
	}

	/// Every string generated from the named branch.
	pub fn enumerate_from(&self, name: &str) -> Result<Vec<String>, GrammarError> {
		self.collect(name, usize::MAX)
	}

	/// The first `limit` strings `enumerate` would return, without
	/// materializing the rest.
	pub fn enumerate_limited(&self, limit: usize) -> Result<Vec<String>, GrammarError> {
		self.collect(&self.entry, limit)
	}

	/// One string chosen uniformly at each decision point.
	pub fn sample(&self) -> Result<String, GrammarError> {
		self.sample_with(&mut rand::rng())
	}

	/// Same as `sample`, drawing from the given generator.
	pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GrammarError> {
		self.sample_from_with(&self.entry, rng)
	}

	/// Samples from the named branch instead of the entry point.
	pub fn sample_from_with<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<String, GrammarError> {
		Ok(self.expansion(name)?.sample(rng))
	}

	fn collect(&self, name: &str, limit: usize) -> Result<Vec<String>, GrammarError> {
		let mut out = Vec::new();
		self.expansion(name)?.enumerate_into("", &mut out, limit);
		Ok(out)
	}

	fn expansion(&self, name: &str) -> Result<Expansion, GrammarError> {
		Resolver::new(self).resolve_branch(name, None)
	}
}

fn is_directive(map: &Map<String, Value>) -> bool {
	["branch", "script", "ps"].iter().any(|key| map.contains_key(*key))
}

fn prefix_path(err: GrammarError, name: &str) -> GrammarError {
	match err {
		GrammarError::Structure { path, reason } => {
			let path = if path == "/" { format!("/{name}") } else { format!("/{name}{path}") };
			GrammarError::Structure { path, reason }
		}
		other => other,
	}
}
