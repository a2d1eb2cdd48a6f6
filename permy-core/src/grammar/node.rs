use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GrammarError;

/// One choice at a given position of a branch.
///
/// The variant is decided once, when the node is built or read from a
/// prebuilt structure, so expansion never has to probe shapes again.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Alternative {
	/// Plain text; a terminal choice.
	Literal(String),
	/// Nested sequence of alternatives, expanded and joined after the literal prefix.
	Branch(Node),
	/// Reference resolved at expansion time.
	Directive(Directive),
}

/// Instruction resolved against the owning grammar at expansion time.
///
/// Read from `{"branch": name, "then": ..}` or `{"script": text}` (`ps` is
/// accepted for `script`). Any other key is a `Structure` error.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Directive {
	/// Expands the named branch, optionally followed by `then` after every path.
	Branch {
		name: String,
		then: Option<Continuation>,
	},
	/// Compiles the text as a fresh alternation grammar. Takes no `then`.
	Script(String),
}

/// What follows every terminal path of a referenced branch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Continuation {
	Text(String),
	Node(Node),
}

/// An ordered sequence of alternatives: "one of these, at this position".
///
/// Literals act as prefixes; when the node also holds sub-branches, one of
/// them is expanded after the chosen literal.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
	alternatives: Vec<Alternative>,
}

impl Node {
	pub fn new(alternatives: Vec<Alternative>) -> Self {
		Self { alternatives }
	}

	/// Builds a node holding only literal alternatives.
	pub fn literals<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(values.into_iter().map(|s| Alternative::Literal(s.into())).collect())
	}

	/// Builds a node holding a single branch reference.
	pub fn reference(name: &str, then: Option<Continuation>) -> Self {
		Self::new(vec![Alternative::Directive(Directive::Branch { name: name.to_owned(), then })])
	}

	pub fn alternatives(&self) -> &[Alternative] {
		&self.alternatives
	}

	pub(crate) fn alternatives_mut(&mut self) -> &mut Vec<Alternative> {
		&mut self.alternatives
	}

	pub fn push(&mut self, alternative: Alternative) {
		self.alternatives.push(alternative);
	}

	pub fn is_empty(&self) -> bool {
		self.alternatives.is_empty()
	}

	/// A node is terminal when every alternative is a literal.
	pub fn is_terminal(&self) -> bool {
		self.alternatives.iter().all(|alt| matches!(alt, Alternative::Literal(_)))
	}

	/// Reads a node from its prebuilt JSON form.
	///
	/// Accepted shapes:
	/// - a string: a node with one literal
	/// - an array: one alternative per element
	/// - a directive object: a node with that single directive
	pub fn from_json(value: &Value) -> Result<Self, GrammarError> {
		Self::read(value, "")
	}

	fn read(value: &Value, path: &str) -> Result<Self, GrammarError> {
		match value {
			Value::String(s) => Ok(Self::literals([s.as_str()])),
			Value::Array(items) => {
				let alternatives = items
					.iter()
					.enumerate()
					.map(|(i, item)| Alternative::read(item, &format!("{path}/{i}")))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(Self::new(alternatives))
			}
			Value::Object(map) => Ok(Self::new(vec![Alternative::Directive(Directive::read(map, path)?)])),
			other => Err(GrammarError::structure(path, format!("expected a string, an array or a directive, got {}", kind(other)))),
		}
	}

	/// Writes the node back to its prebuilt JSON form.
	pub fn to_json(&self) -> Value {
		Value::Array(self.alternatives.iter().map(Alternative::to_json).collect())
	}
}

impl Alternative {
	fn read(value: &Value, path: &str) -> Result<Self, GrammarError> {
		match value {
			Value::String(s) => Ok(Self::Literal(s.clone())),
			Value::Array(_) => Ok(Self::Branch(Node::read(value, path)?)),
			Value::Object(map) => Ok(Self::Directive(Directive::read(map, path)?)),
			other => Err(GrammarError::structure(path, format!("an alternative cannot be {}", kind(other)))),
		}
	}

	fn to_json(&self) -> Value {
		match self {
			Self::Literal(s) => Value::String(s.clone()),
			Self::Branch(node) => node.to_json(),
			Self::Directive(directive) => directive.to_json(),
		}
	}
}

impl Directive {
	fn read(map: &Map<String, Value>, path: &str) -> Result<Self, GrammarError> {
		let script = map.get("script").or_else(|| map.get("ps"));
		match (map.get("branch"), script) {
			(Some(_), Some(_)) => Err(GrammarError::structure(path, "directive cannot be both a branch and a script")),
			(Some(Value::String(name)), None) => {
				reject_unknown_keys(map, &["branch", "then"], path)?;
				let then = match map.get("then") {
					None | Some(Value::Null) => None,
					Some(Value::String(text)) => Some(Continuation::Text(text.clone())),
					Some(other) => Some(Continuation::Node(Node::read(other, &format!("{path}/then"))?)),
				};
				Ok(Self::Branch { name: name.clone(), then })
			}
			(Some(other), None) => Err(GrammarError::structure(&format!("{path}/branch"), format!("branch name must be a string, got {}", kind(other)))),
			(None, Some(Value::String(text))) => {
				reject_unknown_keys(map, &["script", "ps"], path)?;
				Ok(Self::Script(text.clone()))
			}
			(None, Some(other)) => Err(GrammarError::structure(&format!("{path}/script"), format!("script must be a string, got {}", kind(other)))),
			(None, None) => Err(GrammarError::structure(path, "object is neither a branch nor a script directive")),
		}
	}

	fn to_json(&self) -> Value {
		let mut map = Map::new();
		match self {
			Self::Branch { name, then } => {
				map.insert("branch".to_owned(), Value::String(name.clone()));
				match then {
					Some(Continuation::Text(text)) => {
						map.insert("then".to_owned(), Value::String(text.clone()));
					}
					Some(Continuation::Node(node)) => {
						map.insert("then".to_owned(), node.to_json());
					}
					None => (),
				}
			}
			Self::Script(text) => {
				map.insert("script".to_owned(), Value::String(text.clone()));
			}
		}
		Value::Object(map)
	}
}

fn reject_unknown_keys(map: &Map<String, Value>, allowed: &[&str], path: &str) -> Result<(), GrammarError> {
	match map.keys().find(|key| !allowed.contains(&key.as_str())) {
		Some(key) => Err(GrammarError::structure(&format!("{path}/{key}"), format!("unexpected key '{key}' in directive"))),
		None => Ok(()),
	}
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn reads_every_alternative_kind() {
		let node = Node::from_json(&json!(["hi ", ["there"], {"branch": "who", "then": "!"}, {"ps": "(a|b)"}])).unwrap();
		assert_eq!(
			node.alternatives(),
			&[
				Alternative::Literal("hi ".to_owned()),
				Alternative::Branch(Node::literals(["there"])),
				Alternative::Directive(Directive::Branch { name: "who".to_owned(), then: Some(Continuation::Text("!".to_owned())) }),
				Alternative::Directive(Directive::Script("(a|b)".to_owned())),
			]
		);
	}

	#[test]
	fn bare_string_is_a_single_literal() {
		assert_eq!(Node::from_json(&json!("hello")).unwrap(), Node::literals(["hello"]));
	}

	#[test]
	fn terminal_only_when_all_literals() {
		assert!(Node::literals(["a", "b"]).is_terminal());
		assert!(Node::default().is_terminal());
		assert!(!Node::reference("x", None).is_terminal());
	}

	#[test]
	fn rejects_numbers_with_their_location() {
		let err = Node::from_json(&json!(["a", ["b", 3]])).unwrap_err();
		match err {
			GrammarError::Structure { path, .. } => assert_eq!(path, "/1/1"),
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[test]
	fn rejects_unknown_directive_objects() {
		assert!(matches!(Node::from_json(&json!([{"goto": "x"}])), Err(GrammarError::Structure { .. })));
		assert!(matches!(Node::from_json(&json!([{"branch": 1}])), Err(GrammarError::Structure { .. })));
	}

	#[test]
	fn directives_reject_extra_keys() {
		match Node::from_json(&json!([{"script": "(a|b)", "then": "x"}])).unwrap_err() {
			GrammarError::Structure { path, .. } => assert_eq!(path, "/0/then"),
			other => panic!("unexpected error {other:?}"),
		}
		match Node::from_json(&json!([{"branch": "a", "colour": 1}])).unwrap_err() {
			GrammarError::Structure { path, .. } => assert_eq!(path, "/0/colour"),
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[test]
	fn json_form_survives_a_rewrite() {
		let value = json!(["a", ["b", {"branch": "x", "then": ["c"]}], {"script": "(d|e)"}]);
		assert_eq!(Node::from_json(&value).unwrap().to_json(), value);
	}
}
