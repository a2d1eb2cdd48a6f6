//! Error types shared by the grammar engine and the dictionary layer.

/// Failure raised while compiling or expanding a grammar.
///
/// Every variant is reported to the immediate caller; the engine never
/// swallows one and never returns a partial expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
	/// Malformed alternation syntax (unbalanced or nested parenthesis).
	#[error("parse error at offset {position}: {reason}")]
	Parse {
		/// Character offset of the offending parenthesis (or end of input).
		position: usize,
		reason: String,
	},

	/// A branch reference names a branch absent from the dictionary.
	#[error("unknown branch '{0}'")]
	UnknownBranch(String),

	/// A branch reference chain revisits a branch already being expanded.
	#[error("cyclic reference to branch '{0}'")]
	CyclicGrammar(String),

	/// A prebuilt structure has a shape the engine cannot interpret.
	#[error("invalid structure at {path}: {reason}")]
	Structure {
		/// JSON-pointer-like location of the offending value.
		path: String,
		reason: String,
	},
}

impl GrammarError {
	pub(crate) fn parse(position: usize, reason: &str) -> Self {
		Self::Parse { position, reason: reason.to_owned() }
	}

	pub(crate) fn structure(path: &str, reason: impl Into<String>) -> Self {
		let path = if path.is_empty() { "/".to_owned() } else { path.to_owned() };
		Self::Structure { path, reason: reason.into() }
	}
}

/// Failure raised while loading, caching or compiling a dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("binary cache error: {0}")]
	Cache(#[from] postcard::Error),

	/// The dictionary root is not a JSON object.
	#[error("dictionary root must be an object of entries")]
	NotAnObject,

	/// One entry failed to compile.
	#[error("entry '{key}': {source}")]
	Entry {
		key: String,
		#[source]
		source: GrammarError,
	},

	/// A compilation worker disappeared before reporting.
	#[error("compilation worker failed: {0}")]
	Worker(String),
}
