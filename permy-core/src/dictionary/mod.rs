//! Typeahead dictionary built on top of the grammar engine.
//!
//! Keys are slugs of the last few typed words (`"i_like"`); values are
//! compiled grammars expanded into one or all completions.

/// Dictionary loading, caching, merging and suggestion lookup.
pub mod store;

/// Lookup configuration (`SuggestInput`, `Mode`).
pub mod suggest_input;

/// Text to dictionary key normalization.
pub mod slug;

pub use store::{Dictionary, Suggestion, insert_completion};
pub use slug::slugify;
pub use suggest_input::{Mode, SuggestInput};
