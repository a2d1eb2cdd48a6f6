//! Permutation grammar engine for typeahead suggestions.
//!
//! This crate provides:
//! - A compiler for compact alternation strings (`"I (like|love) (cats|dogs)"`)
//!   and prebuilt JSON structures into branch dictionaries
//! - Enumeration of every generated string, or uniform sampling of one
//! - A slug-keyed dictionary turning the tail of a text into completions
//!
//! The engine is pure and synchronous: no global state, no I/O. Only the
//! dictionary layer touches the filesystem.

/// Grammar parsing, building and expansion.
pub mod grammar;

/// Dictionary of compiled grammars and suggestion lookup.
pub mod dictionary;

/// Error types of the engine and of the dictionary layer.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::{DictionaryError, GrammarError};
pub use grammar::{CompiledGrammar, Source};
