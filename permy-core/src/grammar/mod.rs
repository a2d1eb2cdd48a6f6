//! The permutation grammar engine.
//!
//! A compact alternation string such as `"I (like|love) (cats|dogs)"` is
//! split into parts (`parser`), chained into a branch dictionary
//! (`builder`), and expanded on demand (`resolver` + `expander`) either into
//! every string it can produce or into one string sampled uniformly at each
//! decision point.
//!
//! Prebuilt structures (JSON arrays, `{"branch": .., "then": ..}` and
//! `{"script": ..}` directives) skip the parser and builder.

/// Compiled grammar, sources and the public expansion API.
pub mod compiled;

/// Branch node model and its prebuilt JSON form.
pub mod node;

/// Compact alternation syntax splitter.
pub mod parser;

/// Part sequence to branch dictionary.
pub mod builder;

/// Directive resolution against a compiled grammar.
mod resolver;

/// Directive-free nodes, enumeration and sampling.
mod expander;

pub use compiled::{CompiledGrammar, MAIN, Source};
pub use node::{Alternative, Continuation, Directive, Node};
pub use parser::Part;
