use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::slug::slugify;
use super::suggest_input::{Mode, SuggestInput};
use crate::error::{DictionaryError, GrammarError};
use crate::grammar::CompiledGrammar;
use crate::io::{build_output_path, get_filename, read_file};

/// Completions found for the tail of a text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
	/// Dictionary key that matched.
	pub key: String,
	/// Number of trailing words the key was built from.
	pub matched_words: usize,
	/// Non-empty completions, in enumeration order.
	pub completions: Vec<String>,
}

/// Precomputed typeahead dictionary: slug key → compiled grammar.
///
/// This struct manages:
/// - `entries`: one compiled grammar per key (e.g. `"i_like"`)
/// - `names`: names of the dictionary files loaded or merged in
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Dictionary {
	entries: HashMap<String, CompiledGrammar>,
	names: Vec<String>,
}

impl Dictionary {
	/// Loads a dictionary from a JSON file.
	///
	/// - If `<name>.bin` exists beside the file, it is loaded instead (postcard).
	/// - Otherwise every entry of the JSON object is compiled and the result is
	///   written to `<name>.bin` for the next load.
	///
	/// # Errors
	/// Returns an error on I/O failure, invalid JSON, a corrupted cache, or
	/// an entry that does not compile.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, DictionaryError> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		let mut dictionary: Self;
		if binary_data_path.exists() {
			debug!("loading cached dictionary {}", binary_data_path.display());
			let bytes = std::fs::read(&binary_data_path)?;
			dictionary = postcard::from_bytes(&bytes)?;
		} else {
			dictionary = Self::read_dictionary_file(&filepath, &binary_data_path)?;
		}
		dictionary.names.push(get_filename(&filepath)?);
		Ok(dictionary)
	}

	/// Reads and compiles a JSON dictionary, then caches it.
	///
	/// A cache that cannot be written only costs the next load a recompile,
	/// so the failure is logged and the compiled dictionary still returned.
	fn read_dictionary_file<PF, PB>(filename: PF, binary_data_path: PB) -> Result<Self, DictionaryError>
	where
		PF: AsRef<Path>,
		PB: AsRef<Path>,
	{
		let contents = read_file(&filename)?;
		let value: Value = serde_json::from_str(&contents)?;
		let dictionary = Self::from_json(&value)?;
		debug!("compiled {} entries from {}", dictionary.len(), filename.as_ref().display());

		let bytes = postcard::to_stdvec(&dictionary)?;
		if let Err(e) = std::fs::write(&binary_data_path, bytes) {
			warn!("could not write dictionary cache {}: {e}", binary_data_path.as_ref().display());
		}

		Ok(dictionary)
	}

	/// Compiles a JSON object of `key → prebuilt entry`.
	///
	/// Entries are split into chunks (based on CPU cores * factor) and
	/// compiled on worker threads; results are collected over a channel.
	pub fn from_json(value: &Value) -> Result<Self, DictionaryError> {
		let Value::Object(map) = value else {
			return Err(DictionaryError::NotAnObject);
		};
		let entries: Vec<(String, Value)> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
		Self::compile_entries(entries)
	}

	fn compile_entries(entries: Vec<(String, Value)>) -> Result<Self, DictionaryError> {
		let mut dictionary = Self::default();
		if entries.is_empty() {
			return Ok(dictionary);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = entries.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let mut workers = 0;
		for chunk in entries.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk = chunk.to_vec();
			workers += 1;

			thread::spawn(move || {
				let mut compiled = Vec::with_capacity(chunk.len());
				for (key, value) in chunk {
					match CompiledGrammar::from_json(&value) {
						Ok(grammar) => compiled.push((key, grammar)),
						Err(source) => {
							let _ = tx.send(Err(DictionaryError::Entry { key, source }));
							return;
						}
					}
				}
				let _ = tx.send(Ok(compiled));
			});
		}
		drop(tx);

		let mut reported = 0;
		for result in rx.iter() {
			reported += 1;
			dictionary.entries.extend(result?);
		}
		if reported != workers {
			return Err(DictionaryError::Worker(format!("{} of {workers} workers did not report", workers - reported)));
		}

		Ok(dictionary)
	}

	/// Returns the names of the dictionary files this instance was built from.
	pub fn get_names(&self) -> &[String] {
		&self.names
	}

	/// Adds or replaces one entry.
	pub fn insert(&mut self, key: &str, grammar: CompiledGrammar) -> Option<CompiledGrammar> {
		self.entries.insert(key.to_owned(), grammar)
	}

	pub fn get(&self, key: &str) -> Option<&CompiledGrammar> {
		self.entries.get(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Merges another dictionary into this one.
	///
	/// Entries of `other` replace entries with the same key; names are appended.
	pub fn merge(&mut self, other: &Self) {
		self.entries.extend(other.entries.iter().map(|(k, g)| (k.clone(), g.clone())));
		self.names.extend(other.names.iter().cloned());
	}

	/// Looks up a completion for the end of `text`.
	pub fn suggest(&self, text: &str, input: &SuggestInput) -> Result<Option<Suggestion>, GrammarError> {
		self.suggest_with(text, input, &mut rand::rng())
	}

	/// Same as `suggest`, drawing samples from the given generator.
	///
	/// # Behavior
	/// - Keeps the last `window` words, then only what follows the last
	///   occurrence of each delimiter.
	/// - Tries the longest key first (`"i_really_like"`), dropping the
	///   leading word until an entry produces a non-empty completion.
	///
	/// # Errors
	/// Engine errors of the matched entry are returned as-is; the caller
	/// decides whether that means "no suggestion".
	pub fn suggest_with<R: Rng + ?Sized>(&self, text: &str, input: &SuggestInput, rng: &mut R) -> Result<Option<Suggestion>, GrammarError> {
		if slugify(text, "_").is_empty() {
			return Ok(None);
		}

		let mut words: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
		let start = words.len().saturating_sub(input.window());
		words.drain(..start);
		for delimiter in input.delimiters() {
			words = cut_after(&words, *delimiter);
		}

		while !words.is_empty() {
			let key = slugify(&words.join(" "), "_");
			if let Some(grammar) = self.entries.get(&key) {
				let mut completions = match input.mode {
					Mode::One => vec![grammar.sample_with(rng)?],
					Mode::All => grammar.enumerate_limited(input.max_results())?,
				};
				completions.retain(|c| !c.is_empty());
				if !completions.is_empty() {
					return Ok(Some(Suggestion { key, matched_words: words.len(), completions }));
				}
			}
			words.remove(0);
		}

		Ok(None)
	}
}

/// Keeps the words following the last `delimiter`.
fn cut_after(words: &[String], delimiter: char) -> Vec<String> {
	let joined = words.join(" ");
	let tail = joined.rsplit(delimiter).next().unwrap_or_default();
	tail.split_whitespace().map(str::to_owned).collect()
}

/// Appends a completion to the text, separated by exactly one space.
pub fn insert_completion(text: &str, completion: &str) -> String {
	if text.is_empty() || text.ends_with(char::is_whitespace) {
		format!("{text}{completion}")
	} else {
		format!("{text} {completion}")
	}
}
