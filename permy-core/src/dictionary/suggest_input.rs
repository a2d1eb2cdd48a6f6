use serde::{Deserialize, Serialize};

/// How a dictionary entry is turned into completions.
///
/// # Variants
/// - `One`: sample a single completion.
/// - `All`: enumerate every completion (up to `max_results`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	One,
	All,
}

/// Parameters of a suggestion lookup.
///
/// # Invariants
/// - `window` is at least 1
/// - `max_results`, when set, is at least 1
pub struct SuggestInput {
	/// Expansion mode for the matched entry.
	pub mode: Mode,

	/// Number of trailing words considered for the longest key.
	window: usize,

	/// Cap on enumerated completions (`None` = unbounded).
	max_results: Option<usize>,

	/// Sentence delimiters; only the text after the last one is used.
	delimiters: Vec<char>,
}

impl Default for SuggestInput {
	fn default() -> Self {
		Self { mode: Mode::One, window: 3, max_results: None, delimiters: vec!['.', ','] }
	}
}

impl SuggestInput {
	pub fn new(mode: Mode) -> Self {
		Self { mode, ..Self::default() }
	}

	pub fn window(&self) -> usize {
		self.window
	}

	/// Effective enumeration cap.
	pub fn max_results(&self) -> usize {
		self.max_results.unwrap_or(usize::MAX)
	}

	pub fn delimiters(&self) -> &[char] {
		&self.delimiters
	}

	/// Sets how many trailing words form the longest key.
	///
	/// # Errors
	/// Returns an error if `window` is 0.
	pub fn set_window(&mut self, window: usize) -> Result<(), String> {
		if window == 0 {
			return Err("Window must contain at least one word".to_owned());
		}
		self.window = window;
		Ok(())
	}

	/// Caps the number of completions returned in `Mode::All`.
	///
	/// # Errors
	/// Returns an error for `Some(0)`.
	pub fn set_max_results(&mut self, max_results: Option<usize>) -> Result<(), String> {
		if max_results == Some(0) {
			return Err("max_results must be at least 1".to_owned());
		}
		self.max_results = max_results;
		Ok(())
	}

	/// Replaces the sentence delimiters.
	///
	/// # Errors
	/// Returns an error if a delimiter is whitespace (words are split on it).
	pub fn set_delimiters(&mut self, delimiters: Vec<char>) -> Result<(), String> {
		if let Some(c) = delimiters.iter().find(|c| c.is_whitespace()) {
			return Err(format!("Delimiter {c:?} cannot be whitespace"));
		}
		self.delimiters = delimiters;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_follow_the_widget() {
		let input = SuggestInput::default();
		assert_eq!(input.mode, Mode::One);
		assert_eq!(input.window(), 3);
		assert_eq!(input.max_results(), usize::MAX);
		assert_eq!(input.delimiters(), &['.', ',']);
	}

	#[test]
	fn setters_validate() {
		let mut input = SuggestInput::new(Mode::All);
		assert!(input.set_window(0).is_err());
		assert!(input.set_window(2).is_ok());
		assert!(input.set_max_results(Some(0)).is_err());
		assert!(input.set_max_results(Some(5)).is_ok());
		assert_eq!(input.max_results(), 5);
		assert!(input.set_delimiters(vec![' ']).is_err());
		assert!(input.set_delimiters(vec![';']).is_ok());
	}

	#[test]
	fn mode_reads_lowercase() {
		assert_eq!(serde_json::from_str::<Mode>("\"all\"").unwrap(), Mode::All);
	}
}
