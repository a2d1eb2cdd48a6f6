//! Loading dictionaries from disk, with and without the binary cache.

use std::fs;
use std::path::PathBuf;

use permy_core::DictionaryError;
use permy_core::dictionary::{Dictionary, Mode, SuggestInput};

/// A scratch folder unique to one test.
fn scratch(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("permy-{name}-{}", std::process::id()));
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).unwrap();
	dir
}

#[test]
fn first_load_writes_a_cache_used_by_the_next() {
	let dir = scratch("cache");
	let source = dir.join("en.json");
	fs::write(&source, r#"{"i_like": "I (like|love) (cats|dogs)", "good": ["morning", "night"]}"#).unwrap();

	let first = Dictionary::new(&source).unwrap();
	assert!(dir.join("en.bin").exists());
	assert_eq!(first.get_names(), &["en".to_owned()]);

	// The cache wins over the JSON source from now on.
	fs::write(&source, "not json").unwrap();
	let second = Dictionary::new(&source).unwrap();
	assert_eq!(second.len(), 2);
	assert_eq!(
		second.get("good").unwrap().enumerate().unwrap(),
		first.get("good").unwrap().enumerate().unwrap()
	);

	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn prebuilt_strings_are_literals_not_scripts() {
	let dir = scratch("literal");
	let source = dir.join("fr.json");
	fs::write(&source, r#"{"bon": "(jour|soir)"}"#).unwrap();

	let dictionary = Dictionary::new(&source).unwrap();
	assert_eq!(dictionary.get("bon").unwrap().enumerate().unwrap(), vec!["(jour|soir)"]);

	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn invalid_json_is_reported() {
	let dir = scratch("invalid");
	let source = dir.join("broken.json");
	fs::write(&source, "{").unwrap();

	assert!(matches!(Dictionary::new(&source), Err(DictionaryError::Json(_))));
	assert!(!dir.join("broken.bin").exists());

	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
	let dir = scratch("missing");
	assert!(matches!(Dictionary::new(dir.join("nope.json")), Err(DictionaryError::Io(_))));
	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn merged_dictionaries_suggest_from_both() {
	let dir = scratch("merge");
	fs::write(dir.join("a.json"), r#"{"hello": ["world"]}"#).unwrap();
	fs::write(dir.join("b.json"), r#"{"good": [{"script": "(morning|night)"}]}"#).unwrap();

	let mut dictionary = Dictionary::default();
	dictionary.merge(&Dictionary::new(dir.join("a.json")).unwrap());
	dictionary.merge(&Dictionary::new(dir.join("b.json")).unwrap());
	assert_eq!(dictionary.get_names(), &["a".to_owned(), "b".to_owned()]);

	let input = SuggestInput::new(Mode::All);
	assert_eq!(dictionary.suggest("Hello", &input).unwrap().unwrap().completions, vec!["world"]);
	assert_eq!(dictionary.suggest("so good", &input).unwrap().unwrap().completions, vec!["morning", "night"]);

	fs::remove_dir_all(&dir).unwrap();
}
