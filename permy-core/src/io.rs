use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole text file into a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/en.json` + `"bin"` → `data/en.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/en.json"` → `"en"`
/// - `"en.json"` → `"en"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists the stems of all files with a given extension in a directory,
/// sorted by name.
///
/// `data/en.json` + `"json"` → `"en"`
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(get_filename(&path)?);
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cache_path_sits_next_to_the_source() {
		assert_eq!(build_output_path("data/en.json", "bin").unwrap(), PathBuf::from("data/en.bin"));
		assert_eq!(build_output_path("en.json", "bin").unwrap(), PathBuf::from("en.bin"));
	}

	#[test]
	fn filename_has_no_extension() {
		assert_eq!(get_filename("./data/en.json").unwrap(), "en");
	}

	#[test]
	fn lists_only_matching_extension() {
		let dir = env::temp_dir().join(format!("permy-io-{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		fs::write(dir.join("b.json"), "{}").unwrap();
		fs::write(dir.join("a.json"), "{}").unwrap();
		fs::write(dir.join("a.bin"), "").unwrap();
		assert_eq!(list_files(&dir, "json").unwrap(), vec!["a", "b"]);
		fs::remove_dir_all(&dir).unwrap();
	}
}
