/// Accent folding table, checked in order; the first set containing the
/// (uppercased) character wins.
const FOLDS: &[(&str, &str)] = &[
	("ÀÁÂÃÅÆĀĂĄẠẢẤẦẨẪẬẮẰẲẴẶ", "a"),
	("ÄÆ", "ae"),
	("ÇĆĈČ", "c"),
	("ÐĎĐÞ", "d"),
	("ÈÉÊËĒĔĖĘĚẸẺẼẾỀỂỄỆ", "e"),
	("ĜĞĢǴ", "g"),
	("ĤḦ", "h"),
	("ÌÍÎÏĨĪĮİỈỊ", "i"),
	("Ĵ", "j"),
	("Ĳ", "ij"),
	("Ķ", "k"),
	("ĹĻĽŁ", "l"),
	("Ḿ", "m"),
	("ÑŃŅŇ", "n"),
	("ÒÓÔÕØŌŎŐỌỎỐỒỔỖỘỚỜỞỠỢǪǬƠ", "o"),
	("ŒÖØ", "oe"),
	("Ṕ", "p"),
	("ŔŖŘ", "r"),
	("ŚŜŞŠ", "s"),
	("ß", "ss"),
	("ŢŤ", "t"),
	("ÙÚÛŨŪŬŮŰŲỤỦỨỪỬỮỰƯ", "u"),
	("Ü", "ue"),
	("ẂŴẀẄ", "w"),
	("Ẍ", "x"),
	("ÝŶŸỲỴỶỸ", "y"),
	("ŹŻŽ", "z"),
	("·/_,:;'", "-"),
];

fn fold(c: char) -> Option<&'static str> {
	let upper: Vec<char> = c.to_uppercase().collect();
	FOLDS
		.iter()
		.find(|(from, _)| from.chars().any(|f| f == c || (upper.len() == 1 && f == upper[0])))
		.map(|(_, to)| *to)
}

/// Turns free text into a dictionary key.
///
/// - Lowercases and folds accented Latin letters (`é` → `e`, `ß` → `ss`)
/// - `·/_,:;'` and whitespace runs become `-`, `&` becomes `-and-`
/// - Drops anything outside `[a-z0-9-]`
/// - Collapses repeated `-`, trims leading/trailing `-`
/// - Finally replaces `-` with `separator`
///
/// Example: `slugify("Crème brûlée", "_")` → `"creme_brulee"`
pub fn slugify(text: &str, separator: &str) -> String {
	let mut folded = String::new();
	let mut in_space = false;
	for c in text.trim().to_lowercase().chars() {
		if c.is_whitespace() {
			if !in_space {
				folded.push('-');
			}
			in_space = true;
			continue;
		}
		in_space = false;
		match fold(c) {
			Some(to) => folded.push_str(to),
			None if c == '&' => folded.push_str("-and-"),
			None if c.is_ascii_alphanumeric() || c == '-' => folded.push(c),
			None => (),
		}
	}

	let mut slug = String::with_capacity(folded.len());
	for c in folded.chars() {
		if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
			continue;
		}
		slug.push(c);
	}
	while slug.ends_with('-') {
		slug.pop();
	}

	if separator == "-" { slug } else { slug.replace('-', separator) }
}
