use logos::Logos;

/// Tokens used to split text into words. Anything that isn't part of a word
/// is reported as a lexer error and skipped.
#[derive(Logos, Debug, PartialEq)]
enum WordToken {
	#[regex(r"[0-9A-Za-z_]+")]
	Word,
}

/// Iterate over the words in `text`, where a word is a maximal run of ASCII
/// letters, digits and underscores.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
	let mut lexer = WordToken::lexer(text);

	std::iter::from_fn(move || {
		loop {
			match lexer.next()? {
				Ok(WordToken::Word) => return Some(lexer.slice()),
				Err(()) => {}
			}
		}
	})
}

pub fn word_count(text: &str) -> usize {
	words(text).count()
}

/// Returns true when `text` holds nothing worth keeping as an optional block:
/// no words at all, or only a plural suffix like the `s` in `name((s))??`.
pub fn is_trivial(text: &str) -> bool {
	let mut iter = words(text);

	match (iter.next(), iter.next()) {
		(None, _) => true,
		(Some(word), None) => word == "s",
		_ => false,
	}
}
