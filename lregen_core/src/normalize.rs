use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::variable::COPYRIGHT_MARKER;

/// The copyright notice is only expected near the start of a pattern; a marker
/// further in is left alone.
const COPYRIGHT_WINDOW: usize = 100;

static TRAILING_SPACE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid trailing space pattern"));

/// Two or more lines holding nothing but punctuation and blanks.
static BLANK_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"\n([.," \t]*\n){2,}"#).expect("valid blank run pattern"));

/// Text found ahead of the copyright notice that was dropped from a pattern.
///
/// Matching treats the copyright notice as the start of a license, so
/// anything before it (other than an optional block) can't be matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreambleWarning {
	/// The dropped text, trimmed.
	pub text: String,
}

impl fmt::Display for PreambleWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?} before copyright notice", self.text)
	}
}

/// The result of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
	pub text: String,
	pub warning: Option<PreambleWarning>,
}

/// Clean up an assembled pattern body: strip trailing blanks, collapse runs of
/// near-blank lines, drop any preamble ahead of the copyright notice and end
/// the text with a single newline.
pub fn normalize(body: &str) -> Normalized {
	let mut text = TRAILING_SPACE.replace_all(body, "").into_owned();
	if !text.is_empty() && !text.ends_with('\n') {
		text.push('\n');
	}

	let text = BLANK_RUN.replace_all(&text, "\n\n");
	let (text, warning) = strip_preamble(text.trim_start_matches('\n'));

	let text = text.trim_end_matches('\n');
	let text = if text.is_empty() {
		String::new()
	} else {
		format!("{text}\n")
	};

	Normalized { text, warning }
}

fn strip_preamble(text: &str) -> (&str, Option<PreambleWarning>) {
	let Some(index) = text.find(COPYRIGHT_MARKER) else {
		return (text, None);
	};

	if index >= COPYRIGHT_WINDOW {
		return (text, None);
	}

	let preamble = text[..index].trim();
	if preamble.is_empty() || is_optional_group(preamble) {
		return (text, None);
	}

	let warning = PreambleWarning {
		text: preamble.to_string(),
	};

	(&text[index..], Some(warning))
}

/// Whether `text` is a single top-level optional group, e.g. an optional
/// line naming the license ahead of its copyright notice.
fn is_optional_group(text: &str) -> bool {
	text.starts_with("((") && text.ends_with("))??")
}
