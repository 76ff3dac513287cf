use crate::reflow::LineBuffer;
use crate::words::word_count;

/// The comment line marking where the copyright notice sits in a pattern.
pub const COPYRIGHT_MARKER: &str = "//** Copyright **//";

/// Non-bullet wildcards always match at least this many words.
pub const MIN_WILDCARD_WORDS: usize = 5;

/// How a `<<var;...>>` tag is rendered in the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution<'a> {
	/// The copyright notice, rendered as [`COPYRIGHT_MARKER`].
	Copyright,
	/// A short bullet (`1.`, `(a)`) that may or may not appear verbatim:
	/// `(( original ))??`.
	OptionalLiteral(&'a str),
	/// A bullet without any words (`•`, `-`), written as plain text that the
	/// following literal continues on the same line.
	Continuation(&'a str),
	/// A wildcard matching about `words` words, preceded by a comment that
	/// records the text it replaces.
	Wildcard {
		annotation: Option<&'a str>,
		words: usize,
	},
}

impl<'a> Substitution<'a> {
	/// Decide the substitution for a variable with the given `name` and
	/// `original` text.
	pub fn decide(name: &str, original: &'a str) -> Self {
		if name == "copyright" {
			return Self::Copyright;
		}

		let count = word_count(original);
		let mut words = count.max(1);

		if name == "bullet" && words < MIN_WILDCARD_WORDS {
			return if count > 0 {
				Self::OptionalLiteral(original)
			} else {
				Self::Continuation(original)
			};
		}

		if name != "bullet" {
			words = words.max(MIN_WILDCARD_WORDS);
		}

		Self::Wildcard {
			annotation: (!original.is_empty()).then_some(original),
			words,
		}
	}

	/// Write the substitution to `buffer`, each on its own line except for
	/// [`Substitution::Continuation`] which leaves the line open.
	pub fn write_to(&self, buffer: &mut LineBuffer) {
		buffer.indent_newline();

		match self {
			Self::Copyright => {
				buffer.push_str(COPYRIGHT_MARKER);
				buffer.push_str("\n");
			}
			Self::OptionalLiteral(original) => {
				buffer.push_str(&format!("(( {original} ))??"));
			}
			Self::Continuation(original) => {
				buffer.push_str(original);
				buffer.push_str(" ");
				return;
			}
			Self::Wildcard { annotation, words } => {
				if let Some(annotation) = annotation {
					buffer.push_str(&format!("//** {annotation} **//"));
					buffer.indent_newline();
				}

				buffer.push_str(&format!("__{words}__"));
			}
		}

		buffer.indent_newline();
	}
}
