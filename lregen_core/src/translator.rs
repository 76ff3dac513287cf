use crate::LreError;
use crate::LreResult;
use crate::Tag;
use crate::normalize::Normalized;
use crate::normalize::PreambleWarning;
use crate::normalize::normalize;
use crate::reflow::LineBuffer;
use crate::variable::Substitution;
use crate::words::is_trivial;

/// Characters that are operators in the pattern language when doubled. A run
/// of them in template prose is escaped by collapsing it to one character.
const STRUCTURAL_CHARS: [u8; 6] = [b'(', b'|', b')', b'/', b'?', b'_'];

/// The translated body of a license template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
	/// The normalized pattern text, ending with a single newline unless empty.
	pub body: String,
	/// Set when text before the copyright notice was dropped.
	pub warning: Option<PreambleWarning>,
}

/// Translate an SPDX license template into the body of a license pattern.
pub fn translate(template: &str) -> LreResult<Translation> {
	let Normalized { text, warning } = normalize(&interpret(template)?);

	Ok(Translation {
		body: text,
		warning,
	})
}

/// Run the markup interpreter over `template` without normalizing the result.
pub fn interpret(template: &str) -> LreResult<String> {
	let mut translator = Translator::new(template);
	translator.process()?;

	Ok(translator.buffer.into_string())
}

/// Walks a template once, writing the translated pattern into its buffer.
struct Translator<'a> {
	/// The template being translated.
	source: &'a str,
	/// Current byte offset into `source`.
	cursor: usize,
	/// Start of literal text not yet written to the buffer.
	start: usize,
	/// The pattern being built.
	buffer: LineBuffer,
	/// Buffer offsets where the currently open optional blocks start.
	optional_starts: Vec<usize>,
}

impl<'a> Translator<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			source,
			cursor: 0,
			start: 0,
			buffer: LineBuffer::new(),
			optional_starts: vec![],
		}
	}

	fn rest(&self) -> &'a [u8] {
		&self.source.as_bytes()[self.cursor..]
	}

	/// Write the literal text from `start` up to `end` through the reflow
	/// engine.
	fn flush(&mut self, end: usize) {
		let source = self.source;
		self.buffer.wrap(&source[self.start..end]);
	}

	fn process(&mut self) -> LreResult<()> {
		while self.cursor < self.source.len() {
			if let Some(ch) = self.structural_token() {
				self.flush(self.cursor + 1);
				self.skip_while(|byte| byte == ch);
				self.start = self.cursor;
			} else if self.rest().starts_with(b"<<") && !self.rest().starts_with(b"<<<") {
				self.flush(self.cursor);
				self.process_tag()?;
			} else {
				// Literal text, including the first `<` of `<<<`: a tag may still
				// open at the next byte.
				self.cursor += 1;
			}
		}

		self.flush(self.source.len());
		Ok(())
	}

	/// Returns the repeated character when a structural token starts at the
	/// cursor.
	fn structural_token(&self) -> Option<u8> {
		match self.rest() {
			[first, second, ..] if first == second && STRUCTURAL_CHARS.contains(first) => {
				Some(*first)
			}
			_ => None,
		}
	}

	fn skip_while(&mut self, predicate: impl Fn(u8) -> bool) {
		let bytes = self.source.as_bytes();
		while self.cursor < bytes.len() && predicate(bytes[self.cursor]) {
			self.cursor += 1;
		}
	}

	/// Skip the spaces after a tag; the literal text resumes after them.
	fn skip_spaces(&mut self) {
		self.skip_while(|byte| byte == b' ');
		self.start = self.cursor;
	}

	fn process_tag(&mut self) -> LreResult<()> {
		let source = self.source;
		let offset = self.cursor;
		let remaining = &source[offset..];
		let Some(end) = remaining.find(">>") else {
			return Err(LreError::UnclosedTag {
				offset,
				snippet: remaining.chars().take(40).collect(),
			});
		};

		let text = &remaining[..end + 2];
		self.cursor = offset + end + 2;

		match Tag::parse(text, offset)? {
			Tag::NameAlias => {
				self.buffer.wrap("name");
				self.start = self.cursor;
			}
			Tag::BeginOptional => {
				self.skip_spaces();
				self.optional_starts.push(self.buffer.len());
				self.buffer.indent_newline();
				self.buffer.push_str("(( ");
			}
			Tag::EndOptional => {
				self.skip_spaces();
				self.end_optional(offset)?;
			}
			Tag::Variable { name, original } => {
				self.skip_spaces();
				Substitution::decide(name, original).write_to(&mut self.buffer);
			}
		}

		Ok(())
	}

	fn end_optional(&mut self, offset: usize) -> LreResult<()> {
		let Some(block_start) = self.optional_starts.pop() else {
			return Err(LreError::UnbalancedOptional { offset });
		};

		if self.buffer.since(block_start).contains('\n') {
			self.buffer.indent_newline();
		} else {
			self.buffer.push_str(" ");
		}

		self.buffer.push_str("))??");
		self.buffer.indent_newline();

		// Optional punctuation isn't matched anyway, and a plural suffix like
		// `name((s))??` only adds noise.
		if is_trivial(self.buffer.since(block_start)) {
			self.buffer.truncate(block_start);
		}

		Ok(())
	}
}
