use derive_more::Deref;

/// Lines are wrapped to this many bytes so that diffs of generated patterns
/// stay readable.
pub const TARGET_WIDTH: usize = 80;

/// An append-only text buffer that wraps literal text as it is written.
///
/// The text after the last newline is the current line. Its indentation (the
/// leading run of spaces and tabs) is carried over whenever the buffer wraps
/// the line or starts a new one with [`LineBuffer::indent_newline`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Deref)]
pub struct LineBuffer(#[deref] String);

impl LineBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Byte offset where the current line starts.
	fn line_start(&self) -> usize {
		self.0.rfind('\n').map_or(0, |index| index + 1)
	}

	/// The current (last, possibly partial) line.
	pub fn current_line(&self) -> &str {
		&self.0[self.line_start()..]
	}

	/// The indentation of the current line.
	pub fn indentation(&self) -> &str {
		let line = self.current_line();
		&line[..line.len() - line.trim_start_matches(is_blank).len()]
	}

	/// Append `text` verbatim, without wrapping.
	pub fn push_str(&mut self, text: &str) {
		self.0.push_str(text);
	}

	/// Append `text`, re-wrapping the current line together with the new text
	/// so that no line exceeds [`TARGET_WIDTH`] unless it holds a single
	/// unbreakable run.
	pub fn wrap(&mut self, text: &str) {
		let mut pending = self.0.split_off(self.line_start());
		let mut lines = text.split_inclusive('\n');

		if let Some(first) = lines.next() {
			pending.push_str(first);
		}

		self.push_wrapped(&pending);

		for line in lines {
			self.push_wrapped(line);
		}
	}

	/// Start a new line with the same indentation as the current one.
	pub fn indent_newline(&mut self) {
		let indent = self.indentation().to_string();

		self.0.push('\n');
		self.0.push_str(&indent);
	}

	/// Drop everything written after `offset`.
	pub fn truncate(&mut self, offset: usize) {
		self.0.truncate(offset);
	}

	/// The text written since `offset`.
	pub fn since(&self, offset: usize) -> &str {
		&self.0[offset..]
	}

	pub fn into_string(self) -> String {
		self.0
	}

	fn push_wrapped(&mut self, line: &str) {
		let rest = line.trim_start_matches(is_blank);
		let indent = &line[..line.len() - rest.len()];
		let budget = TARGET_WIDTH.saturating_sub(indent.len());
		let mut line = rest;

		while line.len() > budget {
			let Some(split) = find_break(line, budget) else {
				break;
			};

			self.0.push_str(indent);
			self.0.push_str(&line[..split]);
			self.0.push('\n');
			line = line[split..].trim_start_matches(is_blank);
		}

		self.0.push_str(indent);
		self.0.push_str(line);
	}
}

/// Find where to break `line` so the first part fits in `budget` bytes:
/// the last blank at or before `budget`, or failing that the first blank
/// after it. A line without blanks can't be broken.
fn find_break(line: &str, budget: usize) -> Option<usize> {
	let bytes = line.as_bytes();

	bytes[..=budget]
		.iter()
		.rposition(|byte| is_blank(char::from(*byte)))
		.or_else(|| {
			bytes[budget..]
				.iter()
				.position(|byte| is_blank(char::from(*byte)))
				.map(|index| index + budget)
		})
}

fn is_blank(ch: char) -> bool {
	ch == ' ' || ch == '\t'
}
