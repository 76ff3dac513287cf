use crate::LreError;
use crate::LreResult;

/// The `original` value that marks a tag as a stand-in for the license name.
const NAME_ALIAS: &str = "name";

/// A markup tag found in an SPDX license template, e.g.
/// `<<var;name="copyright";original="Copyright (c) <year>">>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<'a> {
	/// `<<beginOptional>>` opens a region that may be absent from real texts.
	BeginOptional,
	/// `<<endOptional>>` closes the innermost optional region.
	EndOptional,
	/// `<<var;name="...";original="...";match="...">>` stands in for
	/// free-form text.
	Variable { name: &'a str, original: &'a str },
	/// Any tag whose `original` attribute is `name`; it refers to the license
	/// itself and is emitted as the literal word `name`.
	NameAlias,
}

impl<'a> Tag<'a> {
	/// Classify the full text of a tag, including its `<<` and `>>`
	/// delimiters. `offset` is the tag's position in the template and is only
	/// used for error reporting.
	pub fn parse(text: &'a str, offset: usize) -> LreResult<Self> {
		if find_attr(text, "original") == NAME_ALIAS {
			return Ok(Self::NameAlias);
		}

		match text {
			"<<beginOptional>>" => Ok(Self::BeginOptional),
			"<<endOptional>>" => Ok(Self::EndOptional),
			_ if text.starts_with("<<var;") => {
				Ok(Self::Variable {
					name: find_attr(text, "name"),
					original: find_attr(text, "original"),
				})
			}
			_ => {
				Err(LreError::UnknownTag {
					tag: text.to_string(),
					offset,
				})
			}
		}
	}
}

/// Extract the value of attribute `name` from the text of a tag. Missing
/// attributes, and attributes without a closing quote, yield an empty string.
pub fn find_attr<'a>(tag: &'a str, name: &str) -> &'a str {
	let needle = format!("{name}=\"");
	let Some(index) = tag.find(&needle) else {
		return "";
	};

	let rest = &tag[index + needle.len()..];
	rest.find('"').map_or("", |end| &rest[..end])
}
