use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum LreError {
	#[error(transparent)]
	#[diagnostic(code(lregen::io_error))]
	Io(#[from] std::io::Error),

	#[error("unterminated tag starting at byte {offset}: `{snippet}`")]
	#[diagnostic(
		code(lregen::unclosed_tag),
		help("every `<<` in the template must be closed by a matching `>>`")
	)]
	UnclosedTag { offset: usize, snippet: String },

	#[error("`<<endOptional>>` at byte {offset} has no matching `<<beginOptional>>`")]
	#[diagnostic(
		code(lregen::unbalanced_optional),
		help("check the nesting of optional blocks in the template")
	)]
	UnbalancedOptional { offset: usize },

	#[error("unrecognized tag at byte {offset}: `{tag}`")]
	#[diagnostic(
		code(lregen::unknown_tag),
		help("supported tags: <<beginOptional>>, <<endOptional>>, <<var;...>>")
	)]
	UnknownTag { tag: String, offset: usize },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(lregen::config_parse),
		help("check that lregen.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("expected SPDX database in `{path}`")]
	#[diagnostic(
		code(lregen::missing_database),
		help("check out with: git clone https://github.com/spdx/license-list-data {path}")
	)]
	MissingDatabase { path: String },

	#[error("failed to parse SPDX record `{path}`: {reason}")]
	#[diagnostic(code(lregen::spdx_parse))]
	SpdxParse { path: String, reason: String },

	#[error("failed to read license text for `{id}`: {reason}")]
	#[diagnostic(code(lregen::license_text))]
	LicenseText { id: String, reason: String },

	#[error("invalid license pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(lregen::invalid_pattern),
		help("patterns use glob syntax, e.g. `BSD-*` or `GPL-?.0-only`")
	)]
	InvalidPattern { pattern: String, reason: String },

	#[error("no SPDX license matches `{0}`")]
	#[diagnostic(code(lregen::no_match))]
	NoMatch(String),

	#[error("post-generate command `{command}` failed: {reason}")]
	#[diagnostic(
		code(lregen::post_generate),
		help("fix the command or remove the [post_generate] section from lregen.toml")
	)]
	PostGenerate { command: String, reason: String },
}

pub type LreResult<T> = Result<T, LreError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
