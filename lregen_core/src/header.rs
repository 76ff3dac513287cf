use std::fmt::Write;

use crate::LreResult;
use crate::normalize::PreambleWarning;
use crate::spdx::SpdxLicense;
use crate::translator::Translation;
use crate::translator::translate;

/// Render the comment block that opens every generated pattern: the license
/// name, its SPDX record and any reference URLs.
pub fn render_header(license: &SpdxLicense) -> String {
	let mut header = String::from("//**\n");
	let _ = writeln!(header, "{}", license.name);
	let _ = writeln!(
		header,
		"https://spdx.org/licenses/{}.json",
		license.license_id
	);

	for url in &license.see_also {
		let _ = writeln!(header, "{url}");
	}

	header.push_str("**//\n\n");
	header
}

/// A complete pattern document for one license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	/// Header followed by the translated template.
	pub text: String,
	/// Set when the template had text ahead of its copyright notice.
	pub warning: Option<PreambleWarning>,
}

/// Translate the license's standard template and prefix it with its header.
pub fn render_document(license: &SpdxLicense) -> LreResult<Document> {
	let Translation { body, warning } = translate(&license.standard_license_template)?;
	let text = format!("{}{body}", render_header(license));

	Ok(Document { text, warning })
}
