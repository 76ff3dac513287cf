#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use lregen_core::AnyEmptyResult;

pub const FOO_TEMPLATE: &str =
	"<<var;name=\"copyright\";original=\"Copyright (c) <year>\">>\n\nFoo text.";

pub fn lregen_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("lregen"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write an SPDX record and its license text into the checkout at `spdx`.
pub fn write_record(spdx: &Path, id: &str, template: &str, deprecated: bool) -> AnyEmptyResult {
	let details = spdx.join("json").join("details");
	let text = spdx.join("text");
	std::fs::create_dir_all(&details)?;
	std::fs::create_dir_all(&text)?;

	let record = format!(
		r#"{{"licenseId":{id:?},"name":"{id} License","standardLicenseTemplate":{template:?},"seeAlso":[],"isDeprecatedLicenseId":{deprecated}}}"#
	);
	std::fs::write(details.join(format!("{id}.json")), record)?;
	std::fs::write(text.join(format!("{id}.txt")), format!("text of {id}\n"))?;

	Ok(())
}

/// A project with a config that keeps fixtures inside `root` and a database
/// holding `Foo-1.0`, `Foo-2.0` and the deprecated `Old-1.0`.
pub fn write_project(root: &Path) -> AnyEmptyResult {
	std::fs::write(root.join("lregen.toml"), "testdata_dir = \"testdata\"\n")?;

	let spdx = root.join("_spdx");
	write_record(&spdx, "Foo-1.0", FOO_TEMPLATE, false)?;
	write_record(&spdx, "Foo-2.0", FOO_TEMPLATE, false)?;
	write_record(&spdx, "Old-1.0", FOO_TEMPLATE, true)?;

	Ok(())
}
