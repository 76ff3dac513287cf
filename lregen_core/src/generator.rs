use std::path::Path;
use std::path::PathBuf;

use crate::LreError;
use crate::LreResult;
use crate::config::LregenConfig;
use crate::header::Document;
use crate::header::render_document;
use crate::normalize::PreambleWarning;
use crate::spdx::SpdxDatabase;

/// Options for a conversion run.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
	/// Overwrite patterns that already exist.
	pub force: bool,
	/// Write license text fixtures next to each new pattern.
	pub fixtures: bool,
	/// Report deprecated licenses at debug level only. Set when converting
	/// the whole database, where deprecated records are expected.
	pub quiet_deprecated: bool,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self {
			force: false,
			fixtures: true,
			quiet_deprecated: false,
		}
	}
}

/// What happened to a single license.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
	/// The pattern was written to this path.
	Written(PathBuf),
	/// The SPDX record is deprecated.
	Deprecated,
	/// The identifier is in the exclusion list.
	Excluded,
	/// A pattern already exists at this path and overwriting wasn't requested.
	Exists(PathBuf),
}

impl Outcome {
	pub fn is_written(&self) -> bool {
		matches!(self, Self::Written(_))
	}
}

/// The result of converting one license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
	/// The SPDX license identifier.
	pub id: String,
	pub outcome: Outcome,
	/// Set when the template had text ahead of its copyright notice.
	pub warning: Option<PreambleWarning>,
}

/// Converts SPDX records into pattern files according to an
/// [`LregenConfig`]. Each call to [`Generator::convert`] is independent, so a
/// generator can be shared between threads.
#[derive(Debug, Clone)]
pub struct Generator {
	root: PathBuf,
	config: LregenConfig,
	database: SpdxDatabase,
	options: GenerateOptions,
}

impl Generator {
	/// Create a generator for the project at `root`. Relative paths in the
	/// config are resolved against `root`.
	pub fn new(root: impl Into<PathBuf>, config: LregenConfig, options: GenerateOptions) -> Self {
		let root = root.into();
		let database = SpdxDatabase::new(root.join(&config.spdx_dir));

		Self {
			root,
			config,
			database,
			options,
		}
	}

	pub fn config(&self) -> &LregenConfig {
		&self.config
	}

	pub fn database(&self) -> &SpdxDatabase {
		&self.database
	}

	/// Where the pattern for `id` is written.
	pub fn output_path(&self, id: &str) -> PathBuf {
		self.root
			.join(&self.config.output_dir)
			.join(format!("{id}.lre"))
	}

	/// Convert the license named by `arg`, an identifier or a path to an SPDX
	/// JSON record.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn convert(&self, arg: &str) -> LreResult<Conversion> {
		let record_path = self.database.resolve(arg);
		let license = self.database.load(&record_path)?;
		let id = license.license_id.clone();

		if license.is_deprecated_license_id {
			if self.options.quiet_deprecated {
				tracing::debug!(%id, "skipping deprecated license");
			} else {
				tracing::warn!("{id}: deprecated");
			}

			return Ok(Conversion {
				id,
				outcome: Outcome::Deprecated,
				warning: None,
			});
		}

		let Document { text, warning } = render_document(&license)?;
		if let Some(warning) = &warning {
			tracing::warn!("{}: warning: {warning}", record_path.display());
		}

		let outcome = self.write_pattern(&id, &record_path, &text)?;

		Ok(Conversion {
			id,
			outcome,
			warning,
		})
	}

	fn write_pattern(&self, id: &str, record_path: &Path, text: &str) -> LreResult<Outcome> {
		if self.config.is_excluded(id) {
			tracing::debug!(%id, "skipping excluded license");
			return Ok(Outcome::Excluded);
		}

		let target = self.output_path(id);
		if target.exists() && !self.options.force {
			tracing::debug!(%id, path = %target.display(), "pattern exists, not overwriting");
			return Ok(Outcome::Exists(target));
		}

		if let Some(parent) = target.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&target, text)?;
		tracing::debug!(%id, path = %target.display(), "wrote pattern");

		if self.options.fixtures {
			if let Some(testdata) = self.config.testdata_dir(&self.root) {
				let text_path = self.text_path_for(record_path, id);
				write_fixtures(id, &text_path, &testdata)?;
			}
		}

		Ok(Outcome::Written(target))
	}

	/// The plain license text belonging to a record. Records inside a
	/// database checkout (`<db>/json/details/<id>.json`) use that checkout's
	/// `text` directory, anything else the configured database.
	fn text_path_for(&self, record_path: &Path, id: &str) -> PathBuf {
		record_path
			.parent()
			.filter(|details| details.ends_with(Path::new("json").join("details")))
			.and_then(Path::parent)
			.and_then(Path::parent)
			.map_or_else(
				|| self.database.text_path(id),
				|root| SpdxDatabase::new(root).text_path(id),
			)
	}
}

/// Copy the license text into `<testdata>/licenses/<id>.txt` and create the
/// `<testdata>/<id>.t1` match test unless it already exists.
fn write_fixtures(id: &str, text_path: &Path, testdata: &Path) -> LreResult<()> {
	let text = std::fs::read_to_string(text_path).map_err(|e| {
		LreError::LicenseText {
			id: id.to_string(),
			reason: format!("{}: {e}", text_path.display()),
		}
	})?;

	let licenses = testdata.join("licenses");
	std::fs::create_dir_all(&licenses)?;
	std::fs::write(licenses.join(format!("{id}.txt")), &text)?;

	let test_path = testdata.join(format!("{id}.t1"));
	if !test_path.exists() {
		std::fs::write(&test_path, match_test(id, &text))?;
	}

	Ok(())
}

/// A match test expecting `text` to be recognized as `id` in full.
pub fn match_test(id: &str, text: &str) -> String {
	format!("0%\nscan\n100%\n{id} 100% 0,$\n\n{text}")
}
