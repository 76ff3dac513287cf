use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use serde::Deserialize;

use crate::LreError;
use crate::LreResult;

/// The argument that selects every license in the database.
pub const ALL: &str = "all";

/// The fields of an SPDX license record (`json/details/<id>.json`) that the
/// generator reads. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SpdxLicense {
	pub license_id: String,
	pub name: String,
	pub standard_license_template: String,
	pub license_text: String,
	pub license_comments: String,
	pub see_also: Vec<String>,
	pub is_deprecated_license_id: bool,
	pub is_osi_approved: bool,
}

impl SpdxLicense {
	pub fn from_json(content: &str, path: &Path) -> LreResult<Self> {
		serde_json::from_str(content).map_err(|e| {
			LreError::SpdxParse {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})
	}
}

/// A checkout of the SPDX license list data.
#[derive(Debug, Clone)]
pub struct SpdxDatabase {
	root: PathBuf,
}

impl SpdxDatabase {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Fail unless the database directory exists.
	pub fn ensure_exists(&self) -> LreResult<()> {
		if self.root.is_dir() {
			Ok(())
		} else {
			Err(LreError::MissingDatabase {
				path: self.root.display().to_string(),
			})
		}
	}

	fn details_dir(&self) -> PathBuf {
		self.root.join("json").join("details")
	}

	pub fn details_path(&self, id: &str) -> PathBuf {
		self.details_dir().join(format!("{id}.json"))
	}

	pub fn text_path(&self, id: &str) -> PathBuf {
		self.root.join("text").join(format!("{id}.txt"))
	}

	/// Map a command line argument to a record path: arguments ending in
	/// `.json` are paths, anything else is a license identifier.
	pub fn resolve(&self, arg: &str) -> PathBuf {
		if arg.ends_with(".json") {
			PathBuf::from(arg)
		} else {
			self.details_path(arg)
		}
	}

	pub fn load(&self, path: &Path) -> LreResult<SpdxLicense> {
		let content = std::fs::read_to_string(path)?;
		SpdxLicense::from_json(&content, path)
	}

	/// Every license identifier in the database, sorted.
	pub fn all_ids(&self) -> LreResult<Vec<String>> {
		let mut ids = vec![];

		for entry in std::fs::read_dir(self.details_dir())? {
			let path = entry?.path();
			if path.extension().is_some_and(|ext| ext == "json") {
				if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
					ids.push(stem.to_string());
				}
			}
		}

		ids.sort();
		Ok(ids)
	}

	/// Expand command line arguments into the records to convert.
	///
	/// `all` selects every license; arguments containing glob metacharacters
	/// (`BSD-*`) select the matching identifiers; anything else is passed
	/// through for [`SpdxDatabase::resolve`].
	pub fn select(&self, args: &[String]) -> LreResult<Vec<String>> {
		if args.len() == 1 && args[0] == ALL {
			return self.all_ids();
		}

		let mut selected = vec![];
		let mut ids: Option<Vec<String>> = None;

		for arg in args {
			if !is_glob(arg) {
				selected.push(arg.clone());
				continue;
			}

			let matcher = Glob::new(arg)
				.map_err(|e| {
					LreError::InvalidPattern {
						pattern: arg.clone(),
						reason: e.to_string(),
					}
				})?
				.compile_matcher();

			if ids.is_none() {
				ids = Some(self.all_ids()?);
			}

			let before = selected.len();
			selected.extend(
				ids.iter()
					.flatten()
					.filter(|id| matcher.is_match(id.as_str()))
					.cloned(),
			);

			if selected.len() == before {
				return Err(LreError::NoMatch(arg.clone()));
			}
		}

		Ok(selected)
	}
}

fn is_glob(arg: &str) -> bool {
	!arg.ends_with(".json") && arg.contains(['*', '?', '['])
}
