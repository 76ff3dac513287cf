use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use crate::LreError;
use crate::LreResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["lregen.toml", ".lregen.toml", ".config/lregen.toml"];

/// Licenses that are never written even though no pattern exists for them.
/// They are covered by hand-written templates elsewhere (such as `BSD.lre`
/// and `MIT.lre`), handled differently, or unwanted.
pub const DEFAULT_EXCLUDE: &[&str] = &[
	"AGPL-1.0-only",
	"AGPL-1.0-or-later",
	"AGPL-3.0-only",
	"AGPL-3.0-or-later",
	"CAL-1.0-Combined-Work-Exception",
	"BSD-1-Clause",
	"BSD-1-Clause-Clear",
	"BSD-2-Clause",
	"BSD-2-Clause-FreeBSD",
	"BSD-2-Clause-Patent",
	"BSD-2-Clause-Views",
	"BSD-3-Clause",
	"BSD-3-Clause-Attribution",
	"BSD-3-Clause-Clear",
	"BSD-3-Clause-LBNL",
	"BSD-3-Clause-No-Nuclear-License",
	"BSD-3-Clause-No-Nuclear-License-2014",
	"BSD-3-Clause-No-Nuclear-Warranty",
	"BSD-3-Clause-NoTrademark",
	"BSD-3-Clause-Open-MPI",
	"BSD-4-Clause",
	"BSD-4-Clause-UC",
	"BSD-Protection",
	"BSD-Source-Code",
	"GFDL-1.1-invariants-only",
	"GFDL-1.1-invariants-or-later",
	"GFDL-1.1-no-invariants-only",
	"GFDL-1.1-no-invariants-or-later",
	"GFDL-1.1-only",
	"GFDL-1.1-or-later",
	"GFDL-1.2-invariants-only",
	"GFDL-1.2-invariants-or-later",
	"GFDL-1.2-no-invariants-only",
	"GFDL-1.2-no-invariants-or-later",
	"GFDL-1.2-only",
	"GFDL-1.2-or-later",
	"GFDL-1.3-invariants-only",
	"GFDL-1.3-invariants-or-later",
	"GFDL-1.3-no-invariants-only",
	"GFDL-1.3-no-invariants-or-later",
	"GFDL-1.3-only",
	"GFDL-1.3-or-later",
	"GPL-1.0-only",
	"GPL-1.0-or-later",
	"GPL-2.0-Or-3.0",
	"GPL-2.0-only",
	"GPL-2.0-or-later",
	"GPL-3.0-only",
	"GPL-3.0-or-later",
	"HPND-sell-variant",
	"LGPL-2.0-only",
	"LGPL-2.0-or-later",
	"LGPL-2.1-only",
	"LGPL-2.1-or-later",
	"LGPL-3.0-only",
	"LGPL-3.0-or-later",
	"MIT",
	"MIT-0",
	"MITNFA",
	"MIT-NoAd",
	"MPL-2.0-no-copyleft-exception",
	"OFL-1.0-RFN",
	"OFL-1.0-no-RFN",
	"OFL-1.1-RFN",
	"OFL-1.1-no-RFN",
];

/// Configuration loaded from an `lregen.toml` file.
///
/// ```toml
/// spdx_dir = "_spdx"
/// output_dir = "."
/// testdata_dir = "../testdata"
/// exclude = ["MIT", "BSD-3-Clause"]
///
/// [post_generate]
/// command = "go generate"
/// dir = ".."
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LregenConfig {
	/// Checkout of <https://github.com/spdx/license-list-data>.
	#[serde(default = "default_spdx_dir")]
	pub spdx_dir: PathBuf,
	/// Where `<id>.lre` files are written.
	#[serde(default = "default_output_dir")]
	pub output_dir: PathBuf,
	/// Where license text fixtures are written. Fixtures are skipped when
	/// this is explicitly set to an empty string.
	#[serde(default = "default_testdata_dir")]
	pub testdata_dir: PathBuf,
	/// License identifiers that are never written. Replaces
	/// [`DEFAULT_EXCLUDE`] when set.
	#[serde(default = "default_exclude")]
	pub exclude: BTreeSet<String>,
	/// Command run once after all licenses have been converted.
	#[serde(default)]
	pub post_generate: Option<PostGenerate>,
}

/// A command run after conversion, e.g. to regenerate code that embeds the
/// patterns.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PostGenerate {
	/// Shell command to run.
	pub command: String,
	/// Working directory, relative to the project root.
	#[serde(default)]
	pub dir: Option<PathBuf>,
}

impl Default for LregenConfig {
	fn default() -> Self {
		Self {
			spdx_dir: default_spdx_dir(),
			output_dir: default_output_dir(),
			testdata_dir: default_testdata_dir(),
			exclude: default_exclude(),
			post_generate: None,
		}
	}
}

fn default_spdx_dir() -> PathBuf {
	PathBuf::from("_spdx")
}

fn default_output_dir() -> PathBuf {
	PathBuf::from(".")
}

fn default_testdata_dir() -> PathBuf {
	PathBuf::from("../testdata")
}

fn default_exclude() -> BTreeSet<String> {
	DEFAULT_EXCLUDE.iter().map(ToString::to_string).collect()
}

impl LregenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> LreResult<Option<LregenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to the defaults.
	pub fn load_or_default(root: &Path) -> LreResult<LregenConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn parse(content: &str) -> LreResult<LregenConfig> {
		toml::from_str(content).map_err(|e| LreError::ConfigParse(e.to_string()))
	}

	pub fn is_excluded(&self, id: &str) -> bool {
		self.exclude.contains(id)
	}

	/// Where fixtures are written, if anywhere.
	pub fn testdata_dir(&self, root: &Path) -> Option<PathBuf> {
		(!self.testdata_dir.as_os_str().is_empty()).then(|| root.join(&self.testdata_dir))
	}
}

impl PostGenerate {
	/// Run the command through the platform shell.
	pub fn run(&self, root: &Path) -> LreResult<()> {
		let dir = self
			.dir
			.as_ref()
			.map_or_else(|| root.to_path_buf(), |dir| root.join(dir));

		tracing::debug!(command = %self.command, dir = %dir.display(), "running post-generate command");

		let output = if cfg!(windows) {
			Command::new("cmd")
				.arg("/C")
				.arg(&self.command)
				.current_dir(&dir)
				.output()?
		} else {
			Command::new("sh")
				.arg("-c")
				.arg(&self.command)
				.current_dir(&dir)
				.output()?
		};

		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
			let reason = if stderr.is_empty() {
				format!(
					"command exited with status {}",
					output
						.status
						.code()
						.map_or_else(|| "unknown".to_string(), |code| code.to_string())
				)
			} else {
				stderr
			};

			return Err(LreError::PostGenerate {
				command: self.command.clone(),
				reason,
			});
		}

		Ok(())
	}
}
