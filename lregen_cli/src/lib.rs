use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate license regular expressions from the SPDX license list.",
	long_about = "lregen converts SPDX license templates into license regular expressions \
	              (LREs), the patterns a license classifier uses to recognize license texts \
	              despite variations in wording.\n\nThe generated patterns are a starting \
	              point: real-world texts usually need manual adjustments over time.\n\nQuick \
	              start:\n  git clone https://github.com/spdx/license-list-data _spdx\n  lregen \
	              init             Create an lregen.toml\n  lregen convert MIT     Write \
	              MIT.lre\n  lregen convert all     Convert every non-deprecated license"
)]
pub struct LregenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `lregen.toml` in the project root.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Convert SPDX licenses into `<id>.lre` pattern files.
	///
	/// Each argument is a license identifier (`MIT`), a glob over identifiers
	/// (`BSD-*`), or a path to an SPDX JSON record. The name `all` converts
	/// every license in the database. Deprecated licenses and licenses in the
	/// exclusion list are skipped, and existing patterns are kept unless
	/// `--force` is given.
	Convert {
		/// Overwrite existing pattern files.
		#[arg(long, short, default_value_t = false)]
		force: bool,

		/// Don't write license text fixtures for new patterns.
		#[arg(long, default_value_t = false)]
		no_fixtures: bool,

		/// Don't run the configured post-generate command.
		#[arg(long, default_value_t = false)]
		no_post_generate: bool,

		/// License identifiers, glob patterns or SPDX JSON files.
		#[arg(required = true)]
		licenses: Vec<String>,
	},
	/// Print the pattern for a single template without writing any files.
	///
	/// A `.json` file is read as an SPDX record and printed as a complete
	/// pattern document with its header. Any other file is read as a raw
	/// license template and only its translated body is printed.
	Translate {
		/// The template or SPDX JSON record to translate.
		file: PathBuf,
	},
}
