use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use lregen_cli::Commands;
use lregen_cli::LregenCli;
use lregen_core::AnyError;
use lregen_core::LreError;
use lregen_core::config::LregenConfig;
use lregen_core::generator::Conversion;
use lregen_core::generator::GenerateOptions;
use lregen_core::generator::Generator;
use lregen_core::generator::Outcome;
use lregen_core::render_document;
use lregen_core::spdx::ALL;
use lregen_core::spdx::SpdxLicense;
use lregen_core::translate;
use owo_colors::OwoColorize;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = LregenCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args).map(|()| true),
		Some(Commands::Convert {
			force,
			no_fixtures,
			no_post_generate,
			licenses,
		}) => {
			let options = GenerateOptions {
				force: *force,
				fixtures: !*no_fixtures,
				quiet_deprecated: licenses.len() == 1 && licenses[0] == ALL,
			};
			run_convert(&args, options, !*no_post_generate, licenses)
		}
		Some(Commands::Translate { file }) => run_translate(file).map(|()| true),
		None => {
			eprintln!("No subcommand specified. Run `lregen --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			// Try to render through miette for rich diagnostics with help text
			// and error codes.
			match e.downcast::<LreError>() {
				Ok(lre_err) => {
					let report: miette::Report = (*lre_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &LregenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn run_init(args: &LregenCli) -> Result<(), AnyError> {
	let root = resolve_root(args);

	if let Some(existing) = LregenConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("lregen.toml");
	let sample_config = "# lregen configuration\n\n# Checkout of \
	                     https://github.com/spdx/license-list-data\nspdx_dir = \"_spdx\"\n\n# \
	                     Where <id>.lre files are written.\noutput_dir = \".\"\n\n# Where \
	                     license text fixtures are written. Set to \"\" to disable.\ntestdata_dir \
	                     = \"../testdata\"\n\n# Identifiers that are never written. Defaults to \
	                     a built-in list.\n# exclude = [\"MIT\", \"BSD-3-Clause\"]\n\n# Command \
	                     run after converting.\n# [post_generate]\n# command = \"go \
	                     generate\"\n# dir = \"..\"\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. git clone https://github.com/spdx/license-list-data _spdx");
	println!("  2. Run `lregen convert <license-id>` to generate a pattern");

	Ok(())
}

#[derive(Debug, Default)]
struct Summary {
	written: usize,
	skipped: usize,
	failed: usize,
}

/// Returns `Ok(false)` when any license failed to convert.
fn run_convert(
	args: &LregenCli,
	options: GenerateOptions,
	post_generate: bool,
	licenses: &[String],
) -> Result<bool, AnyError> {
	let root = resolve_root(args);
	let config = LregenConfig::load_or_default(&root)?;
	let generator = Generator::new(&root, config, options);

	generator.database().ensure_exists()?;
	let selected = generator.database().select(licenses)?;
	tracing::debug!(count = selected.len(), "converting licenses");

	let results: Vec<(&String, Result<Conversion, LreError>)> = selected
		.par_iter()
		.map(|arg| (arg, generator.convert(arg)))
		.collect();

	let mut summary = Summary::default();
	for (arg, result) in results {
		match result {
			Ok(conversion) => {
				if let Outcome::Written(path) = &conversion.outcome {
					summary.written += 1;
					if args.verbose {
						println!("  {} {}", colored!("wrote", green), make_relative(path, &root));
					}
				} else {
					summary.skipped += 1;
				}
			}
			Err(e) => {
				summary.failed += 1;
				eprintln!("{} {arg}", colored!("error:", red));
				let report: miette::Report = e.into();
				eprintln!("{report:?}");
			}
		}
	}

	println!(
		"Converted {} license(s): {} skipped, {} failed.",
		summary.written, summary.skipped, summary.failed
	);

	if post_generate {
		if let Some(command) = &generator.config().post_generate {
			command.run(&root)?;
		}
	}

	Ok(summary.failed == 0)
}

fn run_translate(file: &Path) -> Result<(), AnyError> {
	let content = std::fs::read_to_string(file)?;

	let (text, warning) = if file.extension().is_some_and(|ext| ext == "json") {
		let license = SpdxLicense::from_json(&content, file)?;
		let document = render_document(&license)?;
		(document.text, document.warning)
	} else {
		let translation = translate(&content)?;
		(translation.body, translation.warning)
	};

	if let Some(warning) = warning {
		eprintln!("{} {warning}", colored!("warning:", yellow));
	}

	print!("{text}");
	Ok(())
}
