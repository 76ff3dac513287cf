//! `lregen_core` translates [SPDX](https://spdx.org/licenses/) license
//! templates into license regular expressions (LREs): patterns that a
//! license classifier uses to recognize real-world license texts despite
//! variations in wording.
//!
//! ## Processing Pipeline
//!
//! ```text
//! SPDX license template
//!   → Markup interpreter (walks prose and `<<...>>` tags)
//!   → Optional blocks (`<<beginOptional>>` … `<<endOptional>>` → `(( … ))??`)
//!   → Variable substitution (`<<var;...>>` → `__N__` wildcards, copyright marker)
//!   → Line reflow (wraps literal text to 80 columns, keeping indentation)
//!   → Normalizer (trailing blanks, blank runs, preamble before the copyright)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `lregen.toml`.
//! - [`spdx`]: SPDX license records and the license list checkout.
//! - [`generator`]: Converting records into `.lre` files and test fixtures.
//! - [`reflow`]: The wrapping text buffer used to build patterns.
//!
//! ## Quick Start
//!
//! ```rust
//! use lregen_core::translate;
//!
//! let template = "<<var;name=\"copyright\";original=\"Copyright (c) <year>\">>\n\
//!                 Permission is granted <<beginOptional>>free of charge<<endOptional>>.";
//! let translation = translate(template).unwrap();
//!
//! assert!(translation.body.starts_with("//** Copyright **//"));
//! assert!(translation.body.contains("(( free of charge\n))??"));
//! assert!(translation.warning.is_none());
//! ```

pub use error::*;
pub use header::*;
pub use normalize::*;
pub use tag::*;
pub use translator::*;
pub use variable::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
pub mod generator;
mod header;
mod normalize;
pub mod reflow;
pub mod spdx;
mod tag;
mod translator;
mod variable;
pub(crate) mod words;
