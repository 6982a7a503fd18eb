//! `argot` is a declarative command line parser for Rust.
//!
//! Declare flags, positional arguments, and an overflow catcher against an
//! [`ArgumentParser`], each with a type, a default, and documentation; then
//! run the parser once and read the typed values back through the handles the
//! declarations returned.  Beyond parsing, the same declarations drive a
//! help screen (`--help`) and a generated zsh completion script (`complete`).
//!
//! Design concerns, in order:
//! * *Typed argument parsing*:
//! The caller never converts a `&str` by hand; each argument declares its
//! type once and reads back `String`, `i64`, or `bool`.
//! * *Single ownership*:
//! The parser owns every declared argument for its whole lifetime.  The
//! handles it returns are plain `Copy` indices, not a second owner.
//! * *Completion as a projection*:
//! The zsh completion script and the help screen are pure read-only
//! projections of the declarations; nothing is declared twice.
//! * *Deliberately small surface*:
//! Exact-name matching only.  No abbreviations, no combined short flags, no
//! `--opt=value` syntax.
//!
//! # Usage
//! ```no_run
//! use argot::{ArgumentParser, Field};
//!
//! let mut cli = ArgumentParser::new("summer");
//! let verbose = cli.switch("--verbose", "enable verbose output").unwrap();
//! let jobs = cli
//!     .option("-j", Field::integer(1), "CONCURRENCY", "specify the concurrency level")
//!     .unwrap()
//!     .handle();
//! let items = cli
//!     .remainder(Field::integer(0), "ITEM", "the items to sum")
//!     .unwrap();
//!
//! cli.parse();
//!
//! let total: i64 = cli.remaining(items).into_iter().sum();
//! println!("sum: {total} (jobs: {j}, verbose: {v})", j = cli.value(jobs), v = cli.value(verbose));
//! ```
//!
//! The same program on the command line:
//! ```console
//! $ summer 1 2 3
//! sum: 6 (jobs: 1, verbose: false)
//!
//! $ summer -j 4 1 2 3
//! sum: 6 (jobs: 4, verbose: false)
//!
//! $ summer -j four
//! Parse error: could not parse four as integer.
//!
//! $ summer --help
//! USAGE: summer
//!
//!   --help           Print help message.
//!   --verbose        enable verbose output
//!   -j CONCURRENCY   specify the concurrency level
//!
//! $ summer complete
//! $ cat _summer
//! #compdef summer
//!
//! _arguments \
//!   "--help[Print help message.]" \
//!   "--verbose[enable verbose output]" \
//!   "-j[specify the concurrency level]:CONCURRENCY:" \
//!   "*:ITEM:"
//! ```
//!
//! # Arguments, options, overflow
//! Options are declared with [`ArgumentParser::option`] (or
//! [`switch`](ArgumentParser::switch) /
//! [`repeated_option`](ArgumentParser::repeated_option)) and matched by
//! exact name anywhere in the input.  Positional arguments are declared with
//! [`ArgumentParser::positional`] and consumed in declaration order as
//! unmatched tokens are encountered.  The single optional overflow catcher,
//! declared with [`ArgumentParser::remainder`], absorbs every remaining
//! token once the positionals are satisfied.
//!
//! Any argument other than a switch may be marked
//! [`required`](Declared::required); parsing fails unless it consumes input.
//! Positionals behind a required positional are implicitly required
//! themselves, so optional positionals only ever trail.
//!
//! # Field types
//! [`Field`] fixes an argument's type and default:
//! [`string`](Field::string), [`file`](Field::file) (with a completion
//! glob), [`directory`](Field::directory), [`integer`](Field::integer)
//! (decimal, `0x` hexadecimal, or leading-`0` octal), and
//! [`choice`](Field::choice) / [`choice_described`](Field::choice_described)
//! for fixed value sets.

#![deny(missing_docs)]

mod api;
mod constant;
mod model;
mod parser;

pub use api::*;
pub use model::Value;
pub use parser::{ConfigError, Outcome, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
