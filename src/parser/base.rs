use std::env;
use std::path::Path;

use thiserror::Error;

use crate::api::ArgumentParser;
use crate::constant::{COMPLETE_NAME, HELP_NAME};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Raised during declaration: a duplicate option name, an option name missing
/// its leading `-`, or a choice/description count mismatch.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// Raised during token consumption: an unexpected token with no positional or
/// overflow slot available, a non-numeric token for an integer argument, a
/// token outside a declared choice set, or a required argument that never
/// consumed input.
///
/// Fatal to the parse call; values parsed before the failing token remain as
/// parsed (there is no rollback).
#[derive(Debug, Error)]
#[error("Parse error: {0}")]
pub struct ParseError(pub(crate) String);

/// How a parse call terminated.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The tokens were consumed and validated; read values through handles.
    Parsed,
    /// `--help` appeared in the input; the help screen was printed and no
    /// parsing took place.
    Help,
    /// `complete` appeared in the input; the completion descriptor file was
    /// written and no parsing took place.
    Completion,
}

impl ArgumentParser {
    // Once a required positional exists, nothing before it may be optional:
    // scan backward and mark everything up to the last required positional.
    // Idempotent; runs immediately before token consumption.
    pub(crate) fn sanitize(&mut self) {
        let mut required = false;

        for arg in self.positionals.iter_mut().rev() {
            required = required || arg.required;
            arg.required = required;
        }
    }

    /// Run the parser against the input tokens (excluding the program name).
    ///
    /// Two literal tokens are intercepted anywhere in the stream before any
    /// consumption: `--help` prints the help screen, and `complete` writes
    /// the completion descriptor into the current directory; both terminate
    /// the parse successfully without validating anything else.
    ///
    /// Otherwise tokens are scanned left to right, in a single pass, with no
    /// backtracking: a token exactly matching a declared option name is
    /// always consumed as that option (never as positional data); unmatched
    /// tokens fill positional slots in declaration order; once positionals
    /// are exhausted, the overflow consumer (if declared) absorbs everything
    /// to end-of-input.  Afterwards, every required argument must have
    /// consumed input.
    ///
    /// This is a one-shot operation: storage is mutated in place and a
    /// failed parse leaves already-parsed values behind.
    pub fn try_parse_tokens(&mut self, tokens: &[&str]) -> Result<Outcome, ParseError> {
        self.sanitize();

        if tokens.iter().any(|token| *token == HELP_NAME) {
            let lines = self.help_lines();
            for line in lines {
                self.interface.print(line);
            }
            return Ok(Outcome::Help);
        }

        if tokens.iter().any(|token| *token == COMPLETE_NAME) {
            self.write_completion(Path::new(".")).map_err(|error| {
                ParseError(format!(
                    "could not write completion file {name}: {error}.",
                    name = self.completion_file_name()
                ))
            })?;
            return Ok(Outcome::Completion);
        }

        let mut at = 0;
        let mut positional_cursor = 0;

        while at < tokens.len() {
            let token = tokens[at];

            if let Some(slot) = self.named.iter_mut().find(|slot| slot.name() == token) {
                #[cfg(feature = "tracing_debug")]
                debug!("dispatching '{token}' to option '{}'", slot.name());

                at = slot.parse(tokens, at + 1)?;
                continue;
            }

            if self.positionals.is_empty() && self.remainder.is_none() {
                return Err(ParseError(format!(
                    "did not identify {token} as option and did not expect positional arguments."
                )));
            }

            if positional_cursor < self.positionals.len() {
                #[cfg(feature = "tracing_debug")]
                debug!("dispatching '{token}' to positional {}", positional_cursor + 1);

                at = self.positionals[positional_cursor].parse(tokens, at)?;
                positional_cursor += 1;
            } else if let Some(remainder) = self.remainder.as_mut() {
                // Option matching is never re-attempted from here on; any
                // option-like token after this point is swallowed as data.
                #[cfg(feature = "tracing_debug")]
                debug!("dispatching remaining tokens to the overflow consumer");

                at = remainder.consume_to_end(tokens, at)?;
            } else {
                return Err(ParseError(format!(
                    "no more positional arguments expected, received {token}."
                )));
            }
        }

        for slot in &self.named {
            let arg = slot.arg();
            if arg.required && !arg.present {
                return Err(ParseError(format!(
                    "required argument {name} not used.",
                    name = arg.name
                )));
            }
        }

        for arg in &self.positionals {
            if arg.required && !arg.present {
                return Err(ParseError(format!(
                    "required argument {shortdoc} not used.",
                    shortdoc = arg.shortdoc
                )));
            }
        }

        Ok(Outcome::Parsed)
    }

    /// Run the parser against the input tokens, reporting through the
    /// console.
    ///
    /// Returns `Err(0)` after printing the help screen or writing the
    /// completion file (the program should exit successfully without running
    /// its main logic), and `Err(1)` after printing a parse error.
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<(), i32> {
        match self.try_parse_tokens(tokens) {
            Ok(Outcome::Parsed) => Ok(()),
            Ok(Outcome::Help) | Ok(Outcome::Completion) => Err(0),
            Err(error) => {
                self.interface.print_error(error);
                Err(1)
            }
        }
    }

    /// Run the parser against the Cli [`env::args`], exiting the process
    /// (via [`std::process::exit`]) on anything other than a completed
    /// parse.
    pub fn parse(&mut self) {
        let tokens: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

        if let Err(exit_code) = self.parse_tokens(tokens.as_slice()) {
            std::process::exit(exit_code);
        }
    }
}
