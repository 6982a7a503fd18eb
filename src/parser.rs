mod base;
mod interface;
mod printer;

pub use base::{ConfigError, Outcome, ParseError};
pub(crate) use interface::{ConsoleInterface, UserInterface};

#[cfg(test)]
pub(crate) use interface::util;
