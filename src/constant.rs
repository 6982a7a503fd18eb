// Reserved token names, intercepted anywhere in the input stream.
pub(crate) const HELP_NAME: &str = "--help";
pub(crate) const COMPLETE_NAME: &str = "complete";

// Internal name of the overflow consumer; doubles as the zsh rest-argument marker.
pub(crate) const REMAINDER_NAME: &str = "*";
