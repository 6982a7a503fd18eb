use crate::parser::ParseError;

/// The typed storage of a declared argument.
///
/// Exactly one variant applies to any given argument, fixed at declaration
/// time; parsing only ever rewrites the payload, never the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Verbatim token storage (plain strings, file paths, directory paths, choices).
    Str(String),
    /// Prefix-aware parsed integer storage.
    Int(i64),
    /// Switch storage; `true` once the switch name has been seen.
    Switch(bool),
}

// The kind-specific configuration of an argument.
// Pattern and choice data live here (not in `Value`) since they are fixed at
// declaration time and only consulted while parsing/rendering.
#[derive(Debug, Clone)]
pub(crate) enum Typing {
    Str,
    File { pattern: String },
    Dir,
    Int,
    Switch,
    // An empty `descriptions` means none were supplied.
    Choice {
        choices: Vec<String>,
        descriptions: Vec<String>,
    },
}

// One declared argument: identity, documentation, parse state, and typed storage.
//
// `name` is immutable after construction.  For named arguments it carries the
// leading `-`/`--`; for positional arguments it is the 1-based registration
// ordinal and is only used internally (display goes through `shortdoc`).
#[derive(Debug)]
pub(crate) struct Arg {
    pub(crate) name: String,
    pub(crate) shortdoc: String,
    pub(crate) doc: String,
    pub(crate) required: bool,
    pub(crate) present: bool,
    pub(crate) typing: Typing,
    pub(crate) value: Value,
}

impl Arg {
    pub(crate) fn new(
        name: impl Into<String>,
        shortdoc: impl Into<String>,
        doc: impl Into<String>,
        typing: Typing,
        default: Value,
    ) -> Self {
        Self {
            name: name.into(),
            shortdoc: shortdoc.into(),
            doc: doc.into(),
            required: false,
            present: false,
            typing,
            value: default,
        }
    }

    /// Consume this argument's tokens from `tokens` starting at `at`.
    /// Returns the position after the consumed tokens (a switch consumes none).
    /// Storage and the present flag are updated in place; a second occurrence
    /// simply overwrites.
    pub(crate) fn parse(&mut self, tokens: &[&str], at: usize) -> Result<usize, ParseError> {
        if let Typing::Switch = self.typing {
            self.value = Value::Switch(true);
            self.present = true;
            return Ok(at);
        }

        let token = *tokens.get(at).ok_or_else(|| {
            ParseError(format!("expected a value for {name}.", name = self.name))
        })?;

        match &self.typing {
            Typing::Str | Typing::File { .. } | Typing::Dir => {
                self.value = Value::Str(token.to_string());
            }
            Typing::Int => match parse_integer(token) {
                Some(parsed) => self.value = Value::Int(parsed),
                None => {
                    return Err(ParseError(format!("could not parse {token} as integer.")));
                }
            },
            Typing::Choice { choices, .. } => {
                if choices.iter().any(|choice| choice == token) {
                    self.value = Value::Str(token.to_string());
                } else {
                    return Err(ParseError(format!(
                        "{token} is not a valid choice for {name}.",
                        name = self.name
                    )));
                }
            }
            Typing::Switch => unreachable!("internal error - switch handled above"),
        }

        self.present = true;
        Ok(at + 1)
    }

    /// Render the single zsh `_arguments` entry for this argument.
    /// `skip_description` drops the `[doc]` segment (positional/overflow entries).
    pub(crate) fn completion_entry(&self, skip_description: bool) -> String {
        let mut entry = self.name.clone();

        if !skip_description {
            entry.push_str(&format!("[{doc}]", doc = self.doc));
        }

        if let Typing::Switch = self.typing {
            // A switch takes no value, so there is no message/action segment.
            return entry;
        }

        entry.push_str(&format!(":{shortdoc}:", shortdoc = self.shortdoc));

        match &self.typing {
            Typing::File { pattern } => {
                entry.push_str(&format!(" _files -g '{pattern}'"));
            }
            Typing::Dir => {
                entry.push_str(" _files -/");
            }
            Typing::Choice {
                choices,
                descriptions,
            } => {
                if descriptions.is_empty() {
                    entry.push_str(&format!("({})", choices.join(" ")));
                } else {
                    let pairs = choices
                        .iter()
                        .zip(descriptions.iter())
                        .map(|(choice, description)| format!("{choice}\\:'{description}'"))
                        .collect::<Vec<String>>()
                        .join(" ");
                    entry.push_str(&format!("(({pairs}))"));
                }
            }
            Typing::Str | Typing::Int => {}
            Typing::Switch => unreachable!("internal error - switch handled above"),
        }

        entry
    }
}

// A named slot in the registry: either a plain argument, or an argument
// wrapped to accumulate every occurrence of a repeatable flag.
#[derive(Debug)]
pub(crate) enum Slot {
    Single(Arg),
    Repeated(Arg, Vec<Value>),
}

impl Slot {
    pub(crate) fn arg(&self) -> &Arg {
        match self {
            Slot::Single(arg) => arg,
            Slot::Repeated(arg, _) => arg,
        }
    }

    pub(crate) fn arg_mut(&mut self) -> &mut Arg {
        match self {
            Slot::Single(arg) => arg,
            Slot::Repeated(arg, _) => arg,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.arg().name
    }

    pub(crate) fn parse(&mut self, tokens: &[&str], at: usize) -> Result<usize, ParseError> {
        match self {
            Slot::Single(arg) => arg.parse(tokens, at),
            Slot::Repeated(arg, values) => {
                let next = arg.parse(tokens, at)?;
                values.push(arg.value.clone());
                Ok(next)
            }
        }
    }

    pub(crate) fn completion_entry(&self, skip_description: bool) -> String {
        match self {
            Slot::Single(arg) => arg.completion_entry(skip_description),
            // The leading `*` marks a zsh entry as repeatable.
            Slot::Repeated(arg, _) => format!("*{}", arg.completion_entry(skip_description)),
        }
    }
}

// The overflow consumer: absorbs every remaining token once the declared
// positionals are exhausted, accumulating one parsed value per token.
#[derive(Debug)]
pub(crate) struct Remainder {
    pub(crate) arg: Arg,
    pub(crate) values: Vec<Value>,
}

impl Remainder {
    pub(crate) fn new(arg: Arg) -> Self {
        Self {
            arg,
            values: Vec::default(),
        }
    }

    /// Consume every token from `at` to the end of input.
    /// Named-argument matching is never re-attempted once this engages.
    pub(crate) fn consume_to_end(
        &mut self,
        tokens: &[&str],
        at: usize,
    ) -> Result<usize, ParseError> {
        let mut cursor = at;

        while cursor < tokens.len() {
            cursor = self.arg.parse(tokens, cursor)?;
            self.values.push(self.arg.value.clone());
        }

        Ok(cursor)
    }
}

/// Parse an integer the way `strtol` with base 0 does: `0x`/`0X` prefix for
/// hexadecimal, a leading `0` for octal, decimal otherwise, with an optional
/// sign.  Returns `None` unless the entire token is consumed by the parse.
pub(crate) fn parse_integer(token: &str) -> Option<i64> {
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    if body.starts_with('+') || body.starts_with('-') {
        return None;
    }

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
