use crate::api::field::{Field, FromValue, Locator, RemainderRef, RepeatedRef, ValueRef};
use crate::constant::{HELP_NAME, REMAINDER_NAME};
use crate::model::{Arg, Remainder, Slot, Typing, Value};
use crate::parser::{ConfigError, ConsoleInterface, UserInterface};

/// The argument registry and parser.
///
/// Declare arguments against the parser, run one of the `parse*` methods
/// precisely once, then read the parsed values back through the handles the
/// declarations returned.  The parser owns every declared argument for its
/// entire lifetime; handles are plain indices into it.
///
/// A hidden `--help` switch is always the first named argument.
///
/// ### Example
/// ```
/// use argot::{ArgumentParser, Field, Outcome};
///
/// let mut cli = ArgumentParser::new("program");
/// let jobs = cli
///     .option("-j", Field::integer(4), "CONCURRENCY", "specify the concurrency level")
///     .unwrap()
///     .handle();
///
/// let outcome = cli.try_parse_tokens(&["-j", "7"]).unwrap();
/// assert_eq!(outcome, Outcome::Parsed);
/// assert_eq!(*cli.value(jobs), 7);
/// ```
pub struct ArgumentParser {
    pub(crate) program: String,
    pub(crate) named: Vec<Slot>,
    pub(crate) positionals: Vec<Arg>,
    pub(crate) remainder: Option<Remainder>,
    pub(crate) remainder_generation: usize,
    pub(crate) interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for ArgumentParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentParser")
            .field("program", &self.program)
            .finish()
    }
}

impl ArgumentParser {
    /// Create an argument parser for the given program name.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_interface(program, Box::new(ConsoleInterface::default()))
    }

    pub(crate) fn with_interface(
        program: impl Into<String>,
        interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            named: vec![Slot::Single(Arg::new(
                HELP_NAME,
                "",
                "Print help message.",
                Typing::Switch,
                Value::Switch(false),
            ))],
            positionals: Vec::default(),
            remainder: None,
            remainder_generation: 0,
            interface,
        }
    }

    /// Declare a named argument, matched by exact `name` before any
    /// positional dispatch.
    ///
    /// Fails when `name` does not start with `-`, when `name` is already
    /// registered, or when the field carries mismatched choice descriptions.
    ///
    /// ### Example
    /// ```
    /// use argot::{ArgumentParser, Field};
    ///
    /// let mut cli = ArgumentParser::new("program");
    /// let name = cli
    ///     .option("--name", Field::string("themaster"), "NAME", "specify some name")
    ///     .unwrap()
    ///     .handle();
    ///
    /// cli.try_parse_tokens(&[]).unwrap();
    /// assert_eq!(cli.value(name), "themaster");
    /// ```
    pub fn option<T: FromValue>(
        &mut self,
        name: &str,
        field: Field<T>,
        shortdoc: &str,
        doc: &str,
    ) -> Result<Declared<'_, ValueRef<T>>, ConfigError> {
        self.check_flag_name(name)?;
        check_choices(name, &field.typing)?;

        self.named.push(Slot::Single(Arg::new(
            name,
            shortdoc,
            doc,
            field.typing,
            field.default,
        )));
        let locator = Locator::Named(self.named.len() - 1);
        Ok(Declared {
            parser: self,
            locator,
            reference: ValueRef::new(locator),
        })
    }

    /// Declare a named argument that may appear any number of times; every
    /// occurrence is accumulated in input order.
    pub fn repeated_option<T: FromValue>(
        &mut self,
        name: &str,
        field: Field<T>,
        shortdoc: &str,
        doc: &str,
    ) -> Result<Declared<'_, RepeatedRef<T>>, ConfigError> {
        self.check_flag_name(name)?;
        check_choices(name, &field.typing)?;

        self.named.push(Slot::Repeated(
            Arg::new(name, shortdoc, doc, field.typing, field.default),
            Vec::default(),
        ));
        let index = self.named.len() - 1;
        Ok(Declared {
            parser: self,
            locator: Locator::Named(index),
            reference: RepeatedRef::new(index),
        })
    }

    /// Declare a boolean switch: presence of `name` alone sets it to `true`;
    /// it consumes no value token and defaults to `false`.
    ///
    /// A switch cannot be marked required, which is why this returns the
    /// handle directly rather than a [`Declared`].
    pub fn switch(&mut self, name: &str, doc: &str) -> Result<ValueRef<bool>, ConfigError> {
        self.check_flag_name(name)?;

        self.named.push(Slot::Single(Arg::new(
            name,
            "",
            doc,
            Typing::Switch,
            Value::Switch(false),
        )));
        Ok(ValueRef::new(Locator::Named(self.named.len() - 1)))
    }

    /// Declare a positional argument.  Positionals are consumed in
    /// declaration order as unmatched tokens are encountered; internally the
    /// argument is named by its 1-based registration ordinal, and all display
    /// goes through `shortdoc`.
    ///
    /// ### Example
    /// ```
    /// use argot::{ArgumentParser, Field};
    ///
    /// let mut cli = ArgumentParser::new("program");
    /// let input = cli
    ///     .positional(Field::file("main.cpp", "*.cpp"), "FILE", "the file to process")
    ///     .unwrap()
    ///     .required()
    ///     .handle();
    ///
    /// cli.try_parse_tokens(&["lib.cpp"]).unwrap();
    /// assert_eq!(cli.value(input), "lib.cpp");
    /// ```
    pub fn positional<T: FromValue>(
        &mut self,
        field: Field<T>,
        shortdoc: &str,
        doc: &str,
    ) -> Result<Declared<'_, ValueRef<T>>, ConfigError> {
        check_choices(shortdoc, &field.typing)?;

        let ordinal = (self.positionals.len() + 1).to_string();
        self.positionals
            .push(Arg::new(ordinal, shortdoc, doc, field.typing, field.default));
        let locator = Locator::Positional(self.positionals.len() - 1);
        Ok(Declared {
            parser: self,
            locator,
            reference: ValueRef::new(locator),
        })
    }

    /// Declare the overflow consumer: once all declared positionals are
    /// satisfied, it absorbs every remaining token to end-of-input.
    ///
    /// At most one overflow consumer is ever active; re-registration
    /// replaces the previous one and invalidates its handles.  The field's
    /// default value is never observed, since every accumulated value comes
    /// from the input.
    pub fn remainder<T: FromValue>(
        &mut self,
        field: Field<T>,
        shortdoc: &str,
        doc: &str,
    ) -> Result<RemainderRef<T>, ConfigError> {
        check_choices(shortdoc, &field.typing)?;

        self.remainder = Some(Remainder::new(Arg::new(
            REMAINDER_NAME,
            shortdoc,
            doc,
            field.typing,
            field.default,
        )));
        self.remainder_generation += 1;
        Ok(RemainderRef::new(self.remainder_generation))
    }

    /// Read a single-valued argument's storage: the parsed value when the
    /// argument was present, its declared default otherwise.
    pub fn value<T: FromValue>(&self, reference: ValueRef<T>) -> &T {
        T::peel(&self.arg_at(reference.locator).value)
    }

    /// Mutably access a single-valued argument's storage, e.g. to normalize
    /// a parsed value after the parse completes.
    pub fn value_mut<T: FromValue>(&mut self, reference: ValueRef<T>) -> &mut T {
        T::peel_mut(&mut self.arg_at_mut(reference.locator).value)
    }

    /// Whether the argument consumed input during the parse.
    pub fn is_present<T>(&self, reference: ValueRef<T>) -> bool {
        self.arg_at(reference.locator).present
    }

    /// Read every accumulated occurrence of a repeatable named argument, in
    /// input order.
    pub fn occurrences<T: FromValue>(&self, reference: RepeatedRef<T>) -> Vec<&T> {
        match &self.named[reference.index] {
            Slot::Repeated(_, values) => values.iter().map(T::peel).collect(),
            Slot::Single(_) => {
                unreachable!("internal error - repeated handle must point at a repeated slot")
            }
        }
    }

    /// Read every token the overflow consumer absorbed, in input order.
    ///
    /// Panics when `reference` was invalidated by a later
    /// [`remainder`](ArgumentParser::remainder) registration.
    pub fn remaining<T: FromValue>(&self, reference: RemainderRef<T>) -> Vec<&T> {
        match &self.remainder {
            Some(remainder) if reference.generation == self.remainder_generation => {
                remainder.values.iter().map(T::peel).collect()
            }
            _ => panic!("overflow handle does not refer to the active overflow registration"),
        }
    }

    fn arg_at(&self, locator: Locator) -> &Arg {
        match locator {
            Locator::Named(index) => self.named[index].arg(),
            Locator::Positional(index) => &self.positionals[index],
        }
    }

    fn arg_at_mut(&mut self, locator: Locator) -> &mut Arg {
        match locator {
            Locator::Named(index) => self.named[index].arg_mut(),
            Locator::Positional(index) => &mut self.positionals[index],
        }
    }

    fn check_flag_name(&self, name: &str) -> Result<(), ConfigError> {
        if !name.starts_with('-') {
            return Err(ConfigError(format!(
                "flag arguments should start with '-' or '--'. {name} does not."
            )));
        }

        if self.named.iter().any(|slot| slot.name() == name) {
            return Err(ConfigError(format!(
                "option with name {name} already exists."
            )));
        }

        Ok(())
    }

    pub(crate) fn mark_required(&mut self, locator: Locator) {
        match locator {
            Locator::Named(index) => self.named[index].arg_mut().required = true,
            Locator::Positional(index) => self.positionals[index].required = true,
        }
    }
}

fn check_choices(label: &str, typing: &Typing) -> Result<(), ConfigError> {
    if let Typing::Choice {
        choices,
        descriptions,
    } = typing
    {
        if !descriptions.is_empty() && descriptions.len() != choices.len() {
            return Err(ConfigError(format!(
                "expected {expected} choice descriptions for {label}, received {received}.",
                expected = choices.len(),
                received = descriptions.len()
            )));
        }
    }

    Ok(())
}

/// A just-registered argument, pending any final declaration-time marks.
///
/// Call [`required`](Declared::required) to make the argument mandatory, and
/// [`handle`](Declared::handle) to obtain the read-back handle.
#[must_use = "call `.handle()` to obtain the argument's read-back handle"]
#[derive(Debug)]
pub struct Declared<'p, R> {
    parser: &'p mut ArgumentParser,
    locator: Locator,
    reference: R,
}

impl<'p, R> Declared<'p, R> {
    /// Mark the argument required: parsing fails unless it consumes input.
    pub fn required(self) -> Self {
        let Declared {
            parser,
            locator,
            reference,
        } = self;
        parser.mark_required(locator);
        Declared {
            parser,
            locator,
            reference,
        }
    }

    /// Finish the declaration, returning the read-back handle.
    pub fn handle(self) -> R {
        self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use rstest::rstest;

    #[test]
    fn duplicate_option_name() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let _ = cli
            .option("--name", Field::string(""), "NAME", "a name")
            .unwrap()
            .handle();

        // Execute
        let result = cli.option("--name", Field::integer(0), "N", "a number");

        // Verify
        assert_matches!(result, Err(ConfigError(message)) => {
            assert_eq!(message, "option with name --name already exists.");
        });
    }

    #[test]
    fn duplicate_help_name() {
        let mut cli = ArgumentParser::new("program");
        let result = cli.switch("--help", "our own help");
        assert_matches!(result, Err(ConfigError(_)));
    }

    #[rstest]
    #[case("name")]
    #[case("n")]
    #[case("")]
    fn flag_name_missing_dash(#[case] name: &str) {
        let mut cli = ArgumentParser::new("program");
        let result = cli.option(name, Field::string(""), "NAME", "a name");
        assert_matches!(result, Err(ConfigError(message)) => {
            assert_contains!(message, "should start with '-' or '--'");
        });
    }

    #[test]
    fn choice_description_count_mismatch() {
        // Setup
        let mut cli = ArgumentParser::new("program");

        // Execute
        let result = cli.option(
            "--mode",
            Field::choice_described("demonstrate", ["demonstrate", "party", "lazy"], ["only one"]),
            "MODE",
            "specify running mode",
        );

        // Verify
        assert_matches!(result, Err(ConfigError(message)) => {
            assert_eq!(message, "expected 3 choice descriptions for --mode, received 1.");
        });
    }

    #[test]
    fn choice_descriptions_match() {
        let mut cli = ArgumentParser::new("program");
        let result = cli.option(
            "--mode",
            Field::choice_described("a", ["a", "b"], ["first", "second"]),
            "MODE",
            "specify running mode",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn absent_option_keeps_default() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let jobs = cli
            .option("-j", Field::integer(42), "CONCURRENCY", "concurrency level")
            .unwrap()
            .handle();

        // Execute
        cli.try_parse_tokens(empty::slice()).unwrap();

        // Verify
        assert_eq!(*cli.value(jobs), 42);
        assert!(!cli.is_present(jobs));
    }

    #[test]
    fn option_round_trip() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let jobs = cli
            .option("-j", Field::integer(42), "CONCURRENCY", "concurrency level")
            .unwrap()
            .handle();

        // Execute
        cli.try_parse_tokens(&["-j", "7"]).unwrap();

        // Verify
        assert_eq!(*cli.value(jobs), 7);
        assert!(cli.is_present(jobs));
    }

    #[test]
    fn positional_integer_hex() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let count = cli
            .positional(Field::integer(42), "COUNT", "a count")
            .unwrap()
            .handle();

        // Execute
        cli.try_parse_tokens(&["0x1F"]).unwrap();

        // Verify
        assert_eq!(*cli.value(count), 31);
    }

    #[test]
    fn storage_is_mutable_through_handle() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let dir = cli
            .option("--build-dir", Field::directory("."), "BUILDDIR", "the build directory")
            .unwrap()
            .handle();

        // Execute
        cli.try_parse_tokens(&["--build-dir", "out/"]).unwrap();
        cli.value_mut(dir).push_str("debug");

        // Verify
        assert_eq!(cli.value(dir), "out/debug");
    }

    #[test]
    fn plain_option_overwrites_on_repeat() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let name = cli
            .option("--name", Field::string("themaster"), "NAME", "a name")
            .unwrap()
            .handle();

        // Execute
        cli.try_parse_tokens(&["--name", "first", "--name", "second"])
            .unwrap();

        // Verify
        assert_eq!(cli.value(name), "second");
    }

    #[test]
    fn choice_accepts_and_stores() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let mode = cli
            .option(
                "--mode",
                Field::choice("demonstrate", ["demonstrate", "party", "lazy"]),
                "MODE",
                "specify running mode",
            )
            .unwrap()
            .handle();

        // Execute
        cli.try_parse_tokens(&["--mode", "party"]).unwrap();

        // Verify
        assert_eq!(cli.value(mode), "party");
    }

    #[test]
    fn choice_rejects_with_name() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let _ = cli
            .option(
                "--mode",
                Field::choice("demonstrate", ["demonstrate", "party", "lazy"]),
                "MODE",
                "specify running mode",
            )
            .unwrap()
            .handle();

        // Execute
        let error = cli.try_parse_tokens(&["--mode", "other"]).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "other is not a valid choice for --mode");
    }

    #[test]
    fn switch_defaults_false_and_sets_true() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let verbose = cli.switch("--verbose", "enable verbose output").unwrap();

        // Execute
        cli.try_parse_tokens(empty::slice()).unwrap();

        // Verify
        assert!(!*cli.value(verbose));

        // Execute again on a fresh parser with the switch present.
        let mut cli = ArgumentParser::new("program");
        let verbose = cli.switch("--verbose", "enable verbose output").unwrap();
        cli.try_parse_tokens(&["--verbose"]).unwrap();

        // Verify
        assert!(*cli.value(verbose));
        assert!(cli.is_present(verbose));
    }

    #[test]
    fn required_option_missing() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let _ = cli
            .option("--name", Field::string(""), "NAME", "a name")
            .unwrap()
            .required()
            .handle();

        // Execute
        let error = cli.try_parse_tokens(empty::slice()).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "Parse error: required argument --name not used."
        );
    }

    #[test]
    fn required_positional_missing_uses_shortdoc() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let _ = cli
            .positional(Field::string(""), "FILE", "the input file")
            .unwrap()
            .required()
            .handle();

        // Execute
        let error = cli.try_parse_tokens(empty::slice()).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "Parse error: required argument FILE not used."
        );
    }

    #[test]
    fn repeated_option_accumulates() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let includes = cli
            .repeated_option("-I", Field::string(""), "DIR", "add an include directory")
            .unwrap()
            .handle();

        // Execute
        cli.try_parse_tokens(&["-I", "a", "-I", "b", "-I", "c"])
            .unwrap();

        // Verify
        assert_eq!(cli.occurrences(includes), vec!["a", "b", "c"]);
    }

    #[test]
    fn remainder_collects_everything() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let words = cli
            .remainder(Field::string(""), "WORDS", "trailing words")
            .unwrap();

        // Execute
        cli.try_parse_tokens(&["a", "b", "c"]).unwrap();

        // Verify
        assert_eq!(cli.remaining(words), vec!["a", "b", "c"]);
    }

    #[test]
    fn remainder_empty_input() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let words = cli
            .remainder(Field::string(""), "WORDS", "trailing words")
            .unwrap();

        // Execute
        cli.try_parse_tokens(empty::slice()).unwrap();

        // Verify
        assert!(cli.remaining(words).is_empty());
    }

    #[test]
    fn remainder_re_registration_replaces() {
        // Setup
        let mut cli = ArgumentParser::new("program");
        let _first = cli
            .remainder(Field::string(""), "WORDS", "trailing words")
            .unwrap();
        let second = cli
            .remainder(Field::integer(0), "NUMBERS", "trailing numbers")
            .unwrap();

        // Execute
        cli.try_parse_tokens(&["1", "2"]).unwrap();

        // Verify
        // Precisely one overflow consumer is active: the survivor.
        assert_eq!(cli.remaining(second), vec![&1, &2]);
    }

    #[test]
    #[should_panic(expected = "active overflow registration")]
    fn remainder_stale_handle_panics() {
        let mut cli = ArgumentParser::new("program");
        let first = cli
            .remainder(Field::string(""), "WORDS", "trailing words")
            .unwrap();
        let _second = cli
            .remainder(Field::string(""), "MORE", "other trailing words")
            .unwrap();

        let _ = cli.remaining(first);
    }
}
