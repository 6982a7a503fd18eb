use std::marker::PhantomData;

use crate::model::{Typing, Value};

/// The typed declaration of an argument's storage: its kind, its default
/// value, and any kind-specific configuration (glob pattern, choice set).
///
/// A `Field<T>` pins the Rust type `T` that the argument reads back as:
/// `String` for strings/paths/choices, `i64` for integers.  Switches are
/// declared through [`ArgumentParser::switch`](crate::ArgumentParser::switch)
/// directly and have no `Field` constructor, which is what makes a required,
/// positional, repeated, or overflow switch unrepresentable.
pub struct Field<T> {
    pub(crate) typing: Typing,
    pub(crate) default: Value,
    marker: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    fn raw(typing: Typing, default: Value) -> Self {
        Self {
            typing,
            default,
            marker: PhantomData,
        }
    }
}

impl Field<String> {
    /// A plain string argument; consumes exactly one token verbatim.
    pub fn string(default: impl Into<String>) -> Self {
        Self::raw(Typing::Str, Value::Str(default.into()))
    }

    /// A file path argument.  Consumes one token verbatim; the glob `pattern`
    /// is only used when rendering shell completion, never for validation.
    pub fn file(default: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::raw(
            Typing::File {
                pattern: pattern.into(),
            },
            Value::Str(default.into()),
        )
    }

    /// A directory path argument.  Consumes one token verbatim; the value is
    /// not checked against the filesystem.
    pub fn directory(default: impl Into<String>) -> Self {
        Self::raw(Typing::Dir, Value::Str(default.into()))
    }

    /// A string argument restricted to a fixed choice set.
    ///
    /// ### Example
    /// ```
    /// use argot::Field;
    ///
    /// Field::choice("demonstrate", ["demonstrate", "party", "lazy"]);
    /// ```
    pub fn choice(
        default: impl Into<String>,
        choices: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::raw(
            Typing::Choice {
                choices: choices.into_iter().map(Into::into).collect(),
                descriptions: Vec::default(),
            },
            Value::Str(default.into()),
        )
    }

    /// A choice argument with one description per choice, shown in the shell
    /// completion menu.  Registration fails with a
    /// [`ConfigError`](crate::ConfigError) unless the description count
    /// equals the choice count.
    pub fn choice_described(
        default: impl Into<String>,
        choices: impl IntoIterator<Item = impl Into<String>>,
        descriptions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::raw(
            Typing::Choice {
                choices: choices.into_iter().map(Into::into).collect(),
                descriptions: descriptions.into_iter().map(Into::into).collect(),
            },
            Value::Str(default.into()),
        )
    }
}

impl Field<i64> {
    /// An integer argument.  The token is parsed base-aware: `0x` prefix for
    /// hexadecimal, leading `0` for octal, decimal otherwise.
    pub fn integer(default: i64) -> Self {
        Self::raw(Typing::Int, Value::Int(default))
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for bool {}
}

/// The types an argument's storage can be read back as.
/// Sealed; implemented for `String`, `i64`, and `bool`.
pub trait FromValue: sealed::Sealed {
    #[doc(hidden)]
    fn peel(value: &Value) -> &Self;

    #[doc(hidden)]
    fn peel_mut(value: &mut Value) -> &mut Self;
}

impl FromValue for String {
    fn peel(value: &Value) -> &Self {
        match value {
            Value::Str(inner) => inner,
            _ => unreachable!("internal error - storage is not a string"),
        }
    }

    fn peel_mut(value: &mut Value) -> &mut Self {
        match value {
            Value::Str(inner) => inner,
            _ => unreachable!("internal error - storage is not a string"),
        }
    }
}

impl FromValue for i64 {
    fn peel(value: &Value) -> &Self {
        match value {
            Value::Int(inner) => inner,
            _ => unreachable!("internal error - storage is not an integer"),
        }
    }

    fn peel_mut(value: &mut Value) -> &mut Self {
        match value {
            Value::Int(inner) => inner,
            _ => unreachable!("internal error - storage is not an integer"),
        }
    }
}

impl FromValue for bool {
    fn peel(value: &Value) -> &Self {
        match value {
            Value::Switch(inner) => inner,
            _ => unreachable!("internal error - storage is not a switch"),
        }
    }

    fn peel_mut(value: &mut Value) -> &mut Self {
        match value {
            Value::Switch(inner) => inner,
            _ => unreachable!("internal error - storage is not a switch"),
        }
    }
}

// Where a handle points within the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Locator {
    Named(usize),
    Positional(usize),
}

/// A non-owning handle to a single-valued argument (named or positional).
///
/// Handles are cheap `Copy` indices into the
/// [`ArgumentParser`](crate::ArgumentParser) that issued them; they are only
/// meaningful against that parser, for its lifetime.
#[derive(Debug)]
pub struct ValueRef<T> {
    pub(crate) locator: Locator,
    marker: PhantomData<fn() -> T>,
}

impl<T> ValueRef<T> {
    pub(crate) fn new(locator: Locator) -> Self {
        Self {
            locator,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for ValueRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ValueRef<T> {}

/// A non-owning handle to a repeatable named argument; reads back every
/// occurrence in input order.
#[derive(Debug)]
pub struct RepeatedRef<T> {
    pub(crate) index: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> RepeatedRef<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for RepeatedRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RepeatedRef<T> {}

/// A non-owning handle to the overflow consumer; reads back every token it
/// absorbed, in input order.
///
/// Re-registering the overflow consumer invalidates previously issued
/// handles; reading through a stale handle panics.
#[derive(Debug)]
pub struct RemainderRef<T> {
    pub(crate) generation: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> RemainderRef<T> {
    pub(crate) fn new(generation: usize) -> Self {
        Self {
            generation,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for RemainderRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RemainderRef<T> {}
