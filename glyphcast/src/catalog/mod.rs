//! # Value catalogs
//!
//! Every value the encoder can spell is a catalog entry: an ordered list of
//! [`Strategy`]s, each guarded by a predicate over the [`Configuration`].
//! The first strategy whose guard passes builds the entry's [`Fragment`].
//!
//! ```text
//!  Characters ──▶ Internals ──▶ Digits ──▶ `[]` `!` `+`
//!       │             ▲
//!       └─────────────┘  (property names are spelled from characters)
//! ```
//!
//! The productions rely on the coercion identities of the target runtime:
//! `![]` is `false`, `[]+x` is the text of `x`, `"abc"[1]` is `"b"`,
//! `(n)["toString"](r)` renders `n` in radix `r`, and so on.

mod characters;
mod digits;
mod internals;

use std::fmt;

use crate::{Builder, Configuration, EncodeResult};

// ═══════════════════════════════════════════════════════════════════
// Keys
// ═══════════════════════════════════════════════════════════════════

/// A named singleton value whose text form the characters index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Internal {
    False,
    True,
    Undefined,
    NaN,
    Infinity,
    /// `1.1e+101`, source of `.` and `+`.
    LargeExponent,
    FlatSource,
    StringSource,
    ObjectText,
    ArrayIteratorText,
    SubTag,
    FontColorTag,
    EscapedFlatSource,
    EscapedSubTag,
}

impl Internal {
    pub const ALL: [Internal; 14] = [
        Self::False,
        Self::True,
        Self::Undefined,
        Self::NaN,
        Self::Infinity,
        Self::LargeExponent,
        Self::FlatSource,
        Self::StringSource,
        Self::ObjectText,
        Self::ArrayIteratorText,
        Self::SubTag,
        Self::FontColorTag,
        Self::EscapedFlatSource,
        Self::EscapedSubTag,
    ];

    /// The text the runtime produces when the value is converted to a string.
    pub fn text(self) -> &'static str {
        match self {
            Self::False => "false",
            Self::True => "true",
            Self::Undefined => "undefined",
            Self::NaN => "NaN",
            Self::Infinity => "Infinity",
            Self::LargeExponent => "1.1e+101",
            Self::FlatSource => "function flat() { [native code] }",
            Self::StringSource => "function String() { [native code] }",
            Self::ObjectText => "[object Object]",
            Self::ArrayIteratorText => "[object Array Iterator]",
            Self::SubTag => "<sub></sub>",
            Self::FontColorTag => "<font color=\"undefined\"></font>",
            Self::EscapedFlatSource => {
                "function%20flat%28%29%20%7B%20%5Bnative%20code%5D%20%7D"
            }
            Self::EscapedSubTag => "%3Csub%3E%3C/sub%3E",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Internal(Internal),
    Digit(u8),
    Character(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(value) => write!(f, "internal {:?}", value.text()),
            Self::Digit(digit) => write!(f, "digit {digit}"),
            Self::Character(c) => write!(f, "character {c:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Fragments
// ═══════════════════════════════════════════════════════════════════

/// How tightly a fragment's text binds, for placing it inside a larger
/// expression without changing its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Literal, member access, call or parenthesized expression.
    Term,
    /// Prefix `!` or `+` applied to a term.
    Unary,
    /// Additive (or tighter) binary expression.
    Sum,
    /// Top-level operator looser than `+` (`<<`).
    Loose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    form: Form,
}

impl Fragment {
    pub fn new(text: impl Into<String>, form: Form) -> Self {
        Self {
            text: text.into(),
            form,
        }
    }

    pub fn term(text: impl Into<String>) -> Self {
        Self::new(text, Form::Term)
    }

    pub fn unary(text: impl Into<String>) -> Self {
        Self::new(text, Form::Unary)
    }

    pub fn sum(text: impl Into<String>) -> Self {
        Self::new(text, Form::Sum)
    }

    pub fn loose(text: impl Into<String>) -> Self {
        Self::new(text, Form::Loose)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn form(&self) -> Form {
        self.form
    }

    /// The wrap predicate: atomic text composes without parentheses.
    pub fn is_atomic(&self) -> bool {
        self.form == Form::Term
    }

    fn parenthesized(&self) -> String {
        format!("({})", self.text)
    }

    /// Text safe for indexing, calling or concatenation on either side.
    pub fn wrapped(&self) -> String {
        self.render(true)
    }

    pub fn render(&self, wrap: bool) -> String {
        if wrap && !self.is_atomic() {
            self.parenthesized()
        } else {
            self.text.clone()
        }
    }

    /// Text safe as the leading operand of a left-associative `+` chain.
    pub fn additive(&self) -> String {
        match self.form {
            Form::Loose => self.parenthesized(),
            _ => self.text.clone(),
        }
    }

    /// Text safe as an operand of `*` or `/`.
    pub fn multiplicative(&self) -> String {
        match self.form {
            Form::Term | Form::Unary => self.text.clone(),
            Form::Sum | Form::Loose => self.parenthesized(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Strategies
// ═══════════════════════════════════════════════════════════════════

type Guard = Box<dyn Fn(&Configuration) -> bool>;
type Build = Box<dyn Fn(&Builder<'_>) -> EncodeResult<Fragment>>;

/// One guarded production of a catalog entry.
pub struct Strategy {
    label: &'static str,
    guard: Guard,
    build: Build,
}

impl Strategy {
    pub fn new(
        label: &'static str,
        guard: impl Fn(&Configuration) -> bool + 'static,
        build: impl Fn(&Builder<'_>) -> EncodeResult<Fragment> + 'static,
    ) -> Self {
        Self {
            label,
            guard: Box::new(guard),
            build: Box::new(build),
        }
    }

    /// A strategy whose guard always passes.
    pub fn always(
        label: &'static str,
        build: impl Fn(&Builder<'_>) -> EncodeResult<Fragment> + 'static,
    ) -> Self {
        Self::new(label, |_| true, build)
    }

    /// Replaces the guard, keeping the production.
    pub fn guarded(
        mut self,
        guard: impl Fn(&Configuration) -> bool + 'static,
    ) -> Self {
        self.guard = Box::new(guard);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn applies(&self, config: &Configuration) -> bool {
        (self.guard)(config)
    }

    pub fn build(&self, builder: &Builder<'_>) -> EncodeResult<Fragment> {
        (self.build)(builder)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("label", &self.label).finish()
    }
}

/// The strategy list for `key`, or `None` when the catalog has no entry.
pub fn production(key: Key) -> Option<Vec<Strategy>> {
    match key {
        Key::Internal(value) => Some(internals::strategies(value)),
        Key::Digit(digit) => digits::strategies(digit),
        Key::Character(c) => characters::strategies(c),
    }
}

/// Whether the Character catalog has an entry for `c`.
pub fn has_character(c: char) -> bool {
    characters::strategies(c).is_some()
}
