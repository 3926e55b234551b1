//! Symbol permissions for the encoder.
//!
//! A [`Configuration`] names the [`SymbolClass`]es the output may not
//! contain, whether alias bindings are emitted, and which characters alias
//! names are built from. Brackets, parentheses, `!` and `+` have no class:
//! every fallback chain bottoms out in them, so they are always permitted.
use std::collections::BTreeSet;

// ═══════════════════════════════════════════════════════════════════
// Symbol classes
// ═══════════════════════════════════════════════════════════════════

/// A group of characters that can be forbidden as a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum,
)]
pub enum SymbolClass {
    /// Upper-case letters.
    UpperCase,
    /// Lower-case letters.
    LowerCase,
    /// Decimal digits `0`-`9`.
    Numeral,
    /// ` `
    Space,
    /// `$`
    DollarSign,
    /// `%`
    PercentSign,
    /// `*`
    Asterisk,
    /// `_`
    Underscore,
    /// `=`
    EqualsSign,
    /// `'`
    SingleQuote,
    /// `"`
    DoubleQuote,
    /// `` ` ``
    Backtick,
    /// `.`
    Dot,
    /// `/`
    Slash,
    /// `\`
    Backslash,
    /// `{` and `}`
    CurlyBrace,
    /// `<` and `>`
    AngleBracket,
}

impl SymbolClass {
    pub const ALL: [SymbolClass; 17] = [
        Self::UpperCase,
        Self::LowerCase,
        Self::Numeral,
        Self::Space,
        Self::DollarSign,
        Self::PercentSign,
        Self::Asterisk,
        Self::Underscore,
        Self::EqualsSign,
        Self::SingleQuote,
        Self::DoubleQuote,
        Self::Backtick,
        Self::Dot,
        Self::Slash,
        Self::Backslash,
        Self::CurlyBrace,
        Self::AngleBracket,
    ];

    /// The class a character belongs to, or `None` for characters that can
    /// never be forbidden.
    pub fn of(c: char) -> Option<Self> {
        let class = match c {
            '0'..='9' => Self::Numeral,
            ' ' => Self::Space,
            '$' => Self::DollarSign,
            '%' => Self::PercentSign,
            '*' => Self::Asterisk,
            '_' => Self::Underscore,
            '=' => Self::EqualsSign,
            '\'' => Self::SingleQuote,
            '"' => Self::DoubleQuote,
            '`' => Self::Backtick,
            '.' => Self::Dot,
            '/' => Self::Slash,
            '\\' => Self::Backslash,
            '{' | '}' => Self::CurlyBrace,
            '<' | '>' => Self::AngleBracket,
            c if c.is_uppercase() => Self::UpperCase,
            c if c.is_lowercase() => Self::LowerCase,
            _ => return None,
        };
        Some(class)
    }

    /// Human-readable name for messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::UpperCase => "upper case",
            Self::LowerCase => "lower case",
            Self::Numeral => "numeral",
            Self::Space => "space",
            Self::DollarSign => "`$`",
            Self::PercentSign => "`%`",
            Self::Asterisk => "`*`",
            Self::Underscore => "`_`",
            Self::EqualsSign => "`=`",
            Self::SingleQuote => "`'`",
            Self::DoubleQuote => "`\"`",
            Self::Backtick => "`` ` ``",
            Self::Dot => "`.`",
            Self::Slash => "`/`",
            Self::Backslash => "`\\`",
            Self::CurlyBrace => "`{}`",
            Self::AngleBracket => "`<>`",
        }
    }
}

/// A string delimiter, in the order the encoder prefers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
    Backtick,
}

impl Quote {
    pub const PRIORITY: [Quote; 3] = [Self::Single, Self::Double, Self::Backtick];

    pub fn delimiter(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
            Self::Backtick => '`',
        }
    }

    pub fn class(self) -> SymbolClass {
        match self {
            Self::Single => SymbolClass::SingleQuote,
            Self::Double => SymbolClass::DoubleQuote,
            Self::Backtick => SymbolClass::Backtick,
        }
    }

    /// Returns `true` for any of the three delimiters.
    pub fn is_delimiter(c: char) -> bool {
        matches!(c, '\'' | '"' | '`')
    }
}

// ═══════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    forbidden: BTreeSet<SymbolClass>,
    use_aliasing: bool,
    identifier_symbols: Vec<char>,
}

impl Default for Configuration {
    /// Letters forbidden, everything else permitted, aliasing on.
    fn default() -> Self {
        Self::permissive()
            .forbid(SymbolClass::UpperCase)
            .forbid(SymbolClass::LowerCase)
    }
}

impl Configuration {
    /// Nothing forbidden, aliasing on, no extra identifier symbols.
    pub fn permissive() -> Self {
        Self {
            forbidden: BTreeSet::new(),
            use_aliasing: true,
            identifier_symbols: Vec::new(),
        }
    }

    pub fn forbid(mut self, class: SymbolClass) -> Self {
        self.forbidden.insert(class);
        self
    }

    pub fn permit(mut self, class: SymbolClass) -> Self {
        self.forbidden.remove(&class);
        self
    }

    pub fn forbid_all(
        self,
        classes: impl IntoIterator<Item = SymbolClass>,
    ) -> Self {
        classes.into_iter().fold(self, Self::forbid)
    }

    pub fn with_aliasing(mut self, enabled: bool) -> Self {
        self.use_aliasing = enabled;
        self
    }

    /// Characters alias names are built from, in preference order.
    /// Duplicates are dropped, first occurrence wins.
    pub fn with_identifier_symbols(
        mut self,
        symbols: impl IntoIterator<Item = char>,
    ) -> Self {
        self.identifier_symbols.clear();
        for c in symbols {
            if !self.identifier_symbols.contains(&c) {
                self.identifier_symbols.push(c);
            }
        }
        self
    }

    pub fn forbids(&self, class: SymbolClass) -> bool {
        self.forbidden.contains(&class)
    }

    pub fn permits(&self, class: SymbolClass) -> bool {
        !self.forbids(class)
    }

    /// Whether `c` may appear in the output.
    pub fn allows_char(&self, c: char) -> bool {
        SymbolClass::of(c).is_none_or(|class| self.permits(class))
    }

    pub fn forbidden(&self) -> impl Iterator<Item = SymbolClass> + '_ {
        self.forbidden.iter().copied()
    }

    pub fn use_aliasing(&self) -> bool {
        self.use_aliasing
    }

    pub fn identifier_symbols(&self) -> &[char] {
        &self.identifier_symbols
    }

    /// The first permitted string delimiter.
    pub fn quote(&self) -> Option<Quote> {
        Quote::PRIORITY
            .into_iter()
            .find(|quote| self.permits(quote.class()))
    }

    pub fn has_quote(&self) -> bool {
        self.quote().is_some()
    }
}
