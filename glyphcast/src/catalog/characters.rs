use super::{Fragment, Internal, Strategy};
use crate::{
    Configuration,
    SymbolClass::{
        self, Backslash, Backtick, CurlyBrace, DoubleQuote, LowerCase,
        Numeral, SingleQuote, Slash,
    },
};

use Internal::{
    ArrayIteratorText, EscapedFlatSource, EscapedSubTag, False, FlatSource,
    FontColorTag, Infinity, LargeExponent, NaN, ObjectText, StringSource,
    SubTag, True, Undefined,
};

fn curly(config: &Configuration) -> bool {
    config.permits(CurlyBrace)
}

fn numerals(config: &Configuration) -> bool {
    config.permits(Numeral)
}

/// `c` between quotes, when its class and a delimiter are both permitted.
/// Quote characters and the line break have their own literal forms.
fn literal(c: char) -> Option<Strategy> {
    let text = match c {
        '\'' | '"' | '\n' => return None,
        '\\' => "\\\\".to_string(),
        c => c.to_string(),
    };
    let class = SymbolClass::of(c);
    Some(Strategy::new(
        "literal",
        move |config| {
            config.has_quote() && class.is_none_or(|class| config.permits(class))
        },
        move |b| Ok(Fragment::term(b.quote(&text)?)),
    ))
}

/// `(value+[])[position]`
fn text_of(value: Internal, position: u32) -> Strategy {
    Strategy::always("text of internal", move |b| {
        b.pick_from(&b.stringify(value)?, position)
    })
}

/// `value[position]` for an internal that already is a string.
fn member_of(value: Internal, position: u32) -> Strategy {
    Strategy::always("member of internal", move |b| b.pick(value, position))
}

/// `(value)["toString"](base)`
fn radix(value: u32, base: u32) -> Strategy {
    Strategy::always("radix", move |b| {
        Ok(Fragment::term(b.radix(value, base)?))
    })
}

/// `(left+right)[position]`, both sides internals.
fn joined(left: Internal, right: Internal, position: u32) -> Strategy {
    Strategy::always("joined internals", move |b| {
        let text = format!(
            "{}+{}",
            b.internal(left)?.additive(),
            b.internal(right)?.additive()
        );
        b.pick_from(&text, position)
    })
}

fn decoded(c: char) -> Strategy {
    Strategy::always("unescape", move |b| b.unescaped(c))
}

fn quoted(
    label: &'static str,
    guard: impl Fn(&Configuration) -> bool + 'static,
    text: &'static str,
) -> Strategy {
    Strategy::new(label, guard, move |_| Ok(Fragment::term(text)))
}

pub(super) fn strategies(c: char) -> Option<Vec<Strategy>> {
    let fallbacks = match c {
        'a' => vec![text_of(False, 1)],
        'b' => vec![
            member_of(ObjectText, 2).guarded(curly),
            member_of(ArrayIteratorText, 2),
        ],
        'c' => vec![
            member_of(ObjectText, 5).guarded(curly),
            member_of(FlatSource, 3),
        ],
        'd' => vec![text_of(Undefined, 2)],
        'e' => vec![text_of(True, 3)],
        'f' => vec![text_of(False, 0)],
        'g' => vec![member_of(StringSource, 14)],
        'h' => vec![radix(17, 20)],
        'i' => vec![
            text_of(Undefined, 5).guarded(numerals),
            Strategy::always("false then undefined", |b| {
                let text = format!(
                    "[{}]+{}",
                    b.internal(False)?.text(),
                    b.internal(Undefined)?.text()
                );
                b.pick_from(&text, 10)
            }),
        ],
        'j' => vec![
            member_of(ObjectText, 3).guarded(curly),
            member_of(ArrayIteratorText, 3),
        ],
        'k' => vec![radix(20, 21)],
        'l' => vec![text_of(False, 2)],
        'm' => vec![Strategy::always("number constructor", |b| {
            let text = format!(
                "{}[{}]+[]",
                b.integer(0)?,
                b.string("constructor")?
            );
            b.pick_from(&text, 11)
        })],
        'n' => vec![text_of(Undefined, 1)],
        'o' => vec![
            member_of(ObjectText, 1).guarded(curly),
            member_of(FlatSource, 6).guarded(numerals),
            joined(True, FlatSource, 10),
        ],
        'p' => vec![radix(25, 30)],
        'q' => vec![radix(26, 30)],
        'r' => vec![text_of(True, 1)],
        's' => vec![text_of(False, 3)],
        't' => vec![text_of(True, 0)],
        'u' => vec![text_of(Undefined, 0)],
        'v' => vec![member_of(FlatSource, 23)],
        'w' => vec![radix(32, 33)],
        'x' => vec![
            radix(33, 34).guarded(numerals),
            Strategy::always("radix digit", |b| {
                Ok(Fragment::term(format!(
                    "{}[{}]",
                    b.radix(101, 34)?,
                    b.index(1)?
                )))
            }),
        ],
        'y' => vec![
            text_of(Infinity, 7).guarded(numerals),
            Strategy::always("not a number then infinity", |b| {
                let text = format!(
                    "{}+[{}]",
                    b.internal(NaN)?.additive(),
                    b.internal(Infinity)?.text()
                );
                b.pick_from(&text, 10)
            }),
        ],
        'z' => vec![radix(35, 36)],

        'A' => vec![member_of(ArrayIteratorText, 8)],
        'B' => vec![
            Strategy::new(
                "boolean constructor",
                numerals,
                |b| {
                    let text = format!(
                        "{}[{}]+[]",
                        b.internal(False)?.wrapped(),
                        b.string("constructor")?
                    );
                    b.pick_from(&text, 9)
                },
            ),
            Strategy::always("zero then boolean constructor", |b| {
                let text = format!(
                    "[{}]+{}[{}]",
                    b.digit(0)?.text(),
                    b.internal(False)?.wrapped(),
                    b.string("constructor")?
                );
                b.pick_from(&text, 10)
            }),
        ],
        'C' => vec![member_of(EscapedSubTag, 2)],
        'D' => vec![member_of(EscapedFlatSource, 48)],
        'E' => vec![member_of(EscapedSubTag, 8)],
        'I' => vec![text_of(Infinity, 0)],
        'N' => vec![text_of(NaN, 0)],
        'O' => vec![member_of(ObjectText, 8).guarded(curly), decoded('O')],
        'S' => vec![
            member_of(StringSource, 9).guarded(numerals),
            Strategy::always("zero then string constructor", |b| {
                let text = format!(
                    "{}+{}",
                    b.digit(0)?.additive(),
                    b.internal(StringSource)?.additive()
                );
                b.pick_from(&text, 10)
            }),
        ],

        '0'..='9' => {
            let digit = c as u8 - b'0';
            vec![Strategy::always("stringified digit", move |b| {
                Ok(Fragment::sum(format!("{}+[]", b.digit(digit)?.wrapped())))
            })]
        }

        ' ' => vec![
            member_of(ObjectText, 7).guarded(curly),
            member_of(FlatSource, 8).guarded(numerals),
            joined(False, FlatSource, 20),
        ],
        '$' => vec![decoded('$')],
        '\n' => vec![
            Strategy::new(
                "escaped literal",
                |config| {
                    config.permits(LowerCase)
                        && config.permits(Backslash)
                        && config.has_quote()
                },
                |b| Ok(Fragment::term(b.quote("\\n")?)),
            ),
            decoded('\n'),
        ],
        '%' => vec![
            member_of(EscapedFlatSource, 8).guarded(numerals),
            member_of(EscapedFlatSource, 30),
        ],
        '*' => vec![decoded('*')],
        '_' => vec![decoded('_')],
        '=' => vec![member_of(FontColorTag, 11)],
        '+' => vec![text_of(LargeExponent, 4)],
        '\'' => vec![
            quoted(
                "double quoted",
                |config| {
                    config.permits(SingleQuote) && config.permits(DoubleQuote)
                },
                "\"'\"",
            ),
            quoted(
                "backtick quoted",
                |config| {
                    config.permits(SingleQuote) && config.permits(Backtick)
                },
                "`'`",
            ),
            quoted(
                "escaped",
                |config| {
                    config.permits(SingleQuote) && config.permits(Backslash)
                },
                "'\\''",
            ),
            decoded('\''),
        ],
        '"' => vec![
            quoted(
                "single quoted",
                |config| {
                    config.permits(DoubleQuote) && config.permits(SingleQuote)
                },
                "'\"'",
            ),
            quoted(
                "backtick quoted",
                |config| {
                    config.permits(DoubleQuote) && config.permits(Backtick)
                },
                "`\"`",
            ),
            quoted(
                "escaped",
                |config| {
                    config.permits(DoubleQuote) && config.permits(Backslash)
                },
                "\"\\\"\"",
            ),
            member_of(FontColorTag, 12),
        ],
        '.' => vec![
            Strategy::new(
                "half",
                |config| config.permits(Slash),
                |b| {
                    let text = format!(
                        "{}/{}+[]",
                        b.digit(1)?.multiplicative(),
                        b.digit(2)?.multiplicative()
                    );
                    b.pick_from(&text, 1)
                },
            ),
            text_of(LargeExponent, 1),
        ],
        '/' => vec![
            member_of(SubTag, 6).guarded(numerals),
            joined(True, SubTag, 10),
        ],
        '\\' => vec![decoded('\\')],
        '(' => vec![member_of(FlatSource, 13)],
        ')' => vec![member_of(FlatSource, 14)],
        '{' => vec![
            member_of(FlatSource, 16).guarded(numerals),
            joined(True, FlatSource, 20),
        ],
        '}' => vec![member_of(FlatSource, 32)],
        '[' => vec![
            member_of(ObjectText, 0).guarded(curly),
            member_of(FlatSource, 18),
        ],
        ']' => vec![
            member_of(ObjectText, 14).guarded(curly),
            member_of(FlatSource, 30),
        ],
        '<' => vec![member_of(SubTag, 0)],
        '>' => vec![member_of(SubTag, 4)],
        _ => return None,
    };

    let mut strategies = Vec::with_capacity(fallbacks.len() + 1);
    strategies.extend(literal(c));
    strategies.extend(fallbacks);
    Some(strategies)
}
