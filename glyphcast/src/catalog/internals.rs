use super::{Fragment, Internal, Strategy};
use crate::SymbolClass::{CurlyBrace, Numeral, Slash};

pub(super) fn strategies(value: Internal) -> Vec<Strategy> {
    match value {
        Internal::False => {
            vec![Strategy::always("negated array", |_| {
                Ok(Fragment::unary("![]"))
            })]
        }
        Internal::True => {
            vec![Strategy::always("double negation", |_| {
                Ok(Fragment::unary("!![]"))
            })]
        }
        Internal::Undefined => {
            vec![Strategy::always("missing element", |_| {
                Ok(Fragment::term("[][[]]"))
            })]
        }
        Internal::NaN => {
            vec![Strategy::always("numeric array", |b| {
                Ok(Fragment::unary(format!(
                    "+[{}]",
                    b.internal(Internal::False)?.text()
                )))
            })]
        }
        Internal::Infinity => vec![
            Strategy::new(
                "division by zero",
                |c| c.permits(Slash),
                |b| {
                    Ok(Fragment::sum(format!(
                        "{}/{}",
                        b.digit(1)?.multiplicative(),
                        b.digit(0)?.multiplicative()
                    )))
                },
            ),
            Strategy::new(
                "exponent literal",
                |c| c.permits(Numeral),
                |b| {
                    Ok(Fragment::unary(format!(
                        "+(1+{}+1000)",
                        b.character('e')?.wrapped()
                    )))
                },
            ),
            Strategy::always("exponent by digits", |b| {
                let one = b.digit(1)?;
                let zero = b.digit(0)?;
                Ok(Fragment::unary(format!(
                    "+({}+{}+[{}]+[{z}]+[{z}]+[{z}])",
                    one.additive(),
                    b.character('e')?.wrapped(),
                    one.text(),
                    z = zero.text()
                )))
            }),
        ],
        Internal::LargeExponent => vec![
            Strategy::new(
                "exponent literal",
                |c| c.permits(Numeral),
                |b| {
                    Ok(Fragment::unary(format!(
                        "+(11+{}+100)",
                        b.character('e')?.wrapped()
                    )))
                },
            ),
            Strategy::always("exponent by digits", |b| {
                let one = b.digit(1)?;
                let zero = b.digit(0)?;
                Ok(Fragment::unary(format!(
                    "+({}+[{o}]+{}+[{o}]+[{z}]+[{z}])",
                    one.additive(),
                    b.character('e')?.wrapped(),
                    o = one.text(),
                    z = zero.text()
                )))
            }),
        ],
        Internal::FlatSource => {
            vec![Strategy::always("array method source", |b| {
                Ok(Fragment::sum(format!("[][{}]+[]", b.string("flat")?)))
            })]
        }
        Internal::StringSource => {
            vec![Strategy::always("string constructor source", |b| {
                Ok(Fragment::sum(format!(
                    "([]+[])[{}]+[]",
                    b.string("constructor")?
                )))
            })]
        }
        Internal::ObjectText => vec![Strategy::new(
            "object literal",
            |c| c.permits(CurlyBrace),
            |_| Ok(Fragment::sum("[]+{}")),
        )],
        Internal::ArrayIteratorText => {
            vec![Strategy::always("array iterator", |b| {
                Ok(Fragment::sum(format!("[][{}]()+[]", b.string("entries")?)))
            })]
        }
        Internal::SubTag => vec![Strategy::always("sub markup", |b| {
            Ok(Fragment::term(format!("([]+[])[{}]()", b.string("sub")?)))
        })],
        Internal::FontColorTag => {
            vec![Strategy::always("fontcolor markup", |b| {
                Ok(Fragment::term(format!(
                    "([]+[])[{}]()",
                    b.string("fontcolor")?
                )))
            })]
        }
        Internal::EscapedFlatSource => {
            vec![Strategy::always("escaped method source", |b| {
                b.run("return escape([][\"flat\"])")
            })]
        }
        Internal::EscapedSubTag => {
            vec![Strategy::always("escaped sub markup", |b| {
                b.run("return escape(([]+[])[\"sub\"]())")
            })]
        }
    }
}
