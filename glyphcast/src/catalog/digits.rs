use super::{Fragment, Internal, Strategy};
use crate::{
    Builder, EncodeResult,
    SymbolClass::{AngleBracket, Asterisk, Numeral},
};

/// `digit + true`, one more than a smaller digit.
fn successor(b: &Builder<'_>, digit: u8) -> EncodeResult<Fragment> {
    Ok(Fragment::sum(format!(
        "{}+{}",
        b.digit(digit)?.additive(),
        b.internal(Internal::True)?.text()
    )))
}

/// `lhs << rhs`; both sides bind tighter than the shift.
fn shift(b: &Builder<'_>, lhs: u8, rhs: Fragment) -> EncodeResult<Fragment> {
    Ok(Fragment::loose(format!(
        "{}<<{}",
        b.digit(lhs)?.text(),
        rhs.text()
    )))
}

fn product(b: &Builder<'_>, lhs: u8, rhs: u8) -> EncodeResult<Fragment> {
    Ok(Fragment::sum(format!(
        "{}*{}",
        b.digit(lhs)?.multiplicative(),
        b.digit(rhs)?.multiplicative()
    )))
}

fn power(b: &Builder<'_>, base: u8, exponent: u8) -> EncodeResult<Fragment> {
    Ok(Fragment::sum(format!(
        "{}**{}",
        b.digit(base)?.wrapped(),
        b.digit(exponent)?.wrapped()
    )))
}

pub(super) fn strategies(digit: u8) -> Option<Vec<Strategy>> {
    if digit > 9 {
        return None;
    }

    let mut strategies = vec![Strategy::new(
        "numeral",
        |c| c.permits(Numeral),
        move |_| Ok(Fragment::term(digit.to_string())),
    )];

    let coerced = match digit {
        0 => vec![Strategy::always("numeric empty array", |_| {
            Ok(Fragment::unary("+[]"))
        })],
        1 => vec![Strategy::always("numeric true", |b| {
            Ok(Fragment::unary(format!(
                "+{}",
                b.internal(Internal::True)?.text()
            )))
        })],
        2 => vec![Strategy::always("true plus true", |b| {
            let one = b.internal(Internal::True)?;
            Ok(Fragment::sum(format!("{}+{}", one.text(), one.text())))
        })],
        3 => vec![Strategy::always("successor", |b| successor(b, 2))],
        4 => vec![
            Strategy::new(
                "shift",
                |c| c.permits(AngleBracket),
                |b| shift(b, 2, b.internal(Internal::True)?),
            ),
            Strategy::always("successor", |b| successor(b, 3)),
        ],
        5 => vec![Strategy::always("successor", |b| successor(b, 4))],
        6 => vec![
            Strategy::new(
                "shift",
                |c| c.permits(AngleBracket),
                |b| shift(b, 3, b.internal(Internal::True)?),
            ),
            Strategy::new(
                "product",
                |c| c.permits(Asterisk),
                |b| product(b, 3, 2),
            ),
            Strategy::always("successor", |b| successor(b, 5)),
        ],
        7 => vec![Strategy::always("successor", |b| successor(b, 6))],
        8 => vec![
            Strategy::new(
                "shift",
                |c| c.permits(AngleBracket),
                |b| shift(b, 2, b.digit(2)?),
            ),
            Strategy::new("power", |c| c.permits(Asterisk), |b| power(b, 2, 3)),
            Strategy::always("successor", |b| successor(b, 7)),
        ],
        _ => vec![
            Strategy::new(
                "successor of shift",
                |c| c.permits(AngleBracket),
                |b| successor(b, 8),
            ),
            Strategy::new("power", |c| c.permits(Asterisk), |b| power(b, 3, 2)),
            Strategy::always("successor", |b| successor(b, 8)),
        ],
    };

    strategies.extend(coerced);
    Some(strategies)
}
