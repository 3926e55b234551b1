use log::{debug, trace};

use crate::{
    Configuration, EncodeError, EncodeResult, SymbolClass,
    catalog::{self, Fragment, Internal, Key},
    memo::{Epoch, Memo},
};

/// Resolves catalog values for one configuration epoch.
///
/// Each value is derived at most once per epoch; the canonical unwrapped
/// fragment is cached and parenthesized at the call site on demand.
pub struct Builder<'a> {
    config: &'a Configuration,
    epoch: Epoch,
    memo: &'a Memo,
}

impl<'a> Builder<'a> {
    pub fn new(
        config: &'a Configuration,
        epoch: Epoch,
        memo: &'a Memo,
    ) -> Self {
        Self {
            config,
            epoch,
            memo,
        }
    }

    pub fn config(&self) -> &Configuration {
        self.config
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn memo(&self) -> &Memo {
        self.memo
    }

    /// Cached fragment for `key`, deriving it on a miss.
    pub fn fragment(&self, key: Key) -> EncodeResult<Fragment> {
        if let Some(fragment) = self.memo.get(self.epoch, key) {
            trace!("memo hit for {key}");
            return Ok(fragment);
        }

        if !self.memo.begin(self.epoch, key) {
            return Err(EncodeError::CyclicDerivation {
                value: key.to_string(),
            });
        }
        let derived = self.derive(key);
        self.memo.finish(self.epoch, key);

        let fragment = derived?;
        self.memo.insert(self.epoch, key, fragment.clone());
        Ok(fragment)
    }

    /// Text for `key`, parenthesized when `wrap` is set and the entry is
    /// not atomic.
    pub fn resolve(&self, key: Key, wrap: bool) -> EncodeResult<String> {
        Ok(self.fragment(key)?.render(wrap))
    }

    fn derive(&self, key: Key) -> EncodeResult<Fragment> {
        let unrepresentable = || EncodeError::UnrepresentableConfiguration {
            value: key.to_string(),
        };
        let strategies =
            catalog::production(key).ok_or_else(unrepresentable)?;
        let strategy = strategies
            .iter()
            .find(|strategy| strategy.applies(self.config))
            .ok_or_else(unrepresentable)?;

        debug!("deriving {key} via {}", strategy.label());
        strategy.build(self)
    }

    pub fn internal(&self, value: Internal) -> EncodeResult<Fragment> {
        self.fragment(Key::Internal(value))
    }

    pub fn digit(&self, digit: u8) -> EncodeResult<Fragment> {
        self.fragment(Key::Digit(digit))
    }

    pub fn character(&self, c: char) -> EncodeResult<Fragment> {
        self.fragment(Key::Character(c))
    }

    /// Concatenation spelling `text` one catalog character at a time.
    pub fn string(&self, text: &str) -> EncodeResult<String> {
        let pieces = text
            .chars()
            .map(|c| Ok(self.character(c)?.wrapped()))
            .collect::<EncodeResult<Vec<_>>>()?;
        Ok(pieces.join("+"))
    }

    /// `text` wrapped in the first permitted string delimiter.
    pub fn quote(&self, text: &str) -> EncodeResult<String> {
        let quote = self.config.quote().ok_or_else(|| {
            EncodeError::UnrepresentableConfiguration {
                value: format!("quoted literal {text:?}"),
            }
        })?;
        let delimiter = quote.delimiter();
        Ok(format!("{delimiter}{text}{delimiter}"))
    }

    /// An expression usable as a property key that names index `n`.
    ///
    /// Without numerals, several digits are joined as a string: `1+[4]`
    /// is `"14"`.
    pub fn index(&self, n: u32) -> EncodeResult<String> {
        if self.config.permits(SymbolClass::Numeral) {
            return Ok(n.to_string());
        }

        let digits = decimal_digits(n);
        if let [single] = digits.as_slice() {
            return Ok(self.digit(*single)?.into_text());
        }

        let mut text = String::new();
        for (position, digit) in digits.into_iter().enumerate() {
            let fragment = self.digit(digit)?;
            if position == 0 {
                text.push_str(&fragment.additive());
            } else {
                text.push_str(&format!("+[{}]", fragment.text()));
            }
        }
        Ok(text)
    }

    /// A parenthesized expression evaluating to the number `n`.
    pub fn integer(&self, n: u32) -> EncodeResult<String> {
        if self.config.permits(SymbolClass::Numeral) {
            return Ok(format!("({n})"));
        }
        if n < 10 {
            return Ok(format!("({})", self.digit(n as u8)?.text()));
        }
        Ok(format!("(+({}))", self.index(n)?))
    }

    /// `value` rendered in `base`: `(value)["toString"](base)`.
    pub fn radix(&self, value: u32, base: u32) -> EncodeResult<String> {
        Ok(format!(
            "{}[{}]({})",
            self.integer(value)?,
            self.string("toString")?,
            self.index(base)?
        ))
    }

    /// The character at `position` of `value`'s text form.
    pub fn pick(
        &self,
        value: Internal,
        position: u32,
    ) -> EncodeResult<Fragment> {
        Ok(Fragment::term(format!(
            "{}[{}]",
            self.internal(value)?.wrapped(),
            self.index(position)?
        )))
    }

    /// The character at `position` of the string built by `text`.
    pub fn pick_from(
        &self,
        text: &str,
        position: u32,
    ) -> EncodeResult<Fragment> {
        Ok(Fragment::term(format!("({text})[{}]", self.index(position)?)))
    }

    /// Concatenation of `value`'s text form with the empty array, giving a
    /// string.
    pub fn stringify(&self, value: Internal) -> EncodeResult<String> {
        Ok(format!("{}+[]", self.internal(value)?.additive()))
    }
}

fn decimal_digits(mut n: u32) -> Vec<u8> {
    let mut digits = Vec::new();
    loop {
        digits.push((n % 10) as u8);
        n /= 10;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}
