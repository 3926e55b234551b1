use log::{debug, info, warn};
use rand::Rng;

use crate::{
    Builder, Configuration, EncodeError, EncodeResult, Quote, SymbolClass,
    catalog,
    compact::{self, Compaction},
    memo::{Epoch, Memo},
    names::NamePool,
};

/// Property names every encoding spells at least once.
const PRIORITY_TARGETS: [&str; 3] = ["toString", "constructor", "flat"];

/// Per-character expressions and the invocation wrapping them, before
/// compaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub pieces: Vec<String>,
    pub expression: String,
}

/// Encodes text under one [`Configuration`] at a time.
///
/// Derived fragments live in a [`Memo`] under the encoder's current epoch;
/// changing the configuration moves to a fresh epoch and drops the old one.
pub struct Encoder {
    config: Configuration,
    epoch: Epoch,
    memo: Memo,
}

impl Encoder {
    pub fn new(config: Configuration) -> Self {
        Self::with_memo(config, Memo::new())
    }

    /// An encoder caching into `memo`, which may be shared with others.
    pub fn with_memo(config: Configuration, memo: Memo) -> Self {
        let epoch = memo.advance();
        Self {
            config,
            epoch,
            memo,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn set_configuration(&mut self, config: Configuration) {
        if config == self.config {
            return;
        }
        let stale = self.epoch;
        self.epoch = self.memo.advance();
        self.memo.discard(stale);
        self.config = config;
        debug!("configuration changed, epoch {}", self.epoch.get());
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn builder(&self) -> Builder<'_> {
        Builder::new(&self.config, self.epoch, &self.memo)
    }

    /// The expression for one input character, parenthesized if needed.
    pub fn character(&self, c: char) -> EncodeResult<String> {
        self.piece(&self.builder(), c)
    }

    fn piece(&self, builder: &Builder<'_>, c: char) -> EncodeResult<String> {
        if catalog::has_character(c) {
            return Ok(builder.character(c)?.wrapped());
        }

        let quote = self.config.quote();
        let needs_escape = !self.config.allows_char(c)
            || c.is_control()
            || quote.is_none_or(|quote| quote.delimiter() == c);
        if needs_escape {
            return Ok(builder.unescaped(c)?.wrapped());
        }
        builder.quote(&c.to_string())
    }

    /// Every character of `text` joined by `+`, inside one invocation.
    pub fn assemble(&self, text: &str) -> EncodeResult<Assembled> {
        let builder = self.builder();
        let pieces = text
            .chars()
            .map(|c| self.piece(&builder, c))
            .collect::<EncodeResult<Vec<_>>>()?;
        let expression = builder.invoke(&pieces.join("+"))?;
        debug!(
            "assembled {} characters into {} bytes",
            pieces.len(),
            expression.len()
        );
        Ok(Assembled { pieces, expression })
    }

    /// Encodes `text` using the thread-local random source for compaction.
    pub fn encode(
        &self,
        text: &str,
        iteration_count: i64,
    ) -> EncodeResult<String> {
        self.encode_with_rng(text, iteration_count, &mut rand::thread_rng())
    }

    /// Encodes `text`, running `iteration_count` randomized compaction
    /// passes drawn from `rng`.
    pub fn encode_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        iteration_count: i64,
        rng: &mut R,
    ) -> EncodeResult<String> {
        let iterations = u64::try_from(iteration_count)
            .map_err(|_| EncodeError::InvalidIterationCount(iteration_count))?;
        if text.is_empty() {
            return Ok(String::new());
        }

        let Assembled { pieces, expression } = self.assemble(text)?;
        if !self.config.use_aliasing() {
            return Ok(expression);
        }
        if self.config.forbids(SymbolClass::EqualsSign) {
            warn!("`=` is forbidden, skipping alias compaction");
            return Ok(expression);
        }

        let builder = self.builder();
        let priority = PRIORITY_TARGETS
            .iter()
            .map(|word| builder.string(word))
            .collect::<EncodeResult<Vec<_>>>()?;
        let candidates = Self::candidates(&builder, &pieces)?;

        let names: Vec<String> = NamePool::new(&self.config)
            .take(priority.len() + candidates.len())
            .collect();
        if names.is_empty() {
            warn!("no identifier symbols permitted, skipping alias compaction");
            return Ok(expression);
        }

        let raw_len = expression.len();
        let compaction: Compaction = compact::optimize(
            expression,
            names,
            &priority,
            &candidates,
            iterations,
            rng,
        );
        info!(
            "compacted {raw_len} to {} bytes with {} aliases",
            compaction.len(),
            compaction.bindings().len()
        );
        Ok(compaction.render())
    }

    /// Distinct expressions worth aliasing for one encoding, in first-seen
    /// order: the per-character pieces, then the characters the invocation
    /// spells. Expressions containing a string delimiter are left out.
    fn candidates(
        builder: &Builder<'_>,
        pieces: &[String],
    ) -> EncodeResult<Vec<String>> {
        let mut spelled = Vec::new();
        for c in PRIORITY_TARGETS.iter().flat_map(|word| word.chars()) {
            spelled.push(builder.character(c)?.wrapped());
        }

        let mut candidates: Vec<String> = Vec::new();
        for text in pieces.iter().chain(&spelled) {
            if text.contains(Quote::is_delimiter) || candidates.contains(text)
            {
                continue;
            }
            candidates.push(text.clone());
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn negative_iterations_fail_before_work() {
        let encoder = Encoder::new(Configuration::default());
        assert_eq!(
            encoder.encode("a", -1),
            Err(EncodeError::InvalidIterationCount(-1))
        );
        assert!(encoder.memo().is_empty(encoder.epoch()));
    }

    #[test]
    fn empty_text_encodes_to_nothing() {
        let encoder = Encoder::new(Configuration::default());
        assert_eq!(encoder.encode("", 5).unwrap(), "");
    }

    #[test]
    fn single_numeral_runs_through_invocation() {
        let config = Configuration::default().with_aliasing(false);
        let encoder = Encoder::new(config);
        let builder = encoder.builder();
        let expected = builder.invoke("'1'").unwrap();
        assert_eq!(encoder.encode("1", 0).unwrap(), expected);
    }

    #[test]
    fn uncataloged_characters_are_quoted_or_escaped() {
        let encoder = Encoder::new(Configuration::default());
        assert_eq!(encoder.character(';').unwrap(), "';'");
        assert_eq!(encoder.character('a').unwrap(), "(![]+[])[1]");

        let escaped = encoder.character('\t').unwrap();
        assert!(escaped.ends_with(")()"), "{escaped}");

        let upper = encoder.character('Q').unwrap();
        assert!(!upper.contains('Q'), "{upper}");
    }

    #[test]
    fn backtick_delimiter_escapes_itself() {
        let config = Configuration::permissive()
            .forbid(SymbolClass::SingleQuote)
            .forbid(SymbolClass::DoubleQuote);
        let encoder = Encoder::new(config);
        assert_eq!(encoder.character(';').unwrap(), "`;`");
        assert_ne!(encoder.character('`').unwrap(), "```");
    }

    #[test]
    fn configuration_change_invalidates_cache() {
        let mut encoder = Encoder::new(Configuration::default());
        let before = encoder.character('a').unwrap();
        let first = encoder.epoch();

        encoder.set_configuration(Configuration::permissive());
        assert_ne!(encoder.epoch(), first);
        assert!(encoder.memo().is_empty(first));
        assert_eq!(encoder.character('a').unwrap(), "'a'");

        encoder.set_configuration(Configuration::default());
        assert_eq!(encoder.character('a').unwrap(), before);
    }

    #[test]
    fn unchanged_configuration_keeps_epoch() {
        let mut encoder = Encoder::new(Configuration::default());
        let epoch = encoder.epoch();
        encoder.set_configuration(Configuration::default());
        assert_eq!(encoder.epoch(), epoch);
    }

    #[test]
    fn aliasing_skipped_without_equals() {
        let config = Configuration::default().forbid(SymbolClass::EqualsSign);
        let encoder = Encoder::new(config);
        let output = encoder.encode("alert(1)", 10).unwrap();
        assert!(!output.contains('='));
        assert!(!output.contains(';'));
        assert_eq!(output, encoder.assemble("alert(1)").unwrap().expression);
    }

    #[test]
    fn compaction_shortens_output() {
        let encoder = Encoder::new(Configuration::default());
        let raw = encoder.assemble("alert(1)").unwrap().expression;
        let mut rng = StdRng::seed_from_u64(1);
        let compacted =
            encoder.encode_with_rng("alert(1)", 8, &mut rng).unwrap();
        assert!(compacted.len() < raw.len());
        assert!(compacted.contains(';'));
    }

    fn quoteless() -> Configuration {
        Configuration::default().forbid_all([
            SymbolClass::SingleQuote,
            SymbolClass::DoubleQuote,
            SymbolClass::Backtick,
        ])
    }

    #[test]
    fn candidates_include_escaped_pieces() {
        let encoder = Encoder::new(quoteless());
        let builder = encoder.builder();
        let pieces = encoder.assemble("QQ").unwrap().pieces;
        let candidates = Encoder::candidates(&builder, &pieces).unwrap();
        assert_eq!(candidates[0], pieces[0]);
        assert_eq!(candidates.iter().filter(|c| **c == pieces[0]).count(), 1);
    }

    #[test]
    fn candidates_ignore_earlier_encodings() {
        let fresh = Encoder::new(Configuration::default());
        let pieces = fresh.assemble("alert(1)").unwrap().pieces;
        let expected =
            Encoder::candidates(&fresh.builder(), &pieces).unwrap();

        let used = Encoder::new(Configuration::default());
        used.encode("xyz_QW!?", 3).unwrap();
        let pieces = used.assemble("alert(1)").unwrap().pieces;
        assert_eq!(
            Encoder::candidates(&used.builder(), &pieces).unwrap(),
            expected
        );
    }

    #[test]
    fn repeated_escapes_are_aliased() {
        let encoder = Encoder::new(quoteless());
        let piece = encoder.character('Q').unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let output = encoder
            .encode_with_rng(&"Q".repeat(12), 5, &mut rng)
            .unwrap();
        let (_, body) = output.rsplit_once(';').unwrap();
        assert!(body.len() < 2 * piece.len(), "{body}");
    }
}
