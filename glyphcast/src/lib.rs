//! # glyphcast
//!
//! Rewrites JavaScript source into an equivalent program built only from a
//! caller-chosen subset of symbols, using the runtime's type coercions
//! (`![]` is `false`, `[]+x` is the text of `x`, ...).
//!
//! ## Architecture
//!
//! ```text
//!  text ──▶ Encoder ──▶ one expression per character ──▶ Indirect invocation
//!              │                                              │
//!              ▼                                              ▼
//!           Builder ◀──▶ Memo (epoch, value)            Compaction
//!              │                                     (name=expr; hoisting)
//!              ▼
//!           Catalogs: Characters ─▶ Internals ─▶ Digits
//! ```
//!
//! ```rust
//! use glyphcast::{Configuration, SymbolClass};
//!
//! let config = Configuration::default().forbid(SymbolClass::Numeral);
//! let program = glyphcast::encode("alert(1)", &config, 10).unwrap();
//! assert!(!program.chars().any(|c| c.is_ascii_alphanumeric()));
//! ```

mod builder;
pub mod catalog;
mod compact;
mod config;
mod encoder;
mod error;
mod invoke;
pub mod memo;
mod names;

pub use builder::Builder;
pub use compact::{AliasBinding, Compaction, optimize};
pub use config::{Configuration, Quote, SymbolClass};
pub use encoder::{Assembled, Encoder};
pub use error::{EncodeError, EncodeResult};
pub use invoke::escape_sequence;
pub use names::NamePool;

/// Encodes `text` under `config` with `iteration_count` randomized
/// compaction passes.
pub fn encode(
    text: &str,
    config: &Configuration,
    iteration_count: i64,
) -> EncodeResult<String> {
    Encoder::new(config.clone()).encode(text, iteration_count)
}
