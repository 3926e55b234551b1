//! Indirect invocation: running synthesized source text without naming a
//! reserved identifier.
//!
//! ```text
//!  []            empty array
//!  ["flat"]      Array.prototype.flat, a function
//!  ["constructor"]  Function, the compile-text-to-callable capability
//!  (source)      compiles the synthesized source into a function
//!  ()            runs it
//! ```
//!
//! Every property name is spelled through the Character catalog. The
//! target runtime must expose `Function` through a function's
//! `constructor` property; a runtime without it cannot use this fallback.
use std::fmt::Write;

use crate::{Builder, EncodeResult, catalog::Fragment};

impl Builder<'_> {
    /// `[]["flat"]["constructor"](source)()` where `source` is an
    /// expression evaluating to the program text.
    pub fn invoke(&self, source: &str) -> EncodeResult<String> {
        Ok(format!(
            "[][{}][{}]({source})()",
            self.string("flat")?,
            self.string("constructor")?
        ))
    }

    /// Runs `program`, spelled character by character.
    pub fn run(&self, program: &str) -> EncodeResult<Fragment> {
        Ok(Fragment::term(self.invoke(&self.string(program)?)?))
    }

    /// A single character decoded at run time by `unescape`.
    pub fn unescaped(&self, c: char) -> EncodeResult<Fragment> {
        self.run(&format!("return unescape(\"{}\")", escape_sequence(c)))
    }
}

/// The escape `unescape` decodes back into `c`: `%XX` up to 0xFF,
/// `\uXXXX` inside the basic plane, a surrogate pair above it.
pub fn escape_sequence(c: char) -> String {
    let code = c as u32;
    if code <= 0xFF {
        return format!("%{code:02x}");
    }

    let mut units = [0u16; 2];
    let mut sequence = String::new();
    for unit in c.encode_utf16(&mut units) {
        let _ = write!(sequence, "\\u{unit:04x}");
    }
    sequence
}
