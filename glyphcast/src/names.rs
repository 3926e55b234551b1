use crate::{Configuration, SymbolClass};

/// Words that cannot be assigned to, or globals the runtime (or the
/// synthesized programs) rely on.
const RESERVED: &[&str] = &[
    // keywords
    "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "export",
    "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "var",
    "void", "while", "with", "yield",
    // globals
    "NaN", "Infinity", "undefined", "eval", "arguments", "escape",
    "unescape", "name", "status", "top", "self", "parent", "window",
    "frames", "length", "closed", "opener", "origin", "location",
    "document", "history", "event",
];

fn is_identifier_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '$' || c == '_'
}

/// Alias names, shortest first, over the identifier symbols a
/// [`Configuration`] allows.
#[derive(Debug, Clone)]
pub struct NamePool {
    symbols: Vec<char>,
    /// Odometer over `symbols`; `None` once no name can be formed.
    odometer: Option<Vec<usize>>,
}

impl NamePool {
    pub fn new(config: &Configuration) -> Self {
        let extra = [
            ('$', SymbolClass::DollarSign),
            ('_', SymbolClass::Underscore),
        ]
        .into_iter()
        .filter(|(_, class)| config.permits(*class))
        .map(|(c, _)| c);

        let mut symbols = Vec::new();
        for c in config.identifier_symbols().iter().copied().chain(extra) {
            if is_identifier_symbol(c)
                && config.allows_char(c)
                && !symbols.contains(&c)
            {
                symbols.push(c);
            }
        }

        let can_start = symbols.iter().any(|c| !c.is_ascii_digit());
        Self {
            symbols,
            odometer: can_start.then(|| vec![0]),
        }
    }

    fn advance(&mut self) {
        let Some(odometer) = self.odometer.as_mut() else {
            return;
        };
        for place in odometer.iter_mut().rev() {
            *place += 1;
            if *place < self.symbols.len() {
                return;
            }
            *place = 0;
        }
        odometer.insert(0, 0);
    }
}

impl Iterator for NamePool {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let odometer = self.odometer.as_ref()?;
            let name: String =
                odometer.iter().map(|&i| self.symbols[i]).collect();
            self.advance();

            let starts_with_digit =
                name.starts_with(|c: char| c.is_ascii_digit());
            if !starts_with_digit && !RESERVED.contains(&name.as_str()) {
                return Some(name);
            }
        }
    }
}
