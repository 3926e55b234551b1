//! Alias hoisting.
//!
//! A repeated sub-expression is bound once, `name=expr;`, in front of the
//! main expression and every occurrence is replaced by `name`. A binding is
//! kept only when it makes the whole program strictly shorter.

use log::{debug, trace};
use rand::{Rng, seq::SliceRandom};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasBinding {
    pub name: String,
    pub expression: String,
}

impl AliasBinding {
    fn statement(&self) -> String {
        format!("{}={};", self.name, self.expression)
    }
}

/// Bindings hoisted so far plus the rewritten main expression.
#[derive(Debug, Clone)]
pub struct Compaction {
    bindings: Vec<AliasBinding>,
    prefix_len: usize,
    body: String,
    names: Vec<String>,
    next: usize,
}

impl Compaction {
    pub fn new(body: String, names: Vec<String>) -> Self {
        Self {
            bindings: Vec::new(),
            prefix_len: 0,
            body,
            names,
            next: 0,
        }
    }

    pub fn bindings(&self) -> &[AliasBinding] {
        &self.bindings
    }

    /// Length of the rendered program.
    pub fn len(&self) -> usize {
        self.prefix_len + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tries to bind `target` to the next free name. Returns whether the
    /// binding was kept.
    pub fn hoist(&mut self, target: &str) -> bool {
        let Some(name) = self.names.get(self.next) else {
            return false;
        };

        let mut expression = target.to_string();
        for binding in &self.bindings {
            expression =
                substitute(&expression, &binding.expression, &binding.name);
        }
        if expression.len() <= name.len() {
            return false;
        }

        let body = substitute(&self.body, &expression, name);
        let binding = AliasBinding {
            name: name.clone(),
            expression,
        };
        let statement_len = binding.statement().len();
        if statement_len + body.len() >= self.body.len() {
            return false;
        }

        let saved = self.body.len() - statement_len - body.len();
        trace!("hoisted {} ({saved} bytes saved)", binding.name);
        self.body = body;
        self.prefix_len += statement_len;
        self.bindings.push(binding);
        self.next += 1;
        true
    }

    /// A copy of `self` with `candidates` hoisted in a random order.
    pub fn attempt<R: Rng + ?Sized>(
        &self,
        candidates: &[String],
        rng: &mut R,
    ) -> Compaction {
        let mut order: Vec<&String> = candidates.iter().collect();
        order.shuffle(rng);

        let mut trial = self.clone();
        for candidate in order {
            trial.hoist(candidate);
        }
        trial
    }

    /// The program text: alias statements, then the main expression.
    pub fn render(&self) -> String {
        let mut program = String::with_capacity(self.len());
        for binding in &self.bindings {
            program.push_str(&binding.statement());
        }
        program.push_str(&self.body);
        program
    }
}

/// Hoists the `priority` targets in order, then keeps the shortest of
/// `iterations` randomized passes over `candidates`.
pub fn optimize<R: Rng + ?Sized>(
    body: String,
    names: Vec<String>,
    priority: &[String],
    candidates: &[String],
    iterations: u64,
    rng: &mut R,
) -> Compaction {
    let mut base = Compaction::new(body, names);
    for target in priority {
        base.hoist(target);
    }
    debug!(
        "priority aliases: {} bound, {} bytes",
        base.bindings().len(),
        base.len()
    );

    let mut best: Option<Compaction> = None;
    for trial in 0..iterations {
        let result = base.attempt(candidates, rng);
        trace!("trial {trial}: {} bytes", result.len());
        if best.as_ref().is_none_or(|best| result.len() < best.len()) {
            best = Some(result);
        }
    }
    best.unwrap_or(base)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '$' || c == '_'
}

/// Whether `needle` at `start..end` of `haystack` stands on its own, so that
/// replacing it with an identifier keeps the surrounding expression intact.
fn stands_alone(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();

    // The previous operand would be joined to, called or indexed by the name.
    if before.is_some_and(|c| is_identifier_char(c) || c == ')' || c == ']')
    {
        return false;
    }
    !after.is_some_and(is_identifier_char)
}

/// Replaces every free-standing occurrence of `needle` in `haystack` with
/// `name`, scanning left to right without overlap.
pub fn substitute(haystack: &str, needle: &str, name: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }

    let mut result = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(offset) = haystack[cursor..].find(needle) {
        let start = cursor + offset;
        let end = start + needle.len();
        if stands_alone(haystack, start, end) {
            result.push_str(&haystack[cursor..start]);
            result.push_str(name);
            cursor = end;
        } else {
            let step = haystack[start..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            result.push_str(&haystack[cursor..start + step]);
            cursor = start + step;
        }
    }
    result.push_str(&haystack[cursor..]);
    result
}
