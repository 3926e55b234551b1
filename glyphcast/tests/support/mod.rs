//! A small evaluator for the function-free part of the coercion language:
//! array, object, number and string literals, `!`, unary and binary `+`,
//! `*`, `/`, `**`, `<<`, parentheses and indexing, plus `name=expr;`
//! statements binding globals.

#![allow(dead_code)]

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Vec<Value>),
    Object,
}

fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == n.trunc() && n.abs() < 1e21 {
        return format!("{}", n as i128);
    }
    if n.abs() >= 1e21 {
        let text = format!("{n:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    format!("{n}")
}

impl Value {
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::Str(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Undefined => String::new(),
                    other => other.to_js_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object => "[object Object]".to_string(),
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined | Value::Object => f64::NAN,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Array(_) => Value::Str(self.to_js_string()).to_number(),
        }
    }

    fn truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Object => true,
        }
    }

    fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object)
    }

    fn to_primitive(self) -> Value {
        if self.is_primitive() {
            self
        } else {
            Value::Str(self.to_js_string())
        }
    }

    fn index(&self, key: &Value) -> Value {
        let key = key.to_js_string();
        let position = key
            .parse::<usize>()
            .ok()
            .filter(|position| position.to_string() == key);
        match (self, position) {
            (Value::Str(s), Some(position)) => s
                .chars()
                .nth(position)
                .map_or(Value::Undefined, |c| Value::Str(c.to_string())),
            (Value::Array(items), Some(position)) => {
                items.get(position).cloned().unwrap_or(Value::Undefined)
            }
            _ => Value::Undefined,
        }
    }
}

fn add(lhs: Value, rhs: Value) -> Value {
    let lhs = lhs.to_primitive();
    let rhs = rhs.to_primitive();
    match (&lhs, &rhs) {
        (Value::Str(_), _) | (_, Value::Str(_)) => {
            Value::Str(lhs.to_js_string() + &rhs.to_js_string())
        }
        _ => Value::Number(lhs.to_number() + rhs.to_number()),
    }
}

fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    (n.trunc() as i64) as i32
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'$' || b == b'_'
}

struct Evaluator<'a> {
    source: &'a [u8],
    position: usize,
    globals: HashMap<String, Value>,
}

impl Evaluator<'_> {
    fn peek(&self) -> Option<u8> {
        self.source.get(self.position).copied()
    }

    fn starts_with(&self, token: &str) -> bool {
        self.source[self.position..].starts_with(token.as_bytes())
    }

    fn expect(&mut self, byte: u8) -> Result<(), String> {
        if self.peek() == Some(byte) {
            self.position += 1;
            Ok(())
        } else {
            Err(format!(
                "expected '{}' at {}, found {:?}",
                byte as char,
                self.position,
                self.peek().map(char::from)
            ))
        }
    }

    fn identifier(&mut self) -> Option<String> {
        let start = self.position;
        if self.peek().is_none_or(|b| b.is_ascii_digit()) {
            return None;
        }
        while self.peek().is_some_and(is_identifier_byte) {
            self.position += 1;
        }
        let name =
            std::str::from_utf8(&self.source[start..self.position]).ok();
        name.filter(|name| !name.is_empty()).map(str::to_string)
    }

    /// `name=expr` or a bare expression.
    fn statement(&mut self) -> Result<Value, String> {
        let start = self.position;
        if let Some(name) = self.identifier()
            && self.peek() == Some(b'=')
        {
            self.position += 1;
            let value = self.shift()?;
            self.globals.insert(name, value.clone());
            return Ok(value);
        }
        self.position = start;
        self.shift()
    }

    fn shift(&mut self) -> Result<Value, String> {
        let mut value = self.additive()?;
        while self.starts_with("<<") {
            self.position += 2;
            let rhs = self.additive()?;
            let amount = (to_int32(rhs.to_number()) as u32) & 31;
            let shifted = to_int32(value.to_number()).wrapping_shl(amount);
            value = Value::Number(f64::from(shifted));
        }
        Ok(value)
    }

    fn additive(&mut self) -> Result<Value, String> {
        let mut value = self.multiplicative()?;
        while self.peek() == Some(b'+') {
            self.position += 1;
            let rhs = self.multiplicative()?;
            value = add(value, rhs);
        }
        Ok(value)
    }

    fn multiplicative(&mut self) -> Result<Value, String> {
        let mut value = self.power()?;
        loop {
            if self.peek() == Some(b'*') && !self.starts_with("**") {
                self.position += 1;
                let rhs = self.power()?;
                value = Value::Number(value.to_number() * rhs.to_number());
            } else if self.peek() == Some(b'/') {
                self.position += 1;
                let rhs = self.power()?;
                value = Value::Number(value.to_number() / rhs.to_number());
            } else {
                return Ok(value);
            }
        }
    }

    fn power(&mut self) -> Result<Value, String> {
        let base = self.unary()?;
        if self.starts_with("**") {
            self.position += 2;
            let exponent = self.power()?;
            return Ok(Value::Number(
                base.to_number().powf(exponent.to_number()),
            ));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<Value, String> {
        match self.peek() {
            Some(b'!') => {
                self.position += 1;
                Ok(Value::Bool(!self.unary()?.truthy()))
            }
            Some(b'+') => {
                self.position += 1;
                Ok(Value::Number(self.unary()?.to_number()))
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> Result<Value, String> {
        let mut value = self.primary()?;
        while self.peek() == Some(b'[') {
            self.position += 1;
            let key = self.shift()?;
            self.expect(b']')?;
            value = value.index(&key);
        }
        Ok(value)
    }

    fn primary(&mut self) -> Result<Value, String> {
        match self.peek() {
            Some(b'[') => {
                self.position += 1;
                if self.peek() == Some(b']') {
                    self.position += 1;
                    return Ok(Value::Array(Vec::new()));
                }
                let item = self.shift()?;
                self.expect(b']')?;
                Ok(Value::Array(vec![item]))
            }
            Some(b'{') => {
                self.position += 1;
                self.expect(b'}')?;
                Ok(Value::Object)
            }
            Some(b'(') => {
                self.position += 1;
                let value = self.shift()?;
                self.expect(b')')?;
                Ok(value)
            }
            Some(quote @ (b'\'' | b'"' | b'`')) => self.string(quote),
            Some(b) if is_identifier_byte(b) && !b.is_ascii_digit() => {
                let position = self.position;
                let name = self.identifier().ok_or("bad identifier")?;
                self.globals
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| format!("unbound {name} at {position}"))
            }
            Some(b'0'..=b'9') => {
                let start = self.position;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.position += 1;
                }
                let digits =
                    std::str::from_utf8(&self.source[start..self.position])
                        .map_err(|err| err.to_string())?;
                Ok(Value::Number(digits.parse().map_err(|_| "bad number")?))
            }
            other => Err(format!(
                "unexpected {:?} at {}",
                other.map(char::from),
                self.position
            )),
        }
    }

    fn string(&mut self, quote: u8) -> Result<Value, String> {
        self.position += 1;
        let mut bytes = Vec::new();
        loop {
            match self.peek() {
                None => return Err("unterminated string".to_string()),
                Some(b) if b == quote => {
                    self.position += 1;
                    break;
                }
                Some(b'\\') => {
                    self.position += 1;
                    let escaped = self.peek().ok_or("dangling escape")?;
                    bytes.push(if escaped == b'n' { b'\n' } else { escaped });
                    self.position += 1;
                }
                Some(b) => {
                    bytes.push(b);
                    self.position += 1;
                }
            }
        }
        String::from_utf8(bytes)
            .map(Value::Str)
            .map_err(|err| err.to_string())
    }
}

/// Evaluates `source`, a sequence of `;`-separated statements, to the value
/// of the last one. Fails on anything outside the supported subset
/// (function calls included).
pub fn evaluate(source: &str) -> Result<Value, String> {
    let mut evaluator = Evaluator {
        source: source.as_bytes(),
        position: 0,
        globals: HashMap::new(),
    };
    let mut value = evaluator.statement()?;
    while evaluator.peek() == Some(b';') {
        evaluator.position += 1;
        value = evaluator.statement()?;
    }
    if evaluator.position != source.len() {
        return Err(format!(
            "trailing input at {}: {}",
            evaluator.position,
            &source[evaluator.position..]
        ));
    }
    Ok(value)
}
