//! Cursor-based recursive-descent reader: text buffer in, value tree out.
//!
//! The grammar is de facto JSON-compatible for well-formed strict input,
//! with deliberate permissive extensions:
//!
//! * whitespace and `,` are interchangeable filler between tokens, so
//!   `[1,2,3]` and `[1 2 3]` parse identically;
//! * the colon after an object key is optional, and a stray second colon is
//!   tolerated;
//! * `-` may prefix a number and `0x` introduces a hex integer.
//!
//! The string escape table (`\n` `\t` `\r` `\0` `\xHH`, anything else passed
//! through as the two literal characters) is wider than the serializer's —
//! see the crate docs for the resulting round-trip gap.
//!
//! Recursion depth is bounded by an explicit, configurable counter; bad
//! literals, stray bytes, unterminated strings/containers, and trailing
//! content are reported as typed errors carrying a byte offset rather than
//! being silently swallowed.

use crate::dict::Dict;
use crate::dynarray::DynArray;
use crate::error::{ParseError, ParseErrorKind};
use crate::value::Value;
use memchr::memchr2;

/// Default nesting ceiling for [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Knobs for a parse run.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum container nesting depth before `DepthExceeded`.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse `input` into a value tree with the default options.
///
/// Blank input (or pure filler) yields `Value::Empty`. Non-filler content
/// after the root value is a `TrailingData` error.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parse `input` with explicit [`ParseOptions`].
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    let mut parser = Parser {
        input,
        bytes: input.as_bytes(),
        pos: 0,
        max_depth: options.max_depth,
    };
    parser.skip_filler();
    if parser.at_end() {
        return Ok(Value::Empty);
    }
    let value = parser.parse_value(0)?;
    parser.skip_filler();
    if !parser.at_end() {
        return Err(ParseError::new(ParseErrorKind::TrailingData, parser.pos));
    }
    Ok(value)
}

/// The cursor is the only shared mutable state in the subsystem, and it is
/// confined to a single parse call.
struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Whitespace and the separator comma are interchangeable filler.
    fn is_filler(byte: u8) -> bool {
        matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b',')
    }

    fn skip_filler(&mut self) {
        while self.peek().is_some_and(Self::is_filler) {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.skip_filler();
        let Some(byte) = self.peek() else {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedContainer,
                self.pos,
            ));
        };
        match byte {
            b'a'..=b'z' => self.parse_literal(),
            b'-' | b'0'..=b'9' => self.parse_number(),
            b'"' => self.parse_string().map(Value::Str),
            b'[' => self.parse_array(depth),
            b'{' => self.parse_object(depth),
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedCharacter,
                self.pos,
            )),
        }
    }

    /// A run of lowercase letters: `null`, `false`, or `true`. Anything
    /// else is a reported `InvalidLiteral`.
    fn parse_literal(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_lowercase()) {
            self.pos += 1;
        }
        match &self.input[start..self.pos] {
            "null" => Ok(Value::Null),
            "false" => Ok(Value::Bool(false)),
            "true" => Ok(Value::Bool(true)),
            _ => Err(ParseError::new(ParseErrorKind::InvalidLiteral, start)),
        }
    }

    /// Manual digit accumulation over a span delimited by `,` `]` `}`,
    /// filler, or end of input. A `.` anywhere in the span selects float;
    /// a `0x` prefix selects hex (integer only). Non-digit bytes inside the
    /// span are ignored, and integer accumulation wraps.
    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let mut negative = false;
        if self.peek() == Some(b'-') {
            negative = true;
            self.pos += 1;
        }
        let hex = self.peek() == Some(b'0') && self.bytes.get(self.pos + 1) == Some(&b'x');
        if hex {
            self.pos += 2;
        }
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if Self::is_filler(byte) || byte == b']' || byte == b'}' {
                break;
            }
            self.pos += 1;
        }
        let span = &self.bytes[start..self.pos];
        if !hex && span.is_empty() {
            return Err(ParseError::new(ParseErrorKind::UnexpectedCharacter, start));
        }
        if hex {
            let mut num: i64 = 0;
            for &byte in span {
                if let Some(n) = nibble(byte) {
                    num = num.wrapping_shl(4).wrapping_add(i64::from(n));
                }
            }
            if negative {
                num = num.wrapping_neg();
            }
            Ok(Value::Int(num))
        } else if span.contains(&b'.') {
            // Accumulate every digit into one mantissa and divide by the
            // fractional power of ten once at the end. A single rounding
            // step reproduces the stored double exactly for any shortest
            // `Display` rendition; only mantissas past 15-16 significant
            // digits can pick up one extra rounding.
            let mut mantissa = 0.0f64;
            let mut frac_digits = 0i32;
            let mut fractional = false;
            for &byte in span {
                if byte.is_ascii_digit() {
                    mantissa = mantissa * 10.0 + f64::from(byte - b'0');
                    if fractional {
                        frac_digits += 1;
                    }
                } else if byte == b'.' {
                    fractional = true;
                }
            }
            let mut num = mantissa / 10f64.powi(frac_digits);
            if negative {
                num = -num;
            }
            Ok(Value::Float(num))
        } else {
            let mut num: i64 = 0;
            for &byte in span {
                if byte.is_ascii_digit() {
                    num = num.wrapping_mul(10).wrapping_add(i64::from(byte - b'0'));
                }
            }
            if negative {
                num = num.wrapping_neg();
            }
            Ok(Value::Int(num))
        }
    }

    /// Scan to the unescaped closing quote. Escapes `\n` `\t` `\r` `\0`
    /// `\xHH` are decoded; any other `\c` passes through as the two literal
    /// characters. `\xHH` yields U+00HH.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let open = self.pos;
        self.pos += 1; // opening quote
        let mut out = String::new();
        loop {
            let rest = &self.bytes[self.pos..];
            let Some(idx) = memchr2(b'"', b'\\', rest) else {
                return Err(ParseError::new(ParseErrorKind::UnterminatedString, open));
            };
            out.push_str(&self.input[self.pos..self.pos + idx]);
            self.pos += idx;
            if self.bytes[self.pos] == b'"' {
                self.pos += 1;
                return Ok(out);
            }
            self.pos += 1; // backslash
            let Some(escaped) = self.input[self.pos..].chars().next() else {
                return Err(ParseError::new(ParseErrorKind::UnterminatedString, open));
            };
            self.pos += escaped.len_utf8();
            match escaped {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                'x' => {
                    let (Some(hi), Some(lo)) =
                        (self.peek(), self.bytes.get(self.pos + 1).copied())
                    else {
                        return Err(ParseError::new(ParseErrorKind::UnterminatedString, open));
                    };
                    self.pos += 2;
                    let byte = (nibble(hi).unwrap_or(0) << 4) | nibble(lo).unwrap_or(0);
                    out.push(char::from(byte));
                }
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::new(ParseErrorKind::DepthExceeded, self.pos));
        }
        self.pos += 1; // '['
        let mut array: DynArray<Value> = DynArray::new();
        loop {
            self.skip_filler();
            match self.peek() {
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedContainer,
                        self.pos,
                    ))
                }
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(array));
                }
                Some(_) => {
                    let member = self.parse_value(depth + 1)?;
                    array.append(member);
                }
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::new(ParseErrorKind::DepthExceeded, self.pos));
        }
        self.pos += 1; // '{'
        let mut object: Dict<Value> = Dict::new();
        loop {
            self.skip_filler();
            let key = match self.peek() {
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedContainer,
                        self.pos,
                    ))
                }
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(object));
                }
                Some(b'"') => self.parse_string()?,
                Some(_) => {
                    return Err(ParseError::new(ParseErrorKind::ExpectedKey, self.pos))
                }
            };
            self.skip_filler();
            if self.peek() == Some(b':') {
                self.pos += 1;
            }
            self.skip_filler();
            // Tolerate a stray second colon.
            if self.peek() == Some(b':') {
                self.pos += 1;
            }
            let member = self.parse_value(depth + 1)?;
            *object.entry(&key) = member;
        }
    }
}

fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
