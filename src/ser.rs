//! Depth-first serializer: value tree in, text out.
//!
//! Rendering is deliberately narrow: strings escape only `\n`, `\t`, and
//! `"` — every other byte is copied verbatim, so raw backslashes and
//! control bytes survive unescaped (a documented round-trip gap against the
//! parser's wider escape acceptance). Floats use the shortest decimal form
//! that round-trips the stored double, with `.0` appended when needed so
//! the float kind survives re-parsing.
//!
//! Custom-tagged values are unprintable by default; [`Serializer::register`]
//! installs a per-tag rendering callback.

use crate::error::Error;
use crate::value::{Custom, Kind, Value};
use std::collections::HashMap;

/// A rendering callback for one custom tag. Appends its rendition of the
/// payload to the output buffer.
pub type CustomRenderer = Box<dyn Fn(&Custom, &mut String)>;

/// Depth-first text writer with an extensible custom-tag renderer registry.
#[derive(Default)]
pub struct Serializer {
    renderers: HashMap<u32, CustomRenderer>,
}

impl Serializer {
    /// A serializer with no custom renderers registered.
    pub fn new() -> Self {
        Serializer::default()
    }

    /// Register `render` for custom values carrying `tag`, replacing any
    /// previous renderer for that tag.
    pub fn register<F>(&mut self, tag: u32, render: F)
    where
        F: Fn(&Custom, &mut String) + 'static,
    {
        self.renderers.insert(tag, Box::new(render));
    }

    /// Render `value` as text.
    ///
    /// Fails with [`Error::UnsupportedKind`] if any custom value in the
    /// tree has no registered renderer.
    pub fn serialize(&self, value: &Value) -> Result<String, Error> {
        let mut out = String::new();
        self.write_value(value, &mut out)?;
        Ok(out)
    }

    fn write_value(&self, value: &Value, out: &mut String) -> Result<(), Error> {
        match value {
            // Empty renders as no output at all.
            Value::Empty => Ok(()),
            Value::Null => {
                out.push_str("null");
                Ok(())
            }
            Value::Bool(b) => {
                out.push_str(if *b { "true" } else { "false" });
                Ok(())
            }
            Value::Int(i) => {
                out.push_str(&i.to_string());
                Ok(())
            }
            Value::Float(f) => {
                write_float(*f, out);
                Ok(())
            }
            Value::Str(s) => {
                write_string(s, out);
                Ok(())
            }
            Value::Array(a) => self.write_array(a, out),
            Value::Object(o) => self.write_object(o, out),
            Value::Custom(c) => match self.renderers.get(&c.tag) {
                Some(render) => {
                    render(c, out);
                    Ok(())
                }
                None => Err(Error::UnsupportedKind { tag: c.tag }),
            },
        }
    }

    fn write_array(&self, array: &crate::value::JsonArray, out: &mut String) -> Result<(), Error> {
        out.push('[');
        for (i, member) in array.iter().enumerate() {
            self.write_value(member, out)?;
            if i + 1 < array.len() {
                out.push(',');
                // Cosmetic newline when the following member is itself a
                // container.
                if matches!(
                    array.get(i + 1).map(Value::kind),
                    Some(Kind::Array | Kind::Object)
                ) {
                    out.push('\n');
                }
            }
        }
        out.push(']');
        Ok(())
    }

    fn write_object(&self, object: &crate::value::JsonObject, out: &mut String) -> Result<(), Error> {
        out.push('{');
        for (i, (key, member)) in object.iter().enumerate() {
            write_string(key, out);
            out.push_str(": ");
            self.write_value(member, out)?;
            if i + 1 < object.len() {
                out.push_str(",\n");
            }
        }
        out.push('}');
        Ok(())
    }
}

/// Quote and escape a string. Only `\n`, `\t`, and `"` are escaped; all
/// other characters are copied verbatim.
fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Locale-independent decimal formatting with enough digits to round-trip
/// the stored double. `Display` for `f64` is shortest-round-trip and never
/// scientific; appending `.0` keeps the float kind on re-parse.
fn write_float(f: f64, out: &mut String) {
    let s = f.to_string();
    out.push_str(&s);
    if f.is_finite() && !s.contains('.') {
        out.push_str(".0");
    }
}
