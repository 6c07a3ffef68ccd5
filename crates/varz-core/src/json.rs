//! Push-style JSON builder.
//!
//! The writer appends in call order and never reorders or buffers. Callers
//! own separator placement: the first key/item of a container gets none,
//! every following one is preceded by `dict_next_key` / `array_next_item`.

use std::fmt::Write;

#[derive(Debug, Default)]
pub struct JsonWriter {
    buf: String,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: String::with_capacity(cap),
        }
    }

    pub fn dict_start(&mut self) {
        self.buf.push('{');
    }

    pub fn dict_end(&mut self) {
        self.buf.push('}');
    }

    /// Write `"key":`.
    pub fn dict_key(&mut self, key: &str) {
        self.string(key);
        self.buf.push(':');
    }

    pub fn dict_next_key(&mut self) {
        self.buf.push(',');
    }

    pub fn array_start(&mut self) {
        self.buf.push('[');
    }

    pub fn array_end(&mut self) {
        self.buf.push(']');
    }

    pub fn array_next_item(&mut self) {
        self.buf.push(',');
    }

    /// Quoted, escaped string.
    pub fn string(&mut self, s: &str) {
        self.buf.push('"');
        escape_into(&mut self.buf, s);
        self.buf.push('"');
    }

    pub fn unsigned(&mut self, v: u64) {
        let _ = write!(self.buf, "{v}");
    }

    pub fn signed(&mut self, v: i64) {
        let _ = write!(self.buf, "{v}");
    }

    /// Finite floats only; NaN and infinities are written as `null`.
    pub fn float(&mut self, v: f64) {
        if v.is_finite() {
            let _ = write!(self.buf, "{v}");
        } else {
            self.buf.push_str("null");
        }
    }

    /// Append an already-built sub-document verbatim.
    pub fn raw(&mut self, doc: &str) {
        self.buf.push_str(doc);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Freeze into the owned output text.
    pub fn finish(self) -> String {
        self.buf
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}
