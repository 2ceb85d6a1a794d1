//! # Canonical JSON
//!
//! The byte form of a legacy sign document:
//!
//! - object keys sorted by byte value at every nesting level
//! - no insignificant whitespace
//! - strings escaped like the historical Go encoder, so `<`, `>`, `&`,
//!   U+2028 and U+2029 become `\u003c`, `\u003e`, `\u0026`,
//!   `\u2028` and `\u2029`
//!
//! Serialization goes through `serde_json` with a custom [`Formatter`].
//! Keys are sorted by `Sorted` rather than by `serde_json`'s map type,
//! whose iteration order changes when any crate in the build enables
//! `preserve_order`.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::{CharEscape, Formatter};
use serde_json::Value;
use std::io;

/// Serialize `value` canonically.
pub fn to_canonical_bytes(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::with_capacity(256);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, LegacyFormatter);
    Sorted(value).serialize(&mut serializer)?;
    Ok(out)
}

/// A [`Value`] whose objects serialize with their keys in byte order.
struct Sorted<'a>(&'a Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Sorted(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                let mut object = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries {
                    object.serialize_entry(key, &Sorted(item))?;
                }
                object.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

/// Compact output with Go-compatible string escaping.
struct LegacyFormatter;

impl Formatter for LegacyFormatter {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escape: &[u8] = match c {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escape)?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_char_escape<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()> {
        let escape: &[u8] = match char_escape {
            CharEscape::Quote => b"\\\"",
            CharEscape::ReverseSolidus => b"\\\\",
            CharEscape::Solidus => b"\\/",
            CharEscape::LineFeed => b"\\n",
            CharEscape::CarriageReturn => b"\\r",
            CharEscape::Tab => b"\\t",
            CharEscape::Backspace => b"\\u0008",
            CharEscape::FormFeed => b"\\u000c",
            CharEscape::AsciiControl(byte) => {
                return writer.write_all(format!("\\u{:04x}", byte).as_bytes());
            }
        };
        writer.write_all(escape)
    }
}
