//! Message body reformatting.
//!
//! A payload that looks like JSON or XML is re-serialized with a two-space
//! indent so it reads as a document instead of a single line. Anything that
//! fails to parse is passed through untouched; a malformed payload is just
//! plain text, never an error.

use std::borrow::Cow;

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};

const JSON_OBJECT_HINT: char = '{';
const JSON_ARRAY_HINT: char = '[';

/// Reformats JSON and XML payloads, in that order. The XML pass runs even
/// when the JSON pass rewrote the message.
pub(crate) fn prettify(message: &str) -> Cow<'_, str> {
    let mut message = Cow::Borrowed(message);
    if message.starts_with(JSON_OBJECT_HINT) {
        if let Ok(object) = serde_json::from_str::<Map<String, Value>>(&message)
            && let Ok(pretty) = serde_json::to_string_pretty(&object)
        {
            message = Cow::Owned(pretty);
        }
    } else if message.starts_with(JSON_ARRAY_HINT) {
        if let Ok(array) = serde_json::from_str::<Vec<Value>>(&message)
            && let Ok(pretty) = serde_json::to_string_pretty(&array)
        {
            message = Cow::Owned(pretty);
        }
    }

    if let Some(xml) = try_format_xml(&message) {
        message = Cow::Owned(xml);
    }
    message
}

/// Re-emits a well-formed XML document with a two-space indent and a forced
/// line break after the first closing `>`. Returns `None` for anything that
/// is not a complete single-root document.
fn try_format_xml(message: &str) -> Option<String> {
    if !message.trim_start().starts_with('<') {
        return None;
    }

    let mut reader = Reader::from_str(message);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut depth = 0usize;
    let mut seen_root = false;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => {
                match &event {
                    Event::Start(_) => {
                        if depth == 0 && seen_root {
                            return None;
                        }
                        seen_root = true;
                        depth += 1;
                    }
                    Event::End(_) => {
                        depth = depth.checked_sub(1)?;
                    }
                    Event::Empty(_) => {
                        if depth == 0 && seen_root {
                            return None;
                        }
                        seen_root = true;
                    }
                    Event::Text(_) | Event::CData(_) if depth == 0 => {
                        return None;
                    }
                    _ => {}
                }
                writer.write_event(event).ok()?;
            }
            Err(_) => return None,
        }
    }
    if depth != 0 || !seen_root {
        return None;
    }
    let serialized = String::from_utf8(writer.into_inner()).ok()?;
    Some(serialized.replacen('>', ">\n", 1))
}

/// Splits on newlines and drops the trailing run of empty lines. Interior
/// empty lines survive so document structure stays visible.
pub(crate) fn split_lines(message: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = message.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Splits a line into chunks of exactly `width` characters, the last chunk
/// holding the remainder. Splits on character boundaries, so multi-byte
/// content never tears a code point.
pub(crate) fn chunk_line(line: &str, width: usize) -> Vec<&str> {
    debug_assert!(width > 0);
    let mut chunks = Vec::new();
    let mut rest = line;
    loop {
        match rest.char_indices().nth(width) {
            Some((split, _)) => {
                let (head, tail) = rest.split_at(split);
                chunks.push(head);
                rest = tail;
            }
            None => {
                chunks.push(rest);
                break;
            }
        }
    }
    chunks
}
