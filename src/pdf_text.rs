use std::collections::BTreeMap;

use encoding_rs::UTF_16BE;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use tracing::warn;

use crate::model::{PageLines, TextLine};

const A4_HEIGHT_PT: f64 = 842.0;

fn number(operand: &Object) -> Option<f64> {
    match operand {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn utf16_fallback(encoding: Option<&str>, bytes: &[u8]) -> Option<String> {
    if bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]) {
        let bytes = if bytes.len() > 2 { &bytes[2..] } else { bytes };
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
        if !had_errors && !utf16.is_empty() {
            return Some(utf16.into_owned());
        }
    }

    if let Some(name) = encoding {
        let lower = name.to_ascii_lowercase();
        if lower.contains("utf16")
            || lower.contains("ucs2")
            || lower.contains("identity-h")
            || lower.contains("unicode")
        {
            let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
            if !had_errors && !utf16.is_empty() {
                return Some(utf16.into_owned());
            }
        }
    }

    None
}

fn decode_text_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    if let Some(utf16) = utf16_fallback(encoding, bytes) {
        return utf16;
    }

    String::from_utf8_lossy(bytes).to_string()
}

fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => {
                text.push_str(&decode_text_bytes(encoding, bytes));
            }
            Object::Array(items) => {
                collect_text(text, encoding, items);
                text.push(' ');
            }
            Object::Integer(value) => {
                // Large negative TJ adjustments are word gaps.
                if *value < -100 {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Height of the page in points, from its `MediaBox` (inherited through the
/// page tree when absent on the page node). A4 height when neither resolves.
fn page_height(document: &Document, page_id: ObjectId) -> f64 {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let Ok(dict) = document.get_dictionary(id) else {
            break;
        };

        let media_box = dict
            .get(b"MediaBox")
            .and_then(|object| match object {
                Object::Reference(id) => document.get_object(*id),
                other => Ok(other),
            })
            .and_then(Object::as_array);
        if let Ok(media_box) = media_box {
            if media_box.len() == 4 {
                let lower = number(&media_box[1]).unwrap_or(0.0);
                let upper = number(&media_box[3]).unwrap_or(A4_HEIGHT_PT);
                return upper - lower;
            }
        }

        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }

    A4_HEIGHT_PT
}

/// Accumulates shown text into lines keyed by the current baseline position.
/// Every cursor move flushes the pending line with `top` measured downward
/// from the top edge of the page.
struct LineAccumulator {
    page_height: f64,
    cursor_y: f64,
    leading: f64,
    current: String,
    lines: Vec<TextLine>,
}

impl LineAccumulator {
    fn new(page_height: f64) -> Self {
        Self {
            page_height,
            cursor_y: 0.0,
            leading: 0.0,
            current: String::new(),
            lines: Vec::new(),
        }
    }

    fn flush(&mut self) {
        let text = self.current.trim();
        if !text.is_empty() {
            self.lines.push(TextLine {
                text: text.to_string(),
                top: self.page_height - self.cursor_y,
            });
        }
        self.current.clear();
    }

    fn move_to(&mut self, y: f64) {
        self.flush();
        self.cursor_y = y;
    }

    fn translate(&mut self, ty: f64) {
        self.flush();
        self.cursor_y += ty;
    }

    fn next_line(&mut self) {
        self.flush();
        self.cursor_y -= self.leading;
    }

    fn into_lines(mut self) -> Vec<TextLine> {
        self.flush();
        self.lines
    }
}

fn extract_lines_from_page(document: &Document, page_id: ObjectId) -> Option<Vec<TextLine>> {
    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut accumulator = LineAccumulator::new(page_height(document, page_id));
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "BT" => accumulator.move_to(0.0),
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    current_encoding = encodings.get(font_name).copied();
                }
            }
            "TL" => {
                if let Some(leading) = operation.operands.first().and_then(number) {
                    accumulator.leading = leading;
                }
            }
            "Td" => {
                if let Some(ty) = operation.operands.get(1).and_then(number) {
                    accumulator.translate(ty);
                }
            }
            "TD" => {
                if let Some(ty) = operation.operands.get(1).and_then(number) {
                    accumulator.leading = -ty;
                    accumulator.translate(ty);
                }
            }
            "Tm" => {
                if let Some(y) = operation.operands.get(5).and_then(number) {
                    accumulator.move_to(y);
                }
            }
            "T*" => accumulator.next_line(),
            "Tj" | "TJ" => {
                collect_text(&mut accumulator.current, current_encoding, &operation.operands);
            }
            "'" => {
                accumulator.next_line();
                collect_text(&mut accumulator.current, current_encoding, &operation.operands);
            }
            "\"" => {
                accumulator.next_line();
                if let Some(operand) = operation.operands.get(2) {
                    collect_text(
                        &mut accumulator.current,
                        current_encoding,
                        std::slice::from_ref(operand),
                    );
                }
            }
            "ET" => accumulator.flush(),
            _ => {}
        }
    }

    Some(accumulator.into_lines())
}

/// Extracts positioned text lines for every page of the document, in document
/// order. A page whose content stream cannot be decoded yields no lines but
/// does not fail the document.
pub(crate) fn extract_page_lines(document: &Document) -> Vec<PageLines> {
    let mut pages = Vec::new();
    for (page_number, page_id) in document.get_pages() {
        let lines = extract_lines_from_page(document, page_id).unwrap_or_else(|| {
            warn!(page = page_number, "page content could not be decoded; skipping page text");
            Vec::new()
        });
        pages.push(PageLines { page_number, lines });
    }
    pages
}
