// file: src/extractor/metadata.rs
// description: document information dictionary lookup and PDF text string decoding
// reference: https://docs.rs/lopdf

use lopdf::{Dictionary, Document, Object};

/// Placeholder stored when a PDF carries no usable title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Placeholder stored when a PDF carries no usable author.
pub const UNKNOWN_AUTHORS: &str = "Unknown Authors";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl PdfMetadata {
    pub fn read(doc: &Document) -> Self {
        let Some(info) = info_dictionary(doc) else {
            return Self::default();
        };

        Self {
            title: text_entry(doc, info, b"Title"),
            author: text_entry(doc, info, b"Author"),
        }
    }

    pub fn title_or_default(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
    }

    pub fn authors_or_default(&self) -> String {
        self.author
            .clone()
            .unwrap_or_else(|| UNKNOWN_AUTHORS.to_string())
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    resolve(doc, info)?.as_dict().ok()
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object.as_reference() {
        Ok(id) => doc.get_object(id).ok(),
        Err(_) => Some(object),
    }
}

/// Reads a text string entry verbatim; blank values count as missing.
fn text_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = resolve(doc, dict.get(key).ok()?)?;
    let text = decode_pdf_string(value.as_str().ok()?);

    if text.trim().is_empty() { None } else { Some(text) }
}

/// Decodes a PDF text string: UTF-16BE with a byte order mark, else UTF-8, else Latin-1.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units).trim_end_matches('\0').to_string();
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.trim_end_matches('\0').to_string(),
        Err(_) => bytes
            .iter()
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end_matches('\0')
            .to_string(),
    }
}
