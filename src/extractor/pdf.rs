// file: src/extractor/pdf.rs
// description: PDF text and metadata extraction into a paper record
// reference: https://docs.rs/lopdf

use crate::error::{PaperError, Result};
use crate::extractor::abstract_text::extract_abstract;
use crate::extractor::metadata::PdfMetadata;
use lopdf::Document;
use tracing::{debug, warn};

/// Output of a successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPaper {
    pub title: String,
    pub authors: String,
    pub abstract_text: String,
    pub full_text: String,
    pub page_count: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedPaper> {
        let mut doc = Document::load_mem(bytes)
            .map_err(|e| PaperError::Pdf(format!("Failed to load PDF: {}", e)))?;

        // Owner-password-only files open with the empty user password.
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                PaperError::Pdf(format!("Encrypted PDF requires a password: {}", e))
            })?;
            debug!("Decrypted PDF with the empty user password");
        }

        let metadata = PdfMetadata::read(&doc);
        let pages = Self::page_texts(&doc);
        let page_count = pages.len() as u32;
        let full_text = pages.join("\n");
        let abstract_text = extract_abstract(&full_text);

        debug!(
            "Extracted {} pages, {} chars of text, abstract of {} chars",
            page_count,
            full_text.len(),
            abstract_text.len()
        );

        Ok(ExtractedPaper {
            title: metadata.title_or_default(),
            authors: metadata.authors_or_default(),
            abstract_text,
            full_text,
            page_count,
        })
    }

    /// Text of every page in page order; undecodable pages contribute an empty string.
    fn page_texts(doc: &Document) -> Vec<String> {
        doc.get_pages()
            .into_keys()
            .map(|page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page_num, e);
                    String::new()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::metadata::{UNKNOWN_AUTHORS, UNKNOWN_TITLE};
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, StringFormat, dictionary, encryption};

    fn build_document(info: Option<(&str, &str)>, pages: &[&str]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some((title, author)) = info {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title),
                "Author" => Object::string_literal(author),
            });
            doc.trailer.set("Info", info_id);
        }

        doc
    }

    fn to_bytes(mut doc: Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn build_pdf(info: Option<(&str, &str)>, pages: &[&str]) -> Vec<u8> {
        to_bytes(build_document(info, pages))
    }

    /// Applies 40-bit RC4 (V1/R2) encryption keyed on the empty user password.
    /// Without `/U` lopdf skips the password check; with a `/U` that does not
    /// match the empty password the document needs a real user password.
    fn encrypt_rc4(mut doc: Document, user_check: Option<Vec<u8>>) -> Vec<u8> {
        let mut encrypt = dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "Length" => 40,
            "P" => -4,
            "O" => Object::String(vec![0x42; 32], StringFormat::Hexadecimal),
        };
        if let Some(check) = user_check {
            encrypt.set("U", Object::String(check, StringFormat::Hexadecimal));
        }
        let encrypt_id = doc.add_object(encrypt);
        doc.trailer.set("Encrypt", encrypt_id);
        doc.trailer.set(
            "ID",
            vec![
                Object::String(b"paper-fixture-id".to_vec(), StringFormat::Hexadecimal),
                Object::String(b"paper-fixture-id".to_vec(), StringFormat::Hexadecimal),
            ],
        );

        let key = encryption::get_encryption_key(&doc, "", false).unwrap();

        // RC4 is symmetric, so the decryption routine also encrypts.
        for (&id, object) in doc.objects.iter_mut() {
            if id == encrypt_id {
                continue;
            }
            match object {
                Object::Stream(stream) => {
                    let plain = Object::Stream(stream.clone());
                    let cipher = encryption::decrypt_object(&key, id, &plain).unwrap();
                    stream.set_content(cipher);
                }
                Object::Dictionary(dict) => {
                    for (_, value) in dict.iter_mut() {
                        if let Object::String(plain, string_format) = value {
                            let cipher = encryption::decrypt_object(
                                &key,
                                id,
                                &Object::String(plain.clone(), StringFormat::Literal),
                            )
                            .unwrap();
                            *plain = cipher;
                            *string_format = StringFormat::Hexadecimal;
                        }
                    }
                }
                _ => {}
            }
        }

        to_bytes(doc)
    }

    #[test]
    fn test_extracts_metadata() {
        let bytes = build_pdf(Some(("Foo", "Bar")), &["Hello paper"]);
        let paper = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(paper.title, "Foo");
        assert_eq!(paper.authors, "Bar");
        assert_eq!(paper.page_count, 1);
        assert!(paper.full_text.contains("Hello paper"));
    }

    #[test]
    fn test_missing_metadata_uses_placeholders() {
        let bytes = build_pdf(None, &["Body"]);
        let paper = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(paper.title, UNKNOWN_TITLE);
        assert_eq!(paper.authors, UNKNOWN_AUTHORS);
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let bytes = build_pdf(None, &["First page", "Second page"]);
        let paper = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(paper.page_count, 2);
        let first = paper.full_text.find("First page").unwrap();
        let second = paper.full_text.find("Second page").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = PdfExtractor::new()
            .extract(b"definitely not a pdf")
            .unwrap_err();
        assert!(matches!(err, PaperError::Pdf(_)));
    }

    #[test]
    fn test_owner_password_only_pdf_is_decrypted() {
        let doc = build_document(Some(("Foo", "Bar")), &["Protected body"]);
        let bytes = encrypt_rc4(doc, None);

        let paper = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(paper.title, "Foo");
        assert_eq!(paper.authors, "Bar");
        assert!(paper.full_text.contains("Protected body"));
    }

    #[test]
    fn test_user_password_pdf_is_rejected() {
        let doc = build_document(None, &["Secret body"]);
        let bytes = encrypt_rc4(doc, Some(vec![0xAA; 32]));

        let err = PdfExtractor::new().extract(&bytes).unwrap_err();

        assert!(err.is_client_error());
        assert!(err.to_string().contains("requires a password"));
    }
}
