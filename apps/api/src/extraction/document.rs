//! Document text extraction — converts uploaded PDF / DOCX bytes to plain text.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

/// Separator placed between extracted PDF pages.
pub const PAGE_DELIMITER: &str = "\n\n";

const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the kind from a filename extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            _ => Err(AppError::UnsupportedFormat(format!(
                "'{filename}' is not a .pdf or .docx file"
            ))),
        }
    }
}

/// A decoder for one document format.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError>;
}

/// Page-ordered PDF text via `pdf-extract`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError> {
        // pdf-extract can panic on malformed streams; contain it.
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| AppError::Extraction("PDF decoder aborted on malformed input".to_string()))?
            .map_err(|e| AppError::Extraction(format!("Failed to extract PDF text: {e}")))?;

        debug!("Extracted {} PDF pages ({} bytes)", pages.len(), bytes.len());
        Ok(join_pages(&pages))
    }
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim_end())
        .collect::<Vec<_>>()
        .join(PAGE_DELIMITER)
}

/// Paragraph text of a WordprocessingML package, in document order.
pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| AppError::Extraction(format!("DOCX is not a valid zip package: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY_PART)
            .map_err(|e| AppError::Extraction(format!("DOCX has no {DOCX_BODY_PART}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| AppError::Extraction(format!("Failed to read {DOCX_BODY_PART}: {e}")))?;

        let paragraphs = docx_paragraphs(&xml)?;
        debug!("Extracted {} DOCX paragraphs", paragraphs.len());
        Ok(paragraphs.join("\n"))
    }
}

/// Paragraphs in document order of their closing tag. Text boxes nest a
/// `w:p` inside another, so open paragraphs are kept on a stack.
fn docx_paragraphs(xml: &str) -> Result<Vec<String>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match (e.name().as_ref(), open.last_mut()) {
                (b"w:tab", Some(current)) => current.push('\t'),
                (b"w:br" | b"w:cr", Some(current)) => current.push('\n'),
                (b"w:p", _) => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(text)) if in_text_run => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| AppError::Extraction(format!("Malformed DOCX text: {e}")))?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&unescaped);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if let Some(text) = open.pop() {
                        paragraphs.push(text);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Extraction(format!(
                    "Malformed DOCX XML at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Dispatches to the decoder registered for each [`DocumentKind`].
pub struct DocumentTextExtractor {
    pdf: Box<dyn TextExtractor>,
    docx: Box<dyn TextExtractor>,
}

impl DocumentTextExtractor {
    pub fn new(pdf: Box<dyn TextExtractor>, docx: Box<dyn TextExtractor>) -> Self {
        Self { pdf, docx }
    }

    pub fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
        match kind {
            DocumentKind::Pdf => self.pdf.extract(bytes),
            DocumentKind::Docx => self.docx.extract(bytes),
        }
    }
}

impl Default for DocumentTextExtractor {
    fn default() -> Self {
        Self::new(Box::new(PdfTextExtractor), Box::new(DocxTextExtractor))
    }
}
