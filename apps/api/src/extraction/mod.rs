//! Document Text Extractor: turns an uploaded file into plain text plus basic counts.
//!
//! Supported: plain text, Word documents (`.docx`, via `docx-rs`) and PDF
//! (via `pdf-extract`). A PDF without extractable text is an error; this
//! module never substitutes placeholder content.

pub mod handlers;

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::errors::AppError;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc", ".txt"];

const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Parse(String),
}

/// Plain text of one uploaded document. Produced once per upload, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub text: String,
    pub word_count: usize,
    /// Unicode scalar values, not bytes.
    pub character_count: usize,
}

impl ParsedDocument {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = count_words(&text);
        let character_count = text.chars().count();
        Self {
            text,
            word_count,
            character_count,
        }
    }
}

/// Whitespace-delimited token count, empty tokens excluded.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PlainText,
    WordProcessing,
    Pdf,
}

impl DocumentKind {
    /// Resolves the kind from the declared media type, falling back to the file extension.
    pub fn resolve(media_type: Option<&str>, file_name: Option<&str>) -> Result<Self, ExtractionError> {
        let media = media_type
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty());

        if let Some(kind) = media.as_deref().and_then(Self::from_media_type) {
            return Ok(kind);
        }

        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        if let Some(kind) = extension.as_deref().and_then(Self::from_extension) {
            return Ok(kind);
        }

        let described = media
            .or_else(|| extension.map(|ext| format!(".{ext}")))
            .unwrap_or_else(|| "unknown".to_string());
        Err(ExtractionError::UnsupportedFormat(described))
    }

    fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "text/plain" => Some(Self::PlainText),
            DOCX_MEDIA_TYPE | "application/msword" => Some(Self::WordProcessing),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "txt" => Some(Self::PlainText),
            "docx" | "doc" => Some(Self::WordProcessing),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub bytes: Bytes,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
}

impl DocumentUpload {
    pub fn plain_text(text: impl Into<String>, file_name: &str) -> Self {
        Self {
            bytes: Bytes::from(text.into()),
            media_type: Some("text/plain".to_string()),
            file_name: Some(file_name.to_string()),
        }
    }
}

/// Extracts plain text from a document's bytes.
pub fn extract_document(
    bytes: &[u8],
    media_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<ParsedDocument, ExtractionError> {
    let kind = DocumentKind::resolve(media_type, file_name)?;
    debug!("Extracting {} bytes as {:?}", bytes.len(), kind);

    let text = match kind {
        DocumentKind::PlainText => extract_plain_text(bytes)?,
        DocumentKind::WordProcessing => extract_docx_text(bytes)?,
        DocumentKind::Pdf => extract_pdf_text(bytes)?,
    };

    let document = ParsedDocument::from_text(text);
    info!(
        "Extracted {:?} document: {} words, {} characters",
        kind, document.word_count, document.character_count
    );
    Ok(document)
}

/// Runs extraction on the blocking pool; PDF parsing is CPU-bound.
pub async fn extract_upload(upload: &DocumentUpload, max_bytes: usize) -> Result<ParsedDocument, AppError> {
    if upload.bytes.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "File too large. Maximum size is {}.",
            format_size(max_bytes)
        )));
    }

    let upload = upload.clone();
    tokio::task::spawn_blocking(move || {
        extract_document(
            &upload.bytes,
            upload.media_type.as_deref(),
            upload.file_name.as_deref(),
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
    .map_err(AppError::from)
}

fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| ExtractionError::Parse(format!("Invalid UTF-8 content: {e}")))
}

fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| {
        warn!("DOCX extraction failed: {e}");
        ExtractionError::Parse(format!("Failed to read Word document: {e}"))
    })?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => push_paragraph(&mut paragraphs, para),
            docx_rs::DocumentChild::Table(table) => collect_table(&mut paragraphs, table),
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Table text in row order, one cell paragraph per line. Nested tables included.
fn collect_table(paragraphs: &mut Vec<String>, table: &docx_rs::Table) {
    for docx_rs::TableChild::TableRow(row) in &table.rows {
        for docx_rs::TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(para) => push_paragraph(paragraphs, para),
                    docx_rs::TableCellContent::Table(inner) => collect_table(paragraphs, inner),
                    _ => {}
                }
            }
        }
    }
}

fn push_paragraph(paragraphs: &mut Vec<String>, para: &docx_rs::Paragraph) {
    let mut text = String::new();
    collect_paragraph_text(&mut text, &para.children);
    if !text.trim().is_empty() {
        paragraphs.push(text);
    }
}

/// Runs, hyperlink runs and tracked insertions.
fn collect_paragraph_text(out: &mut String, children: &[docx_rs::ParagraphChild]) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run(out, run),
            docx_rs::ParagraphChild::Hyperlink(link) => collect_paragraph_text(out, &link.children),
            docx_rs::ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = inserted {
                        push_run(out, run);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(out: &mut String, run: &docx_rs::Run) {
    for child in &run.children {
        if let docx_rs::RunChild::Text(t) = child {
            out.push_str(&t.text);
        }
    }
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    let text = match outcome {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            return Err(ExtractionError::Parse(format!("Failed to read PDF: {e}")));
        }
        Err(_) => {
            warn!("PDF extraction panicked");
            return Err(ExtractionError::Parse(
                "Failed to read PDF: malformed document".to_string(),
            ));
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Parse(
            "PDF contains no extractable text (scanned or image-only documents are not supported)"
                .to_string(),
        ));
    }
    Ok(text)
}

/// Formats listed by `GET /api/v1/documents/supported-formats`.
#[derive(Debug, Clone, Serialize)]
pub struct SupportedFormats {
    pub supported_formats: Vec<&'static str>,
    pub max_file_size: String,
    pub description: &'static str,
}

pub fn supported_formats(max_bytes: usize) -> SupportedFormats {
    SupportedFormats {
        supported_formats: SUPPORTED_EXTENSIONS.to_vec(),
        max_file_size: format_size(max_bytes),
        description: "Supported resume file formats",
    }
}

fn format_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_ignores_repeated_whitespace() {
        assert_eq!(count_words("  Jane   Doe\n\nEngineer\t "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t"), 0);
    }

    #[test]
    fn test_character_count_is_chars_not_bytes() {
        let doc = ParsedDocument::from_text("résumé");
        assert_eq!(doc.character_count, 6);
        assert_eq!(doc.word_count, 1);
    }

    #[test]
    fn test_resolve_by_media_type() {
        assert_eq!(
            DocumentKind::resolve(Some("text/plain; charset=utf-8"), None).unwrap(),
            DocumentKind::PlainText
        );
        assert_eq!(
            DocumentKind::resolve(Some(DOCX_MEDIA_TYPE), None).unwrap(),
            DocumentKind::WordProcessing
        );
        assert_eq!(
            DocumentKind::resolve(Some("application/msword"), None).unwrap(),
            DocumentKind::WordProcessing
        );
        assert_eq!(
            DocumentKind::resolve(Some("application/pdf"), None).unwrap(),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn test_resolve_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::resolve(Some("application/octet-stream"), Some("CV.DOCX")).unwrap(),
            DocumentKind::WordProcessing
        );
        assert_eq!(
            DocumentKind::resolve(None, Some("resume.pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::resolve(None, Some("notes.txt")).unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let err = DocumentKind::resolve(Some("image/png"), Some("photo.png")).unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat("image/png".to_string()));

        let err = DocumentKind::resolve(None, Some("resume.rtf")).unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat(".rtf".to_string()));

        let err = DocumentKind::resolve(None, None).unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat("unknown".to_string()));
    }

    #[test]
    fn test_plain_text_extraction() {
        let doc = extract_document(b"Jane Doe\nSoftware Engineer", Some("text/plain"), None).unwrap();
        assert_eq!(doc.text, "Jane Doe\nSoftware Engineer");
        assert_eq!(doc.word_count, 4);
        assert_eq!(doc.character_count, 26);
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = extract_document(&[0xff, 0xfe, 0x00], Some("text/plain"), None).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(ref m) if m.contains("UTF-8")));
    }

    #[test]
    fn test_corrupt_docx_is_parse_error() {
        let err = extract_document(b"not a zip archive", None, Some("resume.docx")).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }

    #[test]
    fn test_corrupt_pdf_is_parse_error_not_placeholder() {
        let err = extract_document(b"%PDF-1.4 garbage", Some("application/pdf"), None).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }

    #[test]
    fn test_docx_round_trip_through_docx_rs() {
        let mut buf = std::io::Cursor::new(Vec::new());
        docx_rs::Docx::new()
            .add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("Work Experience")),
            )
            .add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("Built APIs in "))
                    .add_run(docx_rs::Run::new().add_text("Rust")),
            )
            .build()
            .pack(&mut buf)
            .unwrap();

        let doc = extract_document(buf.get_ref(), Some(DOCX_MEDIA_TYPE), None).unwrap();
        assert_eq!(doc.text, "Work Experience\nBuilt APIs in Rust");
        assert_eq!(doc.word_count, 6);
    }

    #[test]
    fn test_docx_tables_and_hyperlinks_are_extracted() {
        let cell = docx_rs::TableCell::new().add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("Technical Skills Rust Kubernetes")),
        );
        let nested = docx_rs::Table::new(vec![docx_rs::TableRow::new(vec![docx_rs::TableCell::new()
            .add_paragraph(docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("Languages English")))])]);
        let link = docx_rs::Hyperlink::new("contact", docx_rs::HyperlinkType::Anchor)
            .add_run(docx_rs::Run::new().add_text("jane@example.com"));

        let mut buf = std::io::Cursor::new(Vec::new());
        docx_rs::Docx::new()
            .add_paragraph(docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("Jane Doe")))
            .add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("Email: "))
                    .add_hyperlink(link),
            )
            .add_table(docx_rs::Table::new(vec![docx_rs::TableRow::new(vec![
                cell,
                docx_rs::TableCell::new().add_table(nested),
            ])]))
            .build()
            .pack(&mut buf)
            .unwrap();

        let doc = extract_document(buf.get_ref(), Some(DOCX_MEDIA_TYPE), None).unwrap();
        assert!(doc.text.contains("Jane Doe"));
        assert!(doc.text.contains("Email: jane@example.com"));
        assert!(doc.text.contains("Technical Skills Rust Kubernetes"));
        assert!(doc.text.contains("Languages English"));
    }

    #[tokio::test]
    async fn test_extract_upload_rejects_oversized_file() {
        let upload = DocumentUpload::plain_text("x".repeat(64), "big.txt");
        let err = extract_upload(&upload, 16).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("too large")));
    }

    #[tokio::test]
    async fn test_extract_upload_plain_text() {
        let upload = DocumentUpload::plain_text("Skills: Rust, SQL", "resume.txt");
        let doc = extract_upload(&upload, DEFAULT_MAX_UPLOAD_BYTES).await.unwrap();
        assert_eq!(doc.word_count, 3);
    }

    #[test]
    fn test_supported_formats_lists_extensions_and_limit() {
        let formats = supported_formats(DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(formats.supported_formats, vec![".pdf", ".docx", ".doc", ".txt"]);
        assert_eq!(formats.max_file_size, "10MB");
    }
}
