//! Text Extractor — converts an uploaded document into raw text.

use bytes::Bytes;
use thiserror::Error;

/// Extensions accepted for upload, lower-case.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "txt"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type '{0}'")]
    UnsupportedType(String),

    #[error("document is empty")]
    Empty,

    #[error("could not read PDF: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves the document kind from a file name's extension.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" => Ok(DocumentKind::PlainText),
            _ => Err(ExtractionError::UnsupportedType(file_name.to_string())),
        }
    }
}

/// An uploaded resume, held in memory.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub kind: DocumentKind,
    pub data: Bytes,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, data: Bytes) -> Result<Self, ExtractionError> {
        let file_name = file_name.into();
        let kind = DocumentKind::from_file_name(&file_name)?;
        if data.is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(Self {
            file_name,
            kind,
            data,
        })
    }
}

/// Extracts the document's text. Synchronous; PDF parsing is CPU-bound, so
/// async callers should run this on the blocking pool.
pub fn extract_text(document: &UploadedDocument) -> Result<String, ExtractionError> {
    match document.kind {
        DocumentKind::Pdf => extract_text_from_pdf(&document.data),
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(&document.data).into_owned()),
    }
}

fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(pdf_bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentKind::from_file_name("Resume.PDF").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_file_name("cv.final.txt").unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_rejects_unknown_or_missing_extension() {
        assert!(matches!(
            DocumentKind::from_file_name("resume.docx"),
            Err(ExtractionError::UnsupportedType(_))
        ));
        assert!(matches!(
            DocumentKind::from_file_name("resume"),
            Err(ExtractionError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_allowed_extensions_cover_document_kinds() {
        for ext in ALLOWED_EXTENSIONS {
            assert!(DocumentKind::from_file_name(&format!("a.{ext}")).is_ok());
        }
    }

    #[test]
    fn test_empty_upload_rejected() {
        let result = UploadedDocument::new("resume.pdf", Bytes::new());
        assert!(matches!(result, Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_plain_text_passthrough() {
        let doc = UploadedDocument::new("resume.txt", Bytes::from_static(b"CGPA: 8.1")).unwrap();
        assert_eq!(extract_text(&doc).unwrap(), "CGPA: 8.1");
    }

    #[test]
    fn test_garbage_pdf_is_an_error() {
        let doc =
            UploadedDocument::new("resume.pdf", Bytes::from_static(b"definitely not a pdf")).unwrap();
        assert!(matches!(extract_text(&doc), Err(ExtractionError::Pdf(_))));
    }
}
