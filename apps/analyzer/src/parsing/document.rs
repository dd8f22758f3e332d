use std::path::Path;

use tracing::debug;

use crate::errors::AnalyzerError;

/// Document formats the parser can read text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, AnalyzerError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" | "text" | "md" => Ok(DocumentKind::PlainText),
            "" => Err(AnalyzerError::ParseFailure(format!(
                "unsupported document format: '{}' has no extension",
                path.display()
            ))),
            other => Err(AnalyzerError::ParseFailure(format!(
                "unsupported document format: .{other}"
            ))),
        }
    }
}

/// Reads the raw text of a résumé document.
pub fn load_text(path: &Path) -> Result<String, AnalyzerError> {
    if !path.is_file() {
        return Err(AnalyzerError::ParseFailure(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let kind = DocumentKind::from_path(path)?;
    let text = match kind {
        DocumentKind::Pdf => extract_pdf_text(path)?,
        DocumentKind::PlainText => std::fs::read_to_string(path)
            .map_err(|e| AnalyzerError::ParseFailure(e.to_string()))?,
    };

    debug!(path = %path.display(), ?kind, chars = text.len(), "document text loaded");
    Ok(text)
}

fn extract_pdf_text(path: &Path) -> Result<String, AnalyzerError> {
    // pdf-extract panics on some malformed fonts and xref tables.
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text(path)).map_err(|_| {
        AnalyzerError::ParseFailure("PDF text extraction aborted on a malformed document".to_string())
    })?;
    extracted.map_err(|e| AnalyzerError::ParseFailure(format!("could not extract PDF text: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("cv.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("cv.md")).unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_word_documents_are_unsupported() {
        let err = DocumentKind::from_path(Path::new("cv.docx")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Resume parsing failed: unsupported document format: .docx"
        );
    }

    #[test]
    fn test_missing_file_is_parse_failure() {
        let err = load_text(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, AnalyzerError::ParseFailure(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_loads_plain_text() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Jane Doe\nSkills: Rust").unwrap();
        let text = load_text(file.path()).unwrap();
        assert!(text.starts_with("Jane Doe"));
    }

    #[test]
    fn test_garbage_pdf_fails_cleanly() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf").unwrap();
        let err = load_text(file.path()).unwrap_err();
        assert!(matches!(err, AnalyzerError::ParseFailure(_)));
    }
}
