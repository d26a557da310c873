//! PDF text extraction.
//!
//! `lopdf` opens the document structure (page count, encryption, damage) and
//! `pdf-extract` produces the reading-order text layer for all pages.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::extraction::{ExtractedText, ExtractionError, ResumeDocument, UnreadableReason};

/// PDF readers accept junk before the header, up to 1 KiB.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extracts normalized text from a PDF resume.
///
/// Fails with `NotPdf` when no PDF header is present, and with `Unreadable`
/// when the PDF is damaged, password protected, or has no text layer.
pub fn extract_pdf(document: &ResumeDocument) -> Result<ExtractedText, ExtractionError> {
    let bytes = document.bytes.as_ref();

    if !has_pdf_header(bytes) {
        debug!(
            content_type = document.content_type.as_deref().unwrap_or("unknown"),
            "Upload has no PDF header"
        );
        return Err(ExtractionError::NotPdf);
    }

    let declares_encryption = contains(bytes, b"/Encrypt");
    let mut structure = lopdf::Document::load_mem(bytes).map_err(|e| {
        debug!("lopdf could not load document: {e}");
        unreadable(declares_encryption, UnreadableReason::Malformed)
    })?;

    let encrypted = structure.is_encrypted() || declares_encryption;
    if structure.is_encrypted() {
        // Only documents that open with the empty user password are readable.
        if let Err(e) = structure.decrypt("") {
            debug!("Empty user password rejected: {e}");
            return Err(ExtractionError::Unreadable(UnreadableReason::Encrypted));
        }
    }

    let page_count = structure.get_pages().len();
    if page_count == 0 {
        return Err(unreadable(encrypted, UnreadableReason::Malformed));
    }
    drop(structure);

    // pdf-extract panics on some malformed content streams.
    let raw = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }))
    .map_err(|_| {
        warn!("pdf-extract panicked while reading document");
        unreadable(encrypted, UnreadableReason::Malformed)
    })?
    .map_err(|e| {
        debug!("pdf-extract failed: {e}");
        unreadable(encrypted, UnreadableReason::Malformed)
    })?;

    let text = ExtractedText::from_raw(&raw, Some(page_count));
    if text.is_empty() {
        return Err(ExtractionError::Unreadable(UnreadableReason::NoTextLayer));
    }

    debug!(
        pages = page_count,
        lines = text.lines().len(),
        headings = text.sections().len(),
        "Extracted resume text"
    );
    Ok(text)
}

/// Failures on an encrypted document are reported as encryption, whatever broke.
fn unreadable(encrypted: bool, otherwise: UnreadableReason) -> ExtractionError {
    if encrypted {
        ExtractionError::Unreadable(UnreadableReason::Encrypted)
    } else {
        ExtractionError::Unreadable(otherwise)
    }
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    contains(window, b"%PDF-")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{build_encrypted_pdf, build_pdf};
    use super::*;
    use bytes::Bytes;

    fn document(bytes: Vec<u8>) -> ResumeDocument {
        ResumeDocument {
            bytes: Bytes::from(bytes),
            content_type: Some("application/pdf".to_string()),
            file_name: Some("resume.pdf".to_string()),
        }
    }

    #[test]
    fn test_non_pdf_bytes_are_wrong_format() {
        let err = extract_pdf(&document(b"PK\x03\x04 this is a zip".to_vec())).unwrap_err();
        assert_eq!(err, ExtractionError::NotPdf);
    }

    #[test]
    fn test_truncated_pdf_is_unreadable() {
        let err = extract_pdf(&document(b"%PDF-1.4\n1 0 obj\n<< /Type".to_vec())).unwrap_err();
        assert_eq!(err, ExtractionError::Unreadable(UnreadableReason::Malformed));
    }

    #[test]
    fn test_image_only_pdf_has_no_text_layer() {
        let err = extract_pdf(&document(build_pdf(&[&[]]))).unwrap_err();
        assert_eq!(err, ExtractionError::Unreadable(UnreadableReason::NoTextLayer));
    }

    #[test]
    fn test_password_protected_pdf_is_encrypted() {
        let pdf = build_encrypted_pdf(&[&["Jane Doe", "Rust engineer"]]);
        let err = extract_pdf(&document(pdf)).unwrap_err();
        assert_eq!(err, ExtractionError::Unreadable(UnreadableReason::Encrypted));
    }

    #[test]
    fn test_multi_page_text_in_document_order() {
        let pdf = build_pdf(&[
            &["Jane Doe", "jane@example.com"],
            &["Experienced with Python and Kubernetes"],
        ]);
        let text = extract_pdf(&document(pdf)).unwrap();
        assert_eq!(text.page_count(), Some(2));

        let joined = text.joined();
        let name_at = joined.find("Jane Doe").unwrap();
        let body_at = joined.find("Kubernetes").unwrap();
        assert!(name_at < body_at);
        assert!(joined.contains("jane@example.com"));
    }

    #[test]
    fn test_header_after_leading_junk_is_accepted() {
        let mut bytes = b"\xef\xbb\xbf\n".to_vec();
        bytes.extend(build_pdf(&[&["Rust engineer"]]));
        // Offsets in the xref are now shifted; lopdf repairs or rejects, but never NotPdf.
        let result = extract_pdf(&document(bytes));
        assert_ne!(result.err(), Some(ExtractionError::NotPdf));
    }
}
