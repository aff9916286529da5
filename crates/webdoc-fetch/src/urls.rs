//! Export URL construction for hosted documents.
//!
//! The document source exposes plain-text and CSV export endpoints keyed by
//! resource id. These builders are the single place the URL shapes live.

/// Plain-text export URL for a hosted document.
#[must_use]
pub fn document_text_export_url(doc_id: &str) -> String {
    format!("https://docs.google.com/document/d/{doc_id}/export?format=txt")
}

/// CSV export URL for one tab (`gid`) of a hosted spreadsheet.
#[must_use]
pub fn sheet_csv_export_url(sheet_id: &str, gid: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}")
}

/// Direct-download URL for a drive-hosted file (used for image `src` values).
#[must_use]
pub fn drive_download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}
