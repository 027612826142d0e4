//! Normalized file metadata model and its pure formatting helpers.
//!
//! Extraction is driven by the runtime; this module owns the display shapes
//! the viewer and the persisted records share, plus every label format the
//! original presentation used, so they stay testable off-browser.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::files::RawFile;

/// Sentinel shown for document info fields the source omits.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Sentinel shown for values that cannot be determined.
pub const UNKNOWN: &str = "Unknown";
/// Sentinel shown for an absent keyword list.
pub const NO_KEYWORDS: &str = "None";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure modes of the metadata extraction pipeline.
pub enum ExtractError {
    /// The platform decoder rejected the image (corrupt or unsupported).
    #[error("failed to decode image: {0}")]
    Decode(String),
    /// The document engine's metadata accessor failed; viewing proceeds
    /// without metadata.
    #[error("document metadata unavailable: {0}")]
    MetadataUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// Normalized metadata, tagged by file kind.
pub enum MetadataRecord {
    /// Document info mapped from the engine's info dictionary.
    Document(DocumentMetadata),
    /// Image properties read from the platform decoder.
    Image(ImageMetadata),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Display-ready document metadata with sentinel defaults.
pub struct DocumentMetadata {
    /// Document title, or [`NOT_SPECIFIED`].
    pub title: String,
    /// Document author, or [`NOT_SPECIFIED`].
    pub author: String,
    /// Document subject, or [`NOT_SPECIFIED`].
    pub subject: String,
    /// Creating application, or [`NOT_SPECIFIED`].
    pub creator: String,
    /// Producing application, or [`NOT_SPECIFIED`].
    pub producer: String,
    /// Creation date label, or [`NOT_SPECIFIED`].
    pub creation_date: String,
    /// Modification date label, or [`NOT_SPECIFIED`].
    pub modification_date: String,
    /// Keyword list, or [`NO_KEYWORDS`].
    pub keywords: String,
    /// Total page count reported by the loaded document handle.
    pub page_count: u32,
    /// PDF format version, or [`UNKNOWN`].
    pub format_version: String,
    /// File size formatted in MB to two decimals.
    pub file_size_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Display-ready image metadata.
pub struct ImageMetadata {
    /// Original file name.
    pub file_name: String,
    /// File size formatted in MB to two decimals.
    pub file_size_label: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Natural width in pixels.
    pub width_px: u32,
    /// Natural height in pixels.
    pub height_px: u32,
    /// Combined dimensions label, for example `1920 × 1080 pixels`.
    pub dimensions_label: String,
    /// Width/height ratio to two decimals, for example `1.78`.
    pub aspect_ratio: String,
    /// Last-modified label, or [`UNKNOWN`] when the source gave no time.
    pub last_modified_label: String,
}

impl ImageMetadata {
    /// Returns the aspect ratio rendered for display, for example `1.78:1`.
    pub fn aspect_ratio_label(&self) -> String {
        format!("{}:1", self.aspect_ratio)
    }
}

/// Builds image metadata from a raw file and its decoded pixel dimensions.
pub fn image_metadata(file: &RawFile, width_px: u32, height_px: u32) -> ImageMetadata {
    ImageMetadata {
        file_name: file.name.clone(),
        file_size_label: size_label_mb(file.size_bytes()),
        mime_type: file.mime_type.clone(),
        width_px,
        height_px,
        dimensions_label: dimensions_label(width_px, height_px),
        aspect_ratio: aspect_ratio(width_px, height_px),
        last_modified_label: timestamp_label(file.last_modified_unix_ms),
    }
}

/// Raw info dictionary surfaced by the document engine.
///
/// Every field is optional; normalization substitutes sentinels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject.
    pub subject: Option<String>,
    /// Creating application.
    pub creator: Option<String>,
    /// Producing application.
    pub producer: Option<String>,
    /// Creation date as a PDF date string.
    pub creation_date: Option<String>,
    /// Modification date as a PDF date string.
    pub modification_date: Option<String>,
    /// Keyword list.
    pub keywords: Option<String>,
    /// PDF format version, for example `1.7`.
    pub format_version: Option<String>,
}

/// Maps an engine info dictionary into display-ready document metadata.
///
/// `page_count` comes from the already-loaded document handle and
/// `size_bytes` from the original file, so both are always populated.
pub fn document_metadata(info: &DocumentInfo, page_count: u32, size_bytes: u64) -> DocumentMetadata {
    DocumentMetadata {
        title: or_sentinel(info.title.as_deref(), NOT_SPECIFIED),
        author: or_sentinel(info.author.as_deref(), NOT_SPECIFIED),
        subject: or_sentinel(info.subject.as_deref(), NOT_SPECIFIED),
        creator: or_sentinel(info.creator.as_deref(), NOT_SPECIFIED),
        producer: or_sentinel(info.producer.as_deref(), NOT_SPECIFIED),
        creation_date: pdf_date_label(info.creation_date.as_deref()),
        modification_date: pdf_date_label(info.modification_date.as_deref()),
        keywords: or_sentinel(info.keywords.as_deref(), NO_KEYWORDS),
        page_count,
        format_version: or_sentinel(info.format_version.as_deref(), UNKNOWN),
        file_size_label: size_label_mb(size_bytes),
    }
}

fn or_sentinel(value: Option<&str>, sentinel: &str) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => sentinel.to_string(),
    }
}

/// Formats a byte count in MB to two decimals, for example `1.00 MB`.
pub fn size_label_mb(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / 1_048_576.0)
}

/// Formats a byte count with an adaptive unit, used by the stored-file list:
/// `0 Bytes`, `512 Bytes`, `1.5 KB`, `1 MB`, trailing zeros trimmed.
pub fn adaptive_size_label(size_bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if size_bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (size_bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    let scaled = size_bytes as f64 / 1024_f64.powi(exponent as i32);
    let mut value = format!("{scaled:.2}");
    while value.ends_with('0') {
        value.pop();
    }
    if value.ends_with('.') {
        value.pop();
    }
    format!("{value} {}", UNITS[exponent])
}

/// Formats decoded pixel dimensions, for example `1920 × 1080 pixels`.
pub fn dimensions_label(width_px: u32, height_px: u32) -> String {
    format!("{width_px} × {height_px} pixels")
}

/// Formats the width/height ratio to two decimals, for example `1.78`.
pub fn aspect_ratio(width_px: u32, height_px: u32) -> String {
    format!("{:.2}", f64::from(width_px) / f64::from(height_px))
}

/// Formats a unix-millisecond timestamp as a readable UTC label, or
/// [`UNKNOWN`] when absent.
pub fn timestamp_label(unix_ms: Option<u64>) -> String {
    unix_ms
        .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Formats an RFC 3339 stamp (as stored on records) for list display,
/// falling back to the raw string when it does not parse.
pub fn rfc3339_label(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Formats a PDF date string (`D:YYYYMMDDHHMMSS...`) for display.
///
/// Absent values yield [`NOT_SPECIFIED`]; values that do not parse are shown
/// as-is rather than dropped.
pub fn pdf_date_label(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return NOT_SPECIFIED.to_string();
    };
    parse_pdf_date(raw)
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_pdf_date(raw: &str) -> Option<NaiveDateTime> {
    let digits: String = raw
        .strip_prefix("D:")
        .unwrap_or(raw)
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.len() < 8 {
        return None;
    }
    let field = |range: std::ops::Range<usize>| -> Option<u32> {
        digits.get(range).and_then(|part| part.parse().ok())
    };
    let date = NaiveDate::from_ymd_opt(field(0..4)? as i32, field(4..6)?, field(6..8)?)?;
    let time = NaiveTime::from_hms_opt(
        field(8..10).unwrap_or(0),
        field(10..12).unwrap_or(0),
        field(12..14).unwrap_or(0),
    )?;
    Some(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_mib_file() -> RawFile {
        RawFile::new("a.pdf", "application/pdf", None, vec![0u8; 1_048_576])
    }

    #[test]
    fn size_label_is_mb_to_two_decimals() {
        assert_eq!(size_label_mb(1_048_576), "1.00 MB");
        assert_eq!(size_label_mb(0), "0.00 MB");
        assert_eq!(size_label_mb(2_621_440), "2.50 MB");
    }

    #[test]
    fn aspect_ratio_matches_two_decimal_rounding() {
        assert_eq!(aspect_ratio(1920, 1080), "1.78");
        assert_eq!(aspect_ratio(100, 100), "1.00");
        assert_eq!(aspect_ratio(300, 200), "1.50");
    }

    #[test]
    fn image_metadata_labels_match_display_contract() {
        let file = RawFile::new("photo.png", "image/png", Some(0), vec![0u8; 1_048_576]);
        let metadata = image_metadata(&file, 1920, 1080);
        assert_eq!(metadata.dimensions_label, "1920 × 1080 pixels");
        assert_eq!(metadata.aspect_ratio_label(), "1.78:1");
        assert_eq!(metadata.file_size_label, "1.00 MB");
        assert_eq!(metadata.last_modified_label, "1970-01-01 00:00:00");
    }

    #[test]
    fn image_metadata_without_modified_time_shows_unknown() {
        let file = RawFile::new("photo.png", "image/png", None, vec![1, 2]);
        let metadata = image_metadata(&file, 10, 10);
        assert_eq!(metadata.last_modified_label, UNKNOWN);
    }

    #[test]
    fn document_metadata_substitutes_sentinels() {
        let metadata = document_metadata(&DocumentInfo::default(), 12, 1_048_576);
        assert_eq!(metadata.title, NOT_SPECIFIED);
        assert_eq!(metadata.author, NOT_SPECIFIED);
        assert_eq!(metadata.creation_date, NOT_SPECIFIED);
        assert_eq!(metadata.keywords, NO_KEYWORDS);
        assert_eq!(metadata.format_version, UNKNOWN);
        assert_eq!(metadata.page_count, 12);
        assert_eq!(metadata.file_size_label, "1.00 MB");
    }

    #[test]
    fn document_metadata_treats_blank_fields_as_missing() {
        let info = DocumentInfo {
            title: Some("  ".to_string()),
            author: Some("Ada".to_string()),
            ..DocumentInfo::default()
        };
        let metadata = document_metadata(&info, 1, 1);
        assert_eq!(metadata.title, NOT_SPECIFIED);
        assert_eq!(metadata.author, "Ada");
    }

    #[test]
    fn pdf_dates_parse_the_common_form() {
        assert_eq!(
            pdf_date_label(Some("D:20210405123000+02'00'")),
            "2021-04-05 12:30:00"
        );
        assert_eq!(pdf_date_label(Some("D:20210405")), "2021-04-05 00:00:00");
        assert_eq!(pdf_date_label(Some("garbled")), "garbled");
        assert_eq!(pdf_date_label(None), NOT_SPECIFIED);
    }

    #[test]
    fn adaptive_size_labels_trim_trailing_zeros() {
        assert_eq!(adaptive_size_label(0), "0 Bytes");
        assert_eq!(adaptive_size_label(512), "512 Bytes");
        assert_eq!(adaptive_size_label(1536), "1.5 KB");
        assert_eq!(adaptive_size_label(1_048_576), "1 MB");
        assert_eq!(adaptive_size_label(2_684_354_560), "2.5 GB");
    }

    #[test]
    fn metadata_record_serializes_with_kind_tag() {
        let file = one_mib_file();
        let record = MetadataRecord::Image(image_metadata(&file, 4, 2));
        let value = serde_json::to_value(&record).expect("serialize metadata");
        assert_eq!(value.get("kind"), Some(&serde_json::json!("image")));

        let round_tripped: MetadataRecord =
            serde_json::from_value(value).expect("deserialize metadata");
        assert_eq!(round_tripped, record);
    }
}
