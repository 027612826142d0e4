//! Raw file values and MIME-kind classification.

use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Two-way classification of viewable files.
pub enum FileKind {
    /// A PDF document rendered page by page through the document engine.
    Document,
    /// A bitmap/vector image decoded by the browser.
    Image,
}

impl FileKind {
    /// Classifies a declared MIME type, accepting exactly `application/pdf`
    /// and the `image/*` family.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        if mime_type == "application/pdf" {
            Some(Self::Document)
        } else if mime_type.starts_with("image/") {
            Some(Self::Image)
        } else {
            None
        }
    }

    /// Returns a short display label for list rows and headings.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Image => "Image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully read file held in memory.
///
/// Constructed once at ingestion (browser file read) or by materializing a
/// stored record; the byte buffer is shared so the value clones cheaply
/// through reducer state and effect payloads.
pub struct RawFile {
    /// Original file name, including extension.
    pub name: String,
    /// MIME type declared by the source file.
    pub mime_type: String,
    /// Last-modified time in unix milliseconds when the source reported one.
    pub last_modified_unix_ms: Option<u64>,
    bytes: Rc<[u8]>,
}

impl RawFile {
    /// Wraps fully read file content.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        last_modified_unix_ms: Option<u64>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            last_modified_unix_ms,
            bytes: bytes.into(),
        }
    }

    /// Returns the file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the content length in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Encodes the content as a self-describing data URL
    /// (`data:<mime>;base64,...`), the form both the persisted payload and
    /// inline display use.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }
}
