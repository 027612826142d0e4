//! Typed host-domain contracts and shared models for the file viewer.
//!
//! This crate is the API-first boundary for platform services. It owns the
//! persisted record model and file library, the normalized metadata shapes,
//! and the storage/engine/decoder capability traits, while concrete browser
//! adapters live in `platform_host_web`. Everything here compiles and tests
//! natively; nothing touches a browser API.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use platform_host::{FileKind, FileLibrary, MemoryKeyValueStore, RawFile};
//!
//! let library = FileLibrary::new(Rc::new(MemoryKeyValueStore::default()));
//! let file = RawFile::new("notes.pdf", "application/pdf", None, vec![0x25, 0x50]);
//!
//! let record = library
//!     .insert(&file, FileKind::Document, None)
//!     .expect("record should persist");
//! let restored = library.materialize(&record).expect("payload should decode");
//! assert_eq!(restored.bytes(), file.bytes());
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod engine;
pub mod files;
pub mod media;
pub mod metadata;
pub mod storage;
pub mod time;

pub use engine::{
    DocumentEngine, DocumentHandle, EngineFuture, NoopDocumentEngine, RenderedPage,
};
pub use files::{FileKind, RawFile};
pub use media::{ImageDimensions, ImageProbe, MediaFuture, NoopImageProbe};
pub use metadata::{
    adaptive_size_label, aspect_ratio, dimensions_label, document_metadata, image_metadata,
    pdf_date_label, rfc3339_label, size_label_mb, timestamp_label, DocumentInfo, DocumentMetadata,
    ExtractError, ImageMetadata, MetadataRecord, NOT_SPECIFIED, NO_KEYWORDS, UNKNOWN,
};
pub use storage::kv::{KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore};
pub use storage::records::{
    sort_recent_first, FileLibrary, StoreError, StoredFileRecord, FILE_LIBRARY_KEY,
};
pub use time::{next_monotonic_timestamp_ms, now_rfc3339, unix_time_ms_now};
