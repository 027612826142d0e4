//! Browser adapters for the host contracts in [`platform_host`].
//!
//! This crate wraps the browser capabilities the viewer needs — localStorage,
//! `File` ingestion, object URLs, native image decoding, and the PDF.js
//! engine bridge — behind the trait boundaries defined by `platform_host`.
//! Every wasm path is `cfg(target_arch = "wasm32")`-gated; on native targets
//! the adapters return inert errors so downstream crates still compile and
//! test.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod engine;
mod files;
mod media;
mod storage;

pub use engine::{PdfJsDocument, PdfJsEngine};
pub use files::{fetch_bytes, object_url_for, read_raw_file, revoke_object_url};
pub use media::WebImageProbe;
pub use storage::WebKeyValueStore;
