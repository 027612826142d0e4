//! Document-engine contracts.
//!
//! PDF decoding and rasterization are delegated entirely to an external
//! rendering engine; these traits are the seam the runtime consumes and the
//! browser adapter implements.

use std::{future::Future, pin::Pin, rc::Rc};

use crate::metadata::DocumentInfo;

/// Object-safe boxed future used by engine async methods.
pub type EngineFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// External document rendering engine.
pub trait DocumentEngine {
    /// Parses document bytes into a live handle.
    ///
    /// The returned error string carries the engine's own message so the UI
    /// can surface it inline.
    fn load<'a>(&'a self, bytes: &'a [u8])
        -> EngineFuture<'a, Result<Rc<dyn DocumentHandle>, String>>;
}

/// A successfully loaded document.
pub trait DocumentHandle {
    /// Total page count, known only after the engine has parsed the file.
    fn page_count(&self) -> u32;

    /// Fetches the document's info dictionary.
    fn info<'a>(&'a self) -> EngineFuture<'a, Result<DocumentInfo, String>>;

    /// Rasterizes one page (1-based index) at the given target width.
    fn render_page<'a>(
        &'a self,
        page_number: u32,
        target_width: u32,
    ) -> EngineFuture<'a, Result<RenderedPage, String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One rasterized page ready for display.
pub struct RenderedPage {
    /// Displayable surface as a data URL.
    pub surface_url: String,
    /// Rendered width in CSS pixels.
    pub width_px: u32,
    /// Rendered height in CSS pixels.
    pub height_px: u32,
}

#[derive(Debug, Clone, Copy, Default)]
/// Engine stub for targets without a document engine.
pub struct NoopDocumentEngine;

impl DocumentEngine for NoopDocumentEngine {
    fn load<'a>(
        &'a self,
        _bytes: &'a [u8],
    ) -> EngineFuture<'a, Result<Rc<dyn DocumentHandle>, String>> {
        Box::pin(async { Err("document engine unavailable".to_string()) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_engine_reports_unavailable() {
        let engine = NoopDocumentEngine;
        let engine_obj: &dyn DocumentEngine = &engine;
        let err = block_on(engine_obj.load(b"%PDF-"))
            .map(|_| ())
            .expect_err("noop load");
        assert!(err.contains("unavailable"));
    }
}
