//! Image-decoding contracts.

use std::{future::Future, pin::Pin};

use crate::files::RawFile;

/// Object-safe boxed future used by media async methods.
pub type MediaFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Natural pixel dimensions reported by the platform decoder.
pub struct ImageDimensions {
    /// Natural width in pixels.
    pub width_px: u32,
    /// Natural height in pixels.
    pub height_px: u32,
}

/// Platform image decoder used for metadata extraction.
///
/// Implementations must release any temporary resource (for example a
/// revocable object URL) on both the success and failure paths.
pub trait ImageProbe {
    /// Decodes the image and reports its natural dimensions.
    fn probe<'a>(&'a self, file: &'a RawFile)
        -> MediaFuture<'a, Result<ImageDimensions, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Probe stub for targets without an image decoder.
pub struct NoopImageProbe;

impl ImageProbe for NoopImageProbe {
    fn probe<'a>(
        &'a self,
        _file: &'a RawFile,
    ) -> MediaFuture<'a, Result<ImageDimensions, String>> {
        Box::pin(async { Err("image decoder unavailable".to_string()) })
    }
}
