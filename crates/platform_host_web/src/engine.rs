//! PDF.js document engine bridge.
//!
//! PDF parsing and rasterization stay inside PDF.js; this adapter binds a
//! small wrapper script with `wasm-bindgen` and exposes the engine through
//! the [`platform_host`] traits. The host page is responsible for loading
//! `pdfjsLib` (and its worker) before a document is opened.

use std::rc::Rc;

use platform_host::{
    DocumentEngine, DocumentHandle, DocumentInfo, EngineFuture, RenderedPage,
};

#[cfg(target_arch = "wasm32")]
use serde::Deserialize;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(module = "/js/pdf_engine.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = loadDocument)]
    async fn load_document_js(bytes: &[u8]) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = documentInfo)]
    async fn document_info_js(handle: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = renderPage)]
    async fn render_page_js(
        handle: u32,
        page_number: u32,
        target_width: u32,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = closeDocument)]
    fn close_document_js(handle: u32);
}

#[derive(Debug, Clone, Copy, Default)]
/// Document engine backed by PDF.js.
pub struct PdfJsEngine;

impl DocumentEngine for PdfJsEngine {
    fn load<'a>(
        &'a self,
        bytes: &'a [u8],
    ) -> EngineFuture<'a, Result<Rc<dyn DocumentHandle>, String>> {
        Box::pin(async move {
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = bytes;
                Err("the document engine is only available when compiled for wasm32".to_string())
            }

            #[cfg(target_arch = "wasm32")]
            {
                #[derive(Deserialize)]
                struct LoadedDocument {
                    handle: u32,
                    page_count: u32,
                }

                let value = load_document_js(bytes).await.map_err(js_error_message)?;
                let loaded: LoadedDocument = serde_wasm_bindgen::from_value(value)
                    .map_err(|err| format!("unexpected engine load payload: {err}"))?;
                let handle: Rc<dyn DocumentHandle> = Rc::new(PdfJsDocument {
                    handle: loaded.handle,
                    page_count: loaded.page_count,
                });
                Ok(handle)
            }
        })
    }
}

/// A document parsed by PDF.js, addressed through a bridge handle.
#[derive(Debug)]
pub struct PdfJsDocument {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    handle: u32,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    page_count: u32,
}

impl DocumentHandle for PdfJsDocument {
    fn page_count(&self) -> u32 {
        #[cfg(target_arch = "wasm32")]
        {
            self.page_count
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            0
        }
    }

    fn info<'a>(&'a self) -> EngineFuture<'a, Result<DocumentInfo, String>> {
        Box::pin(async move {
            #[cfg(not(target_arch = "wasm32"))]
            {
                Err("the document engine is only available when compiled for wasm32".to_string())
            }

            #[cfg(target_arch = "wasm32")]
            {
                let value = document_info_js(self.handle)
                    .await
                    .map_err(js_error_message)?;
                serde_wasm_bindgen::from_value(value)
                    .map_err(|err| format!("unexpected engine info payload: {err}"))
            }
        })
    }

    fn render_page<'a>(
        &'a self,
        page_number: u32,
        target_width: u32,
    ) -> EngineFuture<'a, Result<RenderedPage, String>> {
        Box::pin(async move {
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (page_number, target_width);
                Err("the document engine is only available when compiled for wasm32".to_string())
            }

            #[cfg(target_arch = "wasm32")]
            {
                #[derive(Deserialize)]
                struct RenderPayload {
                    surface_url: String,
                    width_px: u32,
                    height_px: u32,
                }

                let value = render_page_js(self.handle, page_number, target_width)
                    .await
                    .map_err(js_error_message)?;
                let payload: RenderPayload = serde_wasm_bindgen::from_value(value)
                    .map_err(|err| format!("unexpected engine render payload: {err}"))?;
                Ok(RenderedPage {
                    surface_url: payload.surface_url,
                    width_px: payload.width_px,
                    height_px: payload.height_px,
                })
            }
        })
    }
}

impl Drop for PdfJsDocument {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        close_document_js(self.handle);
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error_message(err: JsValue) -> String {
    use wasm_bindgen::JsCast;
    err.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{err:?}"))
}
