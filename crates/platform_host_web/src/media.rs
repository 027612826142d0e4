//! Browser image probe implementation.

use platform_host::{ImageDimensions, ImageProbe, MediaFuture, RawFile};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Image probe backed by the browser's own decoder via `HtmlImageElement`.
pub struct WebImageProbe;

impl ImageProbe for WebImageProbe {
    fn probe<'a>(
        &'a self,
        file: &'a RawFile,
    ) -> MediaFuture<'a, Result<ImageDimensions, String>> {
        Box::pin(async move {
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = file;
                Err("image decoding is only available when compiled for wasm32".to_string())
            }

            #[cfg(target_arch = "wasm32")]
            {
                // The object URL must be revoked on both exit paths.
                let url = crate::files::object_url_for(file)?;
                let result = decode_natural_size(&url).await;
                crate::files::revoke_object_url(&url);
                result
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn decode_natural_size(url: &str) -> Result<ImageDimensions, String> {
    let image = web_sys::HtmlImageElement::new()
        .map_err(|err| format!("failed to create image element: {err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<ImageDimensions, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let image_for_load = image.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        let dimensions = ImageDimensions {
            width_px: image_for_load.natural_width(),
            height_px: image_for_load.natural_height(),
        };
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(Ok(dimensions));
        }
    }));
    image.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let on_error = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to load image".to_string()));
        }
    }));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    image.set_src(url);

    let result = rx
        .await
        .map_err(|_| "image decode was interrupted".to_string())?;
    on_load.forget();
    on_error.forget();
    result
}
