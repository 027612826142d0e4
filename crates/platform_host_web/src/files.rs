//! Browser file ingestion and object-URL helpers.

use platform_host::RawFile;

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// Reads a picked or dropped browser file fully into memory.
///
/// # Errors
///
/// Returns an error when the file reader fails or the read is interrupted.
pub async fn read_raw_file(file: &web_sys::File) -> Result<RawFile, String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = file;
        Err("browser file reads are only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        let bytes = read_file_bytes(file).await?;
        let last_modified = file.last_modified();
        let last_modified_unix_ms = (last_modified > 0.0).then(|| last_modified as u64);
        Ok(RawFile::new(
            file.name(),
            file.type_(),
            last_modified_unix_ms,
            bytes,
        ))
    }
}

/// Creates a revocable object URL for an in-memory file.
///
/// Callers own the URL and must pass it to [`revoke_object_url`] on every
/// exit path to avoid leaking the browser-level handle.
///
/// # Errors
///
/// Returns an error when blob construction or URL creation fails.
pub fn object_url_for(file: &RawFile) -> Result<String, String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = file;
        Err("object URLs are only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(file.bytes()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&file.mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|err| format!("failed to build blob: {err:?}"))?;
        web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|err| format!("failed to create object URL: {err:?}"))
    }
}

/// Releases an object URL created by [`object_url_for`].
pub fn revoke_object_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = web_sys::Url::revoke_object_url(url);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = url;
    }
}

/// Fetches a same-origin asset fully into memory, for bundled sample files.
///
/// # Errors
///
/// Returns an error when the fetch fails, returns a non-success status, or
/// the body cannot be read.
pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = path;
        Err("fetch is only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let response = wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|err| format!("fetch failed: {err:?}"))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| "fetch returned a non-response value".to_string())?;
        if !response.ok() {
            return Err(format!("fetch failed with status {}", response.status()));
        }
        let buffer = wasm_bindgen_futures::JsFuture::from(
            response
                .array_buffer()
                .map_err(|err| format!("failed to read response body: {err:?}"))?,
        )
        .await
        .map_err(|err| format!("failed to read response body: {err:?}"))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<Vec<u8>, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read file: {err:?}"))
            .map(|value| js_sys::Uint8Array::new(&value).to_vec());
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to read file".to_string()));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    reader
        .read_as_array_buffer(file)
        .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "file read was interrupted".to_string())?;
    on_load.forget();
    on_error.forget();
    result
}
