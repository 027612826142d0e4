//! `localStorage`-backed key-value store implementation.
//!
//! The browser API is synchronous, so this adapter implements
//! [`platform_host::KeyValueStore`] directly with no future plumbing.

use platform_host::KeyValueStore;

#[derive(Debug, Clone, Copy, Default)]
/// Key-value store backed by `window.localStorage`.
pub struct WebKeyValueStore;

impl KeyValueStore for WebKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(key, value)
                .map_err(|err| format!("localStorage set_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(key)
                .map_err(|err| format!("localStorage remove_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
