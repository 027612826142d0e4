//! Binary entrypoint for the browser-hosted viewer application.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Build `viewer_app` for wasm32 with the `csr` feature."
    );
}
