//! Effect execution: the storage, decoding, and engine work behind the
//! reducer's side-effect intents.
//!
//! Completions re-enter the reducer as generation-stamped actions; the
//! reducer decides whether they still apply.

use std::{cell::RefCell, rc::Rc};

use leptos::{create_rw_signal, logging, spawn_local, RwSignal, SignalUpdate};
use platform_host::{
    document_metadata, image_metadata, DocumentEngine, DocumentHandle, ExtractError, FileLibrary,
    ImageProbe, MetadataRecord, NoopDocumentEngine, NoopImageProbe, NoopKeyValueStore,
};
use platform_host_web::{PdfJsEngine, WebImageProbe, WebKeyValueStore};

use crate::model::{ViewerModel, MAX_PAGE_RENDER_WIDTH};
use crate::reducer::{reduce_viewer, ViewerAction, ViewerEffect};

#[derive(Clone)]
/// Injected capabilities the effect executor drives.
pub struct ViewerServices {
    /// Persisted file library.
    pub library: FileLibrary,
    /// Platform image decoder.
    pub probe: Rc<dyn ImageProbe>,
    /// External document engine.
    pub engine: Rc<dyn DocumentEngine>,
}

impl ViewerServices {
    /// Browser-backed services used by the shell.
    pub fn browser() -> Self {
        Self {
            library: FileLibrary::new(Rc::new(WebKeyValueStore)),
            probe: Rc::new(WebImageProbe),
            engine: Rc::new(PdfJsEngine),
        }
    }

    /// Inert services for baseline targets and tests.
    pub fn noop() -> Self {
        Self {
            library: FileLibrary::new(Rc::new(NoopKeyValueStore)),
            probe: Rc::new(NoopImageProbe),
            engine: Rc::new(NoopDocumentEngine),
        }
    }
}

/// Holds the live engine handle for the current document, keyed by the
/// session generation so a stale handle can never serve a newer file.
#[derive(Clone, Default)]
pub struct DocumentSlot {
    inner: Rc<RefCell<Option<(u64, Rc<dyn DocumentHandle>)>>>,
}

impl DocumentSlot {
    fn put(&self, generation: u64, handle: Rc<dyn DocumentHandle>) {
        *self.inner.borrow_mut() = Some((generation, handle));
    }

    fn get(&self, generation: u64) -> Option<Rc<dyn DocumentHandle>> {
        self.inner
            .borrow()
            .as_ref()
            .filter(|(stamped, _)| *stamped == generation)
            .map(|(_, handle)| handle.clone())
    }

    fn clear(&self) {
        self.inner.borrow_mut().take();
    }
}

#[derive(Clone)]
/// Reactive session state plus the capabilities needed to advance it.
///
/// Provided through the Leptos context by `ViewerProvider`; every component
/// dispatches actions through it.
pub struct ViewerRuntimeContext {
    /// The session model signal components render from.
    pub model: RwSignal<ViewerModel>,
    services: ViewerServices,
    slot: DocumentSlot,
}

impl ViewerRuntimeContext {
    /// Creates the runtime context, seeding the model from the persisted
    /// library.
    pub fn new(services: ViewerServices) -> Self {
        let model = create_rw_signal(ViewerModel::with_stored(services.library.list()));
        Self {
            model,
            services,
            slot: DocumentSlot::default(),
        }
    }

    /// Applies an action through the reducer and executes the effects it
    /// emits.
    pub fn dispatch(&self, action: ViewerAction) {
        let mut effects = Vec::new();
        self.model
            .update(|model| effects = reduce_viewer(model, action));
        for effect in effects {
            run_effect(self.clone(), effect);
        }
    }
}

fn run_effect(ctx: ViewerRuntimeContext, effect: ViewerEffect) {
    match effect {
        ViewerEffect::ProbeImage { generation, file } => {
            let probe = ctx.services.probe.clone();
            spawn_local(async move {
                let result = match probe.probe(&file).await {
                    Ok(dimensions) => Ok(MetadataRecord::Image(image_metadata(
                        &file,
                        dimensions.width_px,
                        dimensions.height_px,
                    ))),
                    Err(message) => {
                        logging::warn!("image decode failed: {message}");
                        Err(ExtractError::Decode(message))
                    }
                };
                ctx.dispatch(ViewerAction::ExtractionResolved { generation, result });
            });
        }
        ViewerEffect::LoadDocument { generation, file } => {
            let engine = ctx.services.engine.clone();
            let slot = ctx.slot.clone();
            spawn_local(async move {
                match engine.load(file.bytes()).await {
                    Ok(handle) => {
                        let page_count = handle.page_count();
                        slot.put(generation, handle);
                        ctx.dispatch(ViewerAction::DocumentLoaded {
                            generation,
                            page_count,
                        });
                    }
                    Err(message) => {
                        logging::error!("document load failed: {message}");
                        ctx.dispatch(ViewerAction::DocumentLoadFailed {
                            generation,
                            message,
                        });
                    }
                }
            });
        }
        ViewerEffect::FetchDocumentInfo {
            generation,
            size_bytes,
        } => {
            let Some(handle) = ctx.slot.get(generation) else {
                return;
            };
            spawn_local(async move {
                let result = match handle.info().await {
                    Ok(info) => Ok(MetadataRecord::Document(document_metadata(
                        &info,
                        handle.page_count(),
                        size_bytes,
                    ))),
                    Err(message) => {
                        logging::warn!("document metadata unavailable: {message}");
                        Err(ExtractError::MetadataUnavailable(message))
                    }
                };
                ctx.dispatch(ViewerAction::ExtractionResolved { generation, result });
            });
        }
        ViewerEffect::RenderPage {
            generation,
            page_number,
        } => {
            let Some(handle) = ctx.slot.get(generation) else {
                return;
            };
            let target_width = page_render_width();
            spawn_local(async move {
                match handle.render_page(page_number, target_width).await {
                    Ok(page) => ctx.dispatch(ViewerAction::PageRendered {
                        generation,
                        surface_url: page.surface_url,
                    }),
                    Err(message) => logging::warn!("page render failed: {message}"),
                }
            });
        }
        ViewerEffect::ReleaseDocument => ctx.slot.clear(),
        ViewerEffect::PersistFile {
            file,
            kind,
            metadata,
        } => match ctx.services.library.insert(&file, kind, Some(metadata)) {
            Ok(record) => {
                logging::log!("saved {} to storage", record.name);
                ctx.dispatch(ViewerAction::LibraryUpdated {
                    records: ctx.services.library.list(),
                });
            }
            // Storage failures never block viewing; the file stays usable
            // in memory, just unpersisted.
            Err(err) => logging::warn!("failed to save file to storage: {err}"),
        },
        ViewerEffect::OpenRecord { generation, id } => {
            let Some(record) = ctx
                .services
                .library
                .list()
                .into_iter()
                .find(|record| record.id == id)
            else {
                ctx.dispatch(ViewerAction::StoredOpenFailed { generation });
                return;
            };
            match ctx.services.library.materialize(&record) {
                Ok(file) => {
                    let records = match ctx.services.library.touch(&id) {
                        Ok(records) => records,
                        Err(err) => {
                            logging::warn!("failed to update last-opened stamp: {err}");
                            ctx.services.library.list()
                        }
                    };
                    ctx.dispatch(ViewerAction::LibraryUpdated { records });
                    ctx.dispatch(ViewerAction::StoredOpened {
                        generation,
                        record,
                        file,
                    });
                }
                Err(err) => {
                    logging::warn!("failed to load file from storage: {err}");
                    ctx.dispatch(ViewerAction::StoredOpenFailed { generation });
                }
            }
        }
        ViewerEffect::RemoveRecord { id } => {
            let records = match ctx.services.library.remove(&id) {
                Ok(records) => records,
                Err(err) => {
                    logging::warn!("failed to delete stored file: {err}");
                    ctx.services.library.list()
                }
            };
            ctx.dispatch(ViewerAction::LibraryUpdated { records });
        }
        ViewerEffect::ClearLibrary => {
            if let Err(err) = ctx.services.library.clear() {
                logging::warn!("failed to clear stored files: {err}");
            }
            ctx.dispatch(ViewerAction::LibraryUpdated {
                records: ctx.services.library.list(),
            });
        }
    }
}

fn page_render_width() -> u32 {
    #[cfg(target_arch = "wasm32")]
    {
        let viewport = web_sys::window()
            .and_then(|window| window.inner_width().ok())
            .and_then(|width| width.as_f64())
            .unwrap_or(f64::from(MAX_PAGE_RENDER_WIDTH));
        (viewport.max(1.0) as u32)
            .saturating_sub(crate::model::PAGE_RENDER_MARGIN)
            .clamp(1, MAX_PAGE_RENDER_WIDTH)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        MAX_PAGE_RENDER_WIDTH
    }
}
