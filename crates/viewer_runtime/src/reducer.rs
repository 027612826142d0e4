//! Reducer actions, side-effect intents, and transition logic for the viewer
//! session.

use platform_host::{ExtractError, FileKind, MetadataRecord, RawFile, StoredFileRecord};

use crate::model::{FileOrigin, IngestSource, ViewerModel, ViewerPhase, ViewingState};

/// Inline message for an unsupported file chosen through the picker.
pub const INVALID_PICK_MESSAGE: &str = "Please select a valid PDF or image file.";
/// Inline message for an unsupported file arriving via drag-and-drop.
pub const INVALID_DROP_MESSAGE: &str = "Please drop a valid PDF or image file.";
/// Inline message when a stored record cannot be materialized.
pub const STORAGE_LOAD_MESSAGE: &str = "Failed to load file from storage";
/// Inline message when the platform decoder rejects an image.
pub const IMAGE_DECODE_MESSAGE: &str = "Failed to load image";

impl IngestSource {
    fn invalid_message(self) -> &'static str {
        match self {
            Self::Picker => INVALID_PICK_MESSAGE,
            Self::Drop => INVALID_DROP_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_viewer`] to mutate [`ViewerModel`].
pub enum ViewerAction {
    /// A file arrived from the picker or the drop zone.
    SelectFile {
        /// Fully read file.
        file: RawFile,
        /// Where the file came from, for error copy.
        source: IngestSource,
    },
    /// The browser file read failed before the file could be classified.
    IngestFailed {
        /// Underlying read error message.
        message: String,
    },
    /// Async metadata extraction finished.
    ExtractionResolved {
        /// Generation stamped when the extraction started.
        generation: u64,
        /// Normalized metadata or the extraction failure.
        result: Result<MetadataRecord, ExtractError>,
    },
    /// The document engine parsed the current file.
    DocumentLoaded {
        /// Generation stamped when the load started.
        generation: u64,
        /// Page count reported by the engine handle.
        page_count: u32,
    },
    /// The document engine rejected the current file.
    DocumentLoadFailed {
        /// Generation stamped when the load started.
        generation: u64,
        /// Engine error message, surfaced inline.
        message: String,
    },
    /// A page finished rasterizing.
    PageRendered {
        /// Generation stamped when the render started.
        generation: u64,
        /// Displayable surface as a data URL.
        surface_url: String,
    },
    /// Advance one page.
    NextPage,
    /// Go back one page.
    PrevPage,
    /// Close the current file or dismiss an error ("try another file").
    CloseFile,
    /// Open a record from the stored-file library.
    OpenStored {
        /// Record id.
        id: String,
    },
    /// A stored record materialized successfully.
    StoredOpened {
        /// Generation stamped by the open request.
        generation: u64,
        /// The persisted record, including its metadata.
        record: StoredFileRecord,
        /// The materialized file.
        file: RawFile,
    },
    /// A stored record could not be materialized.
    StoredOpenFailed {
        /// Generation stamped by the open request.
        generation: u64,
    },
    /// Delete one record from the library.
    DeleteStored {
        /// Record id.
        id: String,
    },
    /// Delete every record from the library.
    ClearStored,
    /// Show or hide the stored-file list.
    ToggleStoredList,
    /// The library changed on disk; replace the display snapshot.
    LibraryUpdated {
        /// Fresh record list in storage order.
        records: Vec<StoredFileRecord>,
    },
    /// Drag-over state of the drop zone changed.
    DragStateChanged {
        /// Whether a drag is hovering the drop zone.
        active: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_viewer`] for the shell to execute.
pub enum ViewerEffect {
    /// Decode an image and resolve its metadata.
    ProbeImage {
        /// Generation to stamp on the completion.
        generation: u64,
        /// Image file to probe.
        file: RawFile,
    },
    /// Parse a document through the rendering engine.
    LoadDocument {
        /// Generation to stamp on the completion.
        generation: u64,
        /// Document file to load.
        file: RawFile,
    },
    /// Fetch the loaded document's info dictionary and normalize it.
    FetchDocumentInfo {
        /// Generation to stamp on the completion.
        generation: u64,
        /// Original byte length, for the size label.
        size_bytes: u64,
    },
    /// Rasterize one page of the loaded document.
    RenderPage {
        /// Generation to stamp on the completion.
        generation: u64,
        /// 1-based page index.
        page_number: u32,
    },
    /// Drop the active engine handle, if any.
    ReleaseDocument,
    /// Persist the current file and its extracted metadata.
    PersistFile {
        /// File to encode and store.
        file: RawFile,
        /// Validated kind.
        kind: FileKind,
        /// Extracted metadata.
        metadata: MetadataRecord,
    },
    /// Materialize and touch a stored record.
    OpenRecord {
        /// Generation to stamp on the completion.
        generation: u64,
        /// Record id.
        id: String,
    },
    /// Remove one record from the library.
    RemoveRecord {
        /// Record id.
        id: String,
    },
    /// Clear the whole library.
    ClearLibrary,
}

/// Applies a [`ViewerAction`] to the session state and collects resulting
/// side effects.
///
/// The reducer is the authoritative transition engine for the viewer session.
/// It is pure: storage, decoding, and engine work happen in the effect
/// executor, which feeds results back as generation-stamped actions. Stale
/// completions (whose generation no longer matches) are discarded here, so a
/// file closed mid-extraction can never resurrect old state.
pub fn reduce_viewer(model: &mut ViewerModel, action: ViewerAction) -> Vec<ViewerEffect> {
    let mut effects = Vec::new();
    match action {
        ViewerAction::SelectFile { file, source } => {
            model.drag_active = false;
            effects.push(ViewerEffect::ReleaseDocument);
            match FileKind::from_mime(&file.mime_type) {
                Some(kind) => {
                    let generation = model.bump_generation();
                    match kind {
                        FileKind::Document => effects.push(ViewerEffect::LoadDocument {
                            generation,
                            file: file.clone(),
                        }),
                        FileKind::Image => effects.push(ViewerEffect::ProbeImage {
                            generation,
                            file: file.clone(),
                        }),
                    }
                    model.phase = ViewerPhase::Viewing(ViewingState::fresh(kind, file));
                }
                None => {
                    model.bump_generation();
                    model.phase = ViewerPhase::Failed {
                        message: source.invalid_message().to_string(),
                    };
                }
            }
        }
        ViewerAction::IngestFailed { message } => {
            model.bump_generation();
            effects.push(ViewerEffect::ReleaseDocument);
            model.phase = ViewerPhase::Failed { message };
        }
        ViewerAction::ExtractionResolved { generation, result } => {
            if generation != model.generation {
                return effects;
            }
            let ViewerPhase::Viewing(viewing) = &mut model.phase else {
                return effects;
            };
            match result {
                Ok(metadata) => {
                    viewing.metadata = Some(metadata.clone());
                    let known = is_known(&model.stored, &viewing.file);
                    if viewing.origin == FileOrigin::Fresh && !known {
                        effects.push(ViewerEffect::PersistFile {
                            file: viewing.file.clone(),
                            kind: viewing.kind,
                            metadata,
                        });
                    }
                }
                Err(ExtractError::Decode(_)) => {
                    model.phase = ViewerPhase::Failed {
                        message: IMAGE_DECODE_MESSAGE.to_string(),
                    };
                }
                Err(ExtractError::MetadataUnavailable(_)) => {
                    // Non-fatal: keep viewing with metadata absent. Nothing is
                    // persisted, matching the extraction-gated record lifecycle.
                }
            }
        }
        ViewerAction::DocumentLoaded {
            generation,
            page_count,
        } => {
            if generation != model.generation {
                return effects;
            }
            let ViewerPhase::Viewing(viewing) = &mut model.phase else {
                return effects;
            };
            if viewing.kind != FileKind::Document {
                return effects;
            }
            viewing.page_count = Some(page_count);
            viewing.page_cursor = viewing.page_cursor.clamp(1, page_count.max(1));
            effects.push(ViewerEffect::RenderPage {
                generation,
                page_number: viewing.page_cursor,
            });
            if viewing.origin == FileOrigin::Fresh {
                effects.push(ViewerEffect::FetchDocumentInfo {
                    generation,
                    size_bytes: viewing.file.size_bytes(),
                });
            }
        }
        ViewerAction::DocumentLoadFailed {
            generation,
            message,
        } => {
            if generation != model.generation {
                return effects;
            }
            effects.push(ViewerEffect::ReleaseDocument);
            model.phase = ViewerPhase::Failed {
                message: format!(
                    "Failed to load PDF: {message}. Please make sure the file is a valid PDF."
                ),
            };
        }
        ViewerAction::PageRendered {
            generation,
            surface_url,
        } => {
            if generation != model.generation {
                return effects;
            }
            if let ViewerPhase::Viewing(viewing) = &mut model.phase {
                viewing.page_surface = Some(surface_url);
            }
        }
        ViewerAction::NextPage => effects.extend(move_page(model, 1)),
        ViewerAction::PrevPage => effects.extend(move_page(model, -1)),
        ViewerAction::CloseFile => {
            model.bump_generation();
            effects.push(ViewerEffect::ReleaseDocument);
            model.phase = ViewerPhase::Empty;
        }
        ViewerAction::OpenStored { id } => {
            let generation = model.bump_generation();
            effects.push(ViewerEffect::ReleaseDocument);
            effects.push(ViewerEffect::OpenRecord { generation, id });
        }
        ViewerAction::StoredOpened {
            generation,
            record,
            file,
        } => {
            if generation != model.generation {
                return effects;
            }
            model.show_stored = false;
            let page_count = record.metadata.as_ref().and_then(|metadata| match metadata {
                MetadataRecord::Document(document) => Some(document.page_count),
                MetadataRecord::Image(_) => None,
            });
            if record.kind == FileKind::Document {
                effects.push(ViewerEffect::LoadDocument {
                    generation,
                    file: file.clone(),
                });
            }
            model.phase = ViewerPhase::Viewing(ViewingState {
                kind: record.kind,
                file,
                metadata: record.metadata,
                page_cursor: 1,
                page_count,
                page_surface: None,
                origin: FileOrigin::Library,
            });
        }
        ViewerAction::StoredOpenFailed { generation } => {
            if generation != model.generation {
                return effects;
            }
            model.phase = ViewerPhase::Failed {
                message: STORAGE_LOAD_MESSAGE.to_string(),
            };
        }
        ViewerAction::DeleteStored { id } => effects.push(ViewerEffect::RemoveRecord { id }),
        ViewerAction::ClearStored => effects.push(ViewerEffect::ClearLibrary),
        ViewerAction::ToggleStoredList => model.show_stored = !model.show_stored,
        ViewerAction::LibraryUpdated { records } => model.stored = records,
        ViewerAction::DragStateChanged { active } => model.drag_active = active,
    }
    effects
}

fn move_page(model: &mut ViewerModel, delta: i64) -> Vec<ViewerEffect> {
    let generation = model.generation;
    let ViewerPhase::Viewing(viewing) = &mut model.phase else {
        return Vec::new();
    };
    let Some(page_count) = viewing.page_count.filter(|count| *count > 0) else {
        return Vec::new();
    };
    let next = (i64::from(viewing.page_cursor) + delta).clamp(1, i64::from(page_count)) as u32;
    if next == viewing.page_cursor {
        return Vec::new();
    }
    viewing.page_cursor = next;
    vec![ViewerEffect::RenderPage {
        generation,
        page_number: next,
    }]
}

// Dedup heuristic over the display snapshot, mirroring the library's
// name+size policy: no content hash, so identical name and size means
// "already known".
fn is_known(records: &[StoredFileRecord], file: &RawFile) -> bool {
    records
        .iter()
        .any(|record| record.name == file.name && record.size_bytes == file.size_bytes())
}

#[cfg(test)]
mod tests {
    use platform_host::{document_metadata, image_metadata, DocumentInfo};
    use pretty_assertions::assert_eq;

    use super::*;

    fn pdf_file(name: &str, len: usize) -> RawFile {
        RawFile::new(name, "application/pdf", None, vec![0x25; len])
    }

    fn png_file(name: &str, len: usize) -> RawFile {
        RawFile::new(name, "image/png", Some(1_000), vec![0x89; len])
    }

    fn image_record(metadata: &MetadataRecord, file: &RawFile) -> StoredFileRecord {
        StoredFileRecord {
            id: "stored-1".to_string(),
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.size_bytes(),
            kind: FileKind::Image,
            payload: file.to_data_url(),
            metadata: Some(metadata.clone()),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            last_accessed_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn select(model: &mut ViewerModel, file: RawFile) -> Vec<ViewerEffect> {
        reduce_viewer(
            model,
            ViewerAction::SelectFile {
                file,
                source: IngestSource::Picker,
            },
        )
    }

    #[test]
    fn unsupported_mime_fails_with_the_picker_message() {
        let mut model = ViewerModel::default();
        let effects = select(
            &mut model,
            RawFile::new("notes.txt", "text/plain", None, vec![1]),
        );

        assert_eq!(
            model.phase,
            ViewerPhase::Failed {
                message: INVALID_PICK_MESSAGE.to_string()
            }
        );
        assert_eq!(effects, vec![ViewerEffect::ReleaseDocument]);
    }

    #[test]
    fn dropped_unsupported_mime_uses_the_drop_message() {
        let mut model = ViewerModel::default();
        reduce_viewer(
            &mut model,
            ViewerAction::SelectFile {
                file: RawFile::new("notes.txt", "text/plain", None, vec![1]),
                source: IngestSource::Drop,
            },
        );
        assert_eq!(
            model.phase,
            ViewerPhase::Failed {
                message: INVALID_DROP_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn selecting_a_pdf_enters_viewing_and_loads_the_document() {
        let mut model = ViewerModel::default();
        let file = pdf_file("a.pdf", 8);
        let effects = select(&mut model, file.clone());

        let viewing = model.viewing().expect("viewing");
        assert_eq!(viewing.kind, FileKind::Document);
        assert_eq!(viewing.page_cursor, 1);
        assert_eq!(viewing.page_count, None);
        assert_eq!(
            effects,
            vec![
                ViewerEffect::ReleaseDocument,
                ViewerEffect::LoadDocument {
                    generation: 1,
                    file
                }
            ]
        );
    }

    #[test]
    fn selecting_an_image_probes_it() {
        let mut model = ViewerModel::default();
        let file = png_file("a.png", 4);
        let effects = select(&mut model, file.clone());

        assert_eq!(model.viewing().expect("viewing").kind, FileKind::Image);
        assert_eq!(
            effects,
            vec![
                ViewerEffect::ReleaseDocument,
                ViewerEffect::ProbeImage {
                    generation: 1,
                    file
                }
            ]
        );
    }

    #[test]
    fn document_load_reports_pages_and_requests_render_and_info() {
        let mut model = ViewerModel::default();
        select(&mut model, pdf_file("a.pdf", 8));

        let effects = reduce_viewer(
            &mut model,
            ViewerAction::DocumentLoaded {
                generation: 1,
                page_count: 5,
            },
        );

        let viewing = model.viewing().expect("viewing");
        assert_eq!(viewing.page_count, Some(5));
        assert_eq!(
            effects,
            vec![
                ViewerEffect::RenderPage {
                    generation: 1,
                    page_number: 1
                },
                ViewerEffect::FetchDocumentInfo {
                    generation: 1,
                    size_bytes: 8
                },
            ]
        );
    }

    #[test]
    fn page_navigation_clamps_to_bounds() {
        let mut model = ViewerModel::default();
        select(&mut model, pdf_file("a.pdf", 8));
        reduce_viewer(
            &mut model,
            ViewerAction::DocumentLoaded {
                generation: 1,
                page_count: 2,
            },
        );

        // At page 1, Prev is a no-op.
        assert!(reduce_viewer(&mut model, ViewerAction::PrevPage).is_empty());
        assert_eq!(model.viewing().expect("viewing").page_cursor, 1);

        let effects = reduce_viewer(&mut model, ViewerAction::NextPage);
        assert_eq!(model.viewing().expect("viewing").page_cursor, 2);
        assert_eq!(
            effects,
            vec![ViewerEffect::RenderPage {
                generation: 1,
                page_number: 2
            }]
        );

        // At the last page, Next is a no-op.
        assert!(reduce_viewer(&mut model, ViewerAction::NextPage).is_empty());
        assert_eq!(model.viewing().expect("viewing").page_cursor, 2);
    }

    #[test]
    fn navigation_without_a_page_count_is_inert() {
        let mut model = ViewerModel::default();
        select(&mut model, pdf_file("a.pdf", 8));
        assert!(reduce_viewer(&mut model, ViewerAction::NextPage).is_empty());
        assert_eq!(model.viewing().expect("viewing").page_cursor, 1);
    }

    #[test]
    fn successful_extraction_persists_a_new_file() {
        let mut model = ViewerModel::default();
        let file = png_file("a.png", 4);
        select(&mut model, file.clone());

        let metadata = MetadataRecord::Image(image_metadata(&file, 1920, 1080));
        let effects = reduce_viewer(
            &mut model,
            ViewerAction::ExtractionResolved {
                generation: 1,
                result: Ok(metadata.clone()),
            },
        );

        assert_eq!(model.viewing().expect("viewing").metadata, Some(metadata.clone()));
        assert_eq!(
            effects,
            vec![ViewerEffect::PersistFile {
                file,
                kind: FileKind::Image,
                metadata
            }]
        );
    }

    #[test]
    fn extraction_for_a_known_name_and_size_skips_persistence() {
        let file = png_file("a.png", 4);
        let metadata = MetadataRecord::Image(image_metadata(&file, 10, 10));
        let mut model = ViewerModel::with_stored(vec![image_record(&metadata, &file)]);
        select(&mut model, file.clone());

        let effects = reduce_viewer(
            &mut model,
            ViewerAction::ExtractionResolved {
                generation: 1,
                result: Ok(metadata),
            },
        );
        assert!(effects.is_empty(), "duplicate must not persist: {effects:?}");
    }

    #[test]
    fn stale_extraction_results_are_discarded() {
        let mut model = ViewerModel::default();
        let file = png_file("a.png", 4);
        select(&mut model, file.clone());
        reduce_viewer(&mut model, ViewerAction::CloseFile);

        let metadata = MetadataRecord::Image(image_metadata(&file, 10, 10));
        let effects = reduce_viewer(
            &mut model,
            ViewerAction::ExtractionResolved {
                generation: 1,
                result: Ok(metadata),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(model.phase, ViewerPhase::Empty);
    }

    #[test]
    fn image_decode_failure_shows_the_inline_message() {
        let mut model = ViewerModel::default();
        select(&mut model, png_file("a.png", 4));

        reduce_viewer(
            &mut model,
            ViewerAction::ExtractionResolved {
                generation: 1,
                result: Err(ExtractError::Decode("bad image".to_string())),
            },
        );
        assert_eq!(
            model.phase,
            ViewerPhase::Failed {
                message: IMAGE_DECODE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn metadata_unavailable_keeps_viewing_without_persisting() {
        let mut model = ViewerModel::default();
        select(&mut model, pdf_file("a.pdf", 8));
        reduce_viewer(
            &mut model,
            ViewerAction::DocumentLoaded {
                generation: 1,
                page_count: 3,
            },
        );

        let effects = reduce_viewer(
            &mut model,
            ViewerAction::ExtractionResolved {
                generation: 1,
                result: Err(ExtractError::MetadataUnavailable("boom".to_string())),
            },
        );

        assert!(effects.is_empty());
        let viewing = model.viewing().expect("viewing");
        assert_eq!(viewing.metadata, None);
        assert_eq!(viewing.page_count, Some(3));
    }

    #[test]
    fn document_load_failure_surfaces_the_engine_message() {
        let mut model = ViewerModel::default();
        select(&mut model, pdf_file("a.pdf", 8));

        reduce_viewer(
            &mut model,
            ViewerAction::DocumentLoadFailed {
                generation: 1,
                message: "Invalid PDF structure".to_string(),
            },
        );
        assert_eq!(
            model.phase,
            ViewerPhase::Failed {
                message: "Failed to load PDF: Invalid PDF structure. Please make sure the file \
                          is a valid PDF."
                    .to_string()
            }
        );
    }

    #[test]
    fn close_discards_transient_state_and_bumps_the_generation() {
        let mut model = ViewerModel::default();
        select(&mut model, pdf_file("a.pdf", 8));
        let generation_before = model.generation;

        let effects = reduce_viewer(&mut model, ViewerAction::CloseFile);
        assert_eq!(model.phase, ViewerPhase::Empty);
        assert!(model.generation > generation_before);
        assert_eq!(effects, vec![ViewerEffect::ReleaseDocument]);
    }

    #[test]
    fn try_another_clears_an_error() {
        let mut model = ViewerModel::default();
        select(
            &mut model,
            RawFile::new("notes.txt", "text/plain", None, vec![1]),
        );
        reduce_viewer(&mut model, ViewerAction::CloseFile);
        assert_eq!(model.phase, ViewerPhase::Empty);
    }

    #[test]
    fn opening_a_stored_record_uses_persisted_metadata_without_reextraction() {
        let file = png_file("a.png", 4);
        let metadata = MetadataRecord::Image(image_metadata(&file, 10, 10));
        let record = image_record(&metadata, &file);
        let mut model = ViewerModel::with_stored(vec![record.clone()]);
        model.show_stored = true;

        let effects = reduce_viewer(
            &mut model,
            ViewerAction::OpenStored {
                id: record.id.clone(),
            },
        );
        assert_eq!(
            effects,
            vec![
                ViewerEffect::ReleaseDocument,
                ViewerEffect::OpenRecord {
                    generation: 1,
                    id: record.id.clone()
                }
            ]
        );

        let effects = reduce_viewer(
            &mut model,
            ViewerAction::StoredOpened {
                generation: 1,
                record,
                file: file.clone(),
            },
        );

        assert!(effects.is_empty(), "image open needs no engine: {effects:?}");
        assert!(!model.show_stored);
        let viewing = model.viewing().expect("viewing");
        assert_eq!(viewing.origin, FileOrigin::Library);
        assert_eq!(viewing.metadata, Some(metadata));
        assert_eq!(viewing.file, file);
    }

    #[test]
    fn opening_a_stored_document_reloads_the_engine_with_known_pages() {
        let file = pdf_file("a.pdf", 8);
        let metadata =
            MetadataRecord::Document(document_metadata(&DocumentInfo::default(), 7, 8));
        let record = StoredFileRecord {
            kind: FileKind::Document,
            ..image_record(&metadata, &file)
        };
        let mut model = ViewerModel::with_stored(vec![record.clone()]);

        reduce_viewer(
            &mut model,
            ViewerAction::OpenStored {
                id: record.id.clone(),
            },
        );
        let effects = reduce_viewer(
            &mut model,
            ViewerAction::StoredOpened {
                generation: 1,
                record,
                file: file.clone(),
            },
        );

        assert_eq!(
            effects,
            vec![ViewerEffect::LoadDocument {
                generation: 1,
                file
            }]
        );
        let viewing = model.viewing().expect("viewing");
        assert_eq!(viewing.page_count, Some(7));

        // Library opens never re-extract, so a later engine load only renders.
        let effects = reduce_viewer(
            &mut model,
            ViewerAction::DocumentLoaded {
                generation: 1,
                page_count: 7,
            },
        );
        assert_eq!(
            effects,
            vec![ViewerEffect::RenderPage {
                generation: 1,
                page_number: 1
            }]
        );
    }

    #[test]
    fn stored_open_failure_shows_the_storage_message() {
        let mut model = ViewerModel::default();
        reduce_viewer(
            &mut model,
            ViewerAction::OpenStored {
                id: "missing".to_string(),
            },
        );
        reduce_viewer(&mut model, ViewerAction::StoredOpenFailed { generation: 1 });
        assert_eq!(
            model.phase,
            ViewerPhase::Failed {
                message: STORAGE_LOAD_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn stale_page_renders_are_discarded() {
        let mut model = ViewerModel::default();
        select(&mut model, pdf_file("a.pdf", 8));
        reduce_viewer(&mut model, ViewerAction::CloseFile);

        reduce_viewer(
            &mut model,
            ViewerAction::PageRendered {
                generation: 1,
                surface_url: "data:image/png;base64,".to_string(),
            },
        );
        assert_eq!(model.phase, ViewerPhase::Empty);
    }

    #[test]
    fn library_bookkeeping_actions_update_the_model() {
        let mut model = ViewerModel::default();

        reduce_viewer(&mut model, ViewerAction::ToggleStoredList);
        assert!(model.show_stored);

        reduce_viewer(&mut model, ViewerAction::DragStateChanged { active: true });
        assert!(model.drag_active);

        let effects = reduce_viewer(
            &mut model,
            ViewerAction::DeleteStored {
                id: "x".to_string(),
            },
        );
        assert_eq!(
            effects,
            vec![ViewerEffect::RemoveRecord {
                id: "x".to_string()
            }]
        );

        let effects = reduce_viewer(&mut model, ViewerAction::ClearStored);
        assert_eq!(effects, vec![ViewerEffect::ClearLibrary]);

        reduce_viewer(&mut model, ViewerAction::LibraryUpdated { records: vec![] });
        assert!(model.stored.is_empty());
    }
}
