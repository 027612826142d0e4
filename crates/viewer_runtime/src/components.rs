//! Leptos component tree for the viewer shell.

use leptos::*;
use platform_host::{
    adaptive_size_label, rfc3339_label, sort_recent_first, FileKind, MetadataRecord, RawFile,
    StoredFileRecord,
};
use wasm_bindgen::JsCast;

use crate::effects::{ViewerRuntimeContext, ViewerServices};
use crate::model::{IngestSource, ViewerPhase};
use crate::reducer::ViewerAction;

#[derive(Clone, Copy)]
struct SampleFile {
    name: &'static str,
    mime_type: &'static str,
    kind: &'static str,
    path: &'static str,
}

const SAMPLE_FILES: [SampleFile; 2] = [
    SampleFile {
        name: "field-guide-waterfowl.pdf",
        mime_type: "application/pdf",
        kind: "PDF",
        path: "/samples/field-guide-waterfowl.pdf",
    },
    SampleFile {
        name: "harbor-at-dawn.jpg",
        mime_type: "image/jpeg",
        kind: "Image",
        path: "/samples/harbor-at-dawn.jpg",
    },
];

#[component]
/// Installs the viewer runtime context for the component tree below.
pub fn ViewerProvider(children: Children) -> impl IntoView {
    provide_context(ViewerRuntimeContext::new(ViewerServices::browser()));
    children()
}

#[component]
/// Full viewer surface: stored files, sample files, and either the drop zone
/// or the active file.
pub fn ViewerShell() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();
    let model = ctx.model;
    let has_file = move || model.with(|m| matches!(m.phase, ViewerPhase::Viewing(_)));

    view! {
        <div class="viewer-app">
            <h1>"PDF & Image Viewer"</h1>
            <p>"Drag and drop a PDF file or image, or click to browse"</p>

            <StoredFilesSection />
            <SampleFilesTable />

            <Show when=has_file fallback=|| view! { <DropZone /> }>
                <ActiveFileView />
            </Show>
        </div>
    }
}

fn ingest_browser_file(ctx: &ViewerRuntimeContext, file: web_sys::File, source: IngestSource) {
    let ctx = ctx.clone();
    spawn_local(async move {
        match platform_host_web::read_raw_file(&file).await {
            Ok(raw) => ctx.dispatch(ViewerAction::SelectFile { file: raw, source }),
            Err(message) => {
                logging::warn!("file read failed: {message}");
                ctx.dispatch(ViewerAction::IngestFailed {
                    message: "Failed to read file".to_string(),
                });
            }
        }
    });
}

#[component]
fn FileInput() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();
    let on_change = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            ingest_browser_file(&ctx, file, IngestSource::Picker);
        }
    };

    view! {
        <input
            id="file-input"
            type="file"
            accept=".pdf,image/*"
            style="display: none"
            on:change=on_change
        />
    }
}

#[component]
fn DropZone() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();
    let model = ctx.model;

    let drop_ctx = ctx.clone();
    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        let dropped = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        match dropped {
            Some(file) => ingest_browser_file(&drop_ctx, file, IngestSource::Drop),
            None => drop_ctx.dispatch(ViewerAction::DragStateChanged { active: false }),
        }
    };
    let over_ctx = ctx.clone();
    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        over_ctx.dispatch(ViewerAction::DragStateChanged { active: true });
    };
    let leave_ctx = ctx.clone();
    let on_drag_leave = move |ev: ev::DragEvent| {
        ev.prevent_default();
        leave_ctx.dispatch(ViewerAction::DragStateChanged { active: false });
    };
    let on_click = move |_| {
        if let Some(input) = document().get_element_by_id("file-input") {
            if let Ok(input) = input.dyn_into::<web_sys::HtmlInputElement>() {
                input.click();
            }
        }
    };

    let error_message = move || {
        model.with(|m| match &m.phase {
            ViewerPhase::Failed { message } => Some(message.clone()),
            _ => None,
        })
    };
    let try_ctx = ctx.clone();

    view! {
        <div
            class=move || {
                if model.with(|m| m.drag_active) {
                    "drop-zone drag-over"
                } else {
                    "drop-zone"
                }
            }
            role="button"
            tabindex=0
            aria-label="Drop PDF or image file here or click to browse"
            on:drop=on_drop
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:click=on_click
        >
            <FileInput />
            {move || match error_message() {
                Some(message) => {
                    let ctx = try_ctx.clone();
                    view! {
                        <div class="error-message">
                            <p>{message}</p>
                            <button
                                type="button"
                                on:click=move |ev: ev::MouseEvent| {
                                    ev.stop_propagation();
                                    ctx.dispatch(ViewerAction::CloseFile);
                                }
                            >
                                "Try another file"
                            </button>
                        </div>
                    }
                        .into_view()
                }
                None => view! {
                    <div class="drop-message">
                        <p>"Drop your PDF or image here or click to browse"</p>
                        <p class="file-hint">
                            "Supports PDF files and images (JPEG, PNG, GIF, WebP, SVG)"
                        </p>
                    </div>
                }
                    .into_view(),
            }}
        </div>
    }
}

#[component]
fn ActiveFileView() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();
    let model = ctx.model;
    let kind = move || model.with(|m| m.viewing().map(|viewing| viewing.kind));
    let metadata = create_memo(move |_| {
        model.with(|m| m.viewing().and_then(|viewing| viewing.metadata.clone()))
    });
    let image_src = create_memo(move |_| {
        model.with(|m| {
            m.viewing()
                .filter(|viewing| viewing.kind == FileKind::Image)
                .map(|viewing| viewing.file.to_data_url())
        })
    });
    let page_surface =
        move || model.with(|m| m.viewing().and_then(|viewing| viewing.page_surface.clone()));

    view! {
        <div class="drop-zone file-loaded">
            <div class="file-container">
                <Show when=move || kind() == Some(FileKind::Document) fallback=|| ()>
                    <DocumentControls />
                </Show>
                <Show when=move || kind() == Some(FileKind::Image) fallback=|| ()>
                    <ImageControls />
                </Show>

                {move || metadata.get().map(|metadata| view! { <MetadataPanel metadata /> })}

                <div class="file-viewer">
                    {move || match kind() {
                        Some(FileKind::Document) => match page_surface() {
                            Some(surface) => view! {
                                <img class="page-surface" src=surface alt="Document page" />
                            }
                                .into_view(),
                            None => view! { <div class="loading">"Loading PDF..."</div> }
                                .into_view(),
                        },
                        Some(FileKind::Image) => match image_src.get() {
                            Some(src) => view! {
                                <img class="image-preview" src=src alt="Preview" />
                            }
                                .into_view(),
                            None => ().into_view(),
                        },
                        None => ().into_view(),
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn DocumentControls() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();
    let model = ctx.model;
    let page_cursor =
        move || model.with(|m| m.viewing().map(|viewing| viewing.page_cursor).unwrap_or(1));
    let page_count = move || model.with(|m| m.viewing().and_then(|viewing| viewing.page_count));
    let page_info = move || match page_count() {
        Some(count) => format!("Page {} of {}", page_cursor(), count),
        None => format!("Page {} of …", page_cursor()),
    };
    let prev_ctx = ctx.clone();
    let next_ctx = ctx.clone();
    let close_ctx = ctx;

    view! {
        <div class="file-controls">
            <button
                type="button"
                disabled=move || page_cursor() <= 1
                on:click=move |_| prev_ctx.dispatch(ViewerAction::PrevPage)
            >
                "Previous"
            </button>
            <span class="page-info">{page_info}</span>
            <button
                type="button"
                disabled=move || page_count().is_some_and(|count| page_cursor() >= count)
                on:click=move |_| next_ctx.dispatch(ViewerAction::NextPage)
            >
                "Next"
            </button>
            <button
                type="button"
                class="close-btn"
                on:click=move |_| close_ctx.dispatch(ViewerAction::CloseFile)
            >
                "Close PDF"
            </button>
        </div>
    }
}

#[component]
fn ImageControls() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();

    view! {
        <div class="file-controls">
            <button
                type="button"
                class="close-btn"
                on:click=move |_| ctx.dispatch(ViewerAction::CloseFile)
            >
                "Close Image"
            </button>
        </div>
    }
}

#[component]
fn MetadataPanel(metadata: MetadataRecord) -> impl IntoView {
    let (heading, rows) = match &metadata {
        MetadataRecord::Document(document) => (
            "Document Information",
            vec![
                ("Title:", document.title.clone()),
                ("Author:", document.author.clone()),
                ("Subject:", document.subject.clone()),
                ("Creator:", document.creator.clone()),
                ("Producer:", document.producer.clone()),
                ("Created:", document.creation_date.clone()),
                ("Modified:", document.modification_date.clone()),
                ("Keywords:", document.keywords.clone()),
                ("Pages:", document.page_count.to_string()),
                ("PDF Version:", document.format_version.clone()),
                ("File Size:", document.file_size_label.clone()),
            ],
        ),
        MetadataRecord::Image(image) => (
            "Image Information",
            vec![
                ("File Name:", image.file_name.clone()),
                ("File Type:", image.mime_type.clone()),
                ("Dimensions:", image.dimensions_label.clone()),
                ("Aspect Ratio:", image.aspect_ratio_label()),
                ("File Size:", image.file_size_label.clone()),
                ("Last Modified:", image.last_modified_label.clone()),
            ],
        ),
    };

    view! {
        <div class="file-metadata">
            <h3>{heading}</h3>
            <div class="metadata-grid">
                {rows
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="metadata-item">
                            <span class="metadata-label">{label}</span>
                            <span class="metadata-value">{value}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn StoredFilesSection() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();
    let model = ctx.model;
    let count = move || model.with(|m| m.stored.len());
    let show = move || model.with(|m| m.show_stored);
    let sorted = create_memo(move |_| {
        model.with(|m| {
            let mut records = m.stored.clone();
            sort_recent_first(&mut records);
            records
        })
    });
    let toggle_ctx = ctx.clone();
    let clear_ctx = ctx;

    view! {
        <Show when=move || (count() > 0) fallback=|| ()>
            <div class="stored-files-section">
                <div class="stored-files-header">
                    <h3>{move || format!("Previously Uploaded Files ({})", count())}</h3>
                    <div class="stored-files-controls">
                        <button
                            type="button"
                            on:click={
                                let ctx = toggle_ctx.clone();
                                move |_| ctx.dispatch(ViewerAction::ToggleStoredList)
                            }
                        >
                            {move || if show() { "Hide Files" } else { "Show Files" }}
                        </button>
                        <button
                            type="button"
                            class="clear-all-btn"
                            title="Clear all stored files"
                            on:click={
                                let ctx = clear_ctx.clone();
                                move |_| ctx.dispatch(ViewerAction::ClearStored)
                            }
                        >
                            "Clear All"
                        </button>
                    </div>
                </div>
                <Show when=show fallback=|| ()>
                    <div class="stored-files-list">
                        <For each=move || sorted.get() key=|record| record.id.clone() let:record>
                            <StoredFileRow record />
                        </For>
                    </div>
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn StoredFileRow(record: StoredFileRecord) -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();
    let open_ctx = ctx.clone();
    let delete_ctx = ctx;
    let open_id = record.id.clone();
    let delete_id = record.id.clone();
    let uploaded = format!("Uploaded: {}", rfc3339_label(&record.created_at));
    let last_opened = record
        .reopened()
        .then(|| format!("Last opened: {}", rfc3339_label(&record.last_accessed_at)));

    view! {
        <div class="stored-file-item">
            <div class="file-info">
                <span class="file-kind-badge">{record.kind.title()}</span>
                <div class="file-details">
                    <div class="file-name" title=record.name.clone()>{record.name.clone()}</div>
                    <div class="file-meta">
                        <span class="file-size">{adaptive_size_label(record.size_bytes)}</span>
                        <span class="file-date">{uploaded}</span>
                        {last_opened.map(|label| view! { <span class="file-date">{label}</span> })}
                    </div>
                </div>
            </div>
            <div class="file-actions">
                <button
                    type="button"
                    title="Open this file"
                    on:click=move |_| {
                        open_ctx.dispatch(ViewerAction::OpenStored { id: open_id.clone() })
                    }
                >
                    "Open"
                </button>
                <button
                    type="button"
                    class="delete-file-btn"
                    title="Delete this file"
                    on:click=move |_| {
                        delete_ctx.dispatch(ViewerAction::DeleteStored { id: delete_id.clone() })
                    }
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

#[component]
fn SampleFilesTable() -> impl IntoView {
    let ctx = expect_context::<ViewerRuntimeContext>();

    view! {
        <div class="sample-files-section">
            <h3>"Sample Files"</h3>
            <table class="sample-files-table">
                <thead>
                    <tr>
                        <th>"File Name"</th>
                        <th>"Type"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {SAMPLE_FILES
                        .iter()
                        .map(|sample| {
                            let sample = *sample;
                            let preview_ctx = ctx.clone();
                            view! {
                                <tr>
                                    <td class="file-name">{sample.name}</td>
                                    <td class="file-type">{sample.kind}</td>
                                    <td class="file-actions">
                                        <a
                                            class="download-btn"
                                            href=sample.path
                                            download=sample.name
                                            title="Download file"
                                        >
                                            "Download"
                                        </a>
                                        <button
                                            type="button"
                                            class="preview-btn"
                                            title="Preview file"
                                            on:click=move |_| preview_sample(&preview_ctx, sample)
                                        >
                                            "Preview"
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

fn preview_sample(ctx: &ViewerRuntimeContext, sample: SampleFile) {
    let ctx = ctx.clone();
    spawn_local(async move {
        match platform_host_web::fetch_bytes(sample.path).await {
            Ok(bytes) => ctx.dispatch(ViewerAction::SelectFile {
                file: RawFile::new(sample.name, sample.mime_type, None, bytes),
                source: IngestSource::Picker,
            }),
            Err(message) => logging::warn!("failed to load sample file: {message}"),
        }
    });
}
