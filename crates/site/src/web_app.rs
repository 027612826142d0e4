use leptos::*;
use leptos_meta::*;
use viewer_runtime::{ViewerProvider, ViewerShell};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="PDF & Image Viewer" />
        <Meta
            name="description"
            content="Browser-based viewer for PDF and image files with a local file library."
        />

        <main class="site-root">
            <ViewerProvider>
                <ViewerShell />
            </ViewerProvider>
        </main>
    }
}
