use crate::prelude::*;

use page_loader::loader::{LoaderOutcome, PageElement, RevealTrigger};

use crate::TITLE;

#[component]
pub fn PageView() -> Element {
    log::debug!("PageView Rendered");

    let mut markers = use_signal(PageMarkers::default);
    crate::state_management::use_init_services(markers);

    use_drop(|| log::debug!("PageView Dropped"));

    let (root_class, body_class, overlay_class, content_class, overlay_in_layout) = {
        let page = markers.read();
        (
            page.class_of(PageElement::Document),
            page.class_of(PageElement::Body),
            page.class_of(PageElement::Overlay),
            page.class_of(PageElement::Content),
            page.in_layout(PageElement::Overlay),
        )
    };

    rsx! {
        div {
            id: "pageRoot",
            class: "{root_class}",
            onmounted: move |_| markers.write().mount(PageElement::Document),
            div {
                id: "pageBody",
                class: "{body_class}",
                onmounted: move |_| markers.write().mount(PageElement::Body),
                div {
                    id: "pageLoader",
                    class: "{overlay_class}",
                    style: if !overlay_in_layout { "display: none;" },
                    onmounted: move |_| markers.write().mount(PageElement::Overlay),
                    LoaderOverlay {}
                }
                div {
                    id: "pageContent",
                    class: "{content_class}",
                    onmounted: move |_| markers.write().mount(PageElement::Content),
                    PageContent {}
                }
            }
        }
    }
}

#[component]
fn LoaderOverlay() -> Element {
    rsx! {
        div { class: "loader-inner",
            div { class: "loader-spinner" }
            p { class: "loader-label", "Loading…" }
        }
    }
}

#[component]
fn PageContent() -> Element {
    let status = match state_management::LOADER_OUTCOME() {
        None => "Loading".to_owned(),
        Some(LoaderOutcome::Skipped) => "Opened from this site: no animation".to_owned(),
        Some(LoaderOutcome::Revealed(report)) => format!(
            "Revealed after {} ms ({})",
            (report.elapsed + report.delay).as_millis(),
            match report.trigger {
                RevealTrigger::DocumentLoaded => "document loaded",
                RevealTrigger::MaxWait => "maximum wait reached",
            }
        ),
        Some(LoaderOutcome::Aborted(e)) => format!("Loader disabled: {e}"),
    };
    let config = state_management::LOADER_CONFIG();

    rsx! {
        main { class: "page",
            h1 { "{TITLE}" }
            p { class: "lead",
                "Fresh visits show the loading overlay, in-site navigation shows the page at once."
            }
            dl { class: "timings",
                dt { "Minimum overlay duration" }
                dd { "{config.min_duration_ms} ms" }
                dt { "Maximum wait for the load event" }
                dd { "{config.max_wait_ms} ms" }
                dt { "Fade-out" }
                dd { "{config.fade_out_ms} ms" }
            }
            footer { class: "status", "{status}" }
        }
    }
}
