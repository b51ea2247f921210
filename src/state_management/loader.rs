use dioxus::prelude::*;

use page_loader::prelude::*;

use super::{
    bridge,
    markers::{PageMarkers, SignalSurface},
};

fn load_config() -> LoaderConfig {
    match LoaderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            crate::utils::log_error(e);
            LoaderConfig::default()
        }
    }
}

pub static LOADER_CONFIG: GlobalSignal<LoaderConfig> = Signal::global(load_config);

/// Outcome of the page loader, once it is done
pub static LOADER_OUTCOME: GlobalSignal<Option<LoaderOutcome>> = Signal::global(|| None);

/// Runs the loader controller once for this page view
pub(super) fn use_page_loader_service(markers: Signal<PageMarkers>) {
    use_future(move || async move {
        log::info!("page_loader_service - start");
        let config = *LOADER_CONFIG.peek();
        let page = bridge::read_page_context().await;

        let (handle, readiness) = readiness::channel(ReadyState::Loading);
        spawn(bridge::track_ready_state(handle));

        let surface = SignalSurface::new(markers);
        // onmounted may land after the webview round trips above
        if !wait_for_elements(
            &surface,
            &[PageElement::Overlay, PageElement::Content],
            config.max_wait(),
        )
        .await
        {
            log::warn!("page_loader_service - overlay or content never mounted");
        }

        let mut controller = LoaderController::new(surface, &page, config);
        let outcome = controller.run(readiness).await;

        log::info!("page_loader_service - finished: {outcome:?}");
        *LOADER_OUTCOME.write() = Some(outcome);
    });
}
