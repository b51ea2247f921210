mod bridge;
mod loader;
mod markers;

pub fn use_init_services(markers: dioxus::prelude::Signal<markers::PageMarkers>) {
    log::debug!("init_services - start");
    loader::use_page_loader_service(markers);
    log::debug!("init_services - finished");
}

pub mod prelude {
    pub use super::markers::{PageMarkers, SignalSurface};

    pub mod state_management {
        pub use super::super::loader::{LOADER_CONFIG, LOADER_OUTCOME};
    }
}
