#![windows_subsystem = "windows"]
mod state_management;
mod utils;
mod views;

mod prelude {
    pub use super::state_management::prelude::*;
    pub use dioxus::prelude::*;
}

use prelude::*;

use views::page::PageView;

static TITLE: &'static str = "Page Loader";

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    use_drop(|| log::debug!("App Dropped"));

    rsx! {
        document::Title { "{TITLE}" }
        document::Stylesheet { href: asset!("/assets/page-loader.css") }

        div { id: "app", PageView {} }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    log::info!("starting app");
    use dioxus::desktop::{Config, WindowBuilder};
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_menu(None).with_window(
                WindowBuilder::new()
                    .with_title(TITLE)
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1280, 800))
                    .with_resizable(true),
            ),
        )
        .launch(App)
}
