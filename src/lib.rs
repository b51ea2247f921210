//! Loading overlay controller for a page.
//!
//! A fresh visit (no referrer, or a referrer from another site) shows the overlay
//! for at least a minimum duration and until the document is loaded, bounded by a
//! maximum wait. In-site navigation skips the overlay and shows the content at once.
//!
//! The page itself is reached through [`loader::PageSurface`] and
//! [`loader::Readiness`], so the controller runs the same against a webview or an
//! in-memory surface.

pub mod config;
pub mod error;
pub mod loader;

pub mod prelude {
    pub use super::config::LoaderConfig;
    pub use super::error::{ConfigError, LoaderError};
    pub use super::loader::{
        readiness, wait_for_elements, LoaderController, LoaderOutcome, Marker, NavigationOrigin,
        PageContext, PageElement, PageSurface, ReadyState, Readiness, ReadinessHandle,
        RevealReport, RevealTrigger,
    };
}
