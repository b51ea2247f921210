mod controller;
mod origin;
pub mod readiness;
mod state;
mod surface;

pub use controller::{reveal_delay, LoaderController, LoaderOutcome, RevealReport, RevealTrigger};
pub use origin::{NavigationOrigin, PageContext};
pub use readiness::{Readiness, ReadinessHandle, ReadyState};
pub use state::{ContentState, LoaderState};
pub use surface::{
    wait_for_elements, Marker, PageElement, PageSurface, RecordingSurface, SurfaceChange,
    SurfaceEvent,
};
