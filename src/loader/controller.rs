use std::{pin::pin, time::Duration};

use futures_util::future::{select, Either};
use tokio::time::Instant;

use crate::{config::LoaderConfig, error::LoaderError};

use super::{
    origin::{NavigationOrigin, PageContext},
    readiness::Readiness,
    state::{ContentState, LoaderState},
    surface::{Marker, PageElement, PageSurface},
};

/// Which completion source fired the reveal action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTrigger {
    /// The document reached its fully loaded state
    DocumentLoaded,
    /// The maximum wait elapsed first
    MaxWait,
}

/// What the reveal action measured when it ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealReport {
    pub trigger: RevealTrigger,
    /// Time since the overlay was shown
    pub elapsed: Duration,
    /// Extra time the overlay was held to honor the minimum duration
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderOutcome {
    /// In-site navigation, content shown without any animation
    Skipped,
    /// Overlay shown, then faded out and removed
    Revealed(RevealReport),
    /// Nothing was done
    Aborted(LoaderError),
}

/// How long the overlay must still be held after `elapsed`
pub fn reveal_delay(min_duration: Duration, elapsed: Duration) -> Duration {
    min_duration.saturating_sub(elapsed)
}

/// Drives the loading overlay of one page view
///
/// A controller is built once per page load and never reset: once the overlay is
/// hidden and the content revealed, nothing else happens.
#[derive(Debug)]
pub struct LoaderController<S: PageSurface> {
    surface: S,
    config: LoaderConfig,
    origin: NavigationOrigin,
    loader: LoaderState,
    content: ContentState,
    started_at: Option<Instant>,
    already_hidden: bool,
}

impl<S: PageSurface> LoaderController<S> {
    pub fn new(surface: S, page: &PageContext, config: LoaderConfig) -> Self {
        let origin = page.navigation_origin();
        log::debug!(
            "LoaderController::new - referrer={:?} origin={:?} -> {origin:?}",
            page.referrer,
            page.origin
        );
        Self {
            surface,
            config,
            origin,
            loader: LoaderState::NotStarted,
            content: ContentState::Pending,
            started_at: None,
            already_hidden: false,
        }
    }

    pub fn navigation_origin(&self) -> NavigationOrigin {
        self.origin
    }
    pub fn loader_state(&self) -> LoaderState {
        self.loader
    }
    pub fn content_state(&self) -> ContentState {
        self.content
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Runs the whole protocol for this page view.
    ///
    /// Waits for the structural parse of the document, then either skips the overlay
    /// (in-site navigation) or shows it until the document is loaded, the minimum
    /// duration is honored and the fade-out is over.
    pub async fn run(&mut self, mut readiness: Readiness) -> LoaderOutcome {
        if let Err(e) = self.ensure_not_started() {
            log::warn!("page loader not run again: {e}");
            return LoaderOutcome::Aborted(e);
        }
        readiness.parsed().await;

        if let Err(e) = self.locate_elements() {
            log::info!("page loader disabled: {e}");
            return LoaderOutcome::Aborted(e);
        }

        let outcome = match self.origin {
            NavigationOrigin::Internal => match self.skip() {
                Ok(()) => LoaderOutcome::Skipped,
                Err(e) => LoaderOutcome::Aborted(e),
            },
            NavigationOrigin::External => {
                if let Err(e) = self.start_loading() {
                    return LoaderOutcome::Aborted(e);
                }
                let trigger = self.wait_for_trigger(&mut readiness).await;
                match self.reveal(trigger).await {
                    Some(report) => LoaderOutcome::Revealed(report),
                    None => LoaderOutcome::Aborted(LoaderError::ContentAlreadyRevealed),
                }
            }
        };
        log::info!("page loader finished: {outcome:?}");
        outcome
    }

    /// Both protocols start from a page the loader never touched
    fn ensure_not_started(&self) -> Result<(), LoaderError> {
        match self.loader {
            LoaderState::NotStarted => Ok(()),
            state => Err(LoaderError::AlreadyStarted(state)),
        }
    }

    fn locate_elements(&self) -> Result<(), LoaderError> {
        for element in [PageElement::Overlay, PageElement::Content] {
            if !self.surface.contains(element) {
                return Err(LoaderError::MissingElement(element));
            }
        }
        Ok(())
    }

    /// Skip protocol: the overlay never animates and the content shows at once
    pub fn skip(&mut self) -> Result<(), LoaderError> {
        self.ensure_not_started()?;
        log::debug!("LoaderController::skip - in-site navigation");
        self.surface.add_marker(PageElement::Document, Marker::SkipLoader);
        self.surface.remove_marker(PageElement::Body, Marker::Loading);
        self.surface.add_marker(PageElement::Content, Marker::Loaded);
        self.already_hidden = true;
        self.advance(LoaderState::Hidden);
        self.reveal_content();
        Ok(())
    }

    /// Shows the overlay and starts the clock of the minimum duration
    pub fn start_loading(&mut self) -> Result<(), LoaderError> {
        self.ensure_not_started()?;
        log::debug!("LoaderController::start_loading");
        self.started_at = Some(Instant::now());
        self.surface.add_marker(PageElement::Body, Marker::Loading);
        self.advance(LoaderState::Loading);
        Ok(())
    }

    /// Resolves with whichever comes first: the document being fully loaded or
    /// the maximum wait elapsing since [`LoaderController::start_loading`].
    pub async fn wait_for_trigger(&self, readiness: &mut Readiness) -> RevealTrigger {
        let start = self.started_at.unwrap_or_else(Instant::now);
        let loaded = pin!(readiness.loaded());
        let deadline = pin!(tokio::time::sleep_until(start + self.config.max_wait()));
        match select(loaded, deadline).await {
            Either::Left(_) => RevealTrigger::DocumentLoaded,
            Either::Right(_) => {
                log::debug!(
                    "LoaderController::wait_for_trigger - no load event after {:?}",
                    self.config.max_wait()
                );
                RevealTrigger::MaxWait
            }
        }
    }

    /// The reveal action. Runs at most once: any later call, whatever its trigger,
    /// returns `None` without touching the page.
    pub async fn reveal(&mut self, trigger: RevealTrigger) -> Option<RevealReport> {
        if self.already_hidden {
            log::debug!("LoaderController::reveal - {trigger:?} ignored, already hidden");
            return None;
        }
        let Some(start) = self.started_at else {
            log::warn!("LoaderController::reveal - {trigger:?} fired before the overlay was shown");
            return None;
        };
        self.already_hidden = true;

        let elapsed = start.elapsed();
        let delay = reveal_delay(self.config.min_duration(), elapsed);
        log::debug!("LoaderController::reveal - {trigger:?} after {elapsed:?}, holding {delay:?}");
        tokio::time::sleep(delay).await;

        self.surface.remove_marker(PageElement::Body, Marker::Loading);
        self.surface.add_marker(PageElement::Overlay, Marker::Hidden);
        self.surface.add_marker(PageElement::Content, Marker::Loaded);
        self.advance(LoaderState::Hiding);
        self.reveal_content();

        // Let the fade-out transition play before taking the overlay out of the layout
        tokio::time::sleep(self.config.fade_out()).await;
        self.surface.remove_from_layout(PageElement::Overlay);
        self.advance(LoaderState::Hidden);

        Some(RevealReport {
            trigger,
            elapsed,
            delay,
        })
    }

    fn advance(&mut self, next: LoaderState) {
        if let Err(e) = self.loader.advance(next) {
            log::warn!("{e}");
        }
    }

    fn reveal_content(&mut self) {
        if let Err(e) = self.content.reveal() {
            log::warn!("{e}");
        }
    }
}
