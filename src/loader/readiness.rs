use std::str::FromStr;

use tokio::sync::watch;

use crate::error::LoaderError;

/// `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReadyState {
    /// The document is still being parsed
    #[default]
    Loading,
    /// Parsing is done, sub-resources may still be loading
    Interactive,
    /// Fully loaded, the `load` event fires
    Complete,
}

impl FromStr for ReadyState {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loading" => Ok(Self::Loading),
            "interactive" => Ok(Self::Interactive),
            "complete" => Ok(Self::Complete),
            other => Err(LoaderError::UnknownReadyState(other.to_owned())),
        }
    }
}

/// Creates a readiness channel starting at `initial`
pub fn channel(initial: ReadyState) -> (ReadinessHandle, Readiness) {
    let (tx, rx) = watch::channel(initial);
    (ReadinessHandle { tx }, Readiness { rx })
}

/// Publishing side, owned by whatever observes the real document
#[derive(Debug)]
pub struct ReadinessHandle {
    tx: watch::Sender<ReadyState>,
}

impl ReadinessHandle {
    /// Publishes a new ready state. The document never goes back, so older states
    /// are ignored.
    pub fn set(&self, state: ReadyState) {
        self.tx.send_if_modified(|current| {
            if state > *current {
                log::debug!("document ready state {current:?} -> {state:?}");
                *current = state;
                true
            } else {
                false
            }
        });
    }

    pub fn current(&self) -> ReadyState {
        *self.tx.borrow()
    }

    /// Whether the controller still listens
    pub fn is_observed(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Observing side, consumed by the loader controller
#[derive(Debug, Clone)]
pub struct Readiness {
    rx: watch::Receiver<ReadyState>,
}

impl Readiness {
    pub fn current(&self) -> ReadyState {
        *self.rx.borrow()
    }

    /// Resolves once the structural parse is over (`DOMContentLoaded`).
    ///
    /// If the publisher disappears before that, there is nothing left to wait for
    /// and this resolves as well.
    pub async fn parsed(&mut self) {
        if self
            .rx
            .wait_for(|state| *state != ReadyState::Loading)
            .await
            .is_err()
        {
            log::warn!("readiness source closed before the document was parsed");
        }
    }

    /// Resolves once the document is fully loaded, immediately if it already is.
    ///
    /// Never resolves if the publisher disappears first: a load event that never
    /// fires is covered by the maximum wait of the controller.
    pub async fn loaded(&mut self) {
        if self
            .rx
            .wait_for(|state| *state == ReadyState::Complete)
            .await
            .is_err()
        {
            log::debug!("readiness source closed before the document was loaded");
            std::future::pending::<()>().await;
        }
    }
}
