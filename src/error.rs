use crate::loader::{LoaderState, PageElement};

/// Errors raised inside the loader state machine
///
/// None of them ever reach the page: the controller turns them into a
/// [`LoaderOutcome`](crate::loader::LoaderOutcome) or a log line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError {
    #[error("required page element {0} is missing")]
    MissingElement(PageElement),
    #[error("loader cannot go from {from:?} to {to:?}")]
    InvalidTransition { from: LoaderState, to: LoaderState },
    #[error("content was already revealed")]
    ContentAlreadyRevealed,
    #[error("loader already ran, it is {0:?}")]
    AlreadyStarted(LoaderState),
    #[error("unknown document ready state {0:?}")]
    UnknownReadyState(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: expected a number of milliseconds")]
    InvalidValue { var: &'static str, value: String },
}
