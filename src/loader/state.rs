use crate::error::LoaderError;

/// Lifecycle of the loading overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LoaderState {
    #[default]
    NotStarted,
    /// Overlay visible
    Loading,
    /// Overlay fading out, content fading in
    Hiding,
    /// Overlay out of the layout. Terminal.
    Hidden,
}

impl LoaderState {
    /// Whether `next` is a legal successor of `self`.
    ///
    /// Transitions are strictly ordered, except `NotStarted -> Hidden` which is taken
    /// when the overlay is skipped altogether.
    pub fn can_advance_to(self, next: LoaderState) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Loading)
                | (Self::NotStarted, Self::Hidden)
                | (Self::Loading, Self::Hiding)
                | (Self::Hiding, Self::Hidden)
        )
    }

    pub fn advance(&mut self, next: LoaderState) -> Result<(), LoaderError> {
        if !self.can_advance_to(next) {
            return Err(LoaderError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        log::debug!("loader state {self:?} -> {next:?}");
        *self = next;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Lifecycle of the main content visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentState {
    #[default]
    Pending,
    Revealed,
}

impl ContentState {
    /// Content is revealed at most once per page load
    pub fn reveal(&mut self) -> Result<(), LoaderError> {
        match self {
            Self::Pending => {
                log::debug!("content revealed");
                *self = Self::Revealed;
                Ok(())
            }
            Self::Revealed => Err(LoaderError::ContentAlreadyRevealed),
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animated_path_is_accepted() {
        let mut state = LoaderState::default();
        state.advance(LoaderState::Loading).unwrap();
        state.advance(LoaderState::Hiding).unwrap();
        state.advance(LoaderState::Hidden).unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn skip_jumps_straight_to_hidden() {
        let mut state = LoaderState::NotStarted;
        state.advance(LoaderState::Hidden).unwrap();
        assert_eq!(state, LoaderState::Hidden);
    }

    #[test]
    fn out_of_order_transitions_are_rejected() {
        let mut state = LoaderState::Loading;
        assert_eq!(
            state.advance(LoaderState::Hidden),
            Err(LoaderError::InvalidTransition {
                from: LoaderState::Loading,
                to: LoaderState::Hidden
            })
        );
        assert_eq!(state, LoaderState::Loading);

        let mut state = LoaderState::Hidden;
        for next in [
            LoaderState::NotStarted,
            LoaderState::Loading,
            LoaderState::Hiding,
            LoaderState::Hidden,
        ] {
            assert!(state.advance(next).is_err());
        }
        assert_eq!(state, LoaderState::Hidden);
    }

    #[test]
    fn content_is_revealed_once() {
        let mut content = ContentState::default();
        assert!(!content.is_revealed());
        content.reveal().unwrap();
        assert!(content.is_revealed());
        assert_eq!(content.reveal(), Err(LoaderError::ContentAlreadyRevealed));
    }
}
