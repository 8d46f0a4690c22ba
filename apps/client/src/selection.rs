//! Selection Controller — which candidate, if any, is expanded for inspection.
//!
//! Holds a filename rather than a reference into the store, so every store
//! replacement must be followed by [`SelectionController::reset`].

use tracing::debug;

use crate::store::RankingStore;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    None,
    Selected(String),
}

#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks a ranked candidate. Filenames not in the current ranked list are
    /// ignored and `false` is returned.
    pub fn select(&mut self, filename: &str, store: &RankingStore) -> bool {
        if !store.contains_ranked(filename) {
            debug!(filename, "ignoring selection of unranked candidate");
            return false;
        }
        self.state = SelectionState::Selected(filename.to_string());
        true
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::None;
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn current(&self) -> Option<&str> {
        match &self.state {
            SelectionState::None => None,
            SelectionState::Selected(filename) => Some(filename.as_str()),
        }
    }

    pub fn is_selected(&self, filename: &str) -> bool {
        self.current() == Some(filename)
    }
}
