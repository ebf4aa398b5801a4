// Per-view load state with stale-response protection
use crate::application::dashboard_repository::FetchError;
use serde::Serialize;

/// What a view shows: exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Loaded(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(model) => Some(model),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Hands out increasing tokens; only the newest one may update a view.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// Owns one view's state. Each fetch calls [`ViewSlot::begin`] and hands
/// the token back with the outcome; results of superseded fetches are
/// dropped instead of overwriting newer data.
#[derive(Debug)]
pub struct ViewSlot<T> {
    name: String,
    state: ViewState<T>,
    sequencer: RequestSequencer,
}

impl<T> ViewSlot<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ViewState::Loading,
            sequencer: RequestSequencer::default(),
        }
    }

    pub fn begin(&mut self) -> RequestToken {
        self.state = ViewState::Loading;
        self.sequencer.issue()
    }

    /// Returns whether the result was applied.
    pub fn resolve(&mut self, token: RequestToken, result: Result<T, FetchError>) -> bool {
        if !self.sequencer.is_current(token) {
            tracing::debug!("Discarding stale response {:?} for view {}", token, self.name);
            return false;
        }

        self.state = match result {
            Ok(model) => {
                tracing::info!("View {} loaded", self.name);
                ViewState::Loaded(model)
            }
            Err(e) => {
                tracing::error!("Error loading view {}: {}", self.name, e);
                ViewState::Error(e.to_string())
            }
        };
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }
}
