//! Callback Types
//!
//! What the identity provider sent back, and what the caller expects.

use crate::core::QueryParams;

/// Raw query parameters appended to the redirect URI by the identity provider.
pub type CallbackParameters = QueryParams;

/// Values the caller generated before the redirect and expects echoed back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checks {
    /// Expected CSRF state.
    pub state: Option<String>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `state` to be echoed back.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}
