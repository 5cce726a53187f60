//! Request lifecycle state machine.
//!
//! `Received -> Authorized -> QueryBuilt -> Executed -> Rendered`, with
//! `Failed` reachable from any state that has not yet ended.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CrudError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Received,
    Authorized,
    QueryBuilt,
    Executed,
    Rendered,
    Failed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Authorized => "authorized",
            Self::QueryBuilt => "query_built",
            Self::Executed => "executed",
            Self::Rendered => "rendered",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rendered | Self::Failed)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Received => 0,
            Self::Authorized => 1,
            Self::QueryBuilt => 2,
            Self::Executed => 3,
            Self::Rendered => 4,
            Self::Failed => 5,
        }
    }

    /// Whether `next` may follow `self`.
    pub fn can_advance_to(&self, next: RequestState) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == Self::Failed || next.rank() > self.rank()
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The states one request has passed through.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    history: Vec<RequestState>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            history: vec![RequestState::Received],
        }
    }

    pub fn state(&self) -> RequestState {
        self.history
            .last()
            .copied()
            .unwrap_or(RequestState::Received)
    }

    pub fn history(&self) -> &[RequestState] {
        &self.history
    }

    pub fn advance(&mut self, next: RequestState) -> Result<()> {
        let from = self.state();
        if !from.can_advance_to(next) {
            return Err(CrudError::IllegalTransition { from, to: next });
        }
        debug!(%from, to = %next, "request transition");
        self.history.push(next);
        Ok(())
    }

    /// Move to `Failed` unless the request already ended.
    pub fn fail(&mut self) {
        if !self.state().is_terminal() {
            self.history.push(RequestState::Failed);
        }
    }
}
