//! Visit state definitions for tracking traversal progress
//!
//! This module defines every state a single page visit passes through.

use serde::Serialize;
use std::fmt;

/// Represents the current state of one page visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitState {
    // ===== Active States =====
    /// Visit is queued with its remaining depth budget
    Pending,

    /// Body has been downloaded
    Fetched,

    /// Every character of the body has been counted
    Classified,

    /// Child links have been extracted and filtered
    LinksExtracted,

    /// Child links are being scheduled
    Recursing,

    // ===== Terminal States =====
    /// Visit finished, possibly with zero children scheduled
    Done,

    /// Fetch or body read failed; this branch stops here
    Aborted,
}

impl VisitState {
    /// Returns true if no further work happens for this visit
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if the visit may still make progress
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true for the successful terminal state
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    ///
    /// Any active state may abort; otherwise states advance one step at a
    /// time. `Pending` may jump to `Done` when the depth budget is exhausted.
    pub fn can_transition_to(&self, next: VisitState) -> bool {
        match (self, next) {
            (Self::Pending, Self::Fetched | Self::Done | Self::Aborted) => true,
            (Self::Fetched, Self::Classified | Self::Aborted) => true,
            (Self::Classified, Self::LinksExtracted | Self::Aborted) => true,
            (Self::LinksExtracted, Self::Recursing | Self::Aborted) => true,
            (Self::Recursing, Self::Done | Self::Aborted) => true,
            _ => false,
        }
    }

    /// Short lowercase name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetched => "fetched",
            Self::Classified => "classified",
            Self::LinksExtracted => "links_extracted",
            Self::Recursing => "recursing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
