//! Shared types used across smokecheck modules
//!
//! Contains the check outcome and the run report handed back to callers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of the background-picker absence check.
///
/// A `Failed` outcome does not abort the run; it only changes the printed
/// result line. Callers that want a hard failure must check `is_pass()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    /// The absence locator was not visible on the start screen
    Passed,
    /// The absence locator was visible on the start screen
    Failed,
}

impl CheckOutcome {
    /// Outcome from a visibility probe of the absence locator
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Self::Failed
        } else {
            Self::Passed
        }
    }

    /// Whether the check passed
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// The exact stdout line for this outcome.
    ///
    /// These strings are the result protocol consumed by surrounding
    /// automation and must not be reworded.
    pub fn report_line(&self) -> &'static str {
        match self {
            Self::Passed => "PASS: Background picker not on start screen",
            Self::Failed => "FAIL: Background picker found on start screen",
        }
    }
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "pass"),
            Self::Failed => write!(f, "fail"),
        }
    }
}

/// Result of a completed verification run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Outcome of the absence check
    pub outcome: CheckOutcome,
    /// Where the screenshot was written
    pub screenshot: PathBuf,
    /// How long the readiness wait took
    pub readiness_elapsed: Duration,
}

impl RunReport {
    /// Create a new run report
    pub fn new(outcome: CheckOutcome, screenshot: PathBuf, readiness_elapsed: Duration) -> Self {
        Self {
            outcome,
            screenshot,
            readiness_elapsed,
        }
    }
}
