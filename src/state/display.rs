//! Display state - what the widget currently shows.

use crate::format::ZERO_DURATION;
use crate::types::TimerStatus;

/// Render-facing snapshot of the stopwatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub status: TimerStatus,
    /// Formatted `HH:MM:SS` duration.
    pub duration: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            status: TimerStatus::Idle,
            duration: ZERO_DURATION.to_string(),
        }
    }
}

impl DisplayState {
    /// Overwrite every field the patch sets. No deep merge.
    pub fn apply(&mut self, patch: DisplayPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
    }
}

/// Partial update to a [`DisplayState`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayPatch {
    pub status: Option<TimerStatus>,
    pub duration: Option<String>,
}

impl DisplayPatch {
    pub fn status(status: TimerStatus) -> Self {
        Self {
            status: Some(status),
            duration: None,
        }
    }

    pub fn duration(duration: impl Into<String>) -> Self {
        Self {
            status: None,
            duration: Some(duration.into()),
        }
    }

    /// Back to the initial `{ Idle, "00:00:00" }`.
    pub fn reset() -> Self {
        Self {
            status: Some(TimerStatus::Idle),
            duration: Some(ZERO_DURATION.to_string()),
        }
    }

    pub fn with_status(mut self, status: TimerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}
