use crate::foundation::error::{SlateError, SlateResult};

/// Message published from the supervision task to the presentation side.
///
/// Ordering contract: zero or more `Progress` events with non-decreasing `percent`, then at most
/// one of `Completed` / `Failed`. A `Completed` event is always preceded by `Progress(100)`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    /// Percentage of frames encoded so far, `0..=100`.
    Progress {
        /// Percent complete.
        percent: u8,
    },
    /// Encoder exited successfully.
    Completed,
    /// Encoder exited with an error.
    Failed {
        /// Exit status and the tail of the encoder's output.
        detail: String,
    },
}

impl RenderEvent {
    /// `true` for `Completed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderEvent::Completed | RenderEvent::Failed { .. })
    }
}

/// Lifecycle of a supervisor's current job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    /// Nothing started yet.
    #[default]
    Idle,
    /// Encoder process is alive.
    Running,
    /// Last job finished successfully.
    Completed,
    /// Last job could not start or exited nonzero.
    Failed,
    /// Last job was cancelled and its process killed.
    Abandoned,
}

/// How a job ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Exit status 0.
    Completed,
    /// Nonzero exit or lost process.
    Failed {
        /// Same text as the `Failed` event.
        detail: String,
    },
    /// Cancelled before the encoder finished.
    Abandoned,
}

impl RenderOutcome {
    /// State the supervisor settles in after this outcome.
    pub fn state(&self) -> RenderState {
        match self {
            RenderOutcome::Completed => RenderState::Completed,
            RenderOutcome::Failed { .. } => RenderState::Failed,
            RenderOutcome::Abandoned => RenderState::Abandoned,
        }
    }

    /// `Ok` only for [`RenderOutcome::Completed`]; an abandoned job is
    /// [`SlateError::Cancelled`], not a render failure.
    pub fn into_result(self) -> SlateResult<()> {
        match self {
            RenderOutcome::Completed => Ok(()),
            RenderOutcome::Failed { detail } => Err(SlateError::render_failure(detail)),
            RenderOutcome::Abandoned => Err(SlateError::cancelled(
                "encoder was killed before it finished; output may be incomplete",
            )),
        }
    }
}
