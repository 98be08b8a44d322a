/// Result alias used across the crate.
pub type SlateResult<T> = Result<T, SlateError>;

/// Errors produced while preparing or running a slate render.
#[derive(thiserror::Error, Debug)]
pub enum SlateError {
    /// The input path is malformed or not a supported media type.
    #[error("invalid input path: {0}")]
    InvalidPath(String),

    /// No frame files were found for an image sequence.
    #[error("empty sequence: {0}")]
    EmptySequence(String),

    /// Output stem or extension was not configured.
    #[error("missing output path: {0}")]
    MissingOutputPath(String),

    /// A configuration value is out of range or refers to an unknown field.
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame count of a video container could not be determined.
    #[error("probe error: {0}")]
    Probe(String),

    /// The encoder process could not be started.
    #[error("spawn error: {0}")]
    Spawn(String),

    /// The encoder process exited with a nonzero status.
    #[error("render failed: {0}")]
    RenderFailure(String),

    /// The render was cancelled and its encoder process killed.
    #[error("render cancelled: {0}")]
    Cancelled(String),

    /// A render is already running on this supervisor.
    #[error("render in progress: {0}")]
    RenderInProgress(String),

    /// Wrapped lower-level failure (I/O and friends).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlateError {
    /// Build [`SlateError::InvalidPath`].
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Build [`SlateError::EmptySequence`].
    pub fn empty_sequence(msg: impl Into<String>) -> Self {
        Self::EmptySequence(msg.into())
    }

    /// Build [`SlateError::MissingOutputPath`].
    pub fn missing_output_path(msg: impl Into<String>) -> Self {
        Self::MissingOutputPath(msg.into())
    }

    /// Build [`SlateError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`SlateError::Probe`].
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Build [`SlateError::Spawn`].
    pub fn spawn(msg: impl Into<String>) -> Self {
        Self::Spawn(msg.into())
    }

    /// Build [`SlateError::RenderFailure`].
    pub fn render_failure(msg: impl Into<String>) -> Self {
        Self::RenderFailure(msg.into())
    }

    /// Build [`SlateError::Cancelled`].
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Build [`SlateError::RenderInProgress`].
    pub fn render_in_progress(msg: impl Into<String>) -> Self {
        Self::RenderInProgress(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
