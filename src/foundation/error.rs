/// Convenience result type used across kinetype.
pub type KinetypeResult<T> = Result<T, KinetypeError>;

/// Top-level error taxonomy used by surfaces, configuration and export.
///
/// The frame-rendering core itself never fails for in-contract inputs; these errors come from the
/// edges (fonts, canvas allocation, config parsing, encoding and archive IO).
#[derive(thiserror::Error, Debug)]
pub enum KinetypeError {
    /// Invalid user-provided configuration or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while preparing or drawing onto a raster surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding or writing an exported frame sequence.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Export stopped by an observer before the last frame.
    #[error("export cancelled after {frames_written} frame(s)")]
    Cancelled {
        /// Number of frames handed to the sink before cancellation.
        frames_written: u64,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KinetypeError {
    /// Build a [`KinetypeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KinetypeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`KinetypeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`KinetypeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
