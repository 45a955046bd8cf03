/// Convenience result type used across the crate.
pub type BarRaceResult<T> = Result<T, BarRaceError>;

/// Top-level error taxonomy.
///
/// Schema violations inside a well-formed JSON document never reach this type: the schema
/// validator degrades them to an empty dataset. Only input that cannot be read or parsed at all, or
/// invalid caller-supplied options, surface here.
#[derive(thiserror::Error, Debug)]
pub enum BarRaceError {
    /// Invalid caller-provided options or input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation parameters.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when reading, serializing or deserializing data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BarRaceError {
    /// Build a [`BarRaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BarRaceError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`BarRaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
