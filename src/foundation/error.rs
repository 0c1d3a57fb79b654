/// Convenience result type used across daygarden.
pub type GardenResult<T> = Result<T, GardenError>;

/// Error taxonomy for the boundary layers (config, catalog, CLI).
///
/// The layout engine itself is total and never produces these.
#[derive(thiserror::Error, Debug)]
pub enum GardenError {
    /// Invalid user-provided configuration or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or parsing configuration input.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing output.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl GardenError {
    /// Build a [`GardenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GardenError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GardenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
