use thiserror::Error;

/// Errors raised by the light component system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightError {
    /// The supplied kind is not one of the recognized light kinds.
    #[error("invalid light kind '{0}'")]
    InvalidKind(String),
}
