use crate::foundation::core::Profile;

/// Convenience result type used across tickdown.
pub type TickdownResult<T> = Result<T, TickdownError>;

/// Top-level error taxonomy.
///
/// Malformed request parameters never appear here: the config resolver absorbs them into
/// defaults. Only the external collaborators (rasterizer, encoder) can fail a request.
#[derive(thiserror::Error, Debug)]
pub enum TickdownError {
    /// Invalid typed data handed to a library API.
    #[error("validation error: {0}")]
    Validation(String),

    /// The rasterizer failed or broke its output contract.
    #[error("render error ({profile}): {message}")]
    Render {
        /// Profile of the failing request.
        profile: Profile,
        /// Human readable cause.
        message: String,
    },

    /// The encoder failed; no partial output is produced.
    #[error("encode error ({profile}): {message}")]
    Encode {
        /// Profile of the failing request.
        profile: Profile,
        /// Human readable cause.
        message: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TickdownError {
    /// Build a [`TickdownError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TickdownError::Render`] value.
    pub fn render(profile: Profile, msg: impl Into<String>) -> Self {
        Self::Render {
            profile,
            message: msg.into(),
        }
    }

    /// Build a [`TickdownError::Encode`] value.
    pub fn encode(profile: Profile, msg: impl Into<String>) -> Self {
        Self::Encode {
            profile,
            message: msg.into(),
        }
    }

    /// Profile the failure belongs to, when the error came from a collaborator.
    pub fn profile(&self) -> Option<Profile> {
        match self {
            Self::Render { profile, .. } | Self::Encode { profile, .. } => Some(*profile),
            Self::Validation(_) | Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
