use thiserror::Error;

/// Failures of the external fact dependency.
///
/// Always recovered locally by substituting the fallback fact; never
/// surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum FactError {
    #[error("fact request failed: {message}")]
    Transport { message: String },

    #[error("fact service returned HTTP {status}")]
    Status { status: u16 },

    #[error("fact response body is not usable JSON: {message}")]
    Decode { message: String },
}

impl FactError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
