use thiserror::Error;

/// Everything that can go wrong on a backend call, classified so that each
/// layer knows whether a user-visible notice has already been shown.
///
/// `Network` and `Auth` are surfaced by the request pipeline the moment they
/// are detected; callers must check `is_network()` / `is_auth()` before
/// rendering their own message. `Business` is always left for the calling
/// feature to render, since its meaning is context-specific. `Validation`
/// never reaches the network.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received at all (connectivity, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Authentication rejected, or the credential was invalidated mid-session.
    #[error("authentication error: {0}")]
    Auth(String),

    /// A well-formed backend rejection carrying a domain-specific message.
    #[error("{msg}")]
    Business { code: i64, msg: String },

    /// Client-side form input failed local rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// The transport answered with an HTTP error status (500, 404, ...).
    #[error("http status {status}: {msg}")]
    Http { status: u16, msg: String },
}

impl ClientError {
    /// True if the pipeline already showed a generic network notice.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// True if the pipeline already showed an authentication notice.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    /// The business error code, if this is a business rejection.
    pub fn business_code(&self) -> Option<i64> {
        match self {
            ClientError::Business { code, .. } => Some(*code),
            _ => None,
        }
    }
}
