use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Which kind of account is logged in; the backend sends the discriminant
/// in SCREAMING_SNAKE_CASE.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    #[serde(rename = "INDIVIDUAL")]
    Individual,
    #[serde(rename = "ENTERPRISE")]
    Enterprise,
}

/// The identity the backend established at login. Immutable once set,
/// except by a fresh login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub user_name: String,
    pub user_type: UserType,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The client's belief about whether a user is authenticated and who they
/// are.
///
/// Invariant: `token` is non-empty if and only if `profile` is present. The
/// constructors are the only way to build one, so a half-updated session
/// cannot be observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: String,
    profile: Option<UserProfile>,
}

impl Session {
    /// The logged-out session.
    pub fn empty() -> Self {
        Session::default()
    }

    /// A fully established session. Returns `None` when the token is blank,
    /// which keeps the token/profile invariant intact.
    pub fn authenticated(token: impl Into<String>, profile: UserProfile) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            return None;
        }
        Some(Session {
            token,
            profile: Some(profile),
        })
    }

    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.profile.as_ref().map(|p| p.user_type)
    }
}

/// What actually lands in durable storage: the session fields plus a stamp
/// of when they were mirrored. Storage is a passive mirror of `Session`,
/// not a second owner.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PersistedSession {
    pub token: String,
    pub profile: Option<UserProfile>,
    pub saved_at: i64,
}

impl PersistedSession {
    pub fn of(session: &Session) -> Self {
        PersistedSession {
            token: session.token.clone(),
            profile: session.profile.clone(),
            saved_at: Utc::now().timestamp(),
        }
    }

    /// Rehydrate a `Session`, refusing mirrors that would violate the
    /// token/profile invariant (e.g. a token without a profile left behind
    /// by an interrupted write).
    pub fn into_session(self) -> Option<Session> {
        match (self.token.is_empty(), self.profile) {
            (false, Some(profile)) => Session::authenticated(self.token, profile),
            (true, None) => Some(Session::empty()),
            _ => None,
        }
    }
}
