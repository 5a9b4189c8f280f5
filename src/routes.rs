//! The navigable destinations, their static access-control metadata, and
//! the authorization gate evaluated before every navigation.

use crate::models::{Session, UserType};
use crate::shell::Severity;

/// Notice shown when an unauthenticated user hits a protected route.
pub const NOTICE_LOGIN_REQUIRED: &str = "Please log in first";
/// Notice shown when a logged-in user hits a route for the other role.
pub const NOTICE_NOT_AUTHORIZED: &str = "You are not authorized to access this page";

/// Every named destination in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    PersonalHome,
    EnterpriseInput,
    EnterpriseConfirm,
    Result,
    NotFound,
}

/// Static access-control metadata attached to a destination. Defined at
/// startup, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequirement {
    pub requires_auth: bool,
    pub allowed_user_type: Option<UserType>,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::PersonalHome => "/personal",
            Route::EnterpriseInput => "/input",
            Route::EnterpriseConfirm => "/confirm",
            Route::Result => "/result",
            Route::NotFound => "/404",
        }
    }

    pub fn requirement(&self) -> RouteRequirement {
        match self {
            Route::Login | Route::NotFound => RouteRequirement {
                requires_auth: false,
                allowed_user_type: None,
            },
            Route::PersonalHome => RouteRequirement {
                requires_auth: true,
                allowed_user_type: Some(UserType::Individual),
            },
            Route::EnterpriseInput | Route::EnterpriseConfirm | Route::Result => {
                RouteRequirement {
                    requires_auth: true,
                    allowed_user_type: Some(UserType::Enterprise),
                }
            }
        }
    }

    /// Resolve a path to a destination; anything unknown is the not-found
    /// page, as with a catch-all route.
    pub fn from_path(path: &str) -> Route {
        match path {
            "/" | "/login" => Route::Login,
            "/personal" => Route::PersonalHome,
            "/input" => Route::EnterpriseInput,
            "/confirm" => Route::EnterpriseConfirm,
            "/result" => Route::Result,
            _ => Route::NotFound,
        }
    }
}

/// The outcome of the gate: proceed, or go somewhere safer (optionally
/// telling the user why).
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    Allow,
    Redirect {
        to: Route,
        notice: Option<(Severity, &'static str)>,
    },
}

/// The home destination for a role; with no (or an unknown) profile the
/// only safe place is the login page.
pub fn home_for_role(user_type: Option<UserType>) -> Route {
    match user_type {
        Some(UserType::Individual) => Route::PersonalHome,
        Some(UserType::Enterprise) => Route::EnterpriseInput,
        None => Route::Login,
    }
}

/// Decide whether a navigation may proceed. Total over all (session, target)
/// pairs and deterministic; the rules are evaluated in order:
///
/// 1. protected target, no token -> login, "please log in"
/// 2. protected target, wrong role -> that role's home, "not authorized"
/// 3. login page while already authenticated -> role home
/// 4. otherwise allow
pub fn decide(session: &Session, target: Route) -> RouteDecision {
    let requirement = target.requirement();

    if requirement.requires_auth {
        if !session.is_logged_in() {
            return RouteDecision::Redirect {
                to: Route::Login,
                notice: Some((Severity::Warning, NOTICE_LOGIN_REQUIRED)),
            };
        }
        if let Some(allowed) = requirement.allowed_user_type {
            if session.user_type() != Some(allowed) {
                return RouteDecision::Redirect {
                    to: home_for_role(session.user_type()),
                    notice: Some((Severity::Error, NOTICE_NOT_AUTHORIZED)),
                };
            }
        }
    }

    if target == Route::Login && session.is_logged_in() {
        return RouteDecision::Redirect {
            to: home_for_role(session.user_type()),
            notice: None,
        };
    }

    RouteDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    fn session_for(user_type: UserType) -> Session {
        Session::authenticated(
            "t",
            UserProfile {
                id: 7,
                user_name: "acme".to_string(),
                user_type,
                created_at: None,
                updated_at: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_anonymous_user_is_sent_to_login() {
        let decision = decide(&Session::empty(), Route::EnterpriseInput);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                to: Route::Login,
                notice: Some((Severity::Warning, NOTICE_LOGIN_REQUIRED)),
            }
        );
    }

    #[test]
    fn test_wrong_role_is_sent_home_with_notice() {
        let decision = decide(&session_for(UserType::Individual), Route::EnterpriseInput);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                to: Route::PersonalHome,
                notice: Some((Severity::Error, NOTICE_NOT_AUTHORIZED)),
            }
        );

        let decision = decide(&session_for(UserType::Enterprise), Route::PersonalHome);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                to: Route::EnterpriseInput,
                notice: Some((Severity::Error, NOTICE_NOT_AUTHORIZED)),
            }
        );
    }

    #[test]
    fn test_authenticated_user_cannot_resee_login() {
        let decision = decide(&session_for(UserType::Enterprise), Route::Login);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                to: Route::EnterpriseInput,
                notice: None,
            }
        );
    }

    #[test]
    fn test_matching_role_is_allowed() {
        assert_eq!(
            decide(&session_for(UserType::Enterprise), Route::EnterpriseConfirm),
            RouteDecision::Allow
        );
        assert_eq!(
            decide(&session_for(UserType::Individual), Route::PersonalHome),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_public_routes_are_always_allowed() {
        assert_eq!(decide(&Session::empty(), Route::Login), RouteDecision::Allow);
        assert_eq!(
            decide(&Session::empty(), Route::NotFound),
            RouteDecision::Allow
        );
        assert_eq!(
            decide(&session_for(UserType::Individual), Route::NotFound),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_decision_is_deterministic() {
        let session = session_for(UserType::Individual);
        let first = decide(&session, Route::Result);
        for _ in 0..10 {
            assert_eq!(decide(&session, Route::Result), first);
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::from_path("/no-such-page"), Route::NotFound);
        assert_eq!(Route::from_path("/input"), Route::EnterpriseInput);
    }
}
