//! Route guard: decide whether a protected view may render.

use thiserror::Error;

use crate::roles::Role;
use crate::routes::AppRoute;
use crate::session::{AuthSnapshot, Session};

/// Outcome of guarding a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Storage not hydrated yet; render nothing and decide later.
    Suspend,
    RedirectToLogin,
    RedirectToUnauthorized,
    Render,
}

impl GuardDecision {
    /// Route to navigate to, for redirecting decisions.
    pub fn redirect_target(&self) -> Option<AppRoute> {
        match self {
            GuardDecision::RedirectToLogin => Some(AppRoute::Login),
            GuardDecision::RedirectToUnauthorized => Some(AppRoute::Unauthorized),
            GuardDecision::Suspend | GuardDecision::Render => None,
        }
    }
}

/// Gate a view on the hydration flag, the session and an optional role set.
///
/// - No IO
/// - No side effects
pub fn guard(
    auth_checked: bool,
    session: Option<&Session>,
    allowed_roles: Option<&[Role]>,
) -> GuardDecision {
    if !auth_checked {
        return GuardDecision::Suspend;
    }

    let Some(session) = session else {
        return GuardDecision::RedirectToLogin;
    };

    match allowed_roles {
        Some(roles) if !roles.contains(session.role()) => GuardDecision::RedirectToUnauthorized,
        _ => GuardDecision::Render,
    }
}

impl AuthSnapshot {
    pub fn guard(&self, allowed_roles: Option<&[Role]>) -> GuardDecision {
        guard(self.auth_checked, self.session.as_ref(), allowed_roles)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not logged in")]
    Unauthenticated,

    #[error("forbidden for role '{0}'")]
    Forbidden(Role),
}

/// Action-level form of the guard: check before issuing a request.
pub fn authorize<'a>(
    session: Option<&'a Session>,
    allowed_roles: &[Role],
) -> Result<&'a Session, AuthzError> {
    let session = session.ok_or(AuthzError::Unauthenticated)?;
    if allowed_roles.contains(session.role()) {
        Ok(session)
    } else {
        Err(AuthzError::Forbidden(session.role().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn session(role: Role) -> Session {
        Session::new("user", role, "1", "acc", "ref").unwrap()
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::Admin),
            Just(Role::Engineer),
            Just(Role::Nurse),
            "[a-z]{1,8}".prop_map(Role::from),
        ]
    }

    fn any_roles() -> impl Strategy<Value = Option<Vec<Role>>> {
        proptest::option::of(proptest::collection::vec(any_role(), 0..4))
    }

    #[test]
    fn nurse_on_admin_route_is_unauthorized() {
        let s = session(Role::Nurse);
        assert_eq!(
            guard(true, Some(&s), Some(&[Role::Admin])),
            GuardDecision::RedirectToUnauthorized
        );
        assert_eq!(
            GuardDecision::RedirectToUnauthorized.redirect_target(),
            Some(AppRoute::Unauthorized)
        );
    }

    #[test]
    fn empty_role_set_admits_nobody() {
        let s = session(Role::Admin);
        assert_eq!(
            guard(true, Some(&s), Some(&[])),
            GuardDecision::RedirectToUnauthorized
        );
    }

    #[test]
    fn authorize_reports_the_offending_role() {
        let s = session(Role::Engineer);
        assert_eq!(
            authorize(Some(&s), &[Role::Nurse]),
            Err(AuthzError::Forbidden(Role::Engineer))
        );
        assert_eq!(authorize(None, &[Role::Nurse]), Err(AuthzError::Unauthenticated));
        assert!(authorize(Some(&s), &[Role::Engineer, Role::Admin]).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: before hydration the guard always suspends.
        #[test]
        fn unchecked_always_suspends(role in proptest::option::of(any_role()), roles in any_roles()) {
            let s = role.map(session);
            prop_assert_eq!(
                guard(false, s.as_ref(), roles.as_deref()),
                GuardDecision::Suspend
            );
        }

        /// Property: after hydration, no session always means login.
        #[test]
        fn no_session_always_goes_to_login(roles in any_roles()) {
            prop_assert_eq!(
                guard(true, None, roles.as_deref()),
                GuardDecision::RedirectToLogin
            );
        }

        /// Property: a session renders iff its role is allowed (or no set is given).
        #[test]
        fn renders_iff_role_allowed(role in any_role(), roles in any_roles()) {
            let s = session(role.clone());
            let decision = guard(true, Some(&s), roles.as_deref());
            let allowed = roles.as_ref().map_or(true, |r| r.contains(&role));

            if allowed {
                prop_assert_eq!(decision, GuardDecision::Render);
            } else {
                prop_assert_eq!(decision, GuardDecision::RedirectToUnauthorized);
            }
        }
    }
}
