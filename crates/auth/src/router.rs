//! Role router and the navigation state machine.
//!
//! `Checking → { RedirectingToLogin, RedirectingToUnauthorized,
//! RedirectingToRoleDashboard, AuthorizedRender, NotFound }`, evaluated per
//! navigation and again whenever the session changes.

use crate::guard::GuardDecision;
use crate::routes::AppRoute;
use crate::session::{AuthSnapshot, Session};

/// Resolve `/dashboard` to the dashboard of the session's role.
///
/// No session, or a role outside the known three, resolves to login.
pub fn dashboard_for(session: Option<&Session>) -> AppRoute {
    session
        .and_then(|s| AppRoute::dashboard_of(s.role()))
        .unwrap_or(AppRoute::Login)
}

/// Per-mount role router.
///
/// Yields a target on the first evaluation and afterwards only when the
/// session identity (username + role) changes.
#[derive(Debug, Default)]
pub struct RoleRouter {
    last: Option<Option<Session>>,
}

impl RoleRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, session: Option<&Session>) -> Option<AppRoute> {
        let changed = match (&self.last, session) {
            (None, _) => true,
            (Some(None), None) => false,
            (Some(Some(prev)), Some(cur)) => !prev.same_identity(cur),
            (Some(_), _) => true,
        };

        if !changed {
            return None;
        }

        self.last = Some(session.cloned());
        Some(dashboard_for(session))
    }
}

/// Navigation state for the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Checking,
    RedirectingToLogin,
    RedirectingToUnauthorized,
    RedirectingToRoleDashboard(AppRoute),
    AuthorizedRender,
    /// The session may enter the section, but no view matches the path.
    NotFound,
}

impl NavState {
    /// Evaluate the guard (and for `/dashboard` the role router) for `route`.
    pub fn resolve(auth: &AuthSnapshot, route: &AppRoute) -> Self {
        if route.is_public() {
            return NavState::AuthorizedRender;
        }

        match auth.guard(route.allowed_roles()) {
            GuardDecision::Suspend => NavState::Checking,
            GuardDecision::RedirectToLogin => NavState::RedirectingToLogin,
            GuardDecision::RedirectToUnauthorized => NavState::RedirectingToUnauthorized,
            GuardDecision::Render if *route == AppRoute::Dashboard => {
                match dashboard_for(auth.session.as_ref()) {
                    AppRoute::Login => NavState::RedirectingToLogin,
                    target => NavState::RedirectingToRoleDashboard(target),
                }
            }
            GuardDecision::Render => NavState::AuthorizedRender,
        }
    }

    /// Evaluate a location path.
    ///
    /// A path no route matches is still guarded by its section's roles and
    /// never resolves to [`NavState::AuthorizedRender`].
    pub fn resolve_path(auth: &AuthSnapshot, path: &str) -> Self {
        if let Some(route) = AppRoute::parse(path) {
            return Self::resolve(auth, &route);
        }
        let Some(roles) = AppRoute::section_roles(path) else {
            return NavState::NotFound;
        };

        match auth.guard(Some(roles)) {
            GuardDecision::Suspend => NavState::Checking,
            GuardDecision::RedirectToLogin => NavState::RedirectingToLogin,
            GuardDecision::RedirectToUnauthorized => NavState::RedirectingToUnauthorized,
            GuardDecision::Render => NavState::NotFound,
        }
    }

    pub fn redirect_target(&self) -> Option<AppRoute> {
        match self {
            NavState::RedirectingToLogin => Some(AppRoute::Login),
            NavState::RedirectingToUnauthorized => Some(AppRoute::Unauthorized),
            NavState::RedirectingToRoleDashboard(target) => Some(*target),
            NavState::Checking | NavState::AuthorizedRender | NavState::NotFound => None,
        }
    }
}

/// "Go to path" capability, superseding the current view without a reload.
pub trait Navigator {
    fn go(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn go(&self, path: &str) {
        self(path)
    }
}

/// Drives a [`Navigator`] from navigation and session events.
///
/// Each redirect target is issued once until the controller settles on a
/// rendered view again.
#[derive(Debug)]
pub struct RouteController<N> {
    navigator: N,
    location: Option<String>,
    state: NavState,
    last_redirect: Option<AppRoute>,
}

impl<N: Navigator> RouteController<N> {
    pub fn new(navigator: N) -> Self {
        Self {
            navigator,
            location: None,
            state: NavState::Checking,
            last_redirect: None,
        }
    }

    /// The location changed to `route`.
    pub fn visit(&mut self, route: AppRoute, auth: &AuthSnapshot) -> NavState {
        self.visit_path(&route.path(), auth)
    }

    /// The location changed to `path`, which need not match any route.
    pub fn visit_path(&mut self, path: &str, auth: &AuthSnapshot) -> NavState {
        self.location = Some(path.to_string());
        self.evaluate(auth)
    }

    /// The session changed; re-evaluate the current location.
    pub fn refresh(&mut self, auth: &AuthSnapshot) -> NavState {
        self.evaluate(auth)
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Route of the current location, if one matches.
    pub fn current(&self) -> Option<AppRoute> {
        self.location.as_deref().and_then(AppRoute::parse)
    }

    fn evaluate(&mut self, auth: &AuthSnapshot) -> NavState {
        let Some(path) = self.location.as_deref() else {
            return self.state;
        };

        let state = NavState::resolve_path(auth, path);
        tracing::debug!(path, ?state, "navigation evaluated");

        match state.redirect_target() {
            Some(target) if self.last_redirect != Some(target) => {
                self.last_redirect = Some(target);
                self.navigator.go(&target.path());
            }
            Some(_) => {}
            None => self.last_redirect = None,
        }

        self.state = state;
        state
    }
}
