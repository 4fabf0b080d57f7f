//! Route authorization decisions.
//!
//! A pure function of (boot flag, session, access policy, return target):
//! the routing layer asks what to do with a requested location and gets back
//! render / placeholder / redirect. Policy lives here; the mechanism of
//! actually navigating belongs to whatever view layer is in use.

use crate::claims::Session;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";
/// Path of the registration view.
pub const REGISTER_PATH: &str = "/register";
/// Default landing view for authenticated users.
pub const DEFAULT_AUTHENTICATED_PATH: &str = "/dashboard";

/// Declarative access requirement for a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Always render.
    Public,
    /// Requires a session.
    AuthenticatedOnly,
    /// Requires NO session (login/register views bounce signed-in users).
    AnonymousOnly,
    /// Requires a session holding at least one of these role tags.
    /// Comparison is case-insensitive after normalization.
    RoleRestricted(Vec<String>),
}

/// Session state as seen by the gate. A snapshot, not a live handle.
#[derive(Debug, Clone)]
pub struct RouteState {
    /// Whether session restoration is still in flight.
    pub booting: bool,
    /// The current session, if any.
    pub session: Option<Session>,
}

/// An originally-requested location, carried through a login redirect so the
/// user lands back where they were headed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTarget {
    /// Path component, e.g. `/events/7`.
    pub path: String,
    /// Raw query string without the leading `?`, if any.
    pub query: Option<String>,
}

impl ReturnTarget {
    /// Build a target from a path and optional query.
    #[must_use]
    pub fn new(path: impl Into<String>, query: Option<String>) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }
}

/// Where a redirect should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Destination path.
    pub to: String,
    /// The location the user originally asked for, when redirecting to
    /// login. The login view hands it back after a successful sign-in.
    pub return_to: Option<ReturnTarget>,
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Render the requested view.
    Render,
    /// Render nothing observable; session restoration is still in flight.
    Placeholder,
    /// Navigate elsewhere instead of rendering.
    Redirect(RedirectTarget),
}

/// Decide what to do with a request for a view guarded by `policy`.
///
/// `requested` is the location being navigated to (captured as the return
/// target when bouncing to login). `captured_return` is a previously captured
/// return target, honored when bouncing an already-authenticated user off an
/// anonymous-only view.
///
/// While `state.booting` is true the answer is always [`Decision::Placeholder`];
/// redirecting before restoration completes would flash users away from pages
/// they are entitled to see.
#[must_use]
pub fn evaluate(
    state: &RouteState,
    policy: &AccessPolicy,
    requested: &ReturnTarget,
    captured_return: Option<&ReturnTarget>,
) -> Decision {
    if state.booting {
        return Decision::Placeholder;
    }

    match policy {
        AccessPolicy::Public => Decision::Render,

        AccessPolicy::AuthenticatedOnly => match &state.session {
            Some(_) => Decision::Render,
            None => redirect_to_login(requested),
        },

        AccessPolicy::RoleRestricted(roles) => match &state.session {
            None => redirect_to_login(requested),
            Some(session) => {
                let required: Vec<&str> = roles.iter().map(String::as_str).collect();
                if session.has_any_role(&required) {
                    Decision::Render
                } else {
                    // Same destination as unauthenticated: there is no
                    // distinct "forbidden" view in this design.
                    redirect_to_login(requested)
                }
            }
        },

        AccessPolicy::AnonymousOnly => match &state.session {
            None => Decision::Render,
            Some(_) => {
                let to = captured_return
                    .filter(|t| t.path != LOGIN_PATH && t.path != REGISTER_PATH)
                    .map_or_else(
                        || DEFAULT_AUTHENTICATED_PATH.to_string(),
                        |t| t.path.clone(),
                    );
                Decision::Redirect(RedirectTarget {
                    to,
                    return_to: None,
                })
            }
        },
    }
}

fn redirect_to_login(requested: &ReturnTarget) -> Decision {
    Decision::Redirect(RedirectTarget {
        to: LOGIN_PATH.to_string(),
        return_to: Some(requested.clone()),
    })
}
