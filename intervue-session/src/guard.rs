//! Navigation guard
//!
//! Runs before every navigation attempt and decides whether to proceed or
//! redirect, based on session validity and the destination's role
//! requirements.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::routes::{self, home_route, RouteTable};
use crate::store::SessionStore;

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigation to the requested destination may proceed
    Proceed,
    /// Navigation must go to this path instead
    Redirect(String),
}

impl Navigation {
    fn redirect(path: &str) -> Self {
        Navigation::Redirect(path.to_string())
    }
}

/// Sink for redirect side effects.
///
/// The HTTP layer redirects through this seam when it detects an expired or
/// invalid session, so it never needs to know what navigation looks like in
/// the host application.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Navigator that remembers where it was last sent
#[derive(Default)]
pub struct RecordingNavigator {
    last: Mutex<Option<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent redirect target, if any
    pub fn last(&self) -> Option<String> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(path.to_string());
        }
    }
}

/// Per-navigation access decision
pub struct NavigationGuard {
    session: Arc<SessionStore>,
    routes: RouteTable,
}

impl NavigationGuard {
    /// Create a guard over the standard route table
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            routes: RouteTable::standard(),
        }
    }

    /// Create a guard over a custom route table
    pub fn with_routes(session: Arc<SessionStore>, routes: RouteTable) -> Self {
        Self { session, routes }
    }

    /// Decide the outcome of navigating to `to`.
    ///
    /// Reloads the session from storage and recomputes token validity first,
    /// so a session expired in another part of the application is noticed
    /// here. No transition history is kept; every call stands alone.
    pub fn resolve(&self, to: &str) -> Navigation {
        if let Err(e) = self.session.load_from_storage() {
            warn!("Failed to reload session from storage: {}", e);
        }

        let token_valid = self.session.check_token_validity();
        let authenticated = token_valid && self.session.is_authenticated();
        let home = home_route(self.session.role());

        // Authenticated users have no business on the auth pages
        if authenticated && (to == routes::LOGIN || to == routes::REGISTER) {
            debug!("Redirecting authenticated user from {} to {}", to, home);
            return Navigation::redirect(home);
        }

        // The root path only dispatches by auth state and role
        if to == routes::ROOT {
            return if authenticated {
                Navigation::redirect(home)
            } else {
                Navigation::redirect(routes::LOGIN)
            };
        }

        // Everything except the auth pages requires a valid session
        if to != routes::LOGIN && to != routes::REGISTER && !authenticated {
            debug!("Unauthenticated navigation to {}, redirecting to login", to);
            return Navigation::redirect(routes::LOGIN);
        }

        // Role-restricted destinations
        if let Some(meta) = self.routes.get(to) {
            if !meta.allowed_roles.is_empty() {
                let permitted = self
                    .session
                    .role()
                    .is_some_and(|role| meta.allowed_roles.contains(&role));
                if !authenticated || !permitted {
                    debug!("Role not permitted on {}, redirecting to login", to);
                    return Navigation::redirect(routes::LOGIN);
                }
            }
        }

        Navigation::Proceed
    }
}
