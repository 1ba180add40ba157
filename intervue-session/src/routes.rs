//! Route metadata
//!
//! The navigable routes of the application and their access requirements.

use intervue_core::Role;

pub const ROOT: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const ADMIN_HOME: &str = "/admin";
pub const INTERVIEWER_HOME: &str = "/interviewer";
pub const INTERVIEWEE_HOME: &str = "/interviewee";

/// Metadata attached to a navigable route
#[derive(Debug, Clone)]
pub struct RouteMeta {
    /// Route path
    pub path: &'static str,
    /// Whether a valid session is required
    pub requires_auth: bool,
    /// Roles allowed to enter; empty means no role restriction
    pub allowed_roles: &'static [Role],
}

impl RouteMeta {
    pub const fn open(path: &'static str) -> Self {
        Self {
            path,
            requires_auth: false,
            allowed_roles: &[],
        }
    }

    pub const fn guarded(path: &'static str, allowed_roles: &'static [Role]) -> Self {
        Self {
            path,
            requires_auth: true,
            allowed_roles,
        }
    }
}

/// The set of navigable routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteMeta>,
}

impl RouteTable {
    /// The application's standard routes
    pub fn standard() -> Self {
        Self {
            routes: vec![
                RouteMeta::open(ROOT),
                RouteMeta::open(LOGIN),
                RouteMeta::open(REGISTER),
                RouteMeta::guarded(ADMIN_HOME, &[Role::Admin]),
                RouteMeta::guarded(INTERVIEWER_HOME, &[Role::Interviewer]),
                RouteMeta::guarded(INTERVIEWEE_HOME, &[Role::Interviewee]),
            ],
        }
    }

    /// Build a table from an explicit route set
    pub fn new(routes: Vec<RouteMeta>) -> Self {
        Self { routes }
    }

    /// Look up a route's metadata by path
    pub fn get(&self, path: &str) -> Option<&RouteMeta> {
        self.routes.iter().find(|r| r.path == path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// The landing page for a role: admins and interviewers get their own
/// dashboards, everyone else lands on the interviewee page.
pub fn home_route(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_HOME,
        Some(Role::Interviewer) => INTERVIEWER_HOME,
        _ => INTERVIEWEE_HOME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_has_expected_routes() {
        let table = RouteTable::standard();

        for path in [ROOT, LOGIN, REGISTER] {
            let meta = table.get(path).unwrap();
            assert!(!meta.requires_auth, "{} should be open", path);
        }

        let admin = table.get(ADMIN_HOME).unwrap();
        assert!(admin.requires_auth);
        assert_eq!(admin.allowed_roles, &[Role::Admin]);

        let interviewer = table.get(INTERVIEWER_HOME).unwrap();
        assert_eq!(interviewer.allowed_roles, &[Role::Interviewer]);

        assert!(table.get("/nowhere").is_none());
    }

    #[test]
    fn test_home_route_by_role() {
        assert_eq!(home_route(Some(Role::Admin)), ADMIN_HOME);
        assert_eq!(home_route(Some(Role::Interviewer)), INTERVIEWER_HOME);
        assert_eq!(home_route(Some(Role::Interviewee)), INTERVIEWEE_HOME);
        assert_eq!(home_route(None), INTERVIEWEE_HOME);
    }
}
