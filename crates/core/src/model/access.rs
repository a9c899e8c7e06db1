//! Role-based route guarding.
//!
//! Access is a pure function of the signed-in role and the requested route, so
//! views never nest guard components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::container::{Container, ContainerKind};
use crate::model::ids::ContainerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Teacher, Role::Student, Role::Parent];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
        }
    }

    /// Landing page after sign-in and the target of role-mismatch redirects.
    #[must_use]
    pub fn dashboard(self) -> Route {
        Route::Dashboard(self)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Closed set of portal pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Dashboard(Role),
    Users,
    Reports,
    Children,
    Assignments,
    AssignmentDetail(ContainerId),
    AssignmentSolve(ContainerId),
    Practice,
    PracticeDetail(ContainerId),
    PracticeSolve(ContainerId),
}

impl Route {
    /// Detail view a solving session returns to after submission.
    #[must_use]
    pub fn detail_for(container: Container) -> Self {
        match container.kind {
            ContainerKind::Assignment => Self::AssignmentDetail(container.id),
            ContainerKind::Practice => Self::PracticeDetail(container.id),
        }
    }

    #[must_use]
    pub fn solve_for(container: Container) -> Self {
        match container.kind {
            ContainerKind::Assignment => Self::AssignmentSolve(container.id),
            ContainerKind::Practice => Self::PracticeSolve(container.id),
        }
    }

    /// Roles allowed to open this page. `None` means any signed-in user.
    fn allowed_roles(self) -> Option<&'static [Role]> {
        use Role::{Admin, Parent, Student, Teacher};
        match self {
            Self::Login | Self::Home => None,
            Self::Dashboard(Admin) | Self::Users => Some(&[Admin]),
            Self::Dashboard(Teacher) => Some(&[Teacher]),
            Self::Dashboard(Student)
            | Self::Practice
            | Self::PracticeDetail(_)
            | Self::PracticeSolve(_)
            | Self::AssignmentSolve(_) => Some(&[Student]),
            Self::Dashboard(Parent) | Self::Children => Some(&[Parent]),
            Self::Reports => Some(&[Admin, Teacher, Parent]),
            Self::Assignments | Self::AssignmentDetail(_) => Some(&[Teacher, Student]),
        }
    }

    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Home => "/".into(),
            Self::Dashboard(role) => format!("/{}", role.as_str()),
            Self::Users => "/admin/users".into(),
            Self::Reports => "/reports".into(),
            Self::Children => "/parent/children".into(),
            Self::Assignments => "/assignments".into(),
            Self::AssignmentDetail(id) => format!("/assignments/{id}"),
            Self::AssignmentSolve(id) => format!("/assignments/{id}/solve"),
            Self::Practice => "/practice".into(),
            Self::PracticeDetail(id) => format!("/practice/{id}"),
            Self::PracticeSolve(id) => format!("/practice/{id}/solve"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no route matches {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRoute(s.to_owned());
        let segments: Vec<&str> = s.trim_matches('/').split('/').collect();
        let id = |raw: &str| raw.parse::<ContainerId>().map_err(|_| unknown());

        let route = match segments.as_slice() {
            [""] => Self::Home,
            ["login"] => Self::Login,
            ["admin", "users"] => Self::Users,
            ["reports"] => Self::Reports,
            ["parent", "children"] => Self::Children,
            ["assignments"] => Self::Assignments,
            ["assignments", raw] => Self::AssignmentDetail(id(*raw)?),
            ["assignments", raw, "solve"] => Self::AssignmentSolve(id(*raw)?),
            ["practice"] => Self::Practice,
            ["practice", raw] => Self::PracticeDetail(id(*raw)?),
            ["practice", raw, "solve"] => Self::PracticeSolve(id(*raw)?),
            [role] => Self::Dashboard(role.parse().map_err(|_| unknown())?),
            _ => return Err(unknown()),
        };
        Ok(route)
    }
}

/// Result of checking a route against the signed-in role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

/// Decide whether `role` may open `route`, or where to send it instead.
///
/// Signed-out visitors only reach the login page. Signed-in users never see
/// the login page or the bare home route; both resolve to their dashboard.
#[must_use]
pub fn route_access(role: Option<Role>, route: &Route) -> Access {
    let Some(role) = role else {
        return match route {
            Route::Login => Access::Allow,
            _ => Access::Redirect(Route::Login),
        };
    };

    match route.allowed_roles() {
        None => Access::Redirect(role.dashboard()),
        Some(roles) if roles.contains(&role) => Access::Allow,
        Some(_) => Access::Redirect(role.dashboard()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_users_are_sent_to_login() {
        assert_eq!(route_access(None, &Route::Login), Access::Allow);
        assert_eq!(
            route_access(None, &Route::Assignments),
            Access::Redirect(Route::Login)
        );
        assert_eq!(route_access(None, &Route::Home), Access::Redirect(Route::Login));
    }

    #[test]
    fn signed_in_users_skip_login_and_home() {
        for role in Role::ALL {
            assert_eq!(
                route_access(Some(role), &Route::Login),
                Access::Redirect(role.dashboard())
            );
            assert_eq!(
                route_access(Some(role), &Route::Home),
                Access::Redirect(role.dashboard())
            );
            assert_eq!(route_access(Some(role), &role.dashboard()), Access::Allow);
        }
    }

    #[test]
    fn solving_pages_are_student_only() {
        let solve = Route::AssignmentSolve(ContainerId::new(4));
        assert_eq!(route_access(Some(Role::Student), &solve), Access::Allow);
        assert_eq!(
            route_access(Some(Role::Teacher), &solve),
            Access::Redirect(Route::Dashboard(Role::Teacher))
        );
        assert_eq!(
            route_access(Some(Role::Parent), &Route::PracticeSolve(ContainerId::new(1))),
            Access::Redirect(Route::Dashboard(Role::Parent))
        );
    }

    #[test]
    fn shared_pages_allow_each_listed_role() {
        assert_eq!(route_access(Some(Role::Teacher), &Route::Reports), Access::Allow);
        assert_eq!(route_access(Some(Role::Parent), &Route::Reports), Access::Allow);
        assert_eq!(
            route_access(Some(Role::Student), &Route::Reports),
            Access::Redirect(Route::Dashboard(Role::Student))
        );
        assert_eq!(
            route_access(Some(Role::Teacher), &Route::AssignmentDetail(ContainerId::new(2))),
            Access::Allow
        );
        assert_eq!(route_access(Some(Role::Admin), &Route::Users), Access::Allow);
    }

    #[test]
    fn parse_errors_name_the_input() {
        assert_eq!(
            "/nowhere".parse::<Route>().unwrap_err().to_string(),
            "no route matches /nowhere"
        );
        assert_eq!("janitor".parse::<Role>().unwrap_err().to_string(), "unknown role: janitor");
    }

    #[test]
    fn path_and_parse_agree() {
        let routes = [
            Route::Login,
            Route::Home,
            Route::Dashboard(Role::Parent),
            Route::Users,
            Route::AssignmentSolve(ContainerId::new(9)),
            Route::PracticeDetail(ContainerId::new(3)),
        ];
        for route in routes {
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
        assert!("/assignments/x".parse::<Route>().is_err());
        assert!("/nowhere".parse::<Route>().is_err());
    }

    #[test]
    fn detail_route_follows_container_kind() {
        let id = ContainerId::new(7);
        assert_eq!(
            Route::detail_for(Container::practice(id)),
            Route::PracticeDetail(id)
        );
        assert_eq!(
            Route::solve_for(Container::assignment(id)).path(),
            "/assignments/7/solve"
        );
    }
}
