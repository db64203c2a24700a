use crate::Route;

mod login;
pub use login::Login;

mod patient;
pub use patient::Patient;

mod doctor;
pub use doctor::Doctor;

/// The dashboard route for a role.
pub(crate) fn dashboard_route(is_doctor: bool) -> Route {
    if is_doctor {
        Route::Doctor {}
    } else {
        Route::Patient {}
    }
}

/// Where a dashboard view must send the user, given the session's current
/// role (`None` when logged out) and the role the route is for. `None` means
/// the view renders in place. The redirect goes through the router so the
/// in-memory session survives it.
pub(crate) fn dashboard_redirect(is_doctor: Option<bool>, route_is_doctor: bool) -> Option<Route> {
    match is_doctor {
        None => Some(Route::Login {}),
        Some(actual) if actual != route_is_doctor => Some(dashboard_route(actual)),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_users_are_sent_to_login() {
        assert_eq!(dashboard_redirect(None, false), Some(Route::Login {}));
        assert_eq!(dashboard_redirect(None, true), Some(Route::Login {}));
    }

    #[test]
    fn wrong_role_lands_on_the_matching_dashboard() {
        assert_eq!(dashboard_redirect(Some(true), false), Some(Route::Doctor {}));
        assert_eq!(dashboard_redirect(Some(false), true), Some(Route::Patient {}));
    }

    #[test]
    fn matching_role_renders_in_place() {
        assert_eq!(dashboard_redirect(Some(false), false), None);
        assert_eq!(dashboard_redirect(Some(true), true), None);
    }
}
