//! Login page view. Watches the session signal: once the login screen stores
//! a user, this view redirects to the matching dashboard through the router,
//! keeping the in-memory session intact.

use dioxus::prelude::*;
use ui::{use_session, LoginScreen};

use super::dashboard_route;

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let nav = use_navigator();

    if let Some(user) = session().current_user() {
        nav.replace(dashboard_route(user.is_doctor));
    }

    rsx! {
        LoginScreen {}
    }
}
