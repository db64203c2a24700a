//! Patient dashboard view. Guards against unauthenticated access and against
//! a doctor landing on the patient route; redirects stay inside the router.

use dioxus::prelude::*;
use ui::{use_session, PatientDashboard};

use super::dashboard_redirect;

#[component]
pub fn Patient() -> Element {
    let session = use_session();
    let nav = use_navigator();

    match dashboard_redirect(session().current_user().map(|u| u.is_doctor), false) {
        None => rsx! {
            PatientDashboard {}
        },
        Some(target) => {
            nav.replace(target);
            rsx! {}
        }
    }
}
