//! Doctor dashboard view, with the mirror-image guards of the patient view.

use dioxus::prelude::*;
use ui::{use_session, DoctorDashboard};

use super::dashboard_redirect;

#[component]
pub fn Doctor() -> Element {
    let session = use_session();
    let nav = use_navigator();

    match dashboard_redirect(session().current_user().map(|u| u.is_doctor), true) {
        None => rsx! {
            DoctorDashboard {}
        },
        Some(target) => {
            nav.replace(target);
            rsx! {}
        }
    }
}
