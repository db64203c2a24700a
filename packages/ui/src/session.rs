//! Session and role state for the application.
//!
//! Replaces the original window-scoped manager singletons with explicit state
//! provided through context: [`SessionProvider`] owns the [`ApiClient`], the
//! [`Session`] signal and the language signal; views reach them through the
//! [`use_api`], [`use_session`] and [`crate::i18n::use_lang`] hooks.

use api::{ApiClient, User};
use dioxus::prelude::*;

use crate::i18n::Lang;

/// Which role tab is selected on the login screen. The server remains the
/// authority on the actual role after login.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Patient,
    Doctor,
}

impl Role {
    pub fn is_doctor(self) -> bool {
        matches!(self, Role::Doctor)
    }

    pub fn from_flag(is_doctor: bool) -> Self {
        if is_doctor {
            Role::Doctor
        } else {
            Role::Patient
        }
    }

}

/// Client-side session state: an ephemeral copy of the logged-in user plus the
/// role tab selection and the last connectivity check result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub selected_role: Role,
    /// Whether the last connectivity probe reached the server.
    pub online: bool,
    /// True while the initial probe is still running.
    pub checking: bool,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Used by messaging to classify bubbles by sender id.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Get the session state signal.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the shared API client.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

fn default_api_client() -> ApiClient {
    #[cfg(target_arch = "wasm32")]
    {
        if let Ok(client) = ApiClient::from_origin() {
            return client;
        }
    }
    ApiClient::new("http://127.0.0.1:5000")
}

/// Provider component wiring the API client, session and language into context.
/// Wrap the router with this component.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let api = use_context_provider(default_api_client);
    let mut session = use_signal(|| Session {
        checking: true,
        ..Session::default()
    });
    use_context_provider(|| session);
    let lang = use_signal(Lang::default);
    use_context_provider(|| lang);

    // One connectivity probe on mount; the login screen shows a hint while the
    // server is unreachable.
    let probe = api.clone();
    let _ = use_resource(move || {
        let probe = probe.clone();
        async move {
            let online = probe.test_connection().await;
            let mut s = session.write();
            s.online = online;
            s.checking = false;
        }
    });

    rsx! {
        {children}
    }
}

/// Button that logs the current user out. The API call is best-effort: the
/// session is cleared regardless of the outcome, and the dashboard view
/// watching the session signal routes back to the login screen.
#[component]
pub fn LogoutButton(label: String) -> Element {
    let api = use_api();
    let mut session = use_session();

    let onclick = move |_| {
        let api = api.clone();
        async move {
            if let Err(err) = api.logout().await {
                tracing::warn!(error = %err, "logout request failed");
            }
            session.write().user = None;
        }
    };

    rsx! {
        button {
            class: "logout-button",
            onclick: onclick,
            "{label}"
        }
    }
}
