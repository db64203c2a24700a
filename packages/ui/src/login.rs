//! Login screen: role toggle, credential form, inline errors.

use dioxus::prelude::*;

use crate::i18n::{use_lang, Lang};
use crate::session::{use_api, use_session, Role};

/// Both fields must be present before any network call is made. The username
/// tolerates surrounding whitespace; the password is taken verbatim.
pub(crate) fn fields_complete(username: &str, password: &str) -> bool {
    !username.trim().is_empty() && !password.is_empty()
}

/// Error text for a business-level login failure: the server message when it
/// sent one, a generic fallback otherwise.
pub(crate) fn business_error_text(message: Option<String>, fallback: &str) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => fallback.to_string(),
    }
}

#[component]
pub fn LoginScreen() -> Element {
    let api = use_api();
    let mut session = use_session();
    let mut lang = use_lang();
    let t = lang().strings();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut pending = use_signal(|| false);

    let attempt_login = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn(async move {
                let t = lang().strings();
                let name = username();
                let pass = password();

                if !fields_complete(&name, &pass) {
                    error.set(Some(t.fill_all_fields.to_string()));
                    return;
                }

                pending.set(true);
                let selected = session().selected_role;
                match api.login(name.trim(), &pass, selected.is_doctor()).await {
                    Ok(resp) if resp.success => match resp.user {
                        Some(user) => {
                            let actual = Role::from_flag(user.is_doctor);
                            if actual != selected {
                                // The server decides the role; the selected tab
                                // is only a hint.
                                tracing::warn!(
                                    ?selected,
                                    ?actual,
                                    "logged in with a different role than the selected tab"
                                );
                            }
                            // The session lives only in memory, so routing to
                            // the dashboard must not reload the document. The
                            // login view watches this signal and redirects
                            // through the router.
                            session.write().user = Some(user);
                            error.set(None);
                        }
                        None => error.set(Some(t.invalid_credentials.to_string())),
                    },
                    Ok(resp) => {
                        error.set(Some(business_error_text(resp.message, t.invalid_credentials)));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "login request failed");
                        error.set(Some(t.network_retry.to_string()));
                    }
                }
                pending.set(false);
            });
        }
    };
    let attempt_on_enter = attempt_login.clone();

    let selected = session().selected_role;
    let offline = !session().checking && !session().online;

    rsx! {
        div {
            class: "login-screen",

            div {
                class: "login-card",

                h1 { class: "login-title", "{t.app_title}" }

                div {
                    class: "role-toggle",
                    button {
                        class: if selected == Role::Patient { "role-tab active" } else { "role-tab" },
                        onclick: move |_| session.write().selected_role = Role::Patient,
                        "{t.role_patient}"
                    }
                    button {
                        class: if selected == Role::Doctor { "role-tab active" } else { "role-tab" },
                        onclick: move |_| session.write().selected_role = Role::Doctor,
                        "{t.role_doctor}"
                    }
                }

                label { class: "field-label", r#for: "login-username", "{t.username_label}" }
                input {
                    id: "login-username",
                    class: "field-input",
                    r#type: "text",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                label { class: "field-label", r#for: "login-password", "{t.password_label}" }
                input {
                    id: "login-password",
                    class: "field-input",
                    r#type: "password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            attempt_on_enter();
                        }
                    },
                }

                if let Some(text) = error() {
                    p { class: "login-error", "{text}" }
                }

                if offline {
                    p { class: "login-offline", "{t.server_unreachable}" }
                }

                button {
                    class: "login-button",
                    disabled: pending(),
                    onclick: move |_| attempt_login(),
                    "{t.login_button}"
                }

                div {
                    class: "lang-toggle",
                    button {
                        class: if lang() == Lang::Fr { "lang-tab active" } else { "lang-tab" },
                        onclick: move |_| lang.set(Lang::Fr),
                        "FR"
                    }
                    button {
                        class: if lang() == Lang::En { "lang-tab active" } else { "lang-tab" },
                        onclick: move |_| lang.set(Lang::En),
                        "EN"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_block_the_attempt() {
        assert!(!fields_complete("", ""));
        assert!(!fields_complete("jean", ""));
        assert!(!fields_complete("", "secret"));
        assert!(!fields_complete("   ", "secret"));
        assert!(fields_complete("jean", "secret"));
    }

    #[test]
    fn password_whitespace_is_significant() {
        assert!(fields_complete("jean", " "));
    }

    #[test]
    fn server_message_wins_over_fallback() {
        assert_eq!(
            business_error_text(Some("bad creds".into()), "fallback"),
            "bad creds"
        );
        assert_eq!(business_error_text(None, "fallback"), "fallback");
        assert_eq!(business_error_text(Some("  ".into()), "fallback"), "fallback");
    }
}
