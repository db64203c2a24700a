//! Messaging panel shared by both dashboards: a contact list (doctors for
//! patients, patients for doctors) and a per-contact conversation view.

use api::{Message, User};
use dioxus::prelude::*;

use crate::i18n::use_lang;
use crate::platform;
use crate::session::{use_api, use_session};

/// A draft is sendable once trimmed content remains. The trimmed text is what
/// goes over the wire.
pub(crate) fn prepare_outgoing(draft: &str) -> Option<String> {
    let trimmed = draft.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Doctors are shown with the honorific prefix, patients with their plain name.
pub(crate) fn contact_display_name(user: &User, doctor_prefix: &str) -> String {
    if user.is_doctor {
        format!("{}{}", doctor_prefix, user.full_name())
    } else {
        user.full_name()
    }
}

/// Pair each message with whether it is the last of the thread.
pub(crate) fn with_last_flag(messages: Vec<Message>) -> Vec<(Message, bool)> {
    let len = messages.len();
    messages
        .into_iter()
        .enumerate()
        .map(|(i, m)| (m, i + 1 == len))
        .collect()
}

/// Bubble side is decided by who sent the message, not by role.
pub(crate) fn bubble_class(message: &Message, my_id: i64) -> &'static str {
    if message.sender_id == my_id {
        "message-bubble sent"
    } else {
        "message-bubble received"
    }
}

#[component]
pub fn MessagesPanel(contacts_are_doctors: bool) -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let mut contacts = use_signal(Vec::<User>::new);
    let mut selected = use_signal(|| Option::<User>::None);

    let loader = api.clone();
    let _ = use_resource(move || {
        let api = loader.clone();
        async move {
            match api.users(contacts_are_doctors).await {
                Ok(resp) if resp.success => contacts.set(resp.users),
                Ok(resp) => tracing::warn!(message = ?resp.message, "contact list refused"),
                Err(err) => tracing::error!(error = %err, "failed to load contacts"),
            }
        }
    });

    let empty_text = if contacts_are_doctors {
        t.no_contacts_doctors
    } else {
        t.no_contacts_patients
    };

    match selected() {
        Some(contact) => rsx! {
            ConversationView {
                contact,
                on_back: move |_| selected.set(None),
            }
        },
        None => rsx! {
            section {
                class: "panel messages-panel",
                if contacts().is_empty() {
                    p { class: "empty-list", "{empty_text}" }
                } else {
                    ul {
                        class: "contact-list",
                        for contact in contacts() {
                            ContactRow {
                                key: "{contact.id}",
                                contact,
                                on_select: move |picked| selected.set(Some(picked)),
                            }
                        }
                    }
                }
            }
        },
    }
}

#[component]
fn ContactRow(contact: User, on_select: EventHandler<User>) -> Element {
    let lang = use_lang();
    let t = lang().strings();
    let name = contact_display_name(&contact, t.doctor_prefix);

    rsx! {
        li {
            class: "contact-row",
            onclick: move |_| on_select.call(contact.clone()),
            span { class: "contact-name", "{name}" }
        }
    }
}

#[component]
fn ConversationView(contact: User, on_back: EventHandler<()>) -> Element {
    let api = use_api();
    let session = use_session();
    let lang = use_lang();
    let t = lang().strings();

    let my_id = session().current_user().map(|u| u.id).unwrap_or(0);
    let contact_id = contact.id;
    let contact_name = contact_display_name(&contact, t.doctor_prefix);

    let mut messages = use_signal(Vec::<Message>::new);
    let mut draft = use_signal(String::new);

    let loader = api.clone();
    let _ = use_resource(move || {
        let api = loader.clone();
        async move {
            match api.conversation(contact_id).await {
                Ok(resp) if resp.success => messages.set(resp.messages),
                Ok(resp) => tracing::warn!(message = ?resp.message, "conversation refused"),
                Err(err) => tracing::error!(error = %err, "failed to load conversation"),
            }
        }
    });

    // Send, then reload the thread so the server-assigned id and timestamp
    // show up. The draft is only cleared on success.
    let send = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn(async move {
                let t = lang().strings();
                let Some(content) = prepare_outgoing(&draft()) else {
                    return;
                };
                match api.send_message(contact_id, &content).await {
                    Ok(resp) if resp.success => {
                        draft.set(String::new());
                        match api.conversation(contact_id).await {
                            Ok(resp) if resp.success => messages.set(resp.messages),
                            Ok(_) => {}
                            Err(err) => {
                                tracing::warn!(error = %err, "conversation reload failed")
                            }
                        }
                    }
                    Ok(resp) => {
                        tracing::warn!(message = ?resp.message, "message refused");
                        platform::alert(t.send_failed);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to send message");
                        platform::alert(t.send_failed);
                    }
                }
            });
        }
    };
    let send_on_enter = send.clone();

    rsx! {
        section {
            class: "panel conversation-panel",

            header {
                class: "conversation-header",
                button {
                    class: "back-button",
                    onclick: move |_| on_back.call(()),
                    "{t.back}"
                }
                h2 { "{contact_name}" }
            }

            div {
                class: "message-list",
                if messages().is_empty() {
                    p { class: "empty-list", "{t.empty_conversation}" }
                } else {
                    // Only the newest bubble carries the timestamp.
                    for (message, is_last) in with_last_flag(messages()) {
                        MessageBubble { key: "{message.id}", message, my_id, show_time: is_last }
                    }
                }
            }

            div {
                class: "message-compose",
                textarea {
                    class: "message-input",
                    placeholder: t.message_placeholder,
                    value: draft(),
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                    // Enter sends; Shift+Enter falls through and inserts a newline.
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
                            evt.prevent_default();
                            send_on_enter();
                        }
                    },
                }
                button {
                    class: "send-button",
                    onclick: move |_| send(),
                    "{t.send}"
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: Message, my_id: i64, show_time: bool) -> Element {
    let class = bubble_class(&message, my_id);

    rsx! {
        div {
            class: "{class}",
            p { class: "message-content", "{message.content}" }
            if show_time {
                if let Some(ts) = message.created_at.clone() {
                    span { class: "message-time", "{ts}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, is_doctor: bool) -> User {
        User {
            id,
            first_name: "Jean".into(),
            last_name: "Dupont".into(),
            is_doctor,
        }
    }

    fn message(sender_id: i64) -> Message {
        Message {
            id: 1,
            sender_id,
            receiver_id: 99,
            content: "bonjour".into(),
            created_at: None,
        }
    }

    #[test]
    fn blank_drafts_are_not_sendable() {
        assert_eq!(prepare_outgoing(""), None);
        assert_eq!(prepare_outgoing("   \n"), None);
        assert_eq!(prepare_outgoing("  salut  "), Some("salut".to_string()));
    }

    #[test]
    fn doctors_get_the_honorific() {
        assert_eq!(contact_display_name(&user(1, true), "Dr. "), "Dr. Jean Dupont");
        assert_eq!(contact_display_name(&user(1, false), "Dr. "), "Jean Dupont");
    }

    #[test]
    fn only_the_last_message_is_flagged() {
        let flagged = with_last_flag(vec![message(1), message(2), message(3)]);
        assert_eq!(
            flagged.iter().map(|(_, last)| *last).collect::<Vec<_>>(),
            vec![false, false, true]
        );
        assert!(with_last_flag(Vec::new()).is_empty());
    }

    #[test]
    fn bubbles_classify_by_sender() {
        assert_eq!(bubble_class(&message(7), 7), "message-bubble sent");
        assert_eq!(bubble_class(&message(7), 8), "message-bubble received");
    }
}
