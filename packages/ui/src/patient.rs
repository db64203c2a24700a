//! Patient dashboard: pillbox control, prescriptions grouped by compartment
//! with one countdown per prescription, and the shared messaging panel.

use std::time::Duration;

use api::{PillboxAction, Prescription};
use chrono::Local;
use dioxus::prelude::*;

use crate::i18n::{period_label, use_lang};
use crate::messaging::MessagesPanel;
use crate::platform;
use crate::schedule;
use crate::session::{use_api, use_session, LogoutButton};

/// Seconds between dispenser state polls while the medications tab is visible.
const POLL_INTERVAL_SECS: u64 = 10;

/// The three conventional compartments, always rendered in this order.
pub(crate) const FIXED_COMPARTMENTS: [u32; 3] = [1, 2, 3];

/// Group active prescriptions by compartment. The fixed compartments are always
/// present (possibly empty); any other compartment number gets its own group
/// appended in first-occurrence order. Inactive prescriptions are dropped.
pub(crate) fn group_by_compartment(prescriptions: &[Prescription]) -> Vec<(u32, Vec<Prescription>)> {
    let mut groups: Vec<(u32, Vec<Prescription>)> = FIXED_COMPARTMENTS
        .iter()
        .map(|&motor| (motor, Vec::new()))
        .collect();

    for p in prescriptions.iter().filter(|p| p.active) {
        match groups.iter_mut().find(|(motor, _)| *motor == p.motor_number) {
            Some((_, list)) => list.push(p.clone()),
            None => groups.push((p.motor_number, vec![p.clone()])),
        }
    }
    groups
}

#[derive(Clone, Copy, PartialEq)]
enum PatientTab {
    Medications,
    Messages,
}

#[component]
pub fn PatientDashboard() -> Element {
    let session = use_session();
    let lang = use_lang();
    let t = lang().strings();
    let mut tab = use_signal(|| PatientTab::Medications);

    let user_name = session()
        .current_user()
        .map(|u| u.full_name())
        .unwrap_or_default();

    rsx! {
        div {
            class: "dashboard",

            header {
                class: "dashboard-header",
                h1 { "{t.app_title}" }
                div {
                    class: "dashboard-user",
                    span { class: "user-name", "{user_name}" }
                    LogoutButton { label: t.logout.to_string() }
                }
            }

            nav {
                class: "tabs",
                button {
                    class: if tab() == PatientTab::Medications { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(PatientTab::Medications),
                    "{t.tab_medications}"
                }
                button {
                    class: if tab() == PatientTab::Messages { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(PatientTab::Messages),
                    "{t.tab_messages}"
                }
            }

            // Only the active panel is mounted, so its timers die with it.
            match tab() {
                PatientTab::Medications => rsx! { MedicationsPanel {} },
                PatientTab::Messages => rsx! { MessagesPanel { contacts_are_doctors: true } },
            }
        }
    }
}

#[component]
fn MedicationsPanel() -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let mut prescriptions = use_signal(Vec::<Prescription>::new);
    let mut pillbox_open = use_signal(|| Option::<bool>::None);

    // Initial load: prescriptions, then the dispenser state.
    let loader = api.clone();
    let _ = use_resource(move || {
        let api = loader.clone();
        async move {
            match api.prescriptions().await {
                Ok(resp) if resp.success => prescriptions.set(resp.prescriptions),
                Ok(resp) => tracing::warn!(message = ?resp.message, "prescription list refused"),
                Err(err) => tracing::error!(error = %err, "failed to load prescriptions"),
            }
            match api.pillbox_state().await {
                Ok(state) if state.success => pillbox_open.set(Some(state.is_open)),
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "failed to read dispenser state"),
            }
        }
    });

    // Dispenser poll, owned by this panel's scope: unmounting the panel
    // cancels the task, so only one poll loop ever runs.
    let poller = api.clone();
    use_effect(move || {
        let api = poller.clone();
        spawn(async move {
            loop {
                platform::sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
                match api.pillbox_state().await {
                    Ok(state) if state.success => pillbox_open.set(Some(state.is_open)),
                    Ok(_) => {}
                    Err(err) => tracing::warn!(error = %err, "dispenser state poll failed"),
                }
            }
        });
    });

    // Manual open/close. Optimistic flag update on success; on a business
    // failure the alreadyOpen/alreadyClosed flags reconcile the local state
    // without another poll.
    let manual_control = {
        let api = api.clone();
        move |action: PillboxAction| {
            let api = api.clone();
            spawn(async move {
                let t = lang().strings();
                match api.control_pillbox(1, action, false).await {
                    Ok(resp) if resp.success => {
                        pillbox_open.set(Some(action == PillboxAction::Open));
                        platform::alert(if action == PillboxAction::Open {
                            t.opened_ok
                        } else {
                            t.closed_ok
                        });
                    }
                    Ok(resp) if resp.already_open => {
                        pillbox_open.set(Some(true));
                        platform::alert(t.already_open);
                    }
                    Ok(resp) if resp.already_closed => {
                        pillbox_open.set(Some(false));
                        platform::alert(t.already_closed);
                    }
                    Ok(resp) => {
                        let detail = resp.message.unwrap_or_else(|| t.unknown_error.to_string());
                        platform::alert(&format!("{} {}", t.error_prefix, detail));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "dispenser control failed");
                        platform::alert(t.control_failed);
                    }
                }
            });
        }
    };
    let open_control = manual_control.clone();

    let status_text = match pillbox_open() {
        None => t.status_unknown,
        Some(true) => t.status_open,
        Some(false) => t.status_closed,
    };
    let open_disabled = pillbox_open() == Some(true);
    let close_disabled = pillbox_open() == Some(false);

    let groups = group_by_compartment(&prescriptions());

    rsx! {
        section {
            class: "panel medications-panel",

            // Manual control stays available with or without prescriptions.
            div {
                class: "prescription-card control-card",
                div {
                    class: "prescription-card-header",
                    div { class: "prescription-card-title", "{t.pillbox_control}" }
                    div {
                        class: if pillbox_open() == Some(true) { "pillbox-status open" } else { "pillbox-status" },
                        "{status_text}"
                    }
                }
                div {
                    class: "pillbox-controls",
                    h3 { "{t.manual_commands}" }
                    div {
                        class: "pillbox-actions",
                        button {
                            class: "open-button",
                            disabled: open_disabled,
                            onclick: move |_| open_control(PillboxAction::Open),
                            "{t.open_pillbox}"
                        }
                        button {
                            class: "close-button",
                            disabled: close_disabled,
                            onclick: move |_| manual_control(PillboxAction::Close),
                            "{t.close_pillbox}"
                        }
                    }
                }
            }

            h2 { class: "section-title", "{t.my_prescriptions}" }

            if prescriptions().is_empty() {
                p { class: "empty-list", "{t.no_active_prescriptions}" }
            } else {
                div {
                    class: "period-cards",
                    for (motor, entries) in groups {
                        PeriodCard {
                            key: "{motor}",
                            motor,
                            entries,
                            pillbox_open,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PeriodCard(motor: u32, entries: Vec<Prescription>, pillbox_open: Signal<Option<bool>>) -> Element {
    let lang = use_lang();
    let t = lang().strings();
    let title = period_label(t, motor);

    rsx! {
        div {
            class: "prescription-card",
            div {
                class: "prescription-card-header",
                div { class: "prescription-card-title", "{title}" }
            }
            div {
                class: "prescription-card-details",
                if entries.is_empty() {
                    p { class: "empty-period", "{t.no_medication_for_period}" }
                } else {
                    for p in entries.clone() {
                        PrescriptionCard { key: "{p.id}", prescription: p, pillbox_open }
                    }
                }
            }
        }
    }
}

#[component]
fn PrescriptionCard(prescription: Prescription, pillbox_open: Signal<Option<bool>>) -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let motor = prescription.motor_number;
    let intake_time = prescription.intake_time.clone();
    let mut remaining = use_signal(move || {
        schedule::countdown_from(&intake_time, Local::now().naive_local())
    });

    // Per-second tick. At zero the card fires a programmatic open
    // (fire-and-forget) and re-arms to a flat 24 hours.
    let ticker = api.clone();
    use_effect(move || {
        let api = ticker.clone();
        spawn(async move {
            loop {
                platform::sleep(Duration::from_secs(1)).await;
                let Some(secs) = remaining() else { continue };
                let next = secs - 1;
                if next <= 0 {
                    if let Err(err) = api.control_pillbox(motor, PillboxAction::Open, true).await {
                        tracing::warn!(error = %err, motor, "scheduled open failed");
                    }
                    remaining.set(Some(schedule::SECONDS_PER_DAY));
                } else {
                    remaining.set(Some(next));
                }
            }
        });
    });

    // "Take now": a programmatic open, so the server auto-closes afterwards.
    let take_now = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn(async move {
                let t = lang().strings();
                if pillbox_open() == Some(true) {
                    platform::alert(t.already_open);
                    return;
                }
                match api.control_pillbox(motor, PillboxAction::Open, true).await {
                    Ok(resp) if resp.success => {
                        pillbox_open.set(Some(true));
                        platform::alert(t.scheduled_open_ok);
                    }
                    Ok(resp) if resp.already_open => {
                        pillbox_open.set(Some(true));
                        platform::alert(t.already_open);
                    }
                    Ok(resp) => {
                        let detail = resp.message.unwrap_or_else(|| t.unknown_error.to_string());
                        platform::alert(&format!("{} {}", t.error_prefix, detail));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "programmatic open failed");
                        platform::alert(t.control_failed);
                    }
                }
            });
        }
    };

    let name = prescription
        .medication_name
        .clone()
        .unwrap_or_else(|| t.medication_fallback.to_string());
    let dosage = prescription
        .medication_dosage
        .clone()
        .unwrap_or_else(|| t.unknown_dosage.to_string());
    let countdown_text = remaining()
        .map(schedule::format_countdown)
        .unwrap_or_else(|| "--:--:--".to_string());

    rsx! {
        div {
            class: "mini-prescription-card",
            div {
                class: "mini-prescription-header",
                h4 { "{name}" }
                button {
                    class: "take-now-button",
                    onclick: take_now,
                    "{t.take_now}"
                }
            }
            p { "{t.dosage_label} {dosage}" }
            p { "{t.time_label} {prescription.intake_time}" }
            div {
                class: "countdown-row",
                span { "{t.next_intake}" }
                span { class: "countdown", "{countdown_text}" }
            }
        }
    }
}
