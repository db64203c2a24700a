//! Doctor dashboard: medication catalog, prescriptions grouped by patient,
//! and the shared messaging panel. Creation flows live in modal dialogs.

use api::{Medication, NewPrescription, Prescription, User};
use dioxus::prelude::*;

use crate::i18n::{period_label, use_lang, Strings};
use crate::messaging::MessagesPanel;
use crate::modal::ModalOverlay;
use crate::platform;
use crate::schedule;
use crate::session::{use_api, use_session, LogoutButton};

/// Both medication fields must carry non-blank content.
pub(crate) fn medication_fields_complete(name: &str, dosage: &str) -> bool {
    !name.trim().is_empty() && !dosage.trim().is_empty()
}

/// Validate the prescription form. The selects hold entity ids as strings and
/// the time input yields "HH:MM"; anything that does not parse blocks the save.
pub(crate) fn parse_prescription_form(
    patient: &str,
    medication: &str,
    motor: &str,
    intake_time: &str,
) -> Option<NewPrescription> {
    let patient_id = patient.trim().parse::<i64>().ok()?;
    let medication_id = medication.trim().parse::<i64>().ok()?;
    let motor_number = motor.trim().parse::<u32>().ok()?;
    let time = intake_time.trim();
    schedule::parse_intake_time(time)?;
    Some(NewPrescription {
        patient_id,
        medication_id,
        motor_number,
        intake_time: time.to_string(),
    })
}

/// Group prescriptions by patient in first-occurrence order. Inactive ones are
/// kept so the doctor sees the full history. The display name comes from the
/// joined `patient_name`, with a fallback for records missing the join.
pub(crate) fn group_by_patient(
    prescriptions: &[Prescription],
    unknown: &str,
) -> Vec<(i64, String, Vec<Prescription>)> {
    let mut groups: Vec<(i64, String, Vec<Prescription>)> = Vec::new();
    for p in prescriptions {
        match groups.iter_mut().find(|(id, _, _)| *id == p.patient_id) {
            Some((_, _, list)) => list.push(p.clone()),
            None => {
                let name = p.patient_name.clone().unwrap_or_else(|| unknown.to_string());
                groups.push((p.patient_id, name, vec![p.clone()]));
            }
        }
    }
    groups
}

fn compartment_options(strings: &Strings) -> Vec<(u32, String)> {
    (1..=3)
        .map(|motor| (motor, format!("{} ({motor})", period_label(strings, motor))))
        .collect()
}

#[derive(Clone, Copy, PartialEq)]
enum DoctorTab {
    Medications,
    Prescriptions,
    Messages,
}

#[component]
pub fn DoctorDashboard() -> Element {
    let session = use_session();
    let lang = use_lang();
    let t = lang().strings();
    let mut tab = use_signal(|| DoctorTab::Prescriptions);

    let user_name = session()
        .current_user()
        .map(|u| format!("{}{}", t.doctor_prefix, u.full_name()))
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
                    class: if tab() == DoctorTab::Prescriptions { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(DoctorTab::Prescriptions),
                    "{t.tab_prescriptions}"
                }
                button {
                    class: if tab() == DoctorTab::Medications { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(DoctorTab::Medications),
                    "{t.tab_medications}"
                }
                button {
                    class: if tab() == DoctorTab::Messages { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(DoctorTab::Messages),
                    "{t.tab_messages}"
                }
            }

            match tab() {
                DoctorTab::Medications => rsx! { MedicationsTab {} },
                DoctorTab::Prescriptions => rsx! { PrescriptionsTab {} },
                DoctorTab::Messages => rsx! { MessagesPanel { contacts_are_doctors: false } },
            }
        }
    }
}

#[component]
fn MedicationsTab() -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let mut medications = use_signal(Vec::<Medication>::new);
    let mut show_dialog = use_signal(|| false);

    let loader = api.clone();
    let _ = use_resource(move || {
        let api = loader.clone();
        async move {
            match api.medications().await {
                Ok(resp) if resp.success => medications.set(resp.medications),
                Ok(resp) => tracing::warn!(message = ?resp.message, "medication list refused"),
                Err(err) => tracing::error!(error = %err, "failed to load medications"),
            }
        }
    });

    rsx! {
        section {
            class: "panel medications-tab",

            div {
                class: "panel-actions",
                button {
                    class: "add-button",
                    onclick: move |_| show_dialog.set(true),
                    "{t.add_medication}"
                }
            }

            if medications().is_empty() {
                p { class: "empty-list", "{t.no_medications}" }
            } else {
                div {
                    class: "medication-cards",
                    for m in medications() {
                        div {
                            key: "{m.id}",
                            class: "medication-card",
                            h3 { "{m.name}" }
                            p { "{t.medication_dosage_label} : {m.dosage}" }
                        }
                    }
                }
            }

            if show_dialog() {
                NewMedicationDialog {
                    on_close: move |_| show_dialog.set(false),
                    medications,
                }
            }
        }
    }
}

#[component]
fn NewMedicationDialog(on_close: EventHandler<()>, medications: Signal<Vec<Medication>>) -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let mut name = use_signal(String::new);
    let mut dosage = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let save = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn(async move {
                let t = lang().strings();
                if !medication_fields_complete(&name(), &dosage()) {
                    error.set(Some(t.fill_medication_fields.to_string()));
                    return;
                }
                match api.create_medication(name().trim(), dosage().trim()).await {
                    Ok(resp) if resp.success => {
                        match api.medications().await {
                            Ok(list) if list.success => medications.set(list.medications),
                            Ok(_) => {}
                            Err(err) => {
                                tracing::warn!(error = %err, "medication reload failed")
                            }
                        }
                        on_close.call(());
                    }
                    Ok(resp) => {
                        error.set(Some(
                            resp.message
                                .unwrap_or_else(|| t.create_medication_failed.to_string()),
                        ));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to create medication");
                        error.set(Some(t.create_medication_failed.to_string()));
                    }
                }
            });
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),

            h2 { "{t.new_medication_title}" }

            label { class: "field-label", "{t.medication_name_label}" }
            input {
                class: "field-input",
                r#type: "text",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }

            label { class: "field-label", "{t.medication_dosage_label}" }
            input {
                class: "field-input",
                r#type: "text",
                value: dosage(),
                oninput: move |evt: FormEvent| dosage.set(evt.value()),
            }

            if let Some(text) = error() {
                p { class: "form-error", "{text}" }
            }

            div {
                class: "modal-actions",
                button { class: "cancel-button", onclick: move |_| on_close.call(()), "{t.cancel}" }
                button { class: "save-button", onclick: save, "{t.save}" }
            }
        }
    }
}

#[component]
fn PrescriptionsTab() -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let mut prescriptions = use_signal(Vec::<Prescription>::new);
    let mut show_dialog = use_signal(|| false);

    let loader = api.clone();
    let _ = use_resource(move || {
        let api = loader.clone();
        async move {
            match api.prescriptions().await {
                Ok(resp) if resp.success => prescriptions.set(resp.prescriptions),
                Ok(resp) => tracing::warn!(message = ?resp.message, "prescription list refused"),
                Err(err) => tracing::error!(error = %err, "failed to load prescriptions"),
            }
        }
    });

    let groups = group_by_patient(&prescriptions(), t.unknown_patient);

    rsx! {
        section {
            class: "panel prescriptions-tab",

            div {
                class: "panel-actions",
                button {
                    class: "add-button",
                    onclick: move |_| show_dialog.set(true),
                    "{t.add_prescription}"
                }
            }

            if groups.is_empty() {
                p { class: "empty-list", "{t.no_prescriptions}" }
            } else {
                div {
                    class: "patient-cards",
                    for (patient_id, patient_name, entries) in groups {
                        PatientPrescriptionsCard {
                            key: "{patient_id}",
                            patient_name,
                            entries,
                            prescriptions,
                        }
                    }
                }
            }

            if show_dialog() {
                NewPrescriptionDialog {
                    on_close: move |_| show_dialog.set(false),
                    prescriptions,
                }
            }
        }
    }
}

#[component]
fn PatientPrescriptionsCard(
    patient_name: String,
    entries: Vec<Prescription>,
    prescriptions: Signal<Vec<Prescription>>,
) -> Element {
    let mut expanded = use_signal(|| false);
    let count = entries.len();

    rsx! {
        div {
            class: "patient-card",
            div {
                class: "patient-card-header",
                onclick: move |_| {
                    let open = expanded();
                    expanded.set(!open);
                },
                h3 { "{patient_name}" }
                span { class: "patient-card-count", "({count})" }
            }
            if expanded() {
                div {
                    class: "patient-card-body",
                    for p in entries.clone() {
                        PrescriptionRow { key: "{p.id}", prescription: p, prescriptions }
                    }
                }
            }
        }
    }
}

#[component]
fn PrescriptionRow(prescription: Prescription, prescriptions: Signal<Vec<Prescription>>) -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let id = prescription.id;
    let deactivate = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn(async move {
                let t = lang().strings();
                if !platform::confirm(t.confirm_deactivate) {
                    return;
                }
                match api.deactivate_prescription(id).await {
                    Ok(resp) if resp.success => match api.prescriptions().await {
                        Ok(list) if list.success => prescriptions.set(list.prescriptions),
                        Ok(_) => {}
                        Err(err) => tracing::warn!(error = %err, "prescription reload failed"),
                    },
                    Ok(resp) => {
                        tracing::warn!(message = ?resp.message, "deactivation refused");
                        platform::alert(t.deactivate_failed);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to deactivate prescription");
                        platform::alert(t.deactivate_failed);
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
    let compartment = period_label(t, prescription.motor_number);

    rsx! {
        div {
            class: if prescription.active { "prescription-row" } else { "prescription-row inactive" },
            div {
                class: "prescription-row-main",
                span { class: "prescription-row-name", "{name}" }
                if !prescription.active {
                    span { class: "inactive-badge", "{t.inactive_badge}" }
                }
            }
            p { "{t.dosage_label} {dosage}" }
            p { "{compartment} - {prescription.intake_time}" }
            if prescription.active {
                button {
                    class: "deactivate-button",
                    onclick: deactivate,
                    "{t.deactivate}"
                }
            }
        }
    }
}

#[component]
fn NewPrescriptionDialog(
    on_close: EventHandler<()>,
    prescriptions: Signal<Vec<Prescription>>,
) -> Element {
    let api = use_api();
    let lang = use_lang();
    let t = lang().strings();

    let mut patients = use_signal(Vec::<User>::new);
    let mut medications = use_signal(Vec::<Medication>::new);

    let mut patient_sel = use_signal(String::new);
    let mut medication_sel = use_signal(String::new);
    let mut motor_sel = use_signal(|| "1".to_string());
    let mut time = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    // The selects need both catalogs before the doctor can fill the form.
    let loader = api.clone();
    let _ = use_resource(move || {
        let api = loader.clone();
        async move {
            match api.users(false).await {
                Ok(resp) if resp.success => patients.set(resp.users),
                Ok(resp) => tracing::warn!(message = ?resp.message, "patient list refused"),
                Err(err) => tracing::error!(error = %err, "failed to load patients"),
            }
            match api.medications().await {
                Ok(resp) if resp.success => medications.set(resp.medications),
                Ok(resp) => tracing::warn!(message = ?resp.message, "medication list refused"),
                Err(err) => tracing::error!(error = %err, "failed to load medications"),
            }
        }
    });

    let save = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn(async move {
                let t = lang().strings();
                let Some(new) =
                    parse_prescription_form(&patient_sel(), &medication_sel(), &motor_sel(), &time())
                else {
                    error.set(Some(t.fill_prescription_fields.to_string()));
                    return;
                };
                match api.create_prescription(&new).await {
                    Ok(resp) if resp.success => {
                        match api.prescriptions().await {
                            Ok(list) if list.success => prescriptions.set(list.prescriptions),
                            Ok(_) => {}
                            Err(err) => {
                                tracing::warn!(error = %err, "prescription reload failed")
                            }
                        }
                        on_close.call(());
                    }
                    Ok(resp) => {
                        error.set(Some(
                            resp.message
                                .unwrap_or_else(|| t.create_prescription_failed.to_string()),
                        ));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to create prescription");
                        error.set(Some(t.create_prescription_failed.to_string()));
                    }
                }
            });
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),

            h2 { "{t.new_prescription_title}" }

            label { class: "field-label", "{t.patient_label}" }
            select {
                class: "field-input",
                value: patient_sel(),
                onchange: move |evt: FormEvent| patient_sel.set(evt.value()),
                option { value: "", "{t.select_placeholder}" }
                for (id, name) in patients().into_iter().map(|p| (p.id, p.full_name())) {
                    option { key: "{id}", value: "{id}", "{name}" }
                }
            }

            label { class: "field-label", "{t.medication_label}" }
            select {
                class: "field-input",
                value: medication_sel(),
                onchange: move |evt: FormEvent| medication_sel.set(evt.value()),
                option { value: "", "{t.select_placeholder}" }
                for (id, label) in medications().into_iter().map(|m| (m.id, format!("{} ({})", m.name, m.dosage))) {
                    option { key: "{id}", value: "{id}", "{label}" }
                }
            }

            label { class: "field-label", "{t.compartment_field_label}" }
            select {
                class: "field-input",
                value: motor_sel(),
                onchange: move |evt: FormEvent| motor_sel.set(evt.value()),
                for (motor, label) in compartment_options(t) {
                    option { key: "{motor}", value: "{motor}", "{label}" }
                }
            }

            label { class: "field-label", "{t.intake_time_label}" }
            input {
                class: "field-input",
                r#type: "time",
                value: time(),
                oninput: move |evt: FormEvent| time.set(evt.value()),
            }

            if let Some(text) = error() {
                p { class: "form-error", "{text}" }
            }

            div {
                class: "modal-actions",
                button { class: "cancel-button", onclick: move |_| on_close.call(()), "{t.cancel}" }
                button { class: "save-button", onclick: save, "{t.save}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prescription(id: i64, patient_id: i64, patient_name: Option<&str>) -> Prescription {
        Prescription {
            id,
            patient_id,
            medication_id: 1,
            motor_number: 1,
            intake_time: "08:00".into(),
            active: true,
            medication_name: Some("Aspirin".into()),
            medication_dosage: Some("500mg".into()),
            patient_name: patient_name.map(str::to_string),
        }
    }

    #[test]
    fn blank_medication_fields_block_the_save() {
        assert!(!medication_fields_complete("", "500mg"));
        assert!(!medication_fields_complete("Aspirin", "  "));
        assert!(medication_fields_complete("Aspirin", "500mg"));
    }

    #[test]
    fn valid_form_parses_into_a_request() {
        let new = parse_prescription_form("4", "7", "2", "08:30").unwrap();
        assert_eq!(new.patient_id, 4);
        assert_eq!(new.medication_id, 7);
        assert_eq!(new.motor_number, 2);
        assert_eq!(new.intake_time, "08:30");
    }

    #[test]
    fn unselected_or_malformed_fields_are_rejected() {
        assert!(parse_prescription_form("", "7", "2", "08:30").is_none());
        assert!(parse_prescription_form("4", "", "2", "08:30").is_none());
        assert!(parse_prescription_form("4", "7", "x", "08:30").is_none());
        assert!(parse_prescription_form("4", "7", "2", "").is_none());
        assert!(parse_prescription_form("4", "7", "2", "25:00").is_none());
    }

    #[test]
    fn prescriptions_group_by_patient_in_first_occurrence_order() {
        let groups = group_by_patient(
            &[
                prescription(1, 10, Some("Alice Martin")),
                prescription(2, 20, Some("Bob Tremblay")),
                prescription(3, 10, Some("Alice Martin")),
            ],
            "Unknown patient",
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1, "Alice Martin");
        assert_eq!(groups[0].2.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(groups[1].1, "Bob Tremblay");
    }

    #[test]
    fn missing_patient_join_falls_back_to_placeholder() {
        let groups = group_by_patient(&[prescription(1, 10, None)], "Unknown patient");
        assert_eq!(groups[0].1, "Unknown patient");
    }
}
