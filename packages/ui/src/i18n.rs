//! Display strings for the two historical deployments of the app.
//!
//! The original project shipped a French UI and an English UI as two separate
//! copies of the same code. Here the behavior lives once and only the strings
//! vary: every user-visible label goes through the [`Strings`] table for the
//! active [`Lang`]. French is the default, matching the original deployment.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    pub fn strings(self) -> &'static Strings {
        match self {
            Lang::Fr => &FR,
            Lang::En => &EN,
        }
    }
}

/// Active language signal, provided by `SessionProvider`.
pub fn use_lang() -> Signal<Lang> {
    use_context::<Signal<Lang>>()
}

/// All user-visible strings.
pub struct Strings {
    pub app_title: &'static str,

    // login screen
    pub role_patient: &'static str,
    pub role_doctor: &'static str,
    pub username_label: &'static str,
    pub password_label: &'static str,
    pub login_button: &'static str,
    pub fill_all_fields: &'static str,
    pub invalid_credentials: &'static str,
    pub network_retry: &'static str,
    pub server_unreachable: &'static str,

    // shared chrome
    pub logout: &'static str,
    pub error_prefix: &'static str,
    pub unknown_error: &'static str,
    pub save: &'static str,
    pub cancel: &'static str,
    pub back: &'static str,

    // tabs
    pub tab_medications: &'static str,
    pub tab_messages: &'static str,
    pub tab_prescriptions: &'static str,

    // patient dashboard
    pub pillbox_control: &'static str,
    pub manual_commands: &'static str,
    pub status_unknown: &'static str,
    pub status_open: &'static str,
    pub status_closed: &'static str,
    pub open_pillbox: &'static str,
    pub close_pillbox: &'static str,
    pub my_prescriptions: &'static str,
    pub no_active_prescriptions: &'static str,
    pub period_morning: &'static str,
    pub period_noon: &'static str,
    pub period_evening: &'static str,
    pub compartment: &'static str,
    pub no_medication_for_period: &'static str,
    pub take_now: &'static str,
    pub dosage_label: &'static str,
    pub time_label: &'static str,
    pub next_intake: &'static str,
    pub medication_fallback: &'static str,
    pub unknown_dosage: &'static str,
    pub opened_ok: &'static str,
    pub closed_ok: &'static str,
    pub scheduled_open_ok: &'static str,
    pub already_open: &'static str,
    pub already_closed: &'static str,
    pub control_failed: &'static str,

    // doctor dashboard
    pub add_medication: &'static str,
    pub add_prescription: &'static str,
    pub new_medication_title: &'static str,
    pub new_prescription_title: &'static str,
    pub medication_name_label: &'static str,
    pub medication_dosage_label: &'static str,
    pub no_medications: &'static str,
    pub no_prescriptions: &'static str,
    pub fill_medication_fields: &'static str,
    pub fill_prescription_fields: &'static str,
    pub patient_label: &'static str,
    pub medication_label: &'static str,
    pub compartment_field_label: &'static str,
    pub intake_time_label: &'static str,
    pub select_placeholder: &'static str,
    pub deactivate: &'static str,
    pub inactive_badge: &'static str,
    pub confirm_deactivate: &'static str,
    pub deactivate_failed: &'static str,
    pub create_medication_failed: &'static str,
    pub create_prescription_failed: &'static str,
    pub unknown_patient: &'static str,

    // messaging
    pub no_contacts_doctors: &'static str,
    pub no_contacts_patients: &'static str,
    pub empty_conversation: &'static str,
    pub message_placeholder: &'static str,
    pub send: &'static str,
    pub send_failed: &'static str,
    pub doctor_prefix: &'static str,
}

pub static FR: Strings = Strings {
    app_title: "Pilulier Intelligent",

    role_patient: "Patient",
    role_doctor: "Médecin",
    username_label: "Nom d'utilisateur",
    password_label: "Mot de passe",
    login_button: "Se connecter",
    fill_all_fields: "Veuillez remplir tous les champs.",
    invalid_credentials: "Identifiants invalides.",
    network_retry: "Une erreur est survenue, veuillez réessayer.",
    server_unreachable: "Serveur injoignable.",

    logout: "Déconnexion",
    error_prefix: "Erreur :",
    unknown_error: "inconnue",
    save: "Enregistrer",
    cancel: "Annuler",
    back: "Retour",

    tab_medications: "Médicaments",
    tab_messages: "Messages",
    tab_prescriptions: "Prescriptions",

    pillbox_control: "Contrôle du Pilulier",
    manual_commands: "Commandes Manuelles",
    status_unknown: "Statut : ...",
    status_open: "Statut : Ouvert",
    status_closed: "Statut : Fermé",
    open_pillbox: "Ouvrir le pilulier",
    close_pillbox: "Fermer le pilulier",
    my_prescriptions: "Mes Prescriptions",
    no_active_prescriptions: "Aucune prescription active.",
    period_morning: "Matin",
    period_noon: "Midi",
    period_evening: "Soir",
    compartment: "Compartiment",
    no_medication_for_period: "Aucun médicament pour cette période.",
    take_now: "Prendre maintenant",
    dosage_label: "Posologie :",
    time_label: "Heure :",
    next_intake: "Prochaine prise dans :",
    medication_fallback: "Médicament",
    unknown_dosage: "inconnue",
    opened_ok: "Le pilulier a été ouvert avec succès.",
    closed_ok: "Le pilulier a été fermé avec succès.",
    scheduled_open_ok:
        "Le pilulier a été ouvert pour votre médicament. Il se fermera automatiquement après 1 minute.",
    already_open: "Le pilulier est déjà ouvert.",
    already_closed: "Le pilulier est déjà fermé.",
    control_failed: "Une erreur est survenue lors du contrôle du pilulier.",

    add_medication: "Ajouter un médicament",
    add_prescription: "Ajouter une prescription",
    new_medication_title: "Nouveau médicament",
    new_prescription_title: "Nouvelle prescription",
    medication_name_label: "Nom",
    medication_dosage_label: "Dosage",
    no_medications: "Aucun médicament.",
    no_prescriptions: "Aucune prescription.",
    fill_medication_fields: "Veuillez remplir tous les champs pour le médicament.",
    fill_prescription_fields: "Veuillez remplir tous les champs de la prescription.",
    patient_label: "Patient",
    medication_label: "Médicament",
    compartment_field_label: "Compartiment",
    intake_time_label: "Heure de prise",
    select_placeholder: "-- Choisir --",
    deactivate: "Désactiver",
    inactive_badge: "(Inactif)",
    confirm_deactivate: "Voulez-vous vraiment désactiver cette prescription ?",
    deactivate_failed: "Impossible de désactiver la prescription.",
    create_medication_failed: "Erreur lors de la création du médicament.",
    create_prescription_failed: "Erreur lors de la création de la prescription.",
    unknown_patient: "Patient inconnu",

    no_contacts_doctors: "Aucun médecin disponible.",
    no_contacts_patients: "Aucun patient disponible.",
    empty_conversation: "Aucun message. Commencez la conversation !",
    message_placeholder: "Votre message...",
    send: "Envoyer",
    send_failed: "Impossible d'envoyer le message. Réessayez plus tard.",
    doctor_prefix: "Dr. ",
};

pub static EN: Strings = Strings {
    app_title: "Smart Pillbox",

    role_patient: "Patient",
    role_doctor: "Doctor",
    username_label: "Username",
    password_label: "Password",
    login_button: "Log in",
    fill_all_fields: "Please fill in all fields.",
    invalid_credentials: "Invalid credentials.",
    network_retry: "Something went wrong, please try again.",
    server_unreachable: "Server unreachable.",

    logout: "Log out",
    error_prefix: "Error:",
    unknown_error: "unknown",
    save: "Save",
    cancel: "Cancel",
    back: "Back",

    tab_medications: "Medications",
    tab_messages: "Messages",
    tab_prescriptions: "Prescriptions",

    pillbox_control: "Pillbox Control",
    manual_commands: "Manual Commands",
    status_unknown: "Status: ...",
    status_open: "Status: Open",
    status_closed: "Status: Closed",
    open_pillbox: "Open the pillbox",
    close_pillbox: "Close the pillbox",
    my_prescriptions: "My Prescriptions",
    no_active_prescriptions: "No active prescription.",
    period_morning: "Morning",
    period_noon: "Noon",
    period_evening: "Evening",
    compartment: "Compartment",
    no_medication_for_period: "No medication for this period.",
    take_now: "Take now",
    dosage_label: "Dosage:",
    time_label: "Time:",
    next_intake: "Next intake in:",
    medication_fallback: "Medication",
    unknown_dosage: "unknown",
    opened_ok: "The pillbox was opened successfully.",
    closed_ok: "The pillbox was closed successfully.",
    scheduled_open_ok:
        "The pillbox was opened for your medication. It will close automatically after 1 minute.",
    already_open: "The pillbox is already open.",
    already_closed: "The pillbox is already closed.",
    control_failed: "Something went wrong while controlling the pillbox.",

    add_medication: "Add medication",
    add_prescription: "Add prescription",
    new_medication_title: "New medication",
    new_prescription_title: "New prescription",
    medication_name_label: "Name",
    medication_dosage_label: "Dosage",
    no_medications: "No medication.",
    no_prescriptions: "No prescription.",
    fill_medication_fields: "Please fill in both medication fields.",
    fill_prescription_fields: "Please fill in all prescription fields.",
    patient_label: "Patient",
    medication_label: "Medication",
    compartment_field_label: "Compartment",
    intake_time_label: "Intake time",
    select_placeholder: "-- Select --",
    deactivate: "Deactivate",
    inactive_badge: "(Inactive)",
    confirm_deactivate: "Do you really want to deactivate this prescription?",
    deactivate_failed: "Could not deactivate the prescription.",
    create_medication_failed: "Could not create the medication.",
    create_prescription_failed: "Could not create the prescription.",
    unknown_patient: "Unknown patient",

    no_contacts_doctors: "No doctor available.",
    no_contacts_patients: "No patient available.",
    empty_conversation: "No messages yet. Start the conversation!",
    message_placeholder: "Your message...",
    send: "Send",
    send_failed: "Could not send the message. Try again later.",
    doctor_prefix: "Dr. ",
};

/// Label for a dispenser compartment: the three conventional slots get their
/// period name, anything else falls back to "Compartment N".
pub fn period_label(strings: &Strings, motor_number: u32) -> String {
    match motor_number {
        1 => strings.period_morning.to_string(),
        2 => strings.period_noon.to_string(),
        3 => strings.period_evening.to_string(),
        other => format!("{} {}", strings.compartment, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_compartments_get_period_names() {
        assert_eq!(period_label(&FR, 1), "Matin");
        assert_eq!(period_label(&FR, 2), "Midi");
        assert_eq!(period_label(&FR, 3), "Soir");
        assert_eq!(period_label(&EN, 3), "Evening");
    }

    #[test]
    fn unknown_compartments_keep_their_number() {
        assert_eq!(period_label(&FR, 5), "Compartiment 5");
        assert_eq!(period_label(&EN, 12), "Compartment 12");
    }
}
