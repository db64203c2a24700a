//! # Domain models and wire envelopes for the pillbox API
//!
//! Defines the data structures exchanged with the pillbox server. Every entity is
//! owned by the server; the client only holds transient copies scoped to the page
//! session. All types are `Serialize + Deserialize` so they can cross the wire as
//! JSON.
//!
//! ## Entities
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A patient or doctor account. The `is_doctor` flag decides which dashboard the client shows after login. |
//! | [`Medication`] | A catalog entry: name plus a free-form dosage string. |
//! | [`Prescription`] | Binds a patient, a medication, a dispenser compartment and a daily `HH:MM` intake time. The server joins in the display-only `medication_name`, `medication_dosage` and `patient_name` fields. |
//! | [`Message`] | One chat message between a patient and a doctor, append-only from the client's perspective. |
//!
//! ## Envelopes
//!
//! Every response carries a business-level `success` flag; HTTP status codes do
//! not communicate business failures. The optional `message` field holds the
//! server-provided error text when `success` is false.

use serde::{Deserialize, Serialize};

/// A user account. The server never sends credentials here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub is_doctor: bool,
}

impl User {
    /// Display name: "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A medication catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub dosage: String,
}

/// A prescription record as returned by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub patient_id: i64,
    pub medication_id: i64,
    /// Dispenser compartment, conventionally 1 = morning, 2 = noon, 3 = evening.
    pub motor_number: u32,
    /// Daily intake time, "HH:MM".
    pub intake_time: String,
    pub active: bool,
    /// Joined display fields, present on list responses.
    #[serde(default)]
    pub medication_name: Option<String>,
    #[serde(default)]
    pub medication_dosage: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
}

/// One chat message. `created_at` is an opaque server timestamp used for display only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Dispenser action sent to `/api/pillbox/control`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillboxAction {
    Open,
    Close,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    /// Which role tab was selected on the login screen. Informational: the
    /// server decides the actual role from the account.
    #[serde(rename = "isDoctorSelected")]
    pub is_doctor_selected: bool,
}

#[derive(Debug, Serialize)]
pub struct NewMedication<'a> {
    pub name: &'a str,
    pub dosage: &'a str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPrescription {
    pub patient_id: i64,
    pub medication_id: i64,
    pub motor_number: u32,
    pub intake_time: String,
}

#[derive(Debug, Serialize)]
pub struct NewMessage<'a> {
    pub receiver_id: i64,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ControlCommand {
    pub motor_number: u32,
    pub action: PillboxAction,
    pub is_scheduled: bool,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// Response to a login attempt.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: Option<User>,
    pub message: Option<String>,
}

/// Generic acknowledgement for mutations (logout, creates, deactivate, send).
#[derive(Clone, Debug, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UsersResponse {
    pub success: bool,
    #[serde(default)]
    pub users: Vec<User>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MedicationsResponse {
    pub success: bool,
    #[serde(default)]
    pub medications: Vec<Medication>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PrescriptionsResponse {
    pub success: bool,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessagesResponse {
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub message: Option<String>,
}

/// Response to a dispenser control command. The `alreadyOpen`/`alreadyClosed`
/// flags let the client reconcile its local open/closed state without a fresh
/// poll when the command was redundant.
#[derive(Clone, Debug, Deserialize)]
pub struct ControlResponse {
    pub success: bool,
    #[serde(default, rename = "alreadyOpen")]
    pub already_open: bool,
    #[serde(default, rename = "alreadyClosed")]
    pub already_closed: bool,
    pub message: Option<String>,
}

/// Dispenser state report. The hardware reports a single open/closed flag for
/// the whole unit.
#[derive(Clone, Debug, Deserialize)]
pub struct PillboxStateResponse {
    pub success: bool,
    #[serde(default, rename = "isOpen")]
    pub is_open: bool,
}
