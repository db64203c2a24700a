//! Shared UI for the pillbox application: session state, the login screen, the
//! patient and doctor dashboards, and the messaging panel both roles share.
//!
//! All components talk to the server through the [`api::ApiClient`] provided by
//! [`SessionProvider`]; no component holds authoritative state, every mutation
//! is followed by a re-fetch.

pub mod i18n;
pub mod platform;
pub mod schedule;

mod session;
pub use session::{use_api, use_session, LogoutButton, Role, Session, SessionProvider};

mod login;
pub use login::LoginScreen;

mod modal;
pub use modal::ModalOverlay;

mod messaging;
pub use messaging::MessagesPanel;

mod patient;
pub use patient::PatientDashboard;

mod doctor;
pub use doctor::DoctorDashboard;
