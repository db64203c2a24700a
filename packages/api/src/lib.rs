//! # REST client for the pillbox server
//!
//! All server communication is plain request/response JSON over a fixed set of
//! REST endpoints; business logic (authentication, scheduling persistence,
//! hardware control) lives on the server and this crate only calls it.
//!
//! [`ApiClient`] wraps a [`reqwest::Client`]. Every call goes through the generic
//! [`ApiClient::request`] helper, which serializes the body as JSON for mutating
//! methods, always sends credentials (the session cookie), and parses the
//! response body as JSON unconditionally: the server reports business failures
//! through the body's `success` flag, not through HTTP status codes. Transport
//! and parse errors are logged and returned to the caller, never swallowed.
//!
//! ## Endpoints
//!
//! | Wrapper | Method and path |
//! |---------|-----------------|
//! | [`ApiClient::login`] / [`ApiClient::logout`] | `POST /api/login`, `POST /api/logout` |
//! | [`ApiClient::users`] | `GET /api/users?is_doctor=0\|1` |
//! | [`ApiClient::medications`] / [`ApiClient::create_medication`] | `GET\|POST /api/medications` |
//! | [`ApiClient::prescriptions`] / [`ApiClient::create_prescription`] | `GET\|POST /api/prescriptions` |
//! | [`ApiClient::deactivate_prescription`] | `POST /api/prescriptions/{id}/deactivate` |
//! | [`ApiClient::messages`] / [`ApiClient::send_message`] | `GET\|POST /api/messages` |
//! | [`ApiClient::conversation`] | `GET /api/conversations/{user_id}` |
//! | [`ApiClient::control_pillbox`] | `POST /api/pillbox/control` |
//! | [`ApiClient::pillbox_state`] | `GET /api/pillbox/etat` |
//! | [`ApiClient::test_connection`] | best-effort connectivity probe |

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub mod models;

pub use models::{
    Ack, ControlCommand, ControlResponse, LoginRequest, LoginResponse, Medication,
    MedicationsResponse, Message, MessagesResponse, NewMedication, NewMessage, NewPrescription,
    PillboxAction, PillboxStateResponse, Prescription, PrescriptionsResponse, User, UsersResponse,
};

/// Errors surfaced by [`ApiClient`]. Business-level failures are not errors at
/// this layer; they travel inside the response envelopes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent, or the response body was not the JSON
    /// shape the caller asked for.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// No browser window to derive the API origin from.
    #[error("no browser window available")]
    NoWindow,
}

/// HTTP client for the pillbox REST API.
///
/// Cheap to clone; clones share the same connection pool and cookie store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client against an explicit base URL, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: build_http_client(),
        }
    }

    /// Create a client against the origin the page was served from.
    #[cfg(target_arch = "wasm32")]
    pub fn from_origin() -> Result<Self, ApiError> {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .ok_or(ApiError::NoWindow)?;
        Ok(Self::new(origin))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generic request helper. `path` is relative to `/api/`.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}/api/{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");

        let mut req = self.http.request(method.clone(), &url);
        #[cfg(target_arch = "wasm32")]
        {
            // Browser fetch only attaches the session cookie when asked to.
            req = req.fetch_credentials_include();
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|err| {
            tracing::error!(%method, %url, error = %err, "api request failed");
            err
        })?;

        // The body is parsed regardless of the HTTP status: the server answers
        // business failures with a JSON envelope too.
        let parsed = response.json::<T>().await.map_err(|err| {
            tracing::error!(%method, %url, error = %err, "api response was not valid JSON");
            err
        })?;
        Ok(parsed)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, body).await
    }

    // -- authentication -----------------------------------------------------

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        is_doctor_selected: bool,
    ) -> Result<LoginResponse, ApiError> {
        self.post(
            "login",
            Some(&LoginRequest {
                username,
                password,
                is_doctor_selected,
            }),
        )
        .await
    }

    pub async fn logout(&self) -> Result<Ack, ApiError> {
        self.post::<Ack, ()>("logout", None).await
    }

    // -- users --------------------------------------------------------------

    /// List users filtered by role: `is_doctor = true` for doctors, `false` for patients.
    pub async fn users(&self, is_doctor: bool) -> Result<UsersResponse, ApiError> {
        let flag = if is_doctor { 1 } else { 0 };
        self.get(&format!("users?is_doctor={flag}")).await
    }

    // -- medications --------------------------------------------------------

    pub async fn medications(&self) -> Result<MedicationsResponse, ApiError> {
        self.get("medications").await
    }

    pub async fn create_medication(&self, name: &str, dosage: &str) -> Result<Ack, ApiError> {
        self.post("medications", Some(&NewMedication { name, dosage }))
            .await
    }

    // -- prescriptions ------------------------------------------------------

    pub async fn prescriptions(&self) -> Result<PrescriptionsResponse, ApiError> {
        self.get("prescriptions").await
    }

    pub async fn create_prescription(
        &self,
        prescription: &NewPrescription,
    ) -> Result<Ack, ApiError> {
        self.post("prescriptions", Some(prescription)).await
    }

    pub async fn deactivate_prescription(&self, id: i64) -> Result<Ack, ApiError> {
        self.post::<Ack, ()>(&format!("prescriptions/{id}/deactivate"), None)
            .await
    }

    // -- messaging ----------------------------------------------------------

    /// All messages involving the logged-in user.
    pub async fn messages(&self) -> Result<MessagesResponse, ApiError> {
        self.get("messages").await
    }

    /// Full conversation history with one other user.
    pub async fn conversation(&self, user_id: i64) -> Result<MessagesResponse, ApiError> {
        self.get(&format!("conversations/{user_id}")).await
    }

    pub async fn send_message(&self, receiver_id: i64, content: &str) -> Result<Ack, ApiError> {
        self.post(
            "messages",
            Some(&NewMessage {
                receiver_id,
                content,
            }),
        )
        .await
    }

    // -- dispenser ----------------------------------------------------------

    /// Ask the server to open or close one compartment. `is_scheduled` marks
    /// the command as triggered by the countdown rather than a user click; the
    /// server uses it to decide auto-close behavior.
    pub async fn control_pillbox(
        &self,
        motor_number: u32,
        action: PillboxAction,
        is_scheduled: bool,
    ) -> Result<ControlResponse, ApiError> {
        self.post(
            "pillbox/control",
            Some(&ControlCommand {
                motor_number,
                action,
                is_scheduled,
            }),
        )
        .await
    }

    /// Reported open/closed state of the dispenser. The path is the one the
    /// server publishes.
    pub async fn pillbox_state(&self) -> Result<PillboxStateResponse, ApiError> {
        self.get("pillbox/etat").await
    }

    // -- connectivity -------------------------------------------------------

    /// Best-effort connectivity probe: posts a throwaway login and reports
    /// whether the server answered at all. Never errors.
    pub async fn test_connection(&self) -> bool {
        let url = format!("{}/api/login", self.base_url);
        let body = LoginRequest {
            username: "test",
            password: "test",
            is_doctor_selected: false,
        };
        let req = self.http.post(&url).json(&body);
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        match req.send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::warn!(error = %err, "connectivity probe failed");
                false
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> reqwest::Client {
    // The session cookie set by /api/login has to survive across calls.
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> reqwest::Client {
    // The browser owns the cookie jar; requests opt in per call.
    reqwest::Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query, State};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Inner {
        prescriptions: Vec<Prescription>,
        messages: Vec<Message>,
        pillbox_open: bool,
    }

    #[derive(Clone, Default)]
    struct MockState {
        inner: Arc<Mutex<Inner>>,
    }

    fn sample_prescriptions() -> Vec<Prescription> {
        vec![
            Prescription {
                id: 1,
                patient_id: 10,
                medication_id: 100,
                motor_number: 1,
                intake_time: "08:00".into(),
                active: true,
                medication_name: Some("Aspirin".into()),
                medication_dosage: Some("500mg".into()),
                patient_name: Some("Jean Dupont".into()),
            },
            Prescription {
                id: 2,
                patient_id: 10,
                medication_id: 101,
                motor_number: 3,
                intake_time: "20:30".into(),
                active: true,
                medication_name: Some("Doliprane".into()),
                medication_dosage: Some("1g".into()),
                patient_name: Some("Jean Dupont".into()),
            },
        ]
    }

    async fn handle_login(Json(body): Json<Value>) -> Json<Value> {
        if body["username"] == "marie" && body["password"] == "secret" {
            Json(json!({
                "success": true,
                "user": { "id": 7, "first_name": "Marie", "last_name": "Curie", "is_doctor": true }
            }))
        } else {
            Json(json!({ "success": false, "message": "bad creds" }))
        }
    }

    async fn handle_users(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let want_doctor = params.get("is_doctor").map(String::as_str) == Some("1");
        let all = vec![
            json!({ "id": 7, "first_name": "Marie", "last_name": "Curie", "is_doctor": true }),
            json!({ "id": 10, "first_name": "Jean", "last_name": "Dupont", "is_doctor": false }),
        ];
        let users: Vec<Value> = all
            .into_iter()
            .filter(|u| u["is_doctor"] == want_doctor)
            .collect();
        Json(json!({ "success": true, "users": users }))
    }

    async fn handle_prescriptions(State(state): State<MockState>) -> Json<Value> {
        let inner = state.inner.lock().unwrap();
        Json(json!({
            "success": true,
            "prescriptions": serde_json::to_value(&inner.prescriptions).unwrap()
        }))
    }

    async fn handle_deactivate(
        State(state): State<MockState>,
        Path(id): Path<i64>,
    ) -> Json<Value> {
        let mut inner = state.inner.lock().unwrap();
        match inner.prescriptions.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.active = false;
                Json(json!({ "success": true }))
            }
            None => Json(json!({ "success": false, "message": "prescription introuvable" })),
        }
    }

    async fn handle_control(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
        let mut inner = state.inner.lock().unwrap();
        match body["action"].as_str() {
            Some("open") if inner.pillbox_open => {
                Json(json!({ "success": false, "alreadyOpen": true }))
            }
            Some("close") if !inner.pillbox_open => {
                Json(json!({ "success": false, "alreadyClosed": true }))
            }
            Some(action) => {
                inner.pillbox_open = action == "open";
                Json(json!({ "success": true }))
            }
            None => Json(json!({ "success": false, "message": "action manquante" })),
        }
    }

    async fn handle_state(State(state): State<MockState>) -> Json<Value> {
        let inner = state.inner.lock().unwrap();
        Json(json!({ "success": true, "isOpen": inner.pillbox_open }))
    }

    async fn handle_send_message(
        State(state): State<MockState>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let mut inner = state.inner.lock().unwrap();
        let id = inner.messages.len() as i64 + 1;
        inner.messages.push(Message {
            id,
            sender_id: 10,
            receiver_id: body["receiver_id"].as_i64().unwrap_or(0),
            content: body["content"].as_str().unwrap_or("").to_string(),
            created_at: Some("2025-06-01 09:00:00".into()),
        });
        Json(json!({ "success": true }))
    }

    async fn handle_conversation(
        State(state): State<MockState>,
        Path(user_id): Path<i64>,
    ) -> Json<Value> {
        let inner = state.inner.lock().unwrap();
        let messages: Vec<&Message> = inner
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .collect();
        Json(json!({
            "success": true,
            "messages": serde_json::to_value(&messages).unwrap()
        }))
    }

    async fn spawn_server(state: MockState) -> String {
        let app = Router::new()
            .route("/api/login", post(handle_login))
            .route("/api/users", get(handle_users))
            .route("/api/prescriptions", get(handle_prescriptions))
            .route("/api/prescriptions/{id}/deactivate", post(handle_deactivate))
            .route("/api/pillbox/control", post(handle_control))
            .route("/api/pillbox/etat", get(handle_state))
            .route("/api/messages", post(handle_send_message))
            .route("/api/conversations/{user_id}", get(handle_conversation))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn client_with_prescriptions() -> (ApiClient, MockState) {
        let state = MockState::default();
        state.inner.lock().unwrap().prescriptions = sample_prescriptions();
        let base = spawn_server(state.clone()).await;
        (ApiClient::new(base), state)
    }

    #[tokio::test]
    async fn login_success_returns_user() {
        let base = spawn_server(MockState::default()).await;
        let client = ApiClient::new(base);

        let resp = client.login("marie", "secret", true).await.unwrap();
        assert!(resp.success);
        let user = resp.user.unwrap();
        assert_eq!(user.id, 7);
        assert!(user.is_doctor);
        assert_eq!(user.full_name(), "Marie Curie");
    }

    #[tokio::test]
    async fn login_failure_carries_server_message() {
        let base = spawn_server(MockState::default()).await;
        let client = ApiClient::new(base);

        let resp = client.login("marie", "wrong", false).await.unwrap();
        assert!(!resp.success);
        assert!(resp.user.is_none());
        assert_eq!(resp.message.as_deref(), Some("bad creds"));
    }

    #[tokio::test]
    async fn users_filters_by_role() {
        let base = spawn_server(MockState::default()).await;
        let client = ApiClient::new(base);

        let doctors = client.users(true).await.unwrap();
        assert_eq!(doctors.users.len(), 1);
        assert!(doctors.users[0].is_doctor);

        let patients = client.users(false).await.unwrap();
        assert_eq!(patients.users.len(), 1);
        assert!(!patients.users[0].is_doctor);
    }

    #[tokio::test]
    async fn deactivate_then_list_shows_inactive() {
        let (client, _state) = client_with_prescriptions().await;

        let before = client.prescriptions().await.unwrap();
        assert!(before.prescriptions.iter().all(|p| p.active));

        let ack = client.deactivate_prescription(1).await.unwrap();
        assert!(ack.success);

        let after = client.prescriptions().await.unwrap();
        let p1 = after.prescriptions.iter().find(|p| p.id == 1).unwrap();
        assert!(!p1.active);
        let p2 = after.prescriptions.iter().find(|p| p.id == 2).unwrap();
        assert!(p2.active);
    }

    #[tokio::test]
    async fn deactivate_unknown_id_is_business_failure() {
        let (client, _state) = client_with_prescriptions().await;

        let ack = client.deactivate_prescription(999).await.unwrap();
        assert!(!ack.success);
        assert_eq!(ack.message.as_deref(), Some("prescription introuvable"));
    }

    #[tokio::test]
    async fn control_reports_already_open() {
        let base = spawn_server(MockState::default()).await;
        let client = ApiClient::new(base);

        let first = client
            .control_pillbox(1, PillboxAction::Open, false)
            .await
            .unwrap();
        assert!(first.success);

        let second = client
            .control_pillbox(1, PillboxAction::Open, true)
            .await
            .unwrap();
        assert!(!second.success);
        assert!(second.already_open);
        assert!(!second.already_closed);

        let state = client.pillbox_state().await.unwrap();
        assert!(state.success);
        assert!(state.is_open);
    }

    #[tokio::test]
    async fn close_when_closed_reports_already_closed() {
        let base = spawn_server(MockState::default()).await;
        let client = ApiClient::new(base);

        let resp = client
            .control_pillbox(1, PillboxAction::Close, false)
            .await
            .unwrap();
        assert!(!resp.success);
        assert!(resp.already_closed);
    }

    #[tokio::test]
    async fn send_message_then_conversation_contains_it() {
        let base = spawn_server(MockState::default()).await;
        let client = ApiClient::new(base);

        let ack = client.send_message(7, "Bonjour docteur").await.unwrap();
        assert!(ack.success);

        let conv = client.conversation(7).await.unwrap();
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].content, "Bonjour docteur");
        assert_eq!(conv.messages[0].receiver_id, 7);
    }

    #[tokio::test]
    async fn test_connection_reflects_reachability() {
        let base = spawn_server(MockState::default()).await;
        assert!(ApiClient::new(base).test_connection().await);

        // Nothing listens on port 1.
        assert!(!ApiClient::new("http://127.0.0.1:1").test_connection().await);
    }
}
