// SPDX-License-Identifier: MIT

//! In-process stub portal for client tests.
//!
//! One axum route standing in for `cs_web_main.php`: it records every
//! form POST, counts them per event code, and answers with canned HTML
//! configured per event. A queued response is consumed once; the last
//! entry in a queue repeats forever.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::post;
use axum::Router;
use docycle::config::Config;

#[allow(dead_code)]
pub const LOGIN: &str = "21401";
#[allow(dead_code)]
pub const PARKING_LIST: &str = "21614";
#[allow(dead_code)]
pub const CYCLE_LIST: &str = "25701";
#[allow(dead_code)]
pub const RESERVE: &str = "25901";
#[allow(dead_code)]
pub const TOP: &str = "25904";
#[allow(dead_code)]
pub const CANCEL: &str = "27901";

#[derive(Default)]
struct PortalState {
    responses: Mutex<HashMap<String, VecDeque<(u16, String)>>>,
    counts: Mutex<HashMap<String, usize>>,
    requests: Mutex<Vec<HashMap<String, String>>>,
}

#[derive(Clone)]
pub struct StubPortal {
    pub base_url: String,
    state: Arc<PortalState>,
}

impl StubPortal {
    /// Start the stub on an ephemeral port with sane defaults: login
    /// succeeds with token `abc123`, top reports neutral, reserve and
    /// cancel answer an empty page.
    pub async fn start() -> Self {
        let state = Arc::new(PortalState::default());
        let portal = Self {
            base_url: String::new(),
            state: state.clone(),
        };
        portal.set_response(LOGIN, 200, login_page("abc123"));
        portal.set_response(TOP, 200, top_page_neutral());
        portal.set_response(RESERVE, 200, blank_page());
        portal.set_response(CANCEL, 200, blank_page());

        let app = Router::new()
            .route("/TYO/cs_web_main.php", post(handle))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub portal");
        let addr = listener.local_addr().expect("stub portal addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub portal serve");
        });

        Self {
            base_url: format!("http://{}", addr),
            ..portal
        }
    }

    /// Config pointing the real client at this stub.
    pub fn config(&self) -> Config {
        Config {
            portal_url: self.base_url.clone(),
            ..Config::test_default()
        }
    }

    /// Replace the canned response for an event.
    pub fn set_response(&self, event: &str, status: u16, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(event.to_string(), VecDeque::from([(status, body.into())]));
    }

    /// Queue a response behind the existing ones for an event.
    #[allow(dead_code)]
    pub fn push_response(&self, event: &str, status: u16, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .unwrap()
            .entry(event.to_string())
            .or_default()
            .push_back((status, body.into()));
    }

    /// How many POSTs carried this event code.
    #[allow(dead_code)]
    pub fn count(&self, event: &str) -> usize {
        *self.state.counts.lock().unwrap().get(event).unwrap_or(&0)
    }

    /// Fields of the most recent POST carrying this event code.
    #[allow(dead_code)]
    pub fn last_request(&self, event: &str) -> Option<HashMap<String, String>> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|fields| fields.get("EventNo").map(String::as_str) == Some(event))
            .cloned()
    }
}

async fn handle(
    State(state): State<Arc<PortalState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let event = fields.get("EventNo").cloned().unwrap_or_default();
    *state
        .counts
        .lock()
        .unwrap()
        .entry(event.clone())
        .or_insert(0) += 1;
    state.requests.lock().unwrap().push(fields);

    let (status, body) = {
        let mut responses = state.responses.lock().unwrap();
        match responses.get_mut(&event) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or((200, blank_page())),
            None => (200, blank_page()),
        }
    };
    (
        StatusCode::from_u16(status).expect("stub status code"),
        Html(body),
    )
}

// --- fixture pages ---

pub fn blank_page() -> String {
    "<html><body><div class=\"main_inner\">ok</div></body></html>".to_string()
}

pub fn login_page(token: &str) -> String {
    format!(
        r#"<html><body><form method="post" action="/TYO/cs_web_main.php">
  <input type="hidden" name="SessionID" value="{token}">
  <input type="hidden" name="UserID" value="TYO">
</form></body></html>"#
    )
}

#[allow(dead_code)]
pub fn login_page_without_token() -> String {
    "<html><body><form><input type=\"hidden\" name=\"UserID\" value=\"TYO\"></form></body></html>"
        .to_string()
}

pub fn top_page_neutral() -> String {
    "<html><body><div class=\"main_inner\">top</div></body></html>".to_string()
}

#[allow(dead_code)]
pub fn top_page_reserved(detail: &str) -> String {
    format!(
        r#"<html><body><p class="usr_stat">2026/08/24 10:00<br/>Reserved: {detail}</p></body></html>"#
    )
}

#[allow(dead_code)]
pub fn top_page_in_use(detail: &str) -> String {
    format!(
        r#"<html><body><p class="usr_stat">2026/08/24 10:00<br/>In use: {detail}</p></body></html>"#
    )
}

#[allow(dead_code)]
pub fn session_expired_page() -> String {
    r#"<html><body><div class="main_inner_message">Please login again.</div></body></html>"#
        .to_string()
}

/// Cycle-list page with one form per (cycle id, attach id) pair.
#[allow(dead_code)]
pub fn cycle_list_page(slots: &[(&str, &str)]) -> String {
    let forms: String = slots
        .iter()
        .map(|(cycle_id, attach_id)| {
            format!(
                r##"<form method="post" action="/TYO/cs_web_main.php">
  <input type="hidden" name="CycleID" value="{cycle_id}">
  <input type="hidden" name="AttachID" value="{attach_id}">
  <a href="#">{cycle_id}</a>
</form>"##
            )
        })
        .collect();
    format!(r#"<html><body><div class="sp_view">{forms}</div></body></html>"#)
}

/// Parking-list page; each entry is (ParkingID, ParkingLat, name, availability).
#[allow(dead_code)]
pub fn parking_list_page(entries: &[(&str, &str, &str, &str)]) -> String {
    let forms: String = entries
        .iter()
        .map(|(parking_id, parking_lat, name, availability)| {
            format!(
                r##"<form method="post" action="/TYO/cs_web_main.php">
  <input type="hidden" name="ParkingID" value="{parking_id}">
  <input type="hidden" name="ParkingLat" value="{parking_lat}">
  <a href="#">{name}<br/>{availability}</a>
</form>"##
            )
        })
        .collect();
    format!(r#"<html><body><div class="sp_view">{forms}</div></body></html>"#)
}

/// A page whose mobile-view container is missing entirely.
#[allow(dead_code)]
pub fn page_without_container() -> String {
    r#"<html><body><div class="pc_view"><form></form></div></body></html>"#.to_string()
}
