// SPDX-License-Identifier: MIT

//! Portal protocol client.
//!
//! The portal exposes one RPC-over-HTTP endpoint: every interaction is a
//! form-encoded POST to `{base_url}/{service_id}/cs_web_main.php`,
//! differentiated by a numeric `EventNo` code. This client owns the single
//! authenticated session (token, current user status, last raw response)
//! and exposes one typed operation per protocol event.
//!
//! The session is a shared mutable resource on the portal side, so the
//! client is strictly sequential: one request at a time, no concurrent use.

use std::time::Duration;

use crate::config::Config;
use crate::error::{PortalError, Result};
use crate::html;
use crate::models::{CycleSlot, ParkingStation, UserStatus};

/// Fixed list-page size; pagination is unused.
const MAX_INFO_NUM: &str = "255";

/// Bound every request; the source portal is known to hang under load.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Protocol event codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Login,
    ParkingList,
    CycleList,
    Reserve,
    Top,
    Cancel,
}

impl Event {
    fn code(self) -> &'static str {
        match self {
            Event::Login => "21401",
            Event::ParkingList => "21614",
            Event::CycleList => "25701",
            Event::Reserve => "25901",
            Event::Top => "25904",
            Event::Cancel => "27901",
        }
    }
}

type Payload = Vec<(&'static str, String)>;

/// The authenticated session state, owned exclusively by the client.
/// The token is issued at login and refreshed only by another login.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    status: UserStatus,
    last_body: String,
}

impl Session {
    /// Opaque session token embedded in every authenticated request.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Status as of the most recent status check.
    pub fn status(&self) -> UserStatus {
        self.status
    }

    /// Raw body of the last successful response, kept for follow-up
    /// fragment extraction.
    pub fn last_body(&self) -> &str {
        &self.last_body
    }
}

/// Client for the portal's event-tagged POST protocol.
#[derive(Debug)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
    member_id: String,
    service_id: String,
    session: Session,
}

impl PortalClient {
    /// Log in and return a client holding the fresh session.
    ///
    /// Login happens exactly once, here; the client never re-logs-in on
    /// its own. A response without a `SessionID` field fails with
    /// [`PortalError::Login`]. The initial status check runs immediately
    /// so the session starts with a resolved status.
    pub async fn login(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut client = Self {
            http,
            base_url: config.portal_url.clone(),
            member_id: config.member_id.clone(),
            service_id: config.service_id.clone(),
            session: Session {
                token: String::new(),
                status: UserStatus::Unknown,
                last_body: String::new(),
            },
        };

        let payload = login_payload(&config.member_id, &config.password, &config.area_id);
        let body = client.post(payload).await?;
        client.session.token = html::session_token(&body).ok_or(PortalError::Login)?;
        client.refresh_status().await?;
        tracing::debug!(status = ?client.session.status, "Login complete");
        Ok(client)
    }

    /// Portal service id (also the `UserID` wire field).
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Post the "top" event and return the raw status fragment, if the
    /// page carried one.
    pub async fn fetch_top_status(&mut self) -> Result<Option<String>> {
        let payload = self.authed_payload(Event::Top)?;
        let body = self.post(payload).await?;
        Ok(html::parse_user_status(&body))
    }

    /// Re-query and classify the user status, storing it on the session.
    pub async fn refresh_status(&mut self) -> Result<UserStatus> {
        let fragment = self.fetch_top_status().await?;
        let status = UserStatus::classify(fragment.as_deref());
        self.session.status = status;
        Ok(status)
    }

    /// Stations in an area, in document order. `None` when the portal
    /// returned no form container (no matching stations, not an error).
    pub async fn fetch_parking_list(
        &mut self,
        area_id: &str,
    ) -> Result<Option<Vec<ParkingStation>>> {
        let base = self.authed_payload(Event::ParkingList)?;
        let payload = parking_list_payload(base, &self.service_id, area_id);
        let body = self.post(payload).await?;

        let Some(forms) = html::parse_form_list(&body) else {
            return Ok(None);
        };
        let mut stations = Vec::with_capacity(forms.len());
        for form in forms {
            let id = form.hidden_field("ParkingID").ok_or_else(|| {
                PortalError::MalformedResponse("parking form without ParkingID".into())
            })?;
            let (name, availability) = html::parking_info(&form).ok_or_else(|| {
                PortalError::MalformedResponse("parking form without name anchor".into())
            })?;
            stations.push(ParkingStation {
                id,
                name,
                availability,
                form,
            });
        }
        Ok(Some(stations))
    }

    /// Reservable slots at one station. `None` when the portal returned
    /// no form container (station empty, not an error).
    pub async fn fetch_cycle_list(&mut self, parking_id: &str) -> Result<Option<Vec<CycleSlot>>> {
        let base = self.authed_payload(Event::CycleList)?;
        let payload = cycle_list_payload(base, &self.service_id, parking_id);
        let body = self.post(payload).await?;

        let Some(forms) = html::parse_form_list(&body) else {
            return Ok(None);
        };
        let mut slots = Vec::with_capacity(forms.len());
        for form in forms {
            let cycle_id = form.hidden_field("CycleID").ok_or_else(|| {
                PortalError::MalformedResponse("cycle form without CycleID".into())
            })?;
            let attach_id = form.hidden_field("AttachID").ok_or_else(|| {
                PortalError::MalformedResponse("cycle form without AttachID".into())
            })?;
            slots.push(CycleSlot {
                cycle_id,
                attach_id,
            });
        }
        Ok(Some(slots))
    }

    /// Post a reservation for one slot. The portal gives no synchronous
    /// confirmation; callers re-check status afterwards.
    pub async fn reserve(&mut self, cycle_id: &str, attach_id: &str) -> Result<String> {
        let base = self.authed_payload(Event::Reserve)?;
        let payload = reserve_payload(base, &self.service_id, cycle_id, attach_id);
        self.post(payload).await
    }

    /// Post the cancel event. The reservation-state gate lives in the
    /// reservation service, not here.
    pub async fn cancel(&mut self) -> Result<String> {
        let payload = self.authed_payload(Event::Cancel)?;
        self.post(payload).await
    }

    /// Base authenticated payload. A missing token is a protocol error,
    /// never silently sent as empty.
    fn authed_payload(&self, event: Event) -> Result<Payload> {
        if self.session.token.is_empty() {
            return Err(PortalError::SessionExpired);
        }
        Ok(base_payload(
            event,
            &self.session.token,
            &self.service_id,
            &self.member_id,
        ))
    }

    /// POST one event to the portal endpoint.
    ///
    /// Non-success HTTP status and session-expired interstitials fail
    /// before the session is touched, so an error leaves the token,
    /// status, and last body exactly as they were.
    async fn post(&mut self, payload: Payload) -> Result<String> {
        let url = format!("{}/{}/cs_web_main.php", self.base_url, self.service_id);
        let response = self.http.post(&url).form(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Portal request failed");
            return Err(PortalError::Request(status));
        }
        let body = response.text().await?;
        if html::is_session_expired(&body) {
            return Err(PortalError::SessionExpired);
        }
        self.session.last_body = body.clone();
        Ok(body)
    }
}

fn login_payload(member_id: &str, password: &str, area_id: &str) -> Payload {
    vec![
        ("EventNo", Event::Login.code().to_string()),
        ("MemberID", member_id.to_string()),
        ("Password", password.to_string()),
        ("MemAreaID", area_id.to_string()),
    ]
}

fn base_payload(event: Event, token: &str, service_id: &str, member_id: &str) -> Payload {
    vec![
        ("EventNo", event.code().to_string()),
        ("SessionID", token.to_string()),
        ("UserID", service_id.to_string()),
        ("MemberID", member_id.to_string()),
    ]
}

fn parking_list_payload(mut base: Payload, service_id: &str, area_id: &str) -> Payload {
    // map/pagination features unused: zeroed or empty
    base.extend([
        ("GetInfoNum", MAX_INFO_NUM.to_string()),
        ("GetInfoTopNum", "1".to_string()),
        ("MapType", "0".to_string()),
        ("MapCenterLat", String::new()),
        ("MapCenterLon", String::new()),
        ("MapZoom", "0".to_string()),
        ("EntServiceID", format!("{service_id}0001")),
        ("AreaID", area_id.to_string()),
        ("Location", String::new()),
    ]);
    base
}

fn cycle_list_payload(mut base: Payload, service_id: &str, parking_id: &str) -> Payload {
    base.extend([
        ("GetInfoNum", MAX_INFO_NUM.to_string()),
        ("GetInfoTopNum", "1".to_string()),
        ("ParkingEntID", service_id.to_string()),
        ("ParkingID", parking_id.to_string()),
        ("ParkingLat", "0".to_string()),
        ("ParkingLon", "0".to_string()),
    ]);
    base
}

fn reserve_payload(mut base: Payload, service_id: &str, cycle_id: &str, attach_id: &str) -> Payload {
    base.extend([
        ("CenterLat", "0".to_string()),
        ("CenterLon", "0".to_string()),
        ("CycLat", "0".to_string()),
        ("CycLon", "0".to_string()),
        ("CycleID", cycle_id.to_string()),
        ("AttachID", attach_id.to_string()),
        ("CycleTypeNo", "6".to_string()),
        ("CycleEntID", service_id.to_string()),
    ]);
    base
}
