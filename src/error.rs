// SPDX-License-Identifier: MIT

//! Portal error taxonomy.
//!
//! Every failure is fatal to the operation that raised it and propagates to
//! the caller; the only retry in the crate is the bounded reservation
//! attempt loop, which retries the reserve sequence, never login or listing.

/// Errors raised by the portal protocol client.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// The portal answered with a non-success HTTP status.
    #[error("portal request failed with HTTP status {0}")]
    Request(reqwest::StatusCode),

    /// The request never completed at the transport level.
    #[error("portal transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The portal invalidated the session ("Please login again" page).
    /// Recovery is the caller's responsibility: discard the client and
    /// log in again.
    #[error("portal session invalidated, login required")]
    SessionExpired,

    /// Login completed at the transport level but produced no usable
    /// session (no `SessionID` field in the response).
    #[error("login response carried no session token")]
    Login,

    /// A response violated the portal's own format contract, e.g. a form
    /// missing a hidden field that every form of that event type carries.
    #[error("unexpected portal response: {0}")]
    MalformedResponse(String),
}

/// Result type alias for portal operations.
pub type Result<T> = std::result::Result<T, PortalError>;
