// SPDX-License-Identifier: MIT

//! User status as reported by the portal's "top" page.

/// The portal's view of whether the account currently holds a reservation
/// or an active rental. Derived fresh from every status check; never
/// asserted client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    /// Status paragraph present but unrecognized
    Unknown,
    /// No reservation and no active rental
    Neutral,
    /// A cycle is reserved and waiting
    Reserved,
    /// A rental is in progress
    InUse,
}

impl UserStatus {
    /// Classify the status paragraph's inner text.
    ///
    /// The paragraph is absent entirely when the account holds nothing,
    /// so `None` means neutral. Matching is a substring check on the
    /// trimmed text because the portal wraps the keywords in timestamps
    /// and markup.
    pub fn classify(fragment: Option<&str>) -> Self {
        let Some(text) = fragment else {
            return UserStatus::Neutral;
        };
        let text = text.trim();
        if text.contains("Reserved:") {
            UserStatus::Reserved
        } else if text.contains("In use:") {
            UserStatus::InUse
        } else {
            UserStatus::Unknown
        }
    }

    /// Whether the account currently holds a cycle (reserved or riding).
    pub fn holds_cycle(self) -> bool {
        matches!(self, UserStatus::Reserved | UserStatus::InUse)
    }
}
