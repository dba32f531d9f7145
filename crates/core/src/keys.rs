//! Composite natural keys for meeting documents.
//!
//! Reservations and confirmations are never keyed by random ids. A
//! reservation lives under `{date}-{team}` and a confirmation under
//! `{date}-{reserving team}-{confirming team}`, with the date always
//! rendered as `YYYY-MM-DD`. Repositories only accept these types, so the
//! keying strategy cannot drift between call sites.
//!
//! Profile images are stored under `profiles/{user id}`, one per user.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Document id of a pending reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationKey(String);

impl ReservationKey {
    pub fn new(date: NaiveDate, team_name: &str) -> Self {
        Self(format!("{}-{}", date.format(DATE_FORMAT), team_name))
    }

    /// Wraps an id received from a client without re-deriving it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document id of a confirmed meeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationKey(String);

impl ConfirmationKey {
    pub fn new(date: NaiveDate, reserving_team: &str, confirming_team: &str) -> Self {
        Self(format!(
            "{}-{}-{}",
            date.format(DATE_FORMAT),
            reserving_team,
            confirming_team
        ))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage path of a user's profile image. A new upload replaces the old one.
pub fn profile_image_path(user_id: &str) -> String {
    format!("profiles/{}", user_id)
}
