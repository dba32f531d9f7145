//! Repository traits over the document store and their PostgreSQL
//! implementations.
//!
//! Every service receives these as `Arc<dyn ...>` handles, so the same
//! service code runs against [`PgStore`], the in-memory store used by tests
//! and the mocks in [`crate::mock`].

pub mod confirmation;
pub mod profile;
pub mod reservation;
pub mod team;
pub mod user;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use spark_core::keys::{ConfirmationKey, ReservationKey};
use uuid::Uuid;

use crate::models::{
    DbConfirmedMeeting, DbProfile, DbProfileImage, DbReservation, DbTeam, DbUser,
};
use crate::DbPool;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `false` when the id or email is already taken.
    async fn create_user(&self, user: &DbUser) -> Result<bool>;

    async fn get_user(&self, id: &str) -> Result<Option<DbUser>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<DbUser>>;

    async fn list_user_ids(&self) -> Result<Vec<String>>;

    /// Adds each user to the other's friend list. Returns whether
    /// `user_id`'s list changed.
    async fn link_friends(&self, user_id: &str, friend_id: &str) -> Result<bool>;

    /// Removes each user from the other's friend list. Returns whether
    /// `user_id`'s list changed.
    async fn unlink_friends(&self, user_id: &str, friend_id: &str) -> Result<bool>;

    async fn add_blocked_user(&self, user_id: &str, blocked_id: &str) -> Result<bool>;

    async fn remove_blocked_user(&self, user_id: &str, blocked_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn save_profile(&self, profile: &DbProfile) -> Result<()>;

    async fn get_profile(&self, user_id: &str) -> Result<Option<DbProfile>>;

    /// Replaces whatever image is stored under `image.path`.
    async fn save_profile_image(&self, image: &DbProfileImage) -> Result<()>;

    async fn get_profile_image(&self, path: &str) -> Result<Option<DbProfileImage>>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores the team and records its id on the creator.
    async fn create_team(&self, team: &DbTeam) -> Result<()>;

    async fn get_team(&self, id: Uuid) -> Result<Option<DbTeam>>;

    async fn list_teams_for_member(&self, user_id: &str) -> Result<Vec<DbTeam>>;

    /// Deletes the team with its pending reservations and drops its id from
    /// every user. Returns `false` when the team did not exist.
    async fn delete_team(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Writes the reservation under its key. An existing reservation is
    /// only overwritten when it belongs to the same team.
    async fn save_reservation(&self, reservation: &DbReservation) -> Result<ReservationWrite>;

    async fn get_reservation(&self, key: &ReservationKey) -> Result<Option<DbReservation>>;

    /// All reservations, or only those on `date`, ordered by date then team.
    async fn list_reservations(&self, date: Option<NaiveDate>) -> Result<Vec<DbReservation>>;

    async fn delete_reservation(&self, key: &ReservationKey) -> Result<bool>;
}

/// Result of writing a reservation under its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationWrite {
    Created,
    /// The same team's earlier reservation for that date was overwritten.
    Replaced,
    /// A different team with the same name holds the key; nothing was
    /// written.
    HeldByOtherTeam,
}

/// Result of the atomic reservation-to-confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    /// The reservation was gone or now belongs to another team; nothing
    /// was written.
    ReservationMissing,
    /// A confirmation with the same key exists; nothing was written.
    AlreadyConfirmed,
}

#[async_trait]
pub trait ConfirmationRepository: Send + Sync {
    /// Inserts `meeting` and deletes the reservation under `reservation`
    /// as one unit. The reservation must still belong to `reserving_team`.
    async fn confirm_reservation(
        &self,
        reservation: &ReservationKey,
        reserving_team: Uuid,
        meeting: &DbConfirmedMeeting,
    ) -> Result<ConfirmOutcome>;

    async fn get_confirmation(&self, key: &ConfirmationKey) -> Result<Option<DbConfirmedMeeting>>;

    /// Confirmations where the user confirmed or is a reservation member.
    async fn list_confirmations_for_user(&self, user_id: &str) -> Result<Vec<DbConfirmedMeeting>>;

    /// Appends a comment and returns the full list, or `None` when the
    /// confirmation does not exist.
    async fn append_comment(
        &self,
        key: &ConfirmationKey,
        comment: &str,
    ) -> Result<Option<Vec<String>>>;
}

/// PostgreSQL-backed store implementing every repository trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
