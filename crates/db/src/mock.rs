//! `mockall` doubles of the repository traits, for tests that need a
//! store to fail or to answer in a specific way.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use spark_core::keys::{ConfirmationKey, ReservationKey};
use uuid::Uuid;

use crate::models::{
    DbConfirmedMeeting, DbProfile, DbProfileImage, DbReservation, DbTeam, DbUser,
};
use crate::repositories::{
    ConfirmOutcome, ConfirmationRepository, ProfileRepository, ReservationRepository,
    ReservationWrite, TeamRepository, UserRepository,
};

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn create_user(&self, user: &DbUser) -> eyre::Result<bool>;
        async fn get_user(&self, id: &str) -> eyre::Result<Option<DbUser>>;
        async fn get_user_by_email(&self, email: &str) -> eyre::Result<Option<DbUser>>;
        async fn list_user_ids(&self) -> eyre::Result<Vec<String>>;
        async fn link_friends(&self, user_id: &str, friend_id: &str) -> eyre::Result<bool>;
        async fn unlink_friends(&self, user_id: &str, friend_id: &str) -> eyre::Result<bool>;
        async fn add_blocked_user(&self, user_id: &str, blocked_id: &str) -> eyre::Result<bool>;
        async fn remove_blocked_user(&self, user_id: &str, blocked_id: &str) -> eyre::Result<bool>;
    }
}

mock! {
    pub ProfileRepo {}

    #[async_trait]
    impl ProfileRepository for ProfileRepo {
        async fn save_profile(&self, profile: &DbProfile) -> eyre::Result<()>;
        async fn get_profile(&self, user_id: &str) -> eyre::Result<Option<DbProfile>>;
        async fn save_profile_image(&self, image: &DbProfileImage) -> eyre::Result<()>;
        async fn get_profile_image(&self, path: &str) -> eyre::Result<Option<DbProfileImage>>;
    }
}

mock! {
    pub TeamRepo {}

    #[async_trait]
    impl TeamRepository for TeamRepo {
        async fn create_team(&self, team: &DbTeam) -> eyre::Result<()>;
        async fn get_team(&self, id: Uuid) -> eyre::Result<Option<DbTeam>>;
        async fn list_teams_for_member(&self, user_id: &str) -> eyre::Result<Vec<DbTeam>>;
        async fn delete_team(&self, id: Uuid) -> eyre::Result<bool>;
    }
}

mock! {
    pub ReservationRepo {}

    #[async_trait]
    impl ReservationRepository for ReservationRepo {
        async fn save_reservation(&self, reservation: &DbReservation) -> eyre::Result<ReservationWrite>;
        async fn get_reservation(&self, key: &ReservationKey) -> eyre::Result<Option<DbReservation>>;
        async fn list_reservations(&self, date: Option<NaiveDate>) -> eyre::Result<Vec<DbReservation>>;
        async fn delete_reservation(&self, key: &ReservationKey) -> eyre::Result<bool>;
    }
}

mock! {
    pub ConfirmationRepo {}

    #[async_trait]
    impl ConfirmationRepository for ConfirmationRepo {
        async fn confirm_reservation(
            &self,
            reservation: &ReservationKey,
            reserving_team: Uuid,
            meeting: &DbConfirmedMeeting,
        ) -> eyre::Result<ConfirmOutcome>;
        async fn get_confirmation(&self, key: &ConfirmationKey) -> eyre::Result<Option<DbConfirmedMeeting>>;
        async fn list_confirmations_for_user(&self, user_id: &str) -> eyre::Result<Vec<DbConfirmedMeeting>>;
        async fn append_comment(
            &self,
            key: &ConfirmationKey,
            comment: &str,
        ) -> eyre::Result<Option<Vec<String>>>;
    }
}
