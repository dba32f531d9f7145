//! Turns a pending reservation into a confirmed meeting and serves the
//! meeting board afterwards.
//!
//! A reservation only ever moves forward: `Reserved -> Confirmed`. The
//! move is a single repository call that deletes the reservation and
//! writes the confirmation together, so a reservation confirmed twice, or
//! confirmed while being cancelled, yields at most one meeting.

use std::sync::Arc;

use chrono::Utc;
use spark_chat::ChatBridge;
use spark_core::{
    errors::{SparkError, SparkResult},
    keys::{ConfirmationKey, ReservationKey},
    models::meeting::{ChatChannelResponse, CommentsResponse, ConfirmedMeeting},
};
use spark_db::{
    models::DbConfirmedMeeting,
    repositories::{
        ConfirmOutcome, ConfirmationRepository, ReservationRepository, TeamRepository,
    },
};
use tracing::{error, info, warn};
use uuid::Uuid;

pub const MAX_COMMENT_LENGTH: usize = 500;

pub struct MatchingConfirmer {
    reservations: Arc<dyn ReservationRepository>,
    confirmations: Arc<dyn ConfirmationRepository>,
    teams: Arc<dyn TeamRepository>,
    chat: Arc<dyn ChatBridge>,
}

impl MatchingConfirmer {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        confirmations: Arc<dyn ConfirmationRepository>,
        teams: Arc<dyn TeamRepository>,
        chat: Arc<dyn ChatBridge>,
    ) -> Self {
        Self {
            reservations,
            confirmations,
            teams,
            chat,
        }
    }

    pub async fn confirm(
        &self,
        user_id: &str,
        reservation_key: &ReservationKey,
        team_id: Uuid,
    ) -> SparkResult<ConfirmedMeeting> {
        let reservation = self
            .reservations
            .get_reservation(reservation_key)
            .await?
            .ok_or_else(|| {
                SparkError::NotFound(format!("Reservation {} not found", reservation_key))
            })?;

        let team = self
            .teams
            .get_team(team_id)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("Team with ID {} not found", team_id)))?;

        if !team.members.iter().any(|m| m == user_id) {
            return Err(SparkError::Authorization(format!(
                "User {} is not a member of team {}",
                user_id, team.name
            )));
        }
        if team.id == reservation.team_id || team.name == reservation.team_name {
            return Err(SparkError::Validation(
                "A team cannot confirm its own reservation".to_string(),
            ));
        }

        let key = ConfirmationKey::new(reservation.date, &reservation.team_name, &team.name);
        let reserving_team = reservation.team_id;
        let meeting = DbConfirmedMeeting {
            id: key.as_str().to_string(),
            meeting_date: reservation.date,
            meeting_team_name: reservation.team_name,
            members: reservation.members,
            team_name: team.name,
            user_id: user_id.to_string(),
            comments: vec![],
            confirmed_at: Utc::now(),
        };

        match self
            .confirmations
            .confirm_reservation(reservation_key, reserving_team, &meeting)
            .await
        {
            Ok(ConfirmOutcome::Confirmed) => {
                info!("Reservation {} confirmed as {} by {}", reservation_key, key, user_id);
                Ok(meeting.into())
            }
            Ok(ConfirmOutcome::ReservationMissing) => {
                warn!("Reservation {} disappeared before confirmation", reservation_key);
                Err(SparkError::NotFound(format!(
                    "Reservation {} not found",
                    reservation_key
                )))
            }
            Ok(ConfirmOutcome::AlreadyConfirmed) => {
                warn!("Meeting {} is already confirmed", key);
                Err(SparkError::Conflict(format!("Meeting {} is already confirmed", key)))
            }
            Err(e) => {
                error!("Failed to confirm reservation {}: {}", reservation_key, e);
                Err(e.into())
            }
        }
    }

    pub async fn list_confirmations(&self, user_id: &str) -> SparkResult<Vec<ConfirmedMeeting>> {
        let meetings = self.confirmations.list_confirmations_for_user(user_id).await?;
        Ok(meetings.into_iter().map(ConfirmedMeeting::from).collect())
    }

    /// Loads a confirmation the user takes part in.
    async fn participant_view(
        &self,
        user_id: &str,
        key: &ConfirmationKey,
    ) -> SparkResult<ConfirmedMeeting> {
        let meeting: ConfirmedMeeting = self
            .confirmations
            .get_confirmation(key)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("Confirmed meeting {} not found", key)))?
            .into();

        if !meeting.involves(user_id) {
            return Err(SparkError::Authorization(format!(
                "User {} is not part of meeting {}",
                user_id, key
            )));
        }

        Ok(meeting)
    }

    pub async fn add_comment(
        &self,
        user_id: &str,
        key: &ConfirmationKey,
        text: &str,
    ) -> SparkResult<CommentsResponse> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SparkError::Validation("Comment must not be empty".to_string()));
        }
        if text.chars().count() > MAX_COMMENT_LENGTH {
            return Err(SparkError::Validation(format!(
                "Comment must be at most {} characters",
                MAX_COMMENT_LENGTH
            )));
        }

        self.participant_view(user_id, key).await?;

        let comments = self
            .confirmations
            .append_comment(key, text)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("Confirmed meeting {} not found", key)))?;

        Ok(CommentsResponse {
            id: key.clone(),
            comments,
        })
    }

    pub async fn list_comments(
        &self,
        user_id: &str,
        key: &ConfirmationKey,
    ) -> SparkResult<CommentsResponse> {
        let meeting = self.participant_view(user_id, key).await?;

        Ok(CommentsResponse {
            id: meeting.id,
            comments: meeting.comments,
        })
    }

    /// Opens the participants' chat channel. Repeated calls reuse the same
    /// channel.
    pub async fn open_chat(
        &self,
        user_id: &str,
        key: &ConfirmationKey,
    ) -> SparkResult<ChatChannelResponse> {
        let meeting = self.participant_view(user_id, key).await?;
        let participants = meeting.participants();

        let channel = self
            .chat
            .create_channel(key.as_str(), &participants, true)
            .await
            .map_err(|e| {
                error!("Failed to open chat for meeting {}: {}", key, e);
                SparkError::Internal(e.into())
            })?;
        info!("Chat {} opened for meeting {}", channel.channel_url, key);

        Ok(ChatChannelResponse {
            channel_url: channel.channel_url,
            name: channel.name,
            member_ids: channel.member_ids,
        })
    }
}
