use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::keys::{ConfirmationKey, ReservationKey};

/// A team's proposed meeting slot awaiting a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingReservation {
    pub id: ReservationKey,
    pub date: NaiveDate,
    pub team_id: Uuid,
    pub team_name: String,
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub team_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationResponse {
    pub reservation: MeetingReservation,
    /// An earlier reservation for the same team and date was overwritten.
    pub replaced: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmReservationRequest {
    /// The confirming user's own team.
    pub team_id: Uuid,
}

/// The finalized pairing of a reserving team and a confirming team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedMeeting {
    pub id: ConfirmationKey,
    pub meeting_date: NaiveDate,
    pub meeting_team_name: String,
    pub members: Vec<String>,
    pub team_name: String,
    pub user_id: String,
    pub comments: Vec<String>,
    pub confirmed_at: DateTime<Utc>,
}

impl ConfirmedMeeting {
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.members.iter().any(|m| m == user_id)
    }

    /// Everyone taking part: the reservation members plus the confirming user.
    pub fn participants(&self) -> Vec<String> {
        let mut participants = self.members.clone();
        if !participants.contains(&self.user_id) {
            participants.push(self.user_id.clone());
        }
        participants
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub id: ConfirmationKey,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChannelResponse {
    pub channel_url: String,
    pub name: String,
    pub member_ids: Vec<String>,
}
