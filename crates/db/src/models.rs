use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use spark_core::{
    keys::{ConfirmationKey, ReservationKey},
    models::{
        meeting::{ConfirmedMeeting, MeetingReservation},
        profile::{Profile, ProfileImage},
        team::Team,
        user::User,
    },
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: String,
    pub email: String,
    pub nickname: String,
    pub password_hash: String,
    pub friends: Vec<String>,
    pub blocked_users: Vec<String>,
    pub teams: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub major: String,
    pub student_id: String,
    pub image_url: String,
    pub is_introvert: bool,
    pub updated_at: DateTime<Utc>,
}

/// Raw image bytes stored under a `profiles/{user id}` path.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbProfileImage {
    pub path: String,
    pub user_id: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTeam {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub description: String,
    pub members: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: String,
    pub date: NaiveDate,
    pub team_id: Uuid,
    pub team_name: String,
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbConfirmedMeeting {
    pub id: String,
    pub meeting_date: NaiveDate,
    pub meeting_team_name: String,
    pub members: Vec<String>,
    pub team_name: String,
    pub user_id: String,
    pub comments: Vec<String>,
    pub confirmed_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            friends: user.friends,
            blocked_users: user.blocked_users,
            teams: user.teams,
            created_at: user.created_at,
        }
    }
}

impl From<DbProfileImage> for ProfileImage {
    fn from(image: DbProfileImage) -> Self {
        Self {
            content_type: image.content_type,
            data: image.data,
        }
    }
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            bio: profile.bio,
            major: profile.major,
            student_id: profile.student_id,
            image_url: profile.image_url,
            is_introvert: profile.is_introvert,
        }
    }
}

impl From<DbTeam> for Team {
    fn from(team: DbTeam) -> Self {
        Self {
            id: team.id,
            name: team.name,
            department: team.department,
            description: team.description,
            members: team.members,
            created_by: team.created_by,
            created_at: team.created_at,
        }
    }
}

impl From<DbReservation> for MeetingReservation {
    fn from(reservation: DbReservation) -> Self {
        Self {
            id: ReservationKey::from_raw(reservation.id),
            date: reservation.date,
            team_id: reservation.team_id,
            team_name: reservation.team_name,
            members: reservation.members,
            created_at: reservation.created_at,
        }
    }
}

impl From<DbConfirmedMeeting> for ConfirmedMeeting {
    fn from(meeting: DbConfirmedMeeting) -> Self {
        Self {
            id: ConfirmationKey::from_raw(meeting.id),
            meeting_date: meeting.meeting_date,
            meeting_team_name: meeting.meeting_team_name,
            members: meeting.members,
            team_name: meeting.team_name,
            user_id: meeting.user_id,
            comments: meeting.comments,
            confirmed_at: meeting.confirmed_at,
        }
    }
}
