//! In-memory store implementing every repository trait.
//!
//! One mutex guards all collections, so multi-document operations such as
//! [`ConfirmationRepository::confirm_reservation`] are atomic here the same
//! way they are inside a PostgreSQL transaction.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use spark_core::keys::{ConfirmationKey, ReservationKey};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    DbConfirmedMeeting, DbProfile, DbProfileImage, DbReservation, DbTeam, DbUser,
};
use crate::repositories::{
    ConfirmOutcome, ConfirmationRepository, ProfileRepository, ReservationRepository,
    ReservationWrite, TeamRepository, UserRepository,
};

#[derive(Debug, Default)]
struct Collections {
    users: BTreeMap<String, DbUser>,
    profiles: HashMap<String, DbProfile>,
    profile_images: HashMap<String, DbProfileImage>,
    teams: HashMap<Uuid, DbTeam>,
    reservations: BTreeMap<String, DbReservation>,
    confirmations: BTreeMap<String, DbConfirmedMeeting>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) -> bool {
    if list.contains(&item) {
        return false;
    }
    list.push(item);
    true
}

fn remove_all<T: PartialEq>(list: &mut Vec<T>, item: &T) -> bool {
    let before = list.len();
    list.retain(|v| v != item);
    list.len() != before
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &DbUser) -> Result<bool> {
        let mut guard = self.collections.lock().await;

        if guard.users.contains_key(&user.id) || guard.users.values().any(|u| u.email == user.email) {
            return Ok(false);
        }

        guard.users.insert(user.id.clone(), user.clone());
        Ok(true)
    }

    async fn get_user(&self, id: &str) -> Result<Option<DbUser>> {
        Ok(self.collections.lock().await.users.get(id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<DbUser>> {
        let guard = self.collections.lock().await;
        Ok(guard.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_user_ids(&self) -> Result<Vec<String>> {
        Ok(self.collections.lock().await.users.keys().cloned().collect())
    }

    async fn link_friends(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let mut guard = self.collections.lock().await;

        let added = match guard.users.get_mut(user_id) {
            Some(user) => push_unique(&mut user.friends, friend_id.to_string()),
            None => false,
        };
        if let Some(friend) = guard.users.get_mut(friend_id) {
            push_unique(&mut friend.friends, user_id.to_string());
        }

        Ok(added)
    }

    async fn unlink_friends(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let mut guard = self.collections.lock().await;

        let removed = match guard.users.get_mut(user_id) {
            Some(user) => remove_all(&mut user.friends, &friend_id.to_string()),
            None => false,
        };
        if let Some(friend) = guard.users.get_mut(friend_id) {
            remove_all(&mut friend.friends, &user_id.to_string());
        }

        Ok(removed)
    }

    async fn add_blocked_user(&self, user_id: &str, blocked_id: &str) -> Result<bool> {
        let mut guard = self.collections.lock().await;
        Ok(match guard.users.get_mut(user_id) {
            Some(user) => push_unique(&mut user.blocked_users, blocked_id.to_string()),
            None => false,
        })
    }

    async fn remove_blocked_user(&self, user_id: &str, blocked_id: &str) -> Result<bool> {
        let mut guard = self.collections.lock().await;
        Ok(match guard.users.get_mut(user_id) {
            Some(user) => remove_all(&mut user.blocked_users, &blocked_id.to_string()),
            None => false,
        })
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn save_profile(&self, profile: &DbProfile) -> Result<()> {
        let mut guard = self.collections.lock().await;
        guard.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<DbProfile>> {
        Ok(self.collections.lock().await.profiles.get(user_id).cloned())
    }

    async fn save_profile_image(&self, image: &DbProfileImage) -> Result<()> {
        let mut guard = self.collections.lock().await;
        guard.profile_images.insert(image.path.clone(), image.clone());
        Ok(())
    }

    async fn get_profile_image(&self, path: &str) -> Result<Option<DbProfileImage>> {
        Ok(self.collections.lock().await.profile_images.get(path).cloned())
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn create_team(&self, team: &DbTeam) -> Result<()> {
        let mut guard = self.collections.lock().await;

        if guard.teams.contains_key(&team.id) {
            return Err(eyre::eyre!("Team {} already exists", team.id));
        }

        guard.teams.insert(team.id, team.clone());
        if let Some(creator) = guard.users.get_mut(&team.created_by) {
            push_unique(&mut creator.teams, team.id);
        }

        Ok(())
    }

    async fn get_team(&self, id: Uuid) -> Result<Option<DbTeam>> {
        Ok(self.collections.lock().await.teams.get(&id).cloned())
    }

    async fn list_teams_for_member(&self, user_id: &str) -> Result<Vec<DbTeam>> {
        let guard = self.collections.lock().await;

        let mut teams: Vec<DbTeam> = guard
            .teams
            .values()
            .filter(|t| t.members.iter().any(|m| m == user_id))
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(teams)
    }

    async fn delete_team(&self, id: Uuid) -> Result<bool> {
        let mut guard = self.collections.lock().await;

        let deleted = guard.teams.remove(&id).is_some();
        guard.reservations.retain(|_, r| r.team_id != id);
        for user in guard.users.values_mut() {
            remove_all(&mut user.teams, &id);
        }

        Ok(deleted)
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn save_reservation(&self, reservation: &DbReservation) -> Result<ReservationWrite> {
        let mut guard = self.collections.lock().await;

        let outcome = match guard.reservations.get(&reservation.id) {
            Some(existing) if existing.team_id != reservation.team_id => {
                return Ok(ReservationWrite::HeldByOtherTeam);
            }
            Some(_) => ReservationWrite::Replaced,
            None => ReservationWrite::Created,
        };
        guard.reservations.insert(reservation.id.clone(), reservation.clone());

        Ok(outcome)
    }

    async fn get_reservation(&self, key: &ReservationKey) -> Result<Option<DbReservation>> {
        Ok(self.collections.lock().await.reservations.get(key.as_str()).cloned())
    }

    async fn list_reservations(&self, date: Option<NaiveDate>) -> Result<Vec<DbReservation>> {
        let guard = self.collections.lock().await;

        let mut reservations: Vec<DbReservation> = guard
            .reservations
            .values()
            .filter(|r| date.map(|d| r.date == d).unwrap_or(true))
            .cloned()
            .collect();
        reservations.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.team_name.cmp(&b.team_name)));

        Ok(reservations)
    }

    async fn delete_reservation(&self, key: &ReservationKey) -> Result<bool> {
        let mut guard = self.collections.lock().await;
        Ok(guard.reservations.remove(key.as_str()).is_some())
    }
}

#[async_trait]
impl ConfirmationRepository for MemoryStore {
    async fn confirm_reservation(
        &self,
        reservation: &ReservationKey,
        reserving_team: Uuid,
        meeting: &DbConfirmedMeeting,
    ) -> Result<ConfirmOutcome> {
        let mut guard = self.collections.lock().await;

        match guard.reservations.get(reservation.as_str()) {
            Some(pending) if pending.team_id == reserving_team => {}
            _ => return Ok(ConfirmOutcome::ReservationMissing),
        }
        if guard.confirmations.contains_key(&meeting.id) {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        guard.reservations.remove(reservation.as_str());
        guard.confirmations.insert(meeting.id.clone(), meeting.clone());

        Ok(ConfirmOutcome::Confirmed)
    }

    async fn get_confirmation(&self, key: &ConfirmationKey) -> Result<Option<DbConfirmedMeeting>> {
        Ok(self.collections.lock().await.confirmations.get(key.as_str()).cloned())
    }

    async fn list_confirmations_for_user(&self, user_id: &str) -> Result<Vec<DbConfirmedMeeting>> {
        let guard = self.collections.lock().await;

        let mut meetings: Vec<DbConfirmedMeeting> = guard
            .confirmations
            .values()
            .filter(|m| m.user_id == user_id || m.members.iter().any(|id| id == user_id))
            .cloned()
            .collect();
        meetings.sort_by(|a, b| a.meeting_date.cmp(&b.meeting_date).then_with(|| a.id.cmp(&b.id)));

        Ok(meetings)
    }

    async fn append_comment(
        &self,
        key: &ConfirmationKey,
        comment: &str,
    ) -> Result<Option<Vec<String>>> {
        let mut guard = self.collections.lock().await;
        Ok(guard.confirmations.get_mut(key.as_str()).map(|meeting| {
            meeting.comments.push(comment.to_string());
            meeting.comments.clone()
        }))
    }
}
