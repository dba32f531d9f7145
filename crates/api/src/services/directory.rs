use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use rand::seq::SliceRandom;
use spark_core::{
    errors::{SparkError, SparkResult},
    models::{
        team::{CreateTeamRequest, DeleteTeamResponse, Team},
        user::{
            AddFriendRequest, AddFriendResponse, BlockedUser, Friend, FriendsResponse,
            RecommendedUser,
        },
    },
};
use spark_db::{
    models::{DbProfile, DbTeam, DbUser},
    repositories::{ProfileRepository, TeamRepository, UserRepository},
};
use tracing::{info, warn};
use uuid::Uuid;

/// Friends, blocks and teams of a user.
pub struct Directory {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl Directory {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        teams: Arc<dyn TeamRepository>,
    ) -> Self {
        Self { users, profiles, teams }
    }

    async fn load_user(&self, id: &str) -> SparkResult<DbUser> {
        self.users
            .get_user(id)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("User with ID {} not found", id)))
    }

    /// Looks up the profiles of `ids` concurrently. Each entry is `None`
    /// when the profile is missing or its lookup failed.
    async fn gather_profiles(&self, ids: &[String]) -> Vec<Option<DbProfile>> {
        let lookups = ids.iter().map(|id| self.profiles.get_profile(id));

        join_all(lookups)
            .await
            .into_iter()
            .zip(ids)
            .map(|(result, id)| match result {
                Ok(profile) => profile,
                Err(e) => {
                    warn!("Profile lookup for {} failed: {}", id, e);
                    None
                }
            })
            .collect()
    }

    pub async fn fetch_friends(&self, user_id: &str) -> SparkResult<FriendsResponse> {
        let user = self.load_user(user_id).await?;
        let profiles = self.gather_profiles(&user.friends).await;

        let mut friends = Vec::with_capacity(user.friends.len());
        let mut unresolved = Vec::new();
        for (id, profile) in user.friends.into_iter().zip(profiles) {
            match profile {
                Some(profile) => friends.push(Friend {
                    id,
                    name: profile.name,
                    profile_image_url: Some(profile.image_url).filter(|url| !url.is_empty()),
                }),
                None => unresolved.push(id),
            }
        }

        if !unresolved.is_empty() {
            warn!("{} of {}'s friends could not be resolved", unresolved.len(), user_id);
        }

        Ok(FriendsResponse { friends, unresolved })
    }

    pub async fn add_friend(
        &self,
        user_id: &str,
        request: AddFriendRequest,
    ) -> SparkResult<AddFriendResponse> {
        let user = self.load_user(user_id).await?;

        let friend = match (request.friend_id, request.email) {
            (Some(friend_id), _) => self.load_user(&friend_id).await?,
            (None, Some(email)) => {
                let email = email.trim().to_lowercase();
                self.users
                    .get_user_by_email(&email)
                    .await?
                    .ok_or_else(|| SparkError::NotFound(format!("No user with email {}", email)))?
            }
            (None, None) => {
                return Err(SparkError::Validation(
                    "Either friend_id or email is required".to_string(),
                ));
            }
        };

        if friend.id == user.id {
            return Err(SparkError::Validation("You cannot add yourself as a friend".to_string()));
        }
        if user.blocked_users.contains(&friend.id) || friend.blocked_users.contains(&user.id) {
            return Err(SparkError::Validation(format!(
                "User {} is blocked",
                friend.id
            )));
        }

        let added = self.users.link_friends(&user.id, &friend.id).await?;
        if added {
            info!("{} and {} are now friends", user.id, friend.id);
        }

        Ok(AddFriendResponse {
            friend_id: friend.id,
            added,
        })
    }

    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> SparkResult<()> {
        self.load_user(user_id).await?;

        if !self.users.unlink_friends(user_id, friend_id).await? {
            return Err(SparkError::NotFound(format!(
                "User {} is not in the friend list",
                friend_id
            )));
        }

        Ok(())
    }

    /// Everyone who is not the user, a friend or blocked, in random order.
    pub async fn recommend_friends(&self, user_id: &str) -> SparkResult<Vec<RecommendedUser>> {
        let user = self.load_user(user_id).await?;

        let mut candidates: Vec<String> = self
            .users
            .list_user_ids()
            .await?
            .into_iter()
            .filter(|id| {
                *id != user.id && !user.friends.contains(id) && !user.blocked_users.contains(id)
            })
            .collect();
        candidates.shuffle(&mut rand::thread_rng());

        let profiles = self.gather_profiles(&candidates).await;

        Ok(candidates
            .into_iter()
            .zip(profiles)
            .map(|(id, profile)| {
                let profile = profile.unwrap_or_else(|| empty_profile(&id));
                RecommendedUser {
                    id,
                    name: profile.name,
                    major: profile.major,
                    image_url: profile.image_url,
                }
            })
            .collect())
    }

    pub async fn block_user(&self, user_id: &str, blocked_id: &str) -> SparkResult<bool> {
        if user_id == blocked_id {
            return Err(SparkError::Validation("You cannot block yourself".to_string()));
        }
        self.load_user(user_id).await?;
        self.load_user(blocked_id).await?;

        let blocked = self.users.add_blocked_user(user_id, blocked_id).await?;
        if blocked {
            info!("{} blocked {}", user_id, blocked_id);
        }

        Ok(blocked)
    }

    pub async fn unblock_user(&self, user_id: &str, blocked_id: &str) -> SparkResult<()> {
        self.load_user(user_id).await?;

        if !self.users.remove_blocked_user(user_id, blocked_id).await? {
            return Err(SparkError::NotFound(format!("User {} is not blocked", blocked_id)));
        }

        Ok(())
    }

    /// Blocked users with a profile; ids without one are left out.
    pub async fn list_blocked_users(&self, user_id: &str) -> SparkResult<Vec<BlockedUser>> {
        let user = self.load_user(user_id).await?;
        let profiles = self.gather_profiles(&user.blocked_users).await;

        Ok(user
            .blocked_users
            .into_iter()
            .zip(profiles)
            .filter_map(|(id, profile)| {
                profile.map(|p| BlockedUser {
                    id,
                    name: p.name,
                    email: p.email,
                })
            })
            .collect())
    }

    pub async fn create_team(&self, creator_id: &str, request: CreateTeamRequest) -> SparkResult<Team> {
        request.validate(creator_id)?;
        let creator = self.load_user(creator_id).await?;

        if let Some(stranger) = request
            .member_ids
            .iter()
            .find(|id| !creator.friends.contains(id))
        {
            return Err(SparkError::Validation(format!(
                "User {} is not in your friend list",
                stranger
            )));
        }

        let mut members = Vec::with_capacity(request.member_ids.len() + 1);
        members.push(creator.id.clone());
        members.extend(request.member_ids);

        let team = DbTeam {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            department: request.department,
            description: request.description,
            members,
            created_by: creator.id,
            created_at: Utc::now(),
        };
        self.teams.create_team(&team).await?;
        info!("Team {} ({}) created by {}", team.name, team.id, team.created_by);

        Ok(team.into())
    }

    pub async fn list_teams(&self, user_id: &str) -> SparkResult<Vec<Team>> {
        let teams = self.teams.list_teams_for_member(user_id).await?;
        Ok(teams.into_iter().map(Team::from).collect())
    }

    pub async fn delete_team(&self, user_id: &str, team_id: Uuid) -> SparkResult<DeleteTeamResponse> {
        let team = self
            .teams
            .get_team(team_id)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("Team with ID {} not found", team_id)))?;

        if !team.members.iter().any(|m| m == user_id) {
            return Err(SparkError::Authorization(
                "Only team members can delete a team".to_string(),
            ));
        }

        let deleted = self.teams.delete_team(team_id).await?;
        info!("Team {} deleted by {}", team_id, user_id);

        Ok(DeleteTeamResponse { id: team_id, deleted })
    }
}

fn empty_profile(user_id: &str) -> DbProfile {
    DbProfile {
        user_id: user_id.to_string(),
        name: String::new(),
        email: String::new(),
        bio: String::new(),
        major: String::new(),
        student_id: String::new(),
        image_url: String::new(),
        is_introvert: false,
        updated_at: Utc::now(),
    }
}
