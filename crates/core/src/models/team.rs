use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SparkError, SparkResult};

/// Friends a creator may pull into a team; the creator makes the fourth.
pub const MAX_INVITED_MEMBERS: usize = 3;

/// Longest team name in characters. Keys embed the name, so it stays well
/// inside the reservation and confirmation id columns.
pub const MAX_TEAM_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub description: String,
    pub members: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
}

impl CreateTeamRequest {
    /// Shape checks that need no store access. Friendship of the selected
    /// members is checked by the directory.
    pub fn validate(&self, creator_id: &str) -> SparkResult<()> {
        validate_team_name(&self.name)?;

        if self.member_ids.len() > MAX_INVITED_MEMBERS {
            return Err(SparkError::Validation(format!(
                "A team can include at most {} friends, got {}",
                MAX_INVITED_MEMBERS,
                self.member_ids.len()
            )));
        }

        if self.member_ids.iter().any(|id| id == creator_id) {
            return Err(SparkError::Validation(
                "The creator is added to the team automatically".to_string(),
            ));
        }

        let unique: HashSet<&String> = self.member_ids.iter().collect();
        if unique.len() != self.member_ids.len() {
            return Err(SparkError::Validation(
                "Team members must not repeat".to_string(),
            ));
        }

        Ok(())
    }
}

/// Team names end up inside document keys and URL path segments.
pub fn validate_team_name(name: &str) -> SparkResult<()> {
    if name.trim().is_empty() {
        return Err(SparkError::Validation("Team name must not be empty".to_string()));
    }
    if name.contains('/') {
        return Err(SparkError::Validation(
            "Team name must not contain '/'".to_string(),
        ));
    }
    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(SparkError::Validation(format!(
            "Team name must be at most {} characters",
            MAX_TEAM_NAME_LENGTH
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTeamResponse {
    pub id: Uuid,
    pub deleted: bool,
}
