use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub major: String,
    pub student_id: String,
    pub image_url: String,
    pub is_introvert: bool,
}

/// Body of a profile save. Absent fields are stored as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveProfileRequest {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_introvert: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProfileResponse {
    pub user_id: String,
    pub profile: Profile,
}

/// An uploaded profile picture as served back to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub content_type: String,
    pub data: Vec<u8>,
}
