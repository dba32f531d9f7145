use std::sync::Arc;

use chrono::Utc;
use spark_chat::ChatBridge;
use spark_core::{
    errors::{SparkError, SparkResult},
    keys::profile_image_path,
    models::{
        profile::{Profile, ProfileImage, SaveProfileRequest},
        user::{
            nickname_from_email, validate_email, LoginRequest, LoginResponse,
            RegisterUserRequest, RegisterUserResponse, User,
        },
    },
};
use spark_db::{
    models::{DbProfile, DbProfileImage, DbUser},
    repositories::{ProfileRepository, UserRepository},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::middleware::auth;

pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Stays below axum's default 2 MiB body limit so oversized uploads get a
/// validation error instead of a bare 413.
pub const MAX_PROFILE_IMAGE_BYTES: usize = 1024 * 1024;

/// Registration, login and profiles.
pub struct Accounts {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    chat: Arc<dyn ChatBridge>,
}

impl Accounts {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        chat: Arc<dyn ChatBridge>,
    ) -> Self {
        Self { users, profiles, chat }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> SparkResult<RegisterUserResponse> {
        let email = request.email.trim().to_lowercase();
        validate_email(&email)?;

        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SparkError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let user = DbUser {
            id: Uuid::new_v4().to_string(),
            nickname: nickname_from_email(&email),
            email,
            password_hash: auth::hash_password(&request.password)?,
            friends: vec![],
            blocked_users: vec![],
            teams: vec![],
            created_at: Utc::now(),
        };

        if !self.users.create_user(&user).await? {
            return Err(SparkError::Conflict(format!(
                "Email {} is already registered",
                user.email
            )));
        }
        info!("Registered user {}", user.id);

        // Chat registration is best-effort; the account is kept either way.
        if let Err(e) = self.chat.register_user(&user.id, &user.nickname).await {
            warn!("Failed to register user {} with chat service: {}", user.id, e);
        }

        Ok(RegisterUserResponse {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            created_at: user.created_at,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> SparkResult<LoginResponse> {
        let email = request.email.trim().to_lowercase();
        let invalid = || SparkError::Authentication("Invalid email or password".to_string());

        let user = self.users.get_user_by_email(&email).await?.ok_or_else(invalid)?;
        if !auth::verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }

        let has_profile = self.profiles.get_profile(&user.id).await?.is_some();

        Ok(LoginResponse {
            user_id: user.id,
            nickname: user.nickname,
            has_profile,
        })
    }

    /// The caller's own account record, without the password hash.
    pub async fn current_user(&self, user_id: &str) -> SparkResult<User> {
        self.users
            .get_user(user_id)
            .await?
            .map(User::from)
            .ok_or_else(|| SparkError::NotFound(format!("User with ID {} not found", user_id)))
    }

    pub async fn save_profile(&self, user_id: &str, request: SaveProfileRequest) -> SparkResult<Profile> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("User with ID {} not found", user_id)))?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(SparkError::Validation("Profile name must not be empty".to_string()));
        }

        let profile = DbProfile {
            user_id: user.id,
            name: name.to_string(),
            email: user.email,
            bio: request.bio.unwrap_or_default(),
            major: request.major.unwrap_or_default(),
            student_id: request.student_id.unwrap_or_default(),
            image_url: request.image_url.unwrap_or_default(),
            is_introvert: request.is_introvert,
            updated_at: Utc::now(),
        };
        self.profiles.save_profile(&profile).await?;

        Ok(profile.into())
    }

    pub async fn get_profile(&self, user_id: &str) -> SparkResult<Profile> {
        self.profiles
            .get_profile(user_id)
            .await?
            .map(Profile::from)
            .ok_or_else(|| SparkError::NotFound(format!("Profile for user {} not found", user_id)))
    }

    /// Stores the picture under `profiles/{user_id}` and points the
    /// profile's `image_url` at it. The profile must already exist.
    pub async fn upload_profile_image(
        &self,
        user_id: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> SparkResult<Profile> {
        if !content_type.starts_with("image/") {
            return Err(SparkError::Validation(format!(
                "Unsupported content type for profile image: {}",
                content_type
            )));
        }
        if data.is_empty() {
            return Err(SparkError::Validation("Profile image is empty".to_string()));
        }
        if data.len() > MAX_PROFILE_IMAGE_BYTES {
            return Err(SparkError::Validation(format!(
                "Profile image exceeds {} bytes",
                MAX_PROFILE_IMAGE_BYTES
            )));
        }

        let mut profile = self
            .profiles
            .get_profile(user_id)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("Profile for user {} not found", user_id)))?;

        let path = profile_image_path(user_id);
        let image = DbProfileImage {
            path: path.clone(),
            user_id: user_id.to_string(),
            content_type: content_type.to_string(),
            data,
            updated_at: Utc::now(),
        };
        self.profiles.save_profile_image(&image).await?;
        info!("Stored {} bytes at {}", image.data.len(), path);

        profile.image_url = format!("/api/images/{}", path);
        profile.updated_at = image.updated_at;
        self.profiles.save_profile(&profile).await?;

        Ok(profile.into())
    }

    pub async fn get_profile_image(&self, user_id: &str) -> SparkResult<ProfileImage> {
        let path = profile_image_path(user_id);
        self.profiles
            .get_profile_image(&path)
            .await?
            .map(ProfileImage::from)
            .ok_or_else(|| SparkError::NotFound(format!("No image stored at {}", path)))
    }
}
