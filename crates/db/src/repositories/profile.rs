use async_trait::async_trait;
use eyre::Result;

use super::{PgStore, ProfileRepository};
use crate::models::{DbProfile, DbProfileImage};

#[async_trait]
impl ProfileRepository for PgStore {
    async fn save_profile(&self, profile: &DbProfile) -> Result<()> {
        tracing::debug!("Saving profile: user_id={}", profile.user_id);

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, name, email, bio, major, student_id, image_url, is_introvert, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id)
            DO UPDATE SET name = $2, email = $3, bio = $4, major = $5, student_id = $6,
                          image_url = $7, is_introvert = $8, updated_at = $9
            "#,
        )
        .bind(&profile.user_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.bio)
        .bind(&profile.major)
        .bind(&profile.student_id)
        .bind(&profile.image_url)
        .bind(profile.is_introvert)
        .bind(profile.updated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<DbProfile>> {
        let profile = sqlx::query_as::<_, DbProfile>(
            r#"
            SELECT user_id, name, email, bio, major, student_id, image_url, is_introvert, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(profile)
    }

    async fn save_profile_image(&self, image: &DbProfileImage) -> Result<()> {
        tracing::debug!(
            "Saving profile image: path={}, bytes={}",
            image.path,
            image.data.len()
        );

        sqlx::query(
            r#"
            INSERT INTO profile_images (path, user_id, content_type, data, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (path)
            DO UPDATE SET user_id = $2, content_type = $3, data = $4, updated_at = $5
            "#,
        )
        .bind(&image.path)
        .bind(&image.user_id)
        .bind(&image.content_type)
        .bind(&image.data)
        .bind(image.updated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn get_profile_image(&self, path: &str) -> Result<Option<DbProfileImage>> {
        let image = sqlx::query_as::<_, DbProfileImage>(
            r#"
            SELECT path, user_id, content_type, data, updated_at
            FROM profile_images
            WHERE path = $1
            "#,
        )
        .bind(path)
        .fetch_optional(self.pool())
        .await?;

        Ok(image)
    }
}
