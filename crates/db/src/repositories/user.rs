use async_trait::async_trait;
use eyre::Result;

use super::{PgStore, UserRepository};
use crate::models::DbUser;

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, user: &DbUser) -> Result<bool> {
        tracing::debug!("Creating user: id={}, email={}", user.id, user.email);

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, nickname, password_hash, friends, blocked_users, teams, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.nickname)
        .bind(&user.password_hash)
        .bind(&user.friends)
        .bind(&user.blocked_users)
        .bind(&user.teams)
        .bind(user.created_at)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_user(&self, id: &str) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, email, nickname, password_hash, friends, blocked_users, teams, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, email, nickname, password_hash, friends, blocked_users, teams, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn list_user_ids(&self) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT id FROM users ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(ids)
    }

    async fn link_friends(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let mut tx = self.pool().begin().await?;

        let added = sqlx::query(
            r#"
            UPDATE users
            SET friends = array_append(friends, $2)
            WHERE id = $1 AND NOT ($2 = ANY(friends))
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(
            r#"
            UPDATE users
            SET friends = array_append(friends, $2)
            WHERE id = $1 AND NOT ($2 = ANY(friends))
            "#,
        )
        .bind(friend_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(added == 1)
    }

    async fn unlink_friends(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let mut tx = self.pool().begin().await?;

        let removed = sqlx::query(
            r#"
            UPDATE users
            SET friends = array_remove(friends, $2)
            WHERE id = $1 AND $2 = ANY(friends)
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(
            r#"
            UPDATE users
            SET friends = array_remove(friends, $2)
            WHERE id = $1
            "#,
        )
        .bind(friend_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(removed == 1)
    }

    async fn add_blocked_user(&self, user_id: &str, blocked_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET blocked_users = array_append(blocked_users, $2)
            WHERE id = $1 AND NOT ($2 = ANY(blocked_users))
            "#,
        )
        .bind(user_id)
        .bind(blocked_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_blocked_user(&self, user_id: &str, blocked_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET blocked_users = array_remove(blocked_users, $2)
            WHERE id = $1 AND $2 = ANY(blocked_users)
            "#,
        )
        .bind(user_id)
        .bind(blocked_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
