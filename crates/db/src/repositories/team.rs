use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use super::{PgStore, TeamRepository};
use crate::models::DbTeam;

#[async_trait]
impl TeamRepository for PgStore {
    async fn create_team(&self, team: &DbTeam) -> Result<()> {
        tracing::debug!(
            "Creating team: id={}, name={}, members={}",
            team.id, team.name, team.members.len()
        );

        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, name, department, description, members, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.department)
        .bind(&team.description)
        .bind(&team.members)
        .bind(&team.created_by)
        .bind(team.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET teams = array_append(teams, $2)
            WHERE id = $1 AND NOT ($2 = ANY(teams))
            "#,
        )
        .bind(&team.created_by)
        .bind(team.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn get_team(&self, id: Uuid) -> Result<Option<DbTeam>> {
        let team = sqlx::query_as::<_, DbTeam>(
            r#"
            SELECT id, name, department, description, members, created_by, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(team)
    }

    async fn list_teams_for_member(&self, user_id: &str) -> Result<Vec<DbTeam>> {
        let teams = sqlx::query_as::<_, DbTeam>(
            r#"
            SELECT id, name, department, description, members, created_by, created_at
            FROM teams
            WHERE $1 = ANY(members)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(teams)
    }

    async fn delete_team(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool().begin().await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(
            r#"
            DELETE FROM meeting_reservations
            WHERE team_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET teams = array_remove(teams, $1)
            WHERE $1 = ANY(teams)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(deleted == 1)
    }
}
