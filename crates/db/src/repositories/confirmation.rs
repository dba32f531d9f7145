use async_trait::async_trait;
use eyre::Result;
use spark_core::keys::{ConfirmationKey, ReservationKey};
use uuid::Uuid;

use super::{ConfirmOutcome, ConfirmationRepository, PgStore};
use crate::models::DbConfirmedMeeting;

#[async_trait]
impl ConfirmationRepository for PgStore {
    async fn confirm_reservation(
        &self,
        reservation: &ReservationKey,
        reserving_team: Uuid,
        meeting: &DbConfirmedMeeting,
    ) -> Result<ConfirmOutcome> {
        let mut tx = self.pool().begin().await?;

        // Deleting first locks the reservation row, so two concurrent
        // confirmations cannot both see it.
        let deleted = sqlx::query(
            r#"
            DELETE FROM meeting_reservations
            WHERE id = $1 AND team_id = $2
            "#,
        )
        .bind(reservation.as_str())
        .bind(reserving_team)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(ConfirmOutcome::ReservationMissing);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO confirmed_meetings
                (id, meeting_date, meeting_team_name, members, team_name, user_id, comments, confirmed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&meeting.id)
        .bind(meeting.meeting_date)
        .bind(&meeting.meeting_team_name)
        .bind(&meeting.members)
        .bind(&meeting.team_name)
        .bind(&meeting.user_id)
        .bind(&meeting.comments)
        .bind(meeting.confirmed_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        tx.commit().await?;
        tracing::debug!(
            "Reservation {} confirmed as {}",
            reservation, meeting.id
        );

        Ok(ConfirmOutcome::Confirmed)
    }

    async fn get_confirmation(&self, key: &ConfirmationKey) -> Result<Option<DbConfirmedMeeting>> {
        let meeting = sqlx::query_as::<_, DbConfirmedMeeting>(
            r#"
            SELECT id, meeting_date, meeting_team_name, members, team_name, user_id, comments, confirmed_at
            FROM confirmed_meetings
            WHERE id = $1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(self.pool())
        .await?;

        Ok(meeting)
    }

    async fn list_confirmations_for_user(&self, user_id: &str) -> Result<Vec<DbConfirmedMeeting>> {
        let meetings = sqlx::query_as::<_, DbConfirmedMeeting>(
            r#"
            SELECT id, meeting_date, meeting_team_name, members, team_name, user_id, comments, confirmed_at
            FROM confirmed_meetings
            WHERE user_id = $1 OR $1 = ANY(members)
            ORDER BY meeting_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(meetings)
    }

    async fn append_comment(
        &self,
        key: &ConfirmationKey,
        comment: &str,
    ) -> Result<Option<Vec<String>>> {
        let comments = sqlx::query_scalar::<_, Vec<String>>(
            r#"
            UPDATE confirmed_meetings
            SET comments = array_append(comments, $2)
            WHERE id = $1
            RETURNING comments
            "#,
        )
        .bind(key.as_str())
        .bind(comment)
        .fetch_optional(self.pool())
        .await?;

        Ok(comments)
    }
}
