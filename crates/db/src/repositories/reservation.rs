use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use spark_core::keys::ReservationKey;

use super::{PgStore, ReservationRepository, ReservationWrite};
use crate::models::DbReservation;

#[async_trait]
impl ReservationRepository for PgStore {
    async fn save_reservation(&self, reservation: &DbReservation) -> Result<ReservationWrite> {
        tracing::debug!("Saving reservation: id={}", reservation.id);

        // xmax is zero only for freshly inserted rows. A row held by another
        // team is left alone and returns nothing.
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO meeting_reservations (id, date, team_id, team_name, members, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id)
            DO UPDATE SET date = $2, team_name = $4, members = $5, created_at = $6
            WHERE meeting_reservations.team_id = EXCLUDED.team_id
            RETURNING (xmax = 0)
            "#,
        )
        .bind(&reservation.id)
        .bind(reservation.date)
        .bind(reservation.team_id)
        .bind(&reservation.team_name)
        .bind(&reservation.members)
        .bind(reservation.created_at)
        .fetch_optional(self.pool())
        .await?;

        Ok(match inserted {
            None => ReservationWrite::HeldByOtherTeam,
            Some(true) => ReservationWrite::Created,
            Some(false) => ReservationWrite::Replaced,
        })
    }

    async fn get_reservation(&self, key: &ReservationKey) -> Result<Option<DbReservation>> {
        let reservation = sqlx::query_as::<_, DbReservation>(
            r#"
            SELECT id, date, team_id, team_name, members, created_at
            FROM meeting_reservations
            WHERE id = $1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(self.pool())
        .await?;

        Ok(reservation)
    }

    async fn list_reservations(&self, date: Option<NaiveDate>) -> Result<Vec<DbReservation>> {
        let reservations = sqlx::query_as::<_, DbReservation>(
            r#"
            SELECT id, date, team_id, team_name, members, created_at
            FROM meeting_reservations
            WHERE $1::DATE IS NULL OR date = $1
            ORDER BY date ASC, team_name ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.pool())
        .await?;

        Ok(reservations)
    }

    async fn delete_reservation(&self, key: &ReservationKey) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM meeting_reservations
            WHERE id = $1
            "#,
        )
        .bind(key.as_str())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
