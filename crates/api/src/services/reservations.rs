use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use spark_core::{
    errors::{SparkError, SparkResult},
    keys::ReservationKey,
    models::meeting::{CreateReservationRequest, CreateReservationResponse, MeetingReservation},
};
use spark_db::{
    models::DbReservation,
    repositories::{ReservationRepository, ReservationWrite, TeamRepository},
};
use tracing::{info, warn};

/// Pending meeting slots, one per team and date.
pub struct ReservationStore {
    reservations: Arc<dyn ReservationRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl ReservationStore {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        teams: Arc<dyn TeamRepository>,
    ) -> Self {
        Self { reservations, teams }
    }

    pub async fn create_reservation(
        &self,
        user_id: &str,
        request: CreateReservationRequest,
    ) -> SparkResult<CreateReservationResponse> {
        let team = self
            .teams
            .get_team(request.team_id)
            .await?
            .ok_or_else(|| {
                SparkError::NotFound(format!("Team with ID {} not found", request.team_id))
            })?;

        if !team.members.iter().any(|m| m == user_id) {
            return Err(SparkError::Authorization(format!(
                "User {} is not a member of team {}",
                user_id, team.name
            )));
        }

        let key = ReservationKey::new(request.date, &team.name);
        let reservation = DbReservation {
            id: key.as_str().to_string(),
            date: request.date,
            team_id: team.id,
            team_name: team.name,
            members: team.members,
            created_at: Utc::now(),
        };

        let replaced = match self.reservations.save_reservation(&reservation).await? {
            ReservationWrite::Created => {
                info!("Reservation {} created by {}", key, user_id);
                false
            }
            ReservationWrite::Replaced => {
                warn!("Reservation {} overwritten by {}", key, user_id);
                true
            }
            ReservationWrite::HeldByOtherTeam => {
                return Err(SparkError::Conflict(format!(
                    "Another team named {} already reserved {}",
                    reservation.team_name, reservation.date
                )));
            }
        };

        Ok(CreateReservationResponse {
            reservation: reservation.into(),
            replaced,
        })
    }

    pub async fn list_reservations(
        &self,
        date: Option<NaiveDate>,
    ) -> SparkResult<Vec<MeetingReservation>> {
        let reservations = self.reservations.list_reservations(date).await?;
        Ok(reservations.into_iter().map(MeetingReservation::from).collect())
    }

    pub async fn cancel_reservation(&self, user_id: &str, key: &ReservationKey) -> SparkResult<()> {
        let reservation = self
            .reservations
            .get_reservation(key)
            .await?
            .ok_or_else(|| SparkError::NotFound(format!("Reservation {} not found", key)))?;

        if !reservation.members.iter().any(|m| m == user_id) {
            return Err(SparkError::Authorization(
                "Only members of the reserving team can cancel".to_string(),
            ));
        }

        if !self.reservations.delete_reservation(key).await? {
            return Err(SparkError::NotFound(format!("Reservation {} not found", key)));
        }
        info!("Reservation {} cancelled by {}", key, user_id);

        Ok(())
    }
}
