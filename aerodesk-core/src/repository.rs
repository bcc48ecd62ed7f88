use aerodesk_shared::{Airplane, BoardingPass, Flight, Passenger, Purchase, Seat, SeatType};
use async_trait::async_trait;
use serde::Serialize;

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

/// Read-only access to the airline records a check-in needs
#[async_trait]
pub trait AirlineRepository: Send + Sync {
    async fn list_flights(&self) -> RepoResult<Vec<Flight>>;

    async fn get_flight(&self, flight_id: i64) -> RepoResult<Option<Flight>>;

    async fn list_airplanes(&self) -> RepoResult<Vec<Airplane>>;

    async fn get_airplane(&self, airplane_id: i64) -> RepoResult<Option<Airplane>>;

    /// All seats installed on one airplane
    async fn list_seats(&self, airplane_id: i64) -> RepoResult<Vec<Seat>>;

    /// Seats of every airplane
    async fn list_all_seats(&self) -> RepoResult<Vec<Seat>>;

    async fn get_seat(&self, seat_id: i64) -> RepoResult<Option<Seat>>;

    async fn list_seat_types(&self) -> RepoResult<Vec<SeatType>>;

    async fn get_seat_type(&self, seat_type_id: i64) -> RepoResult<Option<SeatType>>;

    /// Every boarding pass issued for a flight, seated or not
    async fn list_boarding_passes(&self, flight_id: i64) -> RepoResult<Vec<BoardingPass>>;

    async fn list_all_boarding_passes(&self) -> RepoResult<Vec<BoardingPass>>;

    async fn get_boarding_pass(&self, boarding_pass_id: i64) -> RepoResult<Option<BoardingPass>>;

    async fn list_passengers(&self) -> RepoResult<Vec<Passenger>>;

    async fn get_passengers(&self, passenger_ids: &[i64]) -> RepoResult<Vec<Passenger>>;

    async fn get_passenger(&self, passenger_id: i64) -> RepoResult<Option<Passenger>>;

    async fn list_purchases(&self) -> RepoResult<Vec<Purchase>>;

    async fn get_purchase(&self, purchase_id: i64) -> RepoResult<Option<Purchase>>;
}

/// Result of trying to persist one seat assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveOutcome {
    Saved,
    /// The seat is already taken on this flight, or the pass already has a seat.
    Conflict,
    /// The store does not persist assignments.
    Skipped,
}

/// One seat to be written onto one boarding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatClaim {
    pub boarding_pass_id: i64,
    pub seat_id: i64,
}

/// Result of trying to persist a batch of seat assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchOutcome {
    /// Every claim was written.
    Saved(usize),
    /// Nothing was written; this claim was the first one rejected.
    Conflict(SeatClaim),
    Skipped,
}

/// Sink for newly computed seat assignments.
///
/// Implementations must only write when the boarding pass is still unseated and
/// the seat is still free on the pass's flight, reporting `Conflict` otherwise.
#[async_trait]
pub trait SeatAssignmentRepository: Send + Sync {
    async fn save(&self, boarding_pass_id: i64, seat_id: i64) -> RepoResult<SaveOutcome>;

    /// Write all claims or none of them.
    async fn save_all(&self, claims: &[SeatClaim]) -> RepoResult<BatchOutcome>;
}

/// Assignment store that keeps check-in a simulation
pub struct NoopSeatAssignmentRepository;

#[async_trait]
impl SeatAssignmentRepository for NoopSeatAssignmentRepository {
    async fn save(&self, boarding_pass_id: i64, seat_id: i64) -> RepoResult<SaveOutcome> {
        tracing::debug!(
            boarding_pass_id,
            seat_id,
            "Seat assignment not persisted (simulation mode)"
        );
        Ok(SaveOutcome::Skipped)
    }

    async fn save_all(&self, claims: &[SeatClaim]) -> RepoResult<BatchOutcome> {
        tracing::debug!(claims = claims.len(), "Seat assignments not persisted (simulation mode)");
        Ok(BatchOutcome::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_store_skips() {
        let store = NoopSeatAssignmentRepository;
        let outcome = store.save(1, 2).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Skipped);

        let claims = [SeatClaim { boarding_pass_id: 1, seat_id: 2 }];
        assert_eq!(store.save_all(&claims).await.unwrap(), BatchOutcome::Skipped);
    }
}
