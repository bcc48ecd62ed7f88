pub mod locks;
pub mod repository;

pub use locks::{FlightGuard, FlightLocks};
pub use repository::{
    AirlineRepository, BatchOutcome, NoopSeatAssignmentRepository, RepoError, RepoResult,
    SaveOutcome, SeatAssignmentRepository, SeatClaim,
};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Flight {0} not found")]
    FlightNotFound(i64),
    #[error("Flight {0} has no boarding passes")]
    NoBoardingPasses(i64),
    #[error("No airplane could be resolved for flight {0}")]
    AirplaneNotFound(i64),
    #[error("Seat {seat_id} on flight {flight_id} was claimed by another check-in")]
    SeatConflict { flight_id: i64, seat_id: i64 },
    #[error("Data access failed: {0}")]
    DataAccess(String),
}

impl CoreError {
    pub fn data_access(err: RepoError) -> Self {
        CoreError::DataAccess(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::FlightNotFound(_)
                | CoreError::NoBoardingPasses(_)
                | CoreError::AirplaneNotFound(_)
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(CoreError::FlightNotFound(1).is_not_found());
        assert!(CoreError::NoBoardingPasses(1).is_not_found());
        assert!(CoreError::AirplaneNotFound(1).is_not_found());
        assert!(!CoreError::SeatConflict { flight_id: 1, seat_id: 4 }.is_not_found());
        assert!(!CoreError::DataAccess("boom".into()).is_not_found());
    }
}
