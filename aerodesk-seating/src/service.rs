use crate::config::SeatingConfig;
use crate::observer::{AllocationObserver, TracingObserver};
use crate::planner::{CheckInResult, FlightSnapshot, SeatPlanner};
use crate::resolver::AirplaneResolver;
use aerodesk_core::{
    AirlineRepository, BatchOutcome, CoreError, CoreResult, FlightLocks, SeatAssignmentRepository,
    SeatClaim,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs check-in simulations against the airline data store
pub struct CheckInService {
    repo: Arc<dyn AirlineRepository>,
    assignments: Arc<dyn SeatAssignmentRepository>,
    observer: Arc<dyn AllocationObserver>,
    planner: SeatPlanner,
    resolver: AirplaneResolver,
    locks: FlightLocks,
    max_claim_retries: u32,
}

impl CheckInService {
    pub fn new(
        repo: Arc<dyn AirlineRepository>,
        assignments: Arc<dyn SeatAssignmentRepository>,
        config: Arc<SeatingConfig>,
    ) -> Self {
        Self {
            repo,
            assignments,
            observer: Arc::new(TracingObserver),
            resolver: AirplaneResolver::new(config.resolver.clone()),
            planner: SeatPlanner::new(config),
            locks: FlightLocks::new(),
            max_claim_retries: 2,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn AllocationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_max_claim_retries(mut self, retries: u32) -> Self {
        self.max_claim_retries = retries;
        self
    }

    /// Compute seats for every unassigned boarding pass of `flight_id` and hand
    /// them to the assignment store.
    ///
    /// Runs for the same flight are serialized. The run's assignments are
    /// written as one batch, so a rejected run leaves nothing behind. On a
    /// conflict the flight is reloaded and planned again, up to
    /// `max_claim_retries` times.
    pub async fn simulate_check_in(&self, flight_id: i64) -> CoreResult<CheckInResult> {
        let _guard = self.locks.acquire(flight_id).await;
        let mut attempt = 0;

        loop {
            let snapshot = self.load_snapshot(flight_id).await?;
            let mut result = self.planner.plan(&snapshot, self.observer.as_ref());

            match self.persist(&result).await? {
                Ok(persisted) => {
                    result.persisted = persisted;
                    info!(
                        flight_id,
                        assigned = result.summary.assigned_seats,
                        unassigned = result.summary.unassigned_seats,
                        persisted,
                        "Check-in simulation completed"
                    );
                    return Ok(result);
                }
                Err(seat_id) if attempt < self.max_claim_retries => {
                    attempt += 1;
                    warn!(flight_id, seat_id, attempt, "Seat claimed concurrently, re-planning");
                }
                Err(seat_id) => return Err(CoreError::SeatConflict { flight_id, seat_id }),
            }
        }
    }

    /// Load every record one allocation needs.
    pub async fn load_snapshot(&self, flight_id: i64) -> CoreResult<FlightSnapshot> {
        let flight = self
            .repo
            .get_flight(flight_id)
            .await
            .map_err(CoreError::data_access)?
            .ok_or(CoreError::FlightNotFound(flight_id))?;

        let boarding_passes = self
            .repo
            .list_boarding_passes(flight_id)
            .await
            .map_err(CoreError::data_access)?;
        if boarding_passes.is_empty() {
            return Err(CoreError::NoBoardingPasses(flight_id));
        }

        let airplanes = self.repo.list_airplanes().await.map_err(CoreError::data_access)?;
        let resolved = self.resolver.resolve(&flight, &airplanes)?;

        let seats = self
            .repo
            .list_seats(resolved.airplane.airplane_id)
            .await
            .map_err(CoreError::data_access)?;
        let seat_types = self.repo.list_seat_types().await.map_err(CoreError::data_access)?;

        let passenger_ids: Vec<i64> = boarding_passes
            .iter()
            .map(|p| p.passenger_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let passengers = self
            .repo
            .get_passengers(&passenger_ids)
            .await
            .map_err(CoreError::data_access)?;

        Ok(FlightSnapshot {
            flight,
            airplane: resolved.airplane,
            airplane_source: resolved.source,
            seats,
            seat_types,
            boarding_passes,
            passengers,
        })
    }

    /// Save the run's assignments in one batch. The inner `Err` carries the rejected seat.
    async fn persist(&self, result: &CheckInResult) -> CoreResult<Result<usize, i64>> {
        if result.new_assignments.is_empty() {
            return Ok(Ok(0));
        }

        let claims: Vec<SeatClaim> = result
            .new_assignments
            .iter()
            .map(|a| SeatClaim {
                boarding_pass_id: a.boarding_pass_id,
                seat_id: a.seat_id,
            })
            .collect();

        let outcome = self
            .assignments
            .save_all(&claims)
            .await
            .map_err(CoreError::data_access)?;
        Ok(match outcome {
            BatchOutcome::Saved(count) => Ok(count),
            BatchOutcome::Skipped => Ok(0),
            BatchOutcome::Conflict(claim) => Err(claim.seat_id),
        })
    }
}
