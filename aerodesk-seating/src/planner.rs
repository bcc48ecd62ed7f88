use crate::config::SeatingConfig;
use crate::grouping::GroupingEngine;
use crate::observer::AllocationObserver;
use crate::resolver::ResolutionSource;
use crate::scheduler::{ClassifiedSeat, GroupScheduler};
use crate::summary::CheckInSummary;
use aerodesk_shared::{Airplane, BoardingPass, Flight, Passenger, Seat, SeatType, SkipReason};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Everything one allocation reads, loaded before planning starts.
#[derive(Debug, Clone)]
pub struct FlightSnapshot {
    pub flight: Flight,
    pub airplane: Airplane,
    pub airplane_source: ResolutionSource,
    /// Seats installed on `airplane`.
    pub seats: Vec<Seat>,
    pub seat_types: Vec<SeatType>,
    pub boarding_passes: Vec<BoardingPass>,
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatAssignment {
    pub boarding_pass_id: i64,
    pub seat_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedGroup {
    pub purchase_id: i64,
    pub boarding_pass_ids: Vec<i64>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInResult {
    pub flight: Flight,
    pub airplane: Airplane,
    pub airplane_source: ResolutionSource,
    /// Seated passes after this run, previously seated ones included, by boarding pass id.
    pub boarding_passes: Vec<BoardingPass>,
    /// Seats computed by this run.
    pub new_assignments: Vec<SeatAssignment>,
    pub skipped_groups: Vec<SkippedGroup>,
    pub summary: CheckInSummary,
    /// Assignments the assignment store accepted.
    #[serde(default)]
    pub persisted: usize,
}

/// Pure seat allocation over a snapshot. Same snapshot, same result.
#[derive(Clone)]
pub struct SeatPlanner {
    config: Arc<SeatingConfig>,
}

impl SeatPlanner {
    pub fn new(config: Arc<SeatingConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeatingConfig {
        &self.config
    }

    pub fn plan(
        &self,
        snapshot: &FlightSnapshot,
        observer: &dyn AllocationObserver,
    ) -> CheckInResult {
        let flight_id = snapshot.flight.flight_id;
        let labels: HashMap<i64, &str> = snapshot
            .seat_types
            .iter()
            .map(|t| (t.seat_type_id, t.name.as_str()))
            .collect();
        let passengers: HashMap<i64, &Passenger> = snapshot
            .passengers
            .iter()
            .map(|p| (p.passenger_id, p))
            .collect();

        let mut passes = snapshot.boarding_passes.clone();
        passes.sort_by_key(|p| p.boarding_pass_id);

        let occupied: HashSet<i64> = passes.iter().filter_map(|p| p.seat_id).collect();
        let previously_seated = passes.iter().filter(|p| p.is_seated()).count();

        let mut free_seats: Vec<ClassifiedSeat> = snapshot
            .seats
            .iter()
            .filter(|s| s.airplane_id == snapshot.airplane.airplane_id)
            .filter(|s| !occupied.contains(&s.seat_id))
            .map(|s| ClassifiedSeat {
                seat: s.clone(),
                class: self
                    .config
                    .classes
                    .normalize(labels.get(&s.seat_type_id).copied().unwrap_or_default()),
            })
            .collect();
        free_seats.sort_by_key(|s| s.seat.seat_id);

        let engine = GroupingEngine {
            classes: &self.config.classes,
            ages: &self.config.ages,
            weights: &self.config.priorities,
        };
        let mut groups = engine.group(&passes, &passengers, &labels);

        let layout = self.config.layouts.layout_for(&snapshot.airplane.name);
        let outcome =
            GroupScheduler::new(flight_id, &layout, observer).run(&mut groups, &free_seats);

        let picked: HashMap<i64, i64> = outcome
            .picks
            .iter()
            .map(|p| (p.boarding_pass_id, p.seat.seat_id))
            .collect();

        let boarding_passes: Vec<BoardingPass> = passes
            .iter()
            .filter_map(|pass| match (pass.seat_id, picked.get(&pass.boarding_pass_id)) {
                (Some(_), _) => Some(pass.clone()),
                (None, Some(seat_id)) => Some(pass.with_seat(*seat_id)),
                (None, None) => None,
            })
            .collect();

        let summary = CheckInSummary::compose(&groups, &outcome.picks, previously_seated);

        CheckInResult {
            flight: snapshot.flight.clone(),
            airplane: snapshot.airplane.clone(),
            airplane_source: snapshot.airplane_source,
            boarding_passes,
            new_assignments: outcome
                .picks
                .iter()
                .map(|p| SeatAssignment {
                    boarding_pass_id: p.boarding_pass_id,
                    seat_id: p.seat.seat_id,
                })
                .collect(),
            skipped_groups: outcome
                .skipped
                .into_iter()
                .map(|s| SkippedGroup {
                    purchase_id: s.purchase_id,
                    boarding_pass_ids: s.boarding_pass_ids,
                    reason: s.reason,
                })
                .collect(),
            summary,
            persisted: 0,
        }
    }
}

impl Default for SeatPlanner {
    fn default() -> Self {
        Self::new(Arc::new(SeatingConfig::default()))
    }
}
