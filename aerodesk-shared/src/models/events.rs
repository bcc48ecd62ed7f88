use serde::{Deserialize, Serialize};

/// Why a purchase group was left without seats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    UnaccompaniedMinors,
    InsufficientSeats,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct GroupSkippedEvent {
    pub flight_id: i64,
    pub purchase_id: i64,
    pub members: usize,
    pub available_seats: usize,
    pub reason: SkipReason,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct GroupAssignedEvent {
    pub flight_id: i64,
    pub purchase_id: i64,
    pub priority: i32,
    pub seat_ids: Vec<i64>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct SeatClaimedEvent {
    pub flight_id: i64,
    pub boarding_pass_id: i64,
    pub seat_id: i64,
    pub seat_label: String,
    pub window: bool,
}

/// Events emitted while a check-in allocation runs.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AllocationEvent {
    GroupSkipped(GroupSkippedEvent),
    GroupAssigned(GroupAssignedEvent),
    SeatClaimed(SeatClaimedEvent),
}

impl AllocationEvent {
    pub fn flight_id(&self) -> i64 {
        match self {
            AllocationEvent::GroupSkipped(e) => e.flight_id,
            AllocationEvent::GroupAssigned(e) => e.flight_id,
            AllocationEvent::SeatClaimed(e) => e.flight_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_tagged() {
        let event = AllocationEvent::GroupSkipped(GroupSkippedEvent {
            flight_id: 1,
            purchase_id: 9,
            members: 1,
            available_seats: 30,
            reason: SkipReason::UnaccompaniedMinors,
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "group_skipped");
        assert_eq!(value["reason"], "UNACCOMPANIED_MINORS");
        assert_eq!(event.flight_id(), 1);
    }
}
