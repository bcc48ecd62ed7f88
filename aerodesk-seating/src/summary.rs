use crate::grouping::PurchaseGroup;
use crate::selector::SeatPick;
use serde::{Deserialize, Serialize};

/// Aggregate counts for one check-in run.
///
/// `business_assigned` includes economy-premium seats; the split is for
/// reporting only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckInSummary {
    pub total_passengers: usize,
    pub assigned_seats: usize,
    pub unassigned_seats: usize,
    pub groups_processed: usize,
    pub minors_with_family: usize,
    pub business_assigned: usize,
    pub economy_assigned: usize,
    pub previously_seated: usize,
}

impl CheckInSummary {
    pub fn compose(groups: &[PurchaseGroup], picks: &[SeatPick], previously_seated: usize) -> Self {
        let total_passengers: usize = groups.iter().map(PurchaseGroup::size).sum();
        let assigned_seats = picks.len();
        let business_assigned = picks
            .iter()
            .filter(|p| p.seat_class.is_business_bucket())
            .count();

        Self {
            total_passengers,
            assigned_seats,
            unassigned_seats: total_passengers.saturating_sub(assigned_seats),
            groups_processed: groups.len(),
            minors_with_family: groups
                .iter()
                .filter(|g| g.is_family())
                .map(PurchaseGroup::minor_count)
                .sum(),
            business_assigned,
            economy_assigned: assigned_seats - business_assigned,
            previously_seated,
        }
    }
}
