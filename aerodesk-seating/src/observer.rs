use aerodesk_shared::AllocationEvent;
use tracing::{debug, info};

/// Hook for allocation progress. Implementations must not block.
pub trait AllocationObserver: Send + Sync {
    fn on_event(&self, event: &AllocationEvent);
}

/// Emits every allocation event as a structured log record.
pub struct TracingObserver;

impl AllocationObserver for TracingObserver {
    fn on_event(&self, event: &AllocationEvent) {
        match event {
            AllocationEvent::GroupSkipped(e) => info!(
                flight_id = e.flight_id,
                purchase_id = e.purchase_id,
                members = e.members,
                available_seats = e.available_seats,
                reason = ?e.reason,
                "Group left unassigned"
            ),
            AllocationEvent::GroupAssigned(e) => info!(
                flight_id = e.flight_id,
                purchase_id = e.purchase_id,
                priority = e.priority,
                seats = ?e.seat_ids,
                "Group seated"
            ),
            AllocationEvent::SeatClaimed(e) => debug!(
                flight_id = e.flight_id,
                boarding_pass_id = e.boarding_pass_id,
                seat = %e.seat_label,
                window = e.window,
                "Seat claimed"
            ),
        }
    }
}

pub struct NullObserver;

impl AllocationObserver for NullObserver {
    fn on_event(&self, _event: &AllocationEvent) {}
}
