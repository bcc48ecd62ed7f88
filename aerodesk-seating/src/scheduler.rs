use crate::grouping::PurchaseGroup;
use crate::layout::CabinLayout;
use crate::observer::AllocationObserver;
use crate::seat_class::SeatClass;
use crate::selector::{select_seats, SeatPick};
use aerodesk_shared::models::events::{
    AllocationEvent, GroupAssignedEvent, GroupSkippedEvent, SeatClaimedEvent,
};
use aerodesk_shared::{Seat, SkipReason};
use std::collections::HashSet;

/// A free seat together with its canonical class.
#[derive(Debug, Clone)]
pub struct ClassifiedSeat {
    pub seat: Seat,
    pub class: SeatClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSkip {
    pub purchase_id: i64,
    pub boarding_pass_ids: Vec<i64>,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct ScheduleOutcome {
    pub picks: Vec<SeatPick>,
    pub skipped: Vec<GroupSkip>,
}

/// Greedy, group-at-a-time seat allocation for one flight.
pub struct GroupScheduler<'a> {
    flight_id: i64,
    layout: &'a CabinLayout,
    observer: &'a dyn AllocationObserver,
}

impl<'a> GroupScheduler<'a> {
    pub fn new(
        flight_id: i64,
        layout: &'a CabinLayout,
        observer: &'a dyn AllocationObserver,
    ) -> Self {
        Self {
            flight_id,
            layout,
            observer,
        }
    }

    /// Highest priority first, smaller groups first on ties.
    pub fn order(groups: &mut [PurchaseGroup]) {
        groups.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.size().cmp(&b.size()))
                .then(a.purchase_id.cmp(&b.purchase_id))
        });
    }

    /// Visit every group once in priority order. A group is either seated as a
    /// whole or skipped; no seat is handed out twice within a run.
    pub fn run(
        &self,
        groups: &mut [PurchaseGroup],
        free_seats: &[ClassifiedSeat],
    ) -> ScheduleOutcome {
        Self::order(groups);

        let mut claimed: HashSet<i64> = HashSet::new();
        let mut outcome = ScheduleOutcome::default();

        for group in groups.iter() {
            if group.is_unaccompanied() {
                self.skip(&mut outcome, group, 0, SkipReason::UnaccompaniedMinors);
                continue;
            }

            let candidates: Vec<&Seat> = free_seats
                .iter()
                .filter(|s| s.class == group.seat_class)
                .filter(|s| !claimed.contains(&s.seat.seat_id))
                .filter(|s| self.layout.is_valid_seat(&s.seat))
                .map(|s| &s.seat)
                .collect();

            if candidates.len() < group.size() {
                self.skip(&mut outcome, group, candidates.len(), SkipReason::InsufficientSeats);
                continue;
            }

            let picks = select_seats(&group.members, &candidates, group.seat_class, |seat| {
                self.layout.is_window(seat, group.seat_class)
            });

            for pick in &picks {
                claimed.insert(pick.seat.seat_id);
                self.observer.on_event(&AllocationEvent::SeatClaimed(SeatClaimedEvent {
                    flight_id: self.flight_id,
                    boarding_pass_id: pick.boarding_pass_id,
                    seat_id: pick.seat.seat_id,
                    seat_label: pick.seat.label(),
                    window: pick.window,
                }));
            }

            self.observer.on_event(&AllocationEvent::GroupAssigned(GroupAssignedEvent {
                flight_id: self.flight_id,
                purchase_id: group.purchase_id,
                priority: group.priority,
                seat_ids: picks.iter().map(|p| p.seat.seat_id).collect(),
            }));

            outcome.picks.extend(picks);
        }

        outcome
    }

    fn skip(
        &self,
        outcome: &mut ScheduleOutcome,
        group: &PurchaseGroup,
        available: usize,
        reason: SkipReason,
    ) {
        self.observer.on_event(&AllocationEvent::GroupSkipped(GroupSkippedEvent {
            flight_id: self.flight_id,
            purchase_id: group.purchase_id,
            members: group.size(),
            available_seats: available,
            reason,
        }));
        outcome.skipped.push(GroupSkip {
            purchase_id: group.purchase_id,
            boarding_pass_ids: group.members.iter().map(|m| m.boarding_pass_id).collect(),
            reason,
        });
    }
}
