use crate::grouping::GroupMember;
use crate::layout::seat_distance;
use crate::seat_class::SeatClass;
use aerodesk_shared::Seat;

/// A seat chosen for one boarding pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatPick {
    pub boarding_pass_id: i64,
    pub seat: Seat,
    pub seat_class: SeatClass,
    pub window: bool,
}

/// Place one group's members on `available` seats.
///
/// Minors go first, onto window seats in list order and then onto the rest.
/// Adults then take the remaining seats, nearest to an already placed minor
/// first. Members left over when seats run out get no pick.
pub fn select_seats<F>(
    members: &[GroupMember],
    available: &[&Seat],
    seat_class: SeatClass,
    is_window: F,
) -> Vec<SeatPick>
where
    F: Fn(&Seat) -> bool,
{
    let (minors, adults): (Vec<&GroupMember>, Vec<&GroupMember>) =
        members.iter().partition(|m| m.is_minor);
    let (windows, aisles): (Vec<&Seat>, Vec<&Seat>) =
        available.iter().copied().partition(|s| is_window(s));

    let mut picks = Vec::with_capacity(members.len());
    let mut windows = windows.into_iter();
    let mut aisles = aisles.into_iter();

    for minor in minors {
        let Some(seat) = windows.next().or_else(|| aisles.next()) else {
            break;
        };
        picks.push(pick(minor, seat, seat_class, &is_window));
    }

    let mut remaining: Vec<&Seat> = windows.chain(aisles).collect();
    if !picks.is_empty() {
        let placed: Vec<&Seat> = picks.iter().map(|p| &p.seat).collect();
        remaining.sort_by_key(|seat| {
            placed
                .iter()
                .map(|taken| seat_distance(seat, taken))
                .min()
                .unwrap_or(i32::MAX)
        });
    }

    for (adult, seat) in adults.into_iter().zip(remaining) {
        picks.push(pick(adult, seat, seat_class, &is_window));
    }

    picks
}

fn pick<F>(member: &GroupMember, seat: &Seat, seat_class: SeatClass, is_window: &F) -> SeatPick
where
    F: Fn(&Seat) -> bool,
{
    SeatPick {
        boarding_pass_id: member.boarding_pass_id,
        seat: seat.clone(),
        seat_class,
        window: is_window(seat),
    }
}
