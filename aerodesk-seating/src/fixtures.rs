use crate::observer::AllocationObserver;
use crate::planner::FlightSnapshot;
use crate::resolver::ResolutionSource;
use aerodesk_shared::{AllocationEvent, Airplane, BoardingPass, Flight, Passenger, Seat, SeatType};
use chrono::{TimeZone, Utc};
use std::sync::Mutex;

pub fn flight(flight_id: i64, airplane_id: Option<i64>) -> Flight {
    Flight {
        flight_id,
        takeoff_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        takeoff_airport: "Santiago".to_string(),
        landing_at: Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap(),
        landing_airport: "Lima".to_string(),
        airplane_id,
    }
}

pub fn seat(seat_id: i64, seat_row: i32, seat_column: &str, seat_type_id: i64) -> Seat {
    Seat {
        seat_id,
        seat_row,
        seat_column: seat_column.to_string(),
        seat_type_id,
        airplane_id: 1,
    }
}

pub fn seat_types() -> Vec<SeatType> {
    vec![
        SeatType { seat_type_id: 1, name: "Primera clase".to_string() },
        SeatType { seat_type_id: 2, name: "Clase económica premium".to_string() },
        SeatType { seat_type_id: 3, name: "Clase económica".to_string() },
    ]
}

pub fn passenger(passenger_id: i64, age: Option<i32>) -> Passenger {
    Passenger {
        passenger_id,
        dni: format!("{:08}", passenger_id),
        name: format!("Passenger {}", passenger_id),
        age,
        country: "Chile".to_string(),
    }
}

pub fn boarding_pass(
    boarding_pass_id: i64,
    purchase_id: i64,
    passenger_id: i64,
    seat_type_id: i64,
) -> BoardingPass {
    BoardingPass {
        boarding_pass_id,
        purchase_id,
        passenger_id,
        seat_type_id,
        seat_id: None,
        flight_id: 1,
    }
}

/// AirNova-660 with business rows 1-4 (ABEF) and economy rows 19-22 (ABCEFG), no premium seats.
pub fn airnova_seats() -> Vec<Seat> {
    let mut seats = Vec::new();
    let mut next_id = 1;
    for row in 1..=4 {
        for column in ["A", "B", "E", "F"] {
            seats.push(seat(next_id, row, column, 1));
            next_id += 1;
        }
    }
    for row in 19..=22 {
        for column in ["A", "B", "C", "E", "F", "G"] {
            seats.push(seat(next_id, row, column, 3));
            next_id += 1;
        }
    }
    seats
}

pub fn airnova_snapshot() -> FlightSnapshot {
    FlightSnapshot {
        flight: flight(1, Some(1)),
        airplane: Airplane { airplane_id: 1, name: "AirNova-660".to_string() },
        airplane_source: ResolutionSource::StoredReference,
        seats: airnova_seats(),
        seat_types: seat_types(),
        boarding_passes: Vec::new(),
        passengers: Vec::new(),
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<AllocationEvent>>,
}

impl RecordingObserver {
    fn collect<T>(&self, f: impl Fn(&AllocationEvent) -> Option<T>) -> Vec<T> {
        self.events.lock().unwrap().iter().filter_map(f).collect()
    }

    pub fn skipped(&self) -> Vec<i64> {
        self.collect(|e| match e {
            AllocationEvent::GroupSkipped(e) => Some(e.purchase_id),
            _ => None,
        })
    }

    pub fn assigned(&self) -> Vec<i64> {
        self.collect(|e| match e {
            AllocationEvent::GroupAssigned(e) => Some(e.purchase_id),
            _ => None,
        })
    }

    pub fn claimed(&self) -> Vec<i64> {
        self.collect(|e| match e {
            AllocationEvent::SeatClaimed(e) => Some(e.seat_id),
            _ => None,
        })
    }
}

impl AllocationObserver for RecordingObserver {
    fn on_event(&self, event: &AllocationEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
