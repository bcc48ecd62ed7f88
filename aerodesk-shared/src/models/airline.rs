use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled flight. `airplane_id` is the stored reference to the aircraft serving it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flight {
    pub flight_id: i64,
    pub takeoff_at: DateTime<Utc>,
    pub takeoff_airport: String,
    pub landing_at: DateTime<Utc>,
    pub landing_airport: String,
    #[serde(default)]
    pub airplane_id: Option<i64>,
}

/// An aircraft. The model name drives the cabin geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airplane {
    pub airplane_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub seat_id: i64,
    pub seat_row: i32,
    pub seat_column: String,
    pub seat_type_id: i64,
    pub airplane_id: i64,
}

impl Seat {
    /// Column as an upper-case letter, `None` when the stored column is blank.
    pub fn column_letter(&self) -> Option<char> {
        self.seat_column
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
    }

    /// Printable label such as `12C`.
    pub fn label(&self) -> String {
        format!("{}{}", self.seat_row, self.seat_column.trim().to_ascii_uppercase())
    }
}

/// Free-text cabin class label as stored by the airline ("Primera clase", "Economy Plus", ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatType {
    pub seat_type_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub passenger_id: i64,
    pub dni: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Purchase {
    pub purchase_id: i64,
    pub purchase_date: DateTime<Utc>,
}

/// One passenger's claim to travel on one flight under one purchase.
/// `seat_id` is `None` until a seat has been assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardingPass {
    pub boarding_pass_id: i64,
    pub purchase_id: i64,
    pub passenger_id: i64,
    pub seat_type_id: i64,
    #[serde(default)]
    pub seat_id: Option<i64>,
    pub flight_id: i64,
}

impl BoardingPass {
    pub fn is_seated(&self) -> bool {
        self.seat_id.is_some()
    }

    pub fn with_seat(&self, seat_id: i64) -> Self {
        Self {
            seat_id: Some(seat_id),
            ..self.clone()
        }
    }
}
