use aerodesk_core::{
    AirlineRepository, BatchOutcome, RepoResult, SaveOutcome, SeatAssignmentRepository, SeatClaim,
};
use aerodesk_shared::{Airplane, BoardingPass, Flight, Passenger, Purchase, Seat, SeatType};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

// Ids are cast to BIGINT and times are stored as epoch seconds.

const FLIGHT_COLUMNS: &str = r#"
    flight_id::BIGINT AS flight_id,
    takeoff_date_time::BIGINT AS takeoff_date_time,
    takeoff_airport,
    landing_date_time::BIGINT AS landing_date_time,
    landing_airport,
    airplane_id::BIGINT AS airplane_id
"#;

const SEAT_COLUMNS: &str = r#"
    seat_id::BIGINT AS seat_id,
    seat_row::INT AS seat_row,
    seat_column,
    seat_type_id::BIGINT AS seat_type_id,
    airplane_id::BIGINT AS airplane_id
"#;

const BOARDING_PASS_COLUMNS: &str = r#"
    boarding_pass_id::BIGINT AS boarding_pass_id,
    purchase_id::BIGINT AS purchase_id,
    passenger_id::BIGINT AS passenger_id,
    seat_type_id::BIGINT AS seat_type_id,
    seat_id::BIGINT AS seat_id,
    flight_id::BIGINT AS flight_id
"#;

const PASSENGER_COLUMNS: &str = r#"
    passenger_id::BIGINT AS passenger_id,
    dni,
    name,
    age::INT AS age,
    country
"#;

const PURCHASE_COLUMNS: &str = r#"
    purchase_id::BIGINT AS purchase_id,
    purchase_date::BIGINT AS purchase_date
"#;

const CLAIM_SEAT: &str = r#"
    UPDATE boarding_pass
    SET seat_id = $2
    WHERE boarding_pass_id = $1
      AND seat_id IS NULL
      AND NOT EXISTS (
          SELECT 1 FROM boarding_pass other
          WHERE other.flight_id = boarding_pass.flight_id
            AND other.seat_id = $2
      )
"#;

fn from_epoch(column: &str, seconds: i64) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        sqlx::Error::Decode(format!("{column} out of range: {seconds} epoch seconds").into())
    })
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    flight_id: i64,
    takeoff_date_time: i64,
    takeoff_airport: String,
    landing_date_time: i64,
    landing_airport: String,
    airplane_id: Option<i64>,
}

impl TryFrom<FlightRow> for Flight {
    type Error = sqlx::Error;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        Ok(Flight {
            flight_id: row.flight_id,
            takeoff_at: from_epoch("takeoff_date_time", row.takeoff_date_time)?,
            takeoff_airport: row.takeoff_airport,
            landing_at: from_epoch("landing_date_time", row.landing_date_time)?,
            landing_airport: row.landing_airport,
            airplane_id: row.airplane_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AirplaneRow {
    airplane_id: i64,
    name: String,
}

impl From<AirplaneRow> for Airplane {
    fn from(row: AirplaneRow) -> Self {
        Airplane { airplane_id: row.airplane_id, name: row.name }
    }
}

#[derive(sqlx::FromRow)]
struct SeatRow {
    seat_id: i64,
    seat_row: i32,
    seat_column: String,
    seat_type_id: i64,
    airplane_id: i64,
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Seat {
            seat_id: row.seat_id,
            seat_row: row.seat_row,
            seat_column: row.seat_column,
            seat_type_id: row.seat_type_id,
            airplane_id: row.airplane_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SeatTypeRow {
    seat_type_id: i64,
    name: String,
}

impl From<SeatTypeRow> for SeatType {
    fn from(row: SeatTypeRow) -> Self {
        SeatType { seat_type_id: row.seat_type_id, name: row.name }
    }
}

#[derive(sqlx::FromRow)]
struct BoardingPassRow {
    boarding_pass_id: i64,
    purchase_id: i64,
    passenger_id: i64,
    seat_type_id: i64,
    seat_id: Option<i64>,
    flight_id: i64,
}

impl From<BoardingPassRow> for BoardingPass {
    fn from(row: BoardingPassRow) -> Self {
        BoardingPass {
            boarding_pass_id: row.boarding_pass_id,
            purchase_id: row.purchase_id,
            passenger_id: row.passenger_id,
            seat_type_id: row.seat_type_id,
            seat_id: row.seat_id,
            flight_id: row.flight_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    passenger_id: i64,
    dni: String,
    name: String,
    age: Option<i32>,
    country: String,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            passenger_id: row.passenger_id,
            dni: row.dni,
            name: row.name,
            age: row.age,
            country: row.country,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    purchase_id: i64,
    purchase_date: i64,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = sqlx::Error;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        Ok(Purchase {
            purchase_id: row.purchase_id,
            purchase_date: from_epoch("purchase_date", row.purchase_date)?,
        })
    }
}

pub struct PgAirlineRepository {
    pub pool: PgPool,
}

impl PgAirlineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AirlineRepository for PgAirlineRepository {
    async fn list_flights(&self) -> RepoResult<Vec<Flight>> {
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flight ORDER BY flight_id");
        let rows: Vec<FlightRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Flight::try_from).collect::<Result<_, _>>()?)
    }

    async fn get_flight(&self, flight_id: i64) -> RepoResult<Option<Flight>> {
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flight WHERE flight_id = $1");
        let row: Option<FlightRow> = sqlx::query_as(&sql)
            .bind(flight_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Flight::try_from).transpose()?)
    }

    async fn list_airplanes(&self) -> RepoResult<Vec<Airplane>> {
        let rows: Vec<AirplaneRow> = sqlx::query_as(
            "SELECT airplane_id::BIGINT AS airplane_id, name FROM airplane ORDER BY airplane_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Airplane::from).collect())
    }

    async fn get_airplane(&self, airplane_id: i64) -> RepoResult<Option<Airplane>> {
        let row: Option<AirplaneRow> = sqlx::query_as(
            "SELECT airplane_id::BIGINT AS airplane_id, name FROM airplane WHERE airplane_id = $1",
        )
        .bind(airplane_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Airplane::from))
    }

    async fn list_seats(&self, airplane_id: i64) -> RepoResult<Vec<Seat>> {
        let sql =
            format!("SELECT {SEAT_COLUMNS} FROM seat WHERE airplane_id = $1 ORDER BY seat_id");
        let rows: Vec<SeatRow> = sqlx::query_as(&sql)
            .bind(airplane_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Seat::from).collect())
    }

    async fn list_all_seats(&self) -> RepoResult<Vec<Seat>> {
        let sql = format!("SELECT {SEAT_COLUMNS} FROM seat ORDER BY seat_id");
        let rows: Vec<SeatRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Seat::from).collect())
    }

    async fn get_seat(&self, seat_id: i64) -> RepoResult<Option<Seat>> {
        let sql = format!("SELECT {SEAT_COLUMNS} FROM seat WHERE seat_id = $1");
        let row: Option<SeatRow> = sqlx::query_as(&sql)
            .bind(seat_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Seat::from))
    }

    async fn list_seat_types(&self) -> RepoResult<Vec<SeatType>> {
        let rows: Vec<SeatTypeRow> = sqlx::query_as(
            r#"
            SELECT seat_type_id::BIGINT AS seat_type_id, name
            FROM seat_type
            ORDER BY seat_type_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SeatType::from).collect())
    }

    async fn get_seat_type(&self, seat_type_id: i64) -> RepoResult<Option<SeatType>> {
        let row: Option<SeatTypeRow> = sqlx::query_as(
            r#"
            SELECT seat_type_id::BIGINT AS seat_type_id, name
            FROM seat_type
            WHERE seat_type_id = $1
            "#,
        )
        .bind(seat_type_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SeatType::from))
    }

    async fn list_boarding_passes(&self, flight_id: i64) -> RepoResult<Vec<BoardingPass>> {
        let sql = format!(
            "SELECT {BOARDING_PASS_COLUMNS} FROM boarding_pass \
             WHERE flight_id = $1 ORDER BY boarding_pass_id"
        );
        let rows: Vec<BoardingPassRow> = sqlx::query_as(&sql)
            .bind(flight_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BoardingPass::from).collect())
    }

    async fn list_all_boarding_passes(&self) -> RepoResult<Vec<BoardingPass>> {
        let sql =
            format!("SELECT {BOARDING_PASS_COLUMNS} FROM boarding_pass ORDER BY boarding_pass_id");
        let rows: Vec<BoardingPassRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(BoardingPass::from).collect())
    }

    async fn get_boarding_pass(
        &self,
        boarding_pass_id: i64,
    ) -> RepoResult<Option<BoardingPass>> {
        let sql = format!(
            "SELECT {BOARDING_PASS_COLUMNS} FROM boarding_pass WHERE boarding_pass_id = $1"
        );
        let row: Option<BoardingPassRow> = sqlx::query_as(&sql)
            .bind(boarding_pass_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(BoardingPass::from))
    }

    async fn list_passengers(&self) -> RepoResult<Vec<Passenger>> {
        let sql = format!("SELECT {PASSENGER_COLUMNS} FROM passenger ORDER BY passenger_id");
        let rows: Vec<PassengerRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn get_passengers(&self, passenger_ids: &[i64]) -> RepoResult<Vec<Passenger>> {
        let sql = format!(
            "SELECT {PASSENGER_COLUMNS} FROM passenger \
             WHERE passenger_id = ANY($1) ORDER BY passenger_id"
        );
        let rows: Vec<PassengerRow> = sqlx::query_as(&sql)
            .bind(passenger_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn get_passenger(&self, passenger_id: i64) -> RepoResult<Option<Passenger>> {
        let sql = format!("SELECT {PASSENGER_COLUMNS} FROM passenger WHERE passenger_id = $1");
        let row: Option<PassengerRow> = sqlx::query_as(&sql)
            .bind(passenger_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Passenger::from))
    }

    async fn list_purchases(&self) -> RepoResult<Vec<Purchase>> {
        let sql = format!("SELECT {PURCHASE_COLUMNS} FROM purchase ORDER BY purchase_id");
        let rows: Vec<PurchaseRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Purchase::try_from).collect::<Result<_, _>>()?)
    }

    async fn get_purchase(&self, purchase_id: i64) -> RepoResult<Option<Purchase>> {
        let sql = format!("SELECT {PURCHASE_COLUMNS} FROM purchase WHERE purchase_id = $1");
        let row: Option<PurchaseRow> = sqlx::query_as(&sql)
            .bind(purchase_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Purchase::try_from).transpose()?)
    }
}

/// Writes seat assignments with conditional updates inside one transaction.
///
/// A unique index on `boarding_pass (flight_id, seat_id)` closes the window
/// between the existence check and the write; a violation is reported as a conflict.
pub struct PgSeatAssignmentRepository {
    pub pool: PgPool,
}

impl PgSeatAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeatAssignmentRepository for PgSeatAssignmentRepository {
    async fn save(&self, boarding_pass_id: i64, seat_id: i64) -> RepoResult<SaveOutcome> {
        let claim = SeatClaim { boarding_pass_id, seat_id };
        Ok(match self.save_all(&[claim]).await? {
            BatchOutcome::Conflict(_) => SaveOutcome::Conflict,
            _ => SaveOutcome::Saved,
        })
    }

    async fn save_all(&self, claims: &[SeatClaim]) -> RepoResult<BatchOutcome> {
        let mut tx = self.pool.begin().await?;

        for claim in claims {
            let result = sqlx::query(CLAIM_SEAT)
                .bind(claim.boarding_pass_id)
                .bind(claim.seat_id)
                .execute(&mut *tx)
                .await;

            let rejected = match result {
                Ok(done) => done.rows_affected() != 1,
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => true,
                Err(e) => return Err(e.into()),
            };
            if rejected {
                // Dropping the transaction rolls back the claims already written.
                debug!(
                    boarding_pass_id = claim.boarding_pass_id,
                    seat_id = claim.seat_id,
                    "Seat assignment batch rejected, seat or pass already taken"
                );
                return Ok(BatchOutcome::Conflict(*claim));
            }
        }

        tx.commit().await?;
        Ok(BatchOutcome::Saved(claims.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_seconds_decode() {
        let flight = Flight::try_from(FlightRow {
            flight_id: 1,
            takeoff_date_time: 1_688_207_580,
            takeoff_airport: "Buenos Aires, Argentina".into(),
            landing_date_time: 1_688_221_980,
            landing_airport: "Santiago, Chile".into(),
            airplane_id: Some(1),
        })
        .unwrap();
        assert_eq!(flight.takeoff_at.timestamp(), 1_688_207_580);
        assert_eq!(flight.landing_at.timestamp(), 1_688_221_980);
    }

    #[test]
    fn test_out_of_range_epoch_is_decode_error() {
        let err = Purchase::try_from(PurchaseRow { purchase_id: 1, purchase_date: i64::MAX })
            .err()
            .unwrap();
        assert!(matches!(err, sqlx::Error::Decode(_)));
        assert!(err.to_string().contains("purchase_date"));

        let err = Flight::try_from(FlightRow {
            flight_id: 1,
            takeoff_date_time: 0,
            takeoff_airport: "Lima, Perú".into(),
            landing_date_time: i64::MIN,
            landing_airport: "Santiago, Chile".into(),
            airplane_id: None,
        })
        .err()
        .unwrap();
        assert!(matches!(err, sqlx::Error::Decode(_)));
    }
}
