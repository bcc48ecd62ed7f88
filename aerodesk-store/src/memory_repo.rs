use aerodesk_core::{
    AirlineRepository, BatchOutcome, RepoResult, SaveOutcome, SeatAssignmentRepository, SeatClaim,
};
use aerodesk_shared::{Airplane, BoardingPass, Flight, Passenger, Purchase, Seat, SeatType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The full set of airline records, as stored in a JSON dataset file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirlineDataset {
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub airplanes: Vec<Airplane>,
    #[serde(default)]
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub seat_types: Vec<SeatType>,
    #[serde(default)]
    pub passengers: Vec<Passenger>,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
    #[serde(default)]
    pub boarding_passes: Vec<BoardingPass>,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Airline data held in process memory. Serves reads and conditional seat writes.
pub struct InMemoryAirlineStore {
    data: RwLock<AirlineDataset>,
}

impl InMemoryAirlineStore {
    pub fn new(dataset: AirlineDataset) -> Self {
        Self { data: RwLock::new(dataset) }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let dataset: AirlineDataset = serde_json::from_str(json)?;
        Ok(Self::new(dataset))
    }

    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_json_str(&raw)?;

        {
            let data = store.data.read().await;
            info!(
                path = %path.display(),
                flights = data.flights.len(),
                seats = data.seats.len(),
                boarding_passes = data.boarding_passes.len(),
                "Loaded airline dataset"
            );
        }
        Ok(store)
    }

    /// Copy of the current records.
    pub async fn snapshot(&self) -> AirlineDataset {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl AirlineRepository for InMemoryAirlineStore {
    async fn list_flights(&self) -> RepoResult<Vec<Flight>> {
        let data = self.data.read().await;
        let mut flights = data.flights.clone();
        flights.sort_by_key(|f| f.flight_id);
        Ok(flights)
    }

    async fn get_flight(&self, flight_id: i64) -> RepoResult<Option<Flight>> {
        let data = self.data.read().await;
        Ok(data.flights.iter().find(|f| f.flight_id == flight_id).cloned())
    }

    async fn list_airplanes(&self) -> RepoResult<Vec<Airplane>> {
        let data = self.data.read().await;
        let mut airplanes = data.airplanes.clone();
        airplanes.sort_by_key(|a| a.airplane_id);
        Ok(airplanes)
    }

    async fn get_airplane(&self, airplane_id: i64) -> RepoResult<Option<Airplane>> {
        let data = self.data.read().await;
        Ok(data.airplanes.iter().find(|a| a.airplane_id == airplane_id).cloned())
    }

    async fn list_seats(&self, airplane_id: i64) -> RepoResult<Vec<Seat>> {
        let data = self.data.read().await;
        let mut seats: Vec<Seat> = data
            .seats
            .iter()
            .filter(|s| s.airplane_id == airplane_id)
            .cloned()
            .collect();
        seats.sort_by_key(|s| s.seat_id);
        Ok(seats)
    }

    async fn list_all_seats(&self) -> RepoResult<Vec<Seat>> {
        let data = self.data.read().await;
        let mut seats = data.seats.clone();
        seats.sort_by_key(|s| s.seat_id);
        Ok(seats)
    }

    async fn get_seat(&self, seat_id: i64) -> RepoResult<Option<Seat>> {
        let data = self.data.read().await;
        Ok(data.seats.iter().find(|s| s.seat_id == seat_id).cloned())
    }

    async fn list_seat_types(&self) -> RepoResult<Vec<SeatType>> {
        let data = self.data.read().await;
        Ok(data.seat_types.clone())
    }

    async fn get_seat_type(&self, seat_type_id: i64) -> RepoResult<Option<SeatType>> {
        let data = self.data.read().await;
        Ok(data.seat_types.iter().find(|t| t.seat_type_id == seat_type_id).cloned())
    }

    async fn list_boarding_passes(&self, flight_id: i64) -> RepoResult<Vec<BoardingPass>> {
        let data = self.data.read().await;
        let mut passes: Vec<BoardingPass> = data
            .boarding_passes
            .iter()
            .filter(|p| p.flight_id == flight_id)
            .cloned()
            .collect();
        passes.sort_by_key(|p| p.boarding_pass_id);
        Ok(passes)
    }

    async fn list_all_boarding_passes(&self) -> RepoResult<Vec<BoardingPass>> {
        let data = self.data.read().await;
        let mut passes = data.boarding_passes.clone();
        passes.sort_by_key(|p| p.boarding_pass_id);
        Ok(passes)
    }

    async fn get_boarding_pass(&self, boarding_pass_id: i64) -> RepoResult<Option<BoardingPass>> {
        let data = self.data.read().await;
        Ok(data
            .boarding_passes
            .iter()
            .find(|p| p.boarding_pass_id == boarding_pass_id)
            .cloned())
    }

    async fn list_passengers(&self) -> RepoResult<Vec<Passenger>> {
        let data = self.data.read().await;
        let mut passengers = data.passengers.clone();
        passengers.sort_by_key(|p| p.passenger_id);
        Ok(passengers)
    }

    async fn get_passengers(&self, passenger_ids: &[i64]) -> RepoResult<Vec<Passenger>> {
        let data = self.data.read().await;
        Ok(data
            .passengers
            .iter()
            .filter(|p| passenger_ids.contains(&p.passenger_id))
            .cloned()
            .collect())
    }

    async fn get_passenger(&self, passenger_id: i64) -> RepoResult<Option<Passenger>> {
        let data = self.data.read().await;
        Ok(data.passengers.iter().find(|p| p.passenger_id == passenger_id).cloned())
    }

    async fn list_purchases(&self) -> RepoResult<Vec<Purchase>> {
        let data = self.data.read().await;
        let mut purchases = data.purchases.clone();
        purchases.sort_by_key(|p| p.purchase_id);
        Ok(purchases)
    }

    async fn get_purchase(&self, purchase_id: i64) -> RepoResult<Option<Purchase>> {
        let data = self.data.read().await;
        Ok(data.purchases.iter().find(|p| p.purchase_id == purchase_id).cloned())
    }
}

#[async_trait]
impl SeatAssignmentRepository for InMemoryAirlineStore {
    async fn save(&self, boarding_pass_id: i64, seat_id: i64) -> RepoResult<SaveOutcome> {
        let claim = SeatClaim { boarding_pass_id, seat_id };
        Ok(match self.save_all(&[claim]).await? {
            BatchOutcome::Conflict(_) => SaveOutcome::Conflict,
            _ => SaveOutcome::Saved,
        })
    }

    async fn save_all(&self, claims: &[SeatClaim]) -> RepoResult<BatchOutcome> {
        let mut data = self.data.write().await;

        // Check the whole batch before writing anything.
        let mut taken: HashSet<(i64, i64)> = data
            .boarding_passes
            .iter()
            .filter_map(|p| p.seat_id.map(|seat_id| (p.flight_id, seat_id)))
            .collect();
        let mut claimed: HashSet<i64> = HashSet::new();

        for claim in claims {
            let Some(pass) = data
                .boarding_passes
                .iter()
                .find(|p| p.boarding_pass_id == claim.boarding_pass_id)
            else {
                return Err(format!("Boarding pass {} not found", claim.boarding_pass_id).into());
            };

            let pass_seated = pass.is_seated() || !claimed.insert(claim.boarding_pass_id);
            let seat_taken = !taken.insert((pass.flight_id, claim.seat_id));
            if pass_seated || seat_taken {
                debug!(
                    boarding_pass_id = claim.boarding_pass_id,
                    seat_id = claim.seat_id,
                    pass_seated,
                    seat_taken,
                    "Seat assignment batch rejected"
                );
                return Ok(BatchOutcome::Conflict(*claim));
            }
        }

        for claim in claims {
            if let Some(pass) = data
                .boarding_passes
                .iter_mut()
                .find(|p| p.boarding_pass_id == claim.boarding_pass_id)
            {
                pass.seat_id = Some(claim.seat_id);
            }
        }
        Ok(BatchOutcome::Saved(claims.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"
    {
        "flights": [
            {
                "flight_id": 2,
                "takeoff_at": "2026-03-01T12:00:00Z",
                "takeoff_airport": "Lima, Perú",
                "landing_at": "2026-03-01T15:30:00Z",
                "landing_airport": "Santiago, Chile"
            },
            {
                "flight_id": 1,
                "takeoff_at": "2026-03-01T08:00:00Z",
                "takeoff_airport": "Buenos Aires, Argentina",
                "landing_at": "2026-03-01T10:00:00Z",
                "landing_airport": "Santiago, Chile",
                "airplane_id": 1
            }
        ],
        "airplanes": [{ "airplane_id": 1, "name": "AirNova-660" }],
        "seats": [
            {
                "seat_id": 2, "seat_row": 1, "seat_column": "B",
                "seat_type_id": 1, "airplane_id": 1
            },
            {
                "seat_id": 1, "seat_row": 1, "seat_column": "A",
                "seat_type_id": 1, "airplane_id": 1
            }
        ],
        "seat_types": [{ "seat_type_id": 1, "name": "Primera clase" }],
        "passengers": [
            { "passenger_id": 1, "dni": "11111111", "name": "Ana", "age": 40, "country": "Chile" },
            { "passenger_id": 2, "dni": "22222222", "name": "Luis", "country": "Perú" }
        ],
        "purchases": [{ "purchase_id": 10, "purchase_date": "2026-01-10T09:00:00Z" }],
        "boarding_passes": [
            {
                "boarding_pass_id": 2, "purchase_id": 10, "passenger_id": 2,
                "seat_type_id": 1, "flight_id": 1
            },
            {
                "boarding_pass_id": 1, "purchase_id": 10, "passenger_id": 1,
                "seat_type_id": 1, "flight_id": 1
            }
        ]
    }
    "#;

    fn store() -> InMemoryAirlineStore {
        InMemoryAirlineStore::from_json_str(DATASET).unwrap()
    }

    #[tokio::test]
    async fn test_reads_are_ordered_by_id() {
        let store = store();

        let flights = store.list_flights().await.unwrap();
        assert_eq!(flights.iter().map(|f| f.flight_id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(flights[1].airplane_id, None);

        let seats = store.list_seats(1).await.unwrap();
        assert_eq!(seats.iter().map(|s| s.seat_id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(store.list_seats(7).await.unwrap().is_empty());

        let passes = store.list_boarding_passes(1).await.unwrap();
        assert_eq!(passes.iter().map(|p| p.boarding_pass_id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = store();

        assert_eq!(store.get_passenger(2).await.unwrap().unwrap().age, None);
        assert!(store.get_passenger(3).await.unwrap().is_none());
        assert_eq!(store.get_purchase(10).await.unwrap().unwrap().purchase_id, 10);
        assert_eq!(store.get_seat_type(1).await.unwrap().unwrap().name, "Primera clase");
        assert_eq!(store.get_passengers(&[1, 2, 9]).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_claims_seat_once() {
        let store = store();

        assert_eq!(store.save(1, 1).await.unwrap(), SaveOutcome::Saved);
        assert_eq!(store.get_boarding_pass(1).await.unwrap().unwrap().seat_id, Some(1));

        // Seat already held by pass 1
        assert_eq!(store.save(2, 1).await.unwrap(), SaveOutcome::Conflict);
        // Pass 1 already seated
        assert_eq!(store.save(1, 2).await.unwrap(), SaveOutcome::Conflict);

        assert_eq!(store.save(2, 2).await.unwrap(), SaveOutcome::Saved);
        assert!(store.save(99, 2).await.is_err());
    }

    #[tokio::test]
    async fn test_save_all_writes_every_claim_or_none() {
        let store = store();
        let claim = |boarding_pass_id, seat_id| SeatClaim { boarding_pass_id, seat_id };

        // Second claim wants the seat the first one takes
        let outcome = store.save_all(&[claim(1, 1), claim(2, 1)]).await.unwrap();
        assert_eq!(outcome, BatchOutcome::Conflict(claim(2, 1)));
        assert_eq!(store.get_boarding_pass(1).await.unwrap().unwrap().seat_id, None);
        assert_eq!(store.get_boarding_pass(2).await.unwrap().unwrap().seat_id, None);

        // Unknown pass fails the whole batch
        assert!(store.save_all(&[claim(1, 1), claim(99, 2)]).await.is_err());
        assert_eq!(store.get_boarding_pass(1).await.unwrap().unwrap().seat_id, None);

        let outcome = store.save_all(&[claim(1, 1), claim(2, 2)]).await.unwrap();
        assert_eq!(outcome, BatchOutcome::Saved(2));
        assert_eq!(store.get_boarding_pass(2).await.unwrap().unwrap().seat_id, Some(2));

        // Already seated
        let outcome = store.save_all(&[claim(2, 1)]).await.unwrap();
        assert_eq!(outcome, BatchOutcome::Conflict(claim(2, 1)));
        assert_eq!(store.save_all(&[]).await.unwrap(), BatchOutcome::Saved(0));
    }

    #[tokio::test]
    async fn test_list_all_reads() {
        let store = store();

        let seats = store.list_all_seats().await.unwrap();
        assert_eq!(seats.iter().map(|s| s.seat_id).collect::<Vec<_>>(), vec![1, 2]);

        let passes = store.list_all_boarding_passes().await.unwrap();
        assert_eq!(passes.iter().map(|p| p.boarding_pass_id).collect::<Vec<_>>(), vec![1, 2]);

        let passengers = store.list_passengers().await.unwrap();
        assert_eq!(passengers.iter().map(|p| p.passenger_id).collect::<Vec<_>>(), vec![1, 2]);

        assert_eq!(store.list_purchases().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = InMemoryAirlineStore::from_json_file("does/not/exist.json")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = InMemoryAirlineStore::from_json_str("{ \"flights\": 3 }").err().unwrap();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
