use aerodesk_core::{AirlineRepository, NoopSeatAssignmentRepository, SeatAssignmentRepository};
use aerodesk_seating::{CheckInService, SeatingConfig};
use aerodesk_store::app_config::{Config, StorageBackend};
use aerodesk_store::{
    DbClient, InMemoryAirlineStore, PgAirlineRepository, PgSeatAssignmentRepository,
};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn AirlineRepository>,
    pub checkin: Arc<CheckInService>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn AirlineRepository>,
        assignments: Arc<dyn SeatAssignmentRepository>,
        seating: SeatingConfig,
        max_claim_retries: u32,
    ) -> Self {
        let checkin = CheckInService::new(repo.clone(), assignments, Arc::new(seating))
            .with_max_claim_retries(max_claim_retries);
        Self {
            repo,
            checkin: Arc::new(checkin),
        }
    }

    /// Wire the configured storage backend. With `persist_assignments` off the
    /// assignment store is a no-op and check-in only simulates.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let persist = config.checkin.persist_assignments;

        let (repo, assignments): (Arc<dyn AirlineRepository>, Arc<dyn SeatAssignmentRepository>) =
            match config.storage.backend {
                StorageBackend::Memory => {
                    let path = config
                        .storage
                        .dataset_path
                        .as_deref()
                        .context("storage.dataset_path is required for the memory backend")?;
                    let store = Arc::new(InMemoryAirlineStore::from_json_file(path).await?);
                    let assignments: Arc<dyn SeatAssignmentRepository> = if persist {
                        store.clone()
                    } else {
                        Arc::new(NoopSeatAssignmentRepository)
                    };
                    let repo: Arc<dyn AirlineRepository> = store;
                    (repo, assignments)
                }
                StorageBackend::Postgres => {
                    let url = config
                        .storage
                        .database_url
                        .as_deref()
                        .context("storage.database_url is required for the postgres backend")?;
                    let db = DbClient::new(url, config.storage.max_connections)
                        .await
                        .context("Failed to connect to Postgres")?;
                    let assignments: Arc<dyn SeatAssignmentRepository> = if persist {
                        Arc::new(PgSeatAssignmentRepository::new(db.pool.clone()))
                    } else {
                        Arc::new(NoopSeatAssignmentRepository)
                    };
                    let repo: Arc<dyn AirlineRepository> =
                        Arc::new(PgAirlineRepository::new(db.pool));
                    (repo, assignments)
                }
            };

        tracing::info!(
            backend = ?config.storage.backend,
            persist_assignments = persist,
            "Storage wired"
        );

        Ok(Self::new(
            repo,
            assignments,
            config.seating.clone(),
            config.checkin.max_claim_retries,
        ))
    }
}
