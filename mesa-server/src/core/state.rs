use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::auth::JwtService;
use crate::booking::{AvailabilityResolver, ReservationService};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{ReservationRepository, TableRepository};
use crate::utils::AppError;

/// Server state, cloned into every request handler
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | db | embedded SurrealDB handle |
/// | jwt_service | bearer token validation |
/// | booking_lock | serializes slot check-and-insert |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// One lock for all bookings. Contention is bounded by booking
    /// traffic, which is tiny next to reads.
    pub booking_lock: Arc<Mutex<()>>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
            booking_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Initialize the full state: working directory, RocksDB database,
    /// JWT service.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("mesa.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    /// State over an in-memory database, for tests
    pub async fn with_memory_db(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Ok(Self::new(config, db_service.db, jwt_service))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn table_repository(&self) -> TableRepository {
        TableRepository::new(self.db.clone())
    }

    pub fn reservation_repository(&self) -> ReservationRepository {
        ReservationRepository::new(self.db.clone())
    }

    pub fn availability_resolver(&self) -> AvailabilityResolver {
        AvailabilityResolver::new(self.db.clone())
    }

    pub fn reservation_service(&self) -> ReservationService {
        ReservationService::new(self.db.clone(), self.booking_lock.clone())
    }
}
