//! Parking service - session lifecycle and fee evaluation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::application::dto::VehicleStatus;
use crate::domain::{PricingRepository, VehicleRepository, VehicleSession};
use crate::support::{DomainError, DomainResult};

/// Service for registering vehicle entries/departures and listing session
/// status with the current fee.
pub struct ParkingService {
    vehicles: Arc<dyn VehicleRepository>,
    pricing: Arc<dyn PricingRepository>,
    /// Per-plate locks serializing entry/departure for the same plate.
    /// Without them, two concurrent entries could both observe "no active
    /// session" and both insert one.
    plate_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ParkingService {
    pub fn new(vehicles: Arc<dyn VehicleRepository>, pricing: Arc<dyn PricingRepository>) -> Self {
        Self {
            vehicles,
            pricing,
            plate_locks: DashMap::new(),
        }
    }

    /// Register a vehicle entry, opening a new session.
    ///
    /// Fails with `Conflict` if the plate already has an active session.
    pub async fn register_entry(
        &self,
        plate: &str,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<VehicleSession> {
        let plate = validate_plate(plate)?;

        let lock = self.plate_lock(&plate);
        let _guard = lock.lock().await;

        if let Some(active) = self.vehicles.find_active_by_plate(&plate).await? {
            return Err(DomainError::Conflict(format!(
                "Vehicle {} is already parked (session {})",
                plate, active.id
            )));
        }

        let session = self
            .vehicles
            .insert_session(VehicleSession::new(plate.clone(), entry_time))
            .await?;

        info!(
            plate = plate.as_str(),
            session_id = session.id,
            entry_time = %entry_time,
            "Vehicle entry registered"
        );

        Ok(session)
    }

    /// Register a vehicle departure, closing its active session.
    ///
    /// Fails with `NotFound` if the plate has no active session (never
    /// entered, or already departed).
    pub async fn register_departure(
        &self,
        plate: &str,
        departure_time: DateTime<Utc>,
    ) -> DomainResult<VehicleSession> {
        let plate = validate_plate(plate)?;

        let lock = self.plate_lock(&plate);
        let _guard = lock.lock().await;

        let mut session = self
            .vehicles
            .find_active_by_plate(&plate)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "active session",
                field: "plate",
                value: plate.clone(),
            })?;

        session.close(departure_time)?;
        self.vehicles.update_session(session.clone()).await?;

        info!(
            plate = plate.as_str(),
            session_id = session.id,
            departure_time = %departure_time,
            "Vehicle departure registered"
        );

        Ok(session)
    }

    /// Compute the status of every known session at instant `as_of`.
    ///
    /// Fails with `NoPricingAvailable` if no policy covers `as_of`; the
    /// whole listing fails rather than degrading per vehicle.
    pub async fn list_sessions(&self, as_of: DateTime<Utc>) -> DomainResult<Vec<VehicleStatus>> {
        let policy = self
            .pricing
            .find_effective(as_of)
            .await?
            .ok_or(DomainError::NoPricingAvailable(as_of))?;
        policy.validate()?;

        let sessions = self.vehicles.list_all_sessions().await?;
        sessions
            .iter()
            .map(|session| VehicleStatus::from_session(session, &policy, as_of))
            .collect()
    }

    fn plate_lock(&self, plate: &str) -> Arc<Mutex<()>> {
        self.plate_locks
            .entry(plate.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

fn validate_plate(plate: &str) -> DomainResult<String> {
    let plate = plate.trim();
    if plate.is_empty() {
        return Err(DomainError::Validation("Plate must not be blank".to_string()));
    }
    Ok(plate.to_string())
}

// ── Tests ──────────────────────────────────────────────────────
