//! Vehicle session repository interface

use async_trait::async_trait;

use super::model::VehicleSession;
use crate::support::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Find the session for `plate` that has no departure yet, if any.
    async fn find_active_by_plate(&self, plate: &str) -> DomainResult<Option<VehicleSession>>;
    /// Persist a new session, assigning its ID. Returns the stored session.
    async fn insert_session(&self, session: VehicleSession) -> DomainResult<VehicleSession>;
    async fn update_session(&self, session: VehicleSession) -> DomainResult<()>;
    async fn list_all_sessions(&self) -> DomainResult<Vec<VehicleSession>>;
}
