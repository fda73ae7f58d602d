//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{
    PricingPolicy, PricingRepository, VehicleRepository, VehicleSession,
};
use crate::support::{DomainError, DomainResult};

/// In-memory storage for development and testing.
///
/// Backs both repository ports; any durable store can replace it by
/// implementing the same traits.
pub struct InMemoryStorage {
    sessions: DashMap<i64, VehicleSession>,
    policies: DashMap<i32, PricingPolicy>,
    session_counter: AtomicI64,
    policy_counter: AtomicI32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            policies: DashMap::new(),
            session_counter: AtomicI64::new(1),
            policy_counter: AtomicI32::new(1),
        }
    }

    /// Storage seeded with an open-ended default policy, handy for demos:
    /// no grace, 60 min initial block at 5.00, 30 min increments at 2.00.
    pub fn with_default_policy() -> Self {
        let storage = Self::new();

        let policy = PricingPolicy {
            id: 1,
            effective_from: DateTime::<Utc>::MIN_UTC,
            effective_until: None,
            grace_period_minutes: 0,
            initial_block_minutes: 60,
            initial_block_value: 500,
            increment_unit_minutes: 30,
            increment_value: 200,
            currency: "BRL".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        storage.policies.insert(1, policy);
        storage.policy_counter.store(2, Ordering::SeqCst);

        storage
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStorage {
    async fn find_active_by_plate(&self, plate: &str) -> DomainResult<Option<VehicleSession>> {
        Ok(self
            .sessions
            .iter()
            .find(|s| s.plate == plate && s.is_parked())
            .map(|s| s.clone()))
    }

    async fn insert_session(&self, mut session: VehicleSession) -> DomainResult<VehicleSession> {
        let id = self.session_counter.fetch_add(1, Ordering::SeqCst);
        session.id = id;
        self.sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn update_session(&self, session: VehicleSession) -> DomainResult<()> {
        if !self.sessions.contains_key(&session.id) {
            return Err(DomainError::Storage(format!(
                "Session {} not found",
                session.id
            )));
        }
        self.sessions.insert(session.id, session);
        Ok(())
    }

    async fn list_all_sessions(&self) -> DomainResult<Vec<VehicleSession>> {
        let mut sessions: Vec<_> = self.sessions.iter().map(|s| s.clone()).collect();
        sessions.sort_by_key(|s| s.id);
        Ok(sessions)
    }
}

#[async_trait]
impl PricingRepository for InMemoryStorage {
    async fn find_effective(&self, instant: DateTime<Utc>) -> DomainResult<Option<PricingPolicy>> {
        Ok(self
            .policies
            .iter()
            .filter(|p| p.is_effective_at(instant))
            .max_by_key(|p| p.effective_from)
            .map(|p| p.clone()))
    }

    async fn insert_policy(&self, mut policy: PricingPolicy) -> DomainResult<PricingPolicy> {
        policy.validate()?;
        let id = self.policy_counter.fetch_add(1, Ordering::SeqCst);
        policy.id = id;
        policy.created_at = Utc::now();
        policy.updated_at = Utc::now();
        self.policies.insert(id, policy.clone());
        Ok(policy)
    }

    async fn list_policies(&self) -> DomainResult<Vec<PricingPolicy>> {
        let mut policies: Vec<_> = self.policies.iter().map(|p| p.clone()).collect();
        policies.sort_by_key(|p| p.id);
        Ok(policies)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_policy(effective_from: DateTime<Utc>) -> PricingPolicy {
        PricingPolicy {
            id: 0,
            effective_from,
            effective_until: None,
            grace_period_minutes: 10,
            initial_block_minutes: 60,
            initial_block_value: 500,
            increment_unit_minutes: 30,
            increment_value: 200,
            currency: "BRL".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_sequential_session_ids() {
        let storage = InMemoryStorage::new();
        let a = storage
            .insert_session(VehicleSession::new("AAA111", day(1)))
            .await
            .unwrap();
        let b = storage
            .insert_session(VehicleSession::new("BBB222", day(1)))
            .await
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn find_active_ignores_closed_sessions() {
        let storage = InMemoryStorage::new();
        let mut session = storage
            .insert_session(VehicleSession::new("AAA111", day(1)))
            .await
            .unwrap();

        assert!(storage.find_active_by_plate("AAA111").await.unwrap().is_some());

        session.close(day(2)).unwrap();
        storage.update_session(session).await.unwrap();

        assert!(storage.find_active_by_plate("AAA111").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_active_is_per_plate() {
        let storage = InMemoryStorage::new();
        storage
            .insert_session(VehicleSession::new("AAA111", day(1)))
            .await
            .unwrap();
        assert!(storage.find_active_by_plate("BBB222").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_unknown_session_is_storage_error() {
        let storage = InMemoryStorage::new();
        let mut session = VehicleSession::new("AAA111", day(1));
        session.id = 42;
        let err = storage.update_session(session).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn list_all_sessions_is_ordered_by_id() {
        let storage = InMemoryStorage::new();
        for plate in ["AAA111", "BBB222", "CCC333"] {
            storage
                .insert_session(VehicleSession::new(plate, day(1)))
                .await
                .unwrap();
        }
        let all = storage.list_all_sessions().await.unwrap();
        let ids: Vec<_> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn find_effective_respects_windows() {
        let storage = InMemoryStorage::new();
        let mut old = sample_policy(day(1));
        old.effective_until = Some(day(10));
        storage.insert_policy(old).await.unwrap();

        assert!(storage.find_effective(day(5)).await.unwrap().is_some());
        assert!(storage.find_effective(day(10)).await.unwrap().is_none());
        assert!(storage
            .find_effective(day(1) - Duration::seconds(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn newer_policy_shadows_open_ended_older_one() {
        let storage = InMemoryStorage::new();
        storage.insert_policy(sample_policy(day(1))).await.unwrap();
        let mut newer = sample_policy(day(15));
        newer.initial_block_value = 900;
        storage.insert_policy(newer).await.unwrap();

        let effective = storage.find_effective(day(20)).await.unwrap().unwrap();
        assert_eq!(effective.initial_block_value, 900);

        let effective = storage.find_effective(day(5)).await.unwrap().unwrap();
        assert_eq!(effective.initial_block_value, 500);
    }

    #[tokio::test]
    async fn insert_policy_validates() {
        let storage = InMemoryStorage::new();
        let mut bad = sample_policy(day(1));
        bad.increment_unit_minutes = 0;
        assert!(storage.insert_policy(bad).await.is_err());
    }

    #[tokio::test]
    async fn default_policy_seed_is_effective_now() {
        let storage = InMemoryStorage::with_default_policy();
        let policy = storage.find_effective(Utc::now()).await.unwrap().unwrap();
        assert_eq!(policy.initial_block_minutes, 60);
        assert_eq!(storage.list_policies().await.unwrap().len(), 1);
    }
}
