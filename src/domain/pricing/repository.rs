//! Pricing policy repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::PricingPolicy;
use crate::support::DomainResult;

#[async_trait]
pub trait PricingRepository: Send + Sync {
    /// Find the policy effective at `instant`. When windows overlap, the one
    /// with the latest `effective_from` wins.
    async fn find_effective(&self, instant: DateTime<Utc>) -> DomainResult<Option<PricingPolicy>>;
    /// Persist a new policy, assigning its ID. Returns the stored policy.
    async fn insert_policy(&self, policy: PricingPolicy) -> DomainResult<PricingPolicy>;
    async fn list_policies(&self) -> DomainResult<Vec<PricingPolicy>>;
}
