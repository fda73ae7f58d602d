//! Vehicle status DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PricingPolicy, VehicleSession};
use crate::support::DomainResult;

/// Computed status of one parking session, evaluated at a given instant.
///
/// Carries raw values only; currency symbols and date formatting are the
/// caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleStatus {
    /// License plate
    pub plate: String,
    /// Session ID
    pub session_id: i64,
    /// When the vehicle entered (UTC)
    pub entry_time: DateTime<Utc>,
    /// When the vehicle departed. null if still parked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<DateTime<Utc>>,
    /// Status: `Active` (still parked) or `Closed` (departed)
    pub status: String,
    /// Elapsed time in whole minutes (truncated for display)
    pub elapsed_minutes: i64,
    /// Billable time in minutes under the effective policy
    pub billable_minutes: i64,
    /// Charge in the smallest currency unit
    pub charge: i64,
    /// Price of the initial block, for display alongside the charge
    pub initial_block_value: i64,
    /// Currency code of the effective policy
    pub currency: String,
}

impl VehicleStatus {
    /// Evaluate `session` against `policy` at instant `as_of`.
    pub fn from_session(
        session: &VehicleSession,
        policy: &PricingPolicy,
        as_of: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let elapsed = session.elapsed(as_of)?;
        let billable = policy.billable_duration(elapsed);
        let charge = policy.charge(billable);

        Ok(Self {
            plate: session.plate.clone(),
            session_id: session.id,
            entry_time: session.entry_time,
            departure_time: session.departure_time,
            status: session.status().to_string(),
            elapsed_minutes: elapsed.num_minutes(),
            billable_minutes: billable.num_minutes(),
            charge,
            initial_block_value: policy.initial_block_value,
            currency: policy.currency.clone(),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
