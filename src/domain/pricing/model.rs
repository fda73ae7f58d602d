//! Pricing policy domain entity
//!
//! Holds the tiered tariff schedule and the fee calculation itself. The
//! calculation is the billing-critical path: it works on integer seconds and
//! integer minor currency units throughout, so the ceiling rule is exact.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::support::{DomainError, DomainResult};

/// Tiered parking tariff, valid for a window of time.
///
/// Durations are whole minutes, monetary values are in the smallest currency
/// unit (e.g. cents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub id: i32,
    /// Start of the validity window
    pub effective_from: DateTime<Utc>,
    /// End of the validity window (exclusive). None = open-ended
    pub effective_until: Option<DateTime<Utc>>,
    /// Initial duration charged as zero (may be zero)
    pub grace_period_minutes: i64,
    /// First billable block, charged in full once grace is exceeded
    pub initial_block_minutes: i64,
    /// Flat price of the initial block
    pub initial_block_value: i64,
    /// Billing granularity beyond the initial block, always rounded up
    pub increment_unit_minutes: i64,
    /// Price per increment unit
    pub increment_value: i64,
    /// Currency code (ISO 4217)
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricingPolicy {
    /// Check the policy is internally consistent.
    pub fn validate(&self) -> DomainResult<()> {
        if self.grace_period_minutes < 0 || self.initial_block_minutes < 0 {
            return Err(DomainError::Validation(
                "Policy durations must be non-negative".to_string(),
            ));
        }
        if self.increment_unit_minutes <= 0 {
            return Err(DomainError::Validation(
                "Increment unit must be positive".to_string(),
            ));
        }
        if self.initial_block_value < 0 || self.increment_value < 0 {
            return Err(DomainError::Validation(
                "Policy values must be non-negative".to_string(),
            ));
        }
        if let Some(until) = self.effective_until {
            if until <= self.effective_from {
                return Err(DomainError::Validation(
                    "Policy window ends before it starts".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Check if the policy covers `instant`. The window is half-open:
    /// `[effective_from, effective_until)`.
    pub fn is_effective_at(&self, instant: DateTime<Utc>) -> bool {
        if instant < self.effective_from {
            return false;
        }
        match self.effective_until {
            Some(until) => instant < until,
            None => true,
        }
    }

    /// Billable duration for `elapsed` time under this policy.
    ///
    /// - within grace: nothing is billed;
    /// - past grace, within the initial block: the initial block is billed in
    ///   full;
    /// - beyond that: whole increment units, any excess inside a unit counts
    ///   as a full unit.
    pub fn billable_duration(&self, elapsed: Duration) -> Duration {
        let elapsed_secs = elapsed.num_seconds();
        let grace_secs = self.grace_period_minutes * 60;
        let initial_secs = self.initial_block_minutes * 60;
        let unit_secs = self.increment_unit_minutes * 60;

        if elapsed_secs <= grace_secs {
            return Duration::zero();
        }

        let billable_elapsed = elapsed_secs - grace_secs;
        if billable_elapsed <= initial_secs {
            return Duration::seconds(initial_secs);
        }

        let beyond_initial = billable_elapsed - initial_secs;
        let units = (beyond_initial + unit_secs - 1) / unit_secs;
        Duration::seconds(initial_secs + units * unit_secs)
    }

    /// Charge for a billable duration produced by [`billable_duration`].
    ///
    /// The increment division is exact because the billable duration is
    /// constructed as `initial_block + k * increment_unit`.
    ///
    /// [`billable_duration`]: Self::billable_duration
    pub fn charge(&self, billable: Duration) -> i64 {
        let billable_secs = billable.num_seconds();
        if billable_secs == 0 {
            return 0;
        }

        let initial_secs = self.initial_block_minutes * 60;
        let unit_secs = self.increment_unit_minutes * 60;

        if billable_secs <= initial_secs {
            return self.initial_block_value;
        }

        let units = (billable_secs - initial_secs) / unit_secs;
        self.initial_block_value + units * self.increment_value
    }

    /// Format a minor-unit value as a human-readable string
    pub fn format_value(&self, value: i64) -> String {
        let major = value / 100;
        let minor = value % 100;
        format!("{}.{:02} {}", major, minor, self.currency)
    }
}

// ── Tests ──────────────────────────────────────────────────────
