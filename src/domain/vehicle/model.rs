//! Vehicle session domain entity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::support::{DomainError, DomainResult};

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Vehicle is currently parked
    Active,
    /// Vehicle has departed
    Closed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// One parked-vehicle visit, from entry to departure (or still open)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSession {
    /// Unique session ID, assigned by storage on insert (0 until then)
    pub id: i64,
    /// License plate of the vehicle
    pub plate: String,
    /// When the vehicle entered
    pub entry_time: DateTime<Utc>,
    /// When the vehicle departed. None while the vehicle is parked
    pub departure_time: Option<DateTime<Utc>>,
}

impl VehicleSession {
    pub fn new(plate: impl Into<String>, entry_time: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            plate: plate.into(),
            entry_time,
            departure_time: None,
        }
    }

    pub fn is_parked(&self) -> bool {
        self.departure_time.is_none()
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_parked() {
            SessionStatus::Active
        } else {
            SessionStatus::Closed
        }
    }

    /// Close the session. A session closes exactly once, and the departure
    /// must not precede the entry.
    pub fn close(&mut self, departure_time: DateTime<Utc>) -> DomainResult<()> {
        if self.departure_time.is_some() {
            return Err(DomainError::Validation(format!(
                "Session {} for plate {} is already closed",
                self.id, self.plate
            )));
        }
        if departure_time < self.entry_time {
            return Err(DomainError::Validation(format!(
                "Departure {} precedes entry {} for plate {}",
                departure_time, self.entry_time, self.plate
            )));
        }
        self.departure_time = Some(departure_time);
        Ok(())
    }

    /// Elapsed time against `now`, or against the departure if already closed.
    ///
    /// A negative interval (entry in the future, clock skew) is surfaced as a
    /// validation error rather than clamped.
    pub fn elapsed(&self, now: DateTime<Utc>) -> DomainResult<Duration> {
        let reference = self.departure_time.unwrap_or(now);
        let elapsed = reference - self.entry_time;
        if elapsed < Duration::zero() {
            return Err(DomainError::Validation(format!(
                "Entry {} is after reference {} for plate {}",
                self.entry_time, reference, self.plate
            )));
        }
        Ok(elapsed)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, min, 0).unwrap()
    }

    fn sample_session() -> VehicleSession {
        VehicleSession::new("ABC123", t(8, 0))
    }

    #[test]
    fn new_session_is_active() {
        let s = sample_session();
        assert!(s.is_parked());
        assert_eq!(s.status(), SessionStatus::Active);
        assert_eq!(s.id, 0);
        assert!(s.departure_time.is_none());
    }

    #[test]
    fn close_sets_departure() {
        let mut s = sample_session();
        s.close(t(9, 30)).unwrap();
        assert!(!s.is_parked());
        assert_eq!(s.status(), SessionStatus::Closed);
        assert_eq!(s.departure_time, Some(t(9, 30)));
    }

    #[test]
    fn close_twice_fails() {
        let mut s = sample_session();
        s.close(t(9, 0)).unwrap();
        let err = s.close(t(10, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn close_before_entry_fails() {
        let mut s = sample_session();
        let err = s.close(t(7, 59)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn elapsed_while_parked_uses_now() {
        let s = sample_session();
        let elapsed = s.elapsed(t(9, 5)).unwrap();
        assert_eq!(elapsed.num_minutes(), 65);
    }

    #[test]
    fn elapsed_after_close_uses_departure() {
        let mut s = sample_session();
        s.close(t(8, 45)).unwrap();
        // `now` past the departure must not change the result
        let elapsed = s.elapsed(t(12, 0)).unwrap();
        assert_eq!(elapsed.num_minutes(), 45);
    }

    #[test]
    fn elapsed_negative_is_rejected() {
        let s = sample_session();
        let err = s.elapsed(t(7, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn session_status_display() {
        assert_eq!(SessionStatus::Active.to_string(), "Active");
        assert_eq!(SessionStatus::Closed.to_string(), "Closed");
    }
}
