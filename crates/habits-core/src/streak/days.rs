//! Calendar-day arithmetic.

use chrono::{DateTime, Utc};

use crate::error::StreakError;

/// Whole UTC calendar days between `last_performed` and `now`.
///
/// Time of day is discarded before subtracting, so two instants on the same
/// calendar day are always 0 days apart.
///
/// # Errors
/// Returns [`StreakError::FutureTimestamp`] if `last_performed` falls on a
/// later calendar day than `now`.
pub fn days_since(now: DateTime<Utc>, last_performed: DateTime<Utc>) -> Result<u32, StreakError> {
    let today = now.date_naive();
    let last_day = last_performed.date_naive();

    let days = today.signed_duration_since(last_day).num_days();
    if days < 0 {
        return Err(StreakError::FutureTimestamp {
            last_performed,
            now,
        });
    }
    Ok(u32::try_from(days).unwrap_or(u32::MAX))
}
