//! Time helpers shared across host contracts and adapters.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{SecondsFormat, Utc};

thread_local! {
    static LAST_STAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a monotonic unix millisecond timestamp for record-id stamping.
///
/// Values are monotonic within the current process even when the system clock
/// does not advance, so two records created in the same millisecond still get
/// distinct stamps.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_STAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Returns the current UTC time as an RFC 3339 string with millisecond precision.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_stamps_strictly_increase() {
        let first = next_monotonic_timestamp_ms();
        let second = next_monotonic_timestamp_ms();
        let third = next_monotonic_timestamp_ms();
        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn rfc3339_now_round_trips_through_chrono() {
        let stamp = now_rfc3339();
        let parsed = chrono::DateTime::parse_from_rfc3339(&stamp);
        assert!(parsed.is_ok(), "expected parseable stamp, got {stamp}");
    }
}
