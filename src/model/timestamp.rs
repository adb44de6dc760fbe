use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// A backend write time: whole seconds since the Unix epoch plus a
/// nanosecond remainder, normalized so the remainder stays in
/// `0..1_000_000_000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        let carried = nanos.div_euclid(1_000_000_000) as i64;
        Self {
            seconds: seconds + carried,
            nanos: nanos.rem_euclid(1_000_000_000),
        }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// The calendar representation handed to consumers that dematerialize
    /// timestamp fields. Seconds outside the chrono-representable range
    /// clamp to the Unix epoch.
    pub fn to_date_time(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.seconds, self.nanos as u32)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn to_rfc3339(&self) -> String {
        self.to_date_time().to_rfc3339_opts(SecondsFormat::Nanos, true)
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds
            .cmp(&other.seconds)
            .then_with(|| self.nanos.cmp(&other.nanos))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
