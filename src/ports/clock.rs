use chrono::{DateTime, Utc};

/// Source of the current time for purchases and sales.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
