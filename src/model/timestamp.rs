use chrono::prelude::*;

// Unix timestamp in milliseconds.
pub type Timestamp = i64;

pub trait TimestampTrait {
    fn now() -> Self;
    fn to_string_millis(&self) -> String;
}

impl TimestampTrait for Timestamp {
    #[inline]
    fn now() -> Self {
        Utc::now().timestamp_millis()
    }

    fn to_string_millis(&self) -> String {
        match Utc.timestamp_millis_opt(*self).single() {
            Some(ts) => ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            None => self.to_string(),
        }
    }
}
