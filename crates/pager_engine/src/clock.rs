use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of "now" for stamping freshly received responses.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Clock frozen at `at`, for deterministic tests.
pub fn fixed_clock(at: DateTime<Utc>) -> Clock {
    Arc::new(move || at)
}
