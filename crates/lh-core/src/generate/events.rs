//! Synthetic activity events.

use chrono::{DateTime, Duration, Utc};
use lh_common::{Event, EventId, EventType, UserId};
use rand::Rng;

/// Events are back-dated by up to this many whole days.
pub const EVENT_MAX_AGE_DAYS: i64 = 30;

/// Generate `n` events with ids `1..=n`.
///
/// User references are uniform in `[1, user_max]` and are not checked
/// against the generated users. A `user_max` of 0 is treated as 1.
pub fn generate_events<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    user_max: i64,
    now: DateTime<Utc>,
) -> Vec<Event> {
    let user_max = user_max.max(1);
    (1..=n as i64)
        .map(|id| Event {
            event_id: EventId(id),
            user_id: UserId(rng.random_range(1..=user_max)),
            event_type: EventType::ALL[rng.random_range(0..EventType::ALL.len())],
            event_ts: now - Duration::days(rng.random_range(0..EVENT_MAX_AGE_DAYS)),
        })
        .collect()
}
