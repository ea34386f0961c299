//! Synthetic users.

use chrono::{DateTime, Duration, Utc};
use lh_common::{AccountId, User, UserId};
use rand::Rng;

/// Users are back-dated by up to this many whole days.
pub const USER_MAX_AGE_DAYS: i64 = 365;

/// Generate `n` users with ids `1..=n`.
///
/// Account ids are uniform in `[1, max_account_id]`; `created_at` is a whole
/// number of days before `now`, and every row shares `updated_at = now`.
pub fn generate_users<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    max_account_id: i64,
    now: DateTime<Utc>,
) -> Vec<User> {
    let max_account_id = max_account_id.max(1);
    (1..=n as i64)
        .map(|id| {
            let user_id = UserId(id);
            let age_days = rng.random_range(0..USER_MAX_AGE_DAYS);
            User {
                user_id,
                account_id: AccountId(rng.random_range(1..=max_account_id)),
                email: User::email_for(user_id),
                created_at: now - Duration::days(age_days),
                updated_at: now,
            }
        })
        .collect()
}
