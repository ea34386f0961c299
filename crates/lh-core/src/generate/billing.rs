//! Subscriptions and their monthly invoices.
//!
//! Months are a fixed 30 days everywhere in this module. Invoice dates
//! drift against the calendar over long subscriptions; that is accepted.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use lh_common::{
    AccountId, Invoice, InvoiceId, InvoiceStatus, Plan, Subscription, SubscriptionId,
};
use rand::Rng;

/// Length of an approximate month in days.
pub const DAYS_PER_MONTH: i64 = 30;

/// Subscriptions start this many days before today, inclusive range.
pub const START_OFFSET_DAYS: (i64, i64) = (30, 365);

/// Churned subscriptions end this many days after their start, inclusive range.
pub const CHURN_AFTER_DAYS: (i64, i64) = (30, 180);

/// Advance `date` by `months * 30` days.
pub fn add_months_approx(date: NaiveDate, months: u32) -> NaiveDate {
    date + Duration::days(i64::from(months) * DAYS_PER_MONTH)
}

/// Number of invoices a subscription billed from `start` through `end` receives.
pub fn invoice_count(start: NaiveDate, end: NaiveDate) -> usize {
    if end < start {
        return 0;
    }
    ((end - start).num_days() / DAYS_PER_MONTH) as usize + 1
}

/// One subscription per distinct account, in ascending account order.
///
/// The plan is uniform over the catalog and its price is copied onto the
/// row. With probability `churn_probability` the subscription has an end
/// date 30..=180 days after its start.
pub fn generate_subscriptions<R, I>(
    rng: &mut R,
    accounts: I,
    today: NaiveDate,
    churn_probability: f64,
) -> Vec<Subscription>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = AccountId>,
{
    let accounts: BTreeSet<AccountId> = accounts.into_iter().collect();
    let churn_probability = churn_probability.clamp(0.0, 1.0);

    accounts
        .into_iter()
        .map(|account_id| {
            let subscription_id = SubscriptionId::from_random_bytes(rng.random());
            let plan = Plan::ALL[rng.random_range(0..Plan::ALL.len())];
            let start_date =
                today - Duration::days(rng.random_range(START_OFFSET_DAYS.0..=START_OFFSET_DAYS.1));
            let end_date = rng.random_bool(churn_probability).then(|| {
                start_date + Duration::days(rng.random_range(CHURN_AFTER_DAYS.0..=CHURN_AFTER_DAYS.1))
            });
            Subscription {
                subscription_id,
                account_id,
                plan,
                start_date,
                end_date,
                monthly_price: plan.monthly_price(),
            }
        })
        .collect()
}

/// Monthly invoices for each subscription.
///
/// Dates are `add_months_approx(start_date, k)` for k = 0, 1, ... up to and
/// including the end date, or `today` for active subscriptions.
pub fn generate_invoices<R: Rng + ?Sized>(
    rng: &mut R,
    subscriptions: &[Subscription],
    today: NaiveDate,
) -> Vec<Invoice> {
    let total: usize = subscriptions
        .iter()
        .map(|s| invoice_count(s.start_date, s.billing_end(today)))
        .sum();
    let mut invoices = Vec::with_capacity(total);

    for sub in subscriptions {
        let last = sub.billing_end(today);
        let mut month = 0u32;
        loop {
            let invoice_date = add_months_approx(sub.start_date, month);
            if invoice_date > last {
                break;
            }
            invoices.push(Invoice {
                invoice_id: InvoiceId::from_random_bytes(rng.random()),
                account_id: sub.account_id,
                subscription_id: sub.subscription_id,
                invoice_date,
                amount: sub.monthly_price,
                status: InvoiceStatus::Paid,
            });
            month += 1;
        }
    }

    invoices
}
