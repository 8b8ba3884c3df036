//! # Entitlement Module
//!
//! Subscription tier proration: computing the new expiration date when a
//! time-bound service tier is upgraded mid-cycle.
//!
//! ## The Proration Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mid-Cycle Tier Upgrade                               │
//! │                                                                         │
//! │  Bronze (weight 1.0), expires 2025-02-01                               │
//! │  Upgraded 2025-01-15 to Silver (weight 1.75), buying 1 month           │
//! │                                                                         │
//! │  remaining  = days(2025-01-15 → 2025-02-01)        = 17                │
//! │  converted  = 17 × 1.0 / 1.75                      = 9.71              │
//! │  new expiry = 2025-01-15 + 1 calendar month + 9d   = 2025-02-24        │
//! │                                                                         │
//! │  Unused cheap-tier time buys proportionally less expensive-tier        │
//! │  time. Downgrading an ACTIVE entitlement is forbidden outright.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Rule
//! The conversion is real-valued; nothing is rounded until the single
//! combined day count is **truncated** to whole days for calendar
//! addition. (The customer-facing help page shows "≈10 days" — that is
//! display rounding; truncation is what reproduces its own worked final
//! date.) Partial days of remaining time likewise contribute nothing:
//! `remaining` is a whole-day count.
//!
//! This function is pure. Callers capture `now` once at the start of the
//! operation and hand the returned state to the external persistence
//! client; nothing here reads the clock or writes anywhere.

use chrono::{DateTime, Days, Months, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{SubscriptionState, SubscriptionTier};
use crate::validation::{validate_purchased_months, validate_tier_weight};

// =============================================================================
// Upgrade
// =============================================================================

/// Upgrades (or extends) a subscription, prorating any remaining time.
///
/// ## Cases
/// - **No active entitlement** (`expires_at` empty or past): fresh start,
///   `now + purchased_months` calendar months.
/// - **Active, same or higher tier**: remaining whole days are converted
///   by `remaining × current.weight / target.weight`, truncated, and
///   appended after the purchased calendar months.
/// - **Active, lower tier**: `TierConflict` — downgrades wait for expiry.
///
/// ## Guarantees
/// - a successful upgrade's expiration is always ≥ `now`
/// - deterministic: same inputs, same state; no hidden recomputation
pub fn upgrade(
    current: &SubscriptionState,
    now: DateTime<Utc>,
    target: &SubscriptionTier,
    purchased_months: u32,
) -> CoreResult<SubscriptionState> {
    validate_tier_weight(current.tier.weight)?;
    validate_tier_weight(target.weight)?;
    validate_purchased_months(purchased_months)?;

    let active_until = current.expires_at.filter(|expires_at| now < *expires_at);

    if active_until.is_some() && target.weight < current.tier.weight {
        return Err(CoreError::TierConflict {
            current: current.tier.name.clone(),
            current_weight: current.tier.weight,
            target: target.name.clone(),
            target_weight: target.weight,
        });
    }

    let base = add_calendar_months(now, purchased_months)?;

    let expires_at = match active_until {
        None => base,
        Some(current_expiry) => {
            let remaining_days = (current_expiry - now).num_days();
            let converted = remaining_days as f64 * current.tier.weight / target.weight;
            // Single truncation of the combined day count (see module doc).
            let whole_days = converted.trunc() as u64;
            base.checked_add_days(Days::new(whole_days))
                .ok_or_else(expiry_out_of_range)?
        }
    };

    Ok(SubscriptionState {
        tier: target.clone(),
        expires_at: Some(expires_at),
    })
}

/// Calendar-month addition: 2025-01-15 + 1 month = 2025-02-15, with
/// chrono clamping month-end overflow (Jan 31 + 1 month = Feb 28).
fn add_calendar_months(now: DateTime<Utc>, months: u32) -> CoreResult<DateTime<Utc>> {
    now.checked_add_months(Months::new(months))
        .ok_or_else(expiry_out_of_range)
}

fn expiry_out_of_range() -> CoreError {
    CoreError::Validation(ValidationError::OutOfRange {
        field: "expiration date".to_string(),
        min: 0,
        max: i64::MAX,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tier(name: &str, weight: f64) -> SubscriptionTier {
        SubscriptionTier {
            name: name.to_string(),
            weight,
            monthly_price_cents: 9900,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn state(tier_: SubscriptionTier, expires_at: Option<DateTime<Utc>>) -> SubscriptionState {
        SubscriptionState {
            tier: tier_,
            expires_at,
        }
    }

    /// The product-documentation worked example, reproduced exactly:
    /// Bronze (1.0) expiring 2025-02-01, upgraded 2025-01-15 to Silver
    /// (1.75) buying 1 month → 17 remaining days, 9.71 converted,
    /// truncated to 9 → 2025-02-24.
    #[test]
    fn test_worked_example_bronze_to_silver() {
        let current = state(tier("Bronze", 1.0), Some(date(2025, 2, 1)));
        let upgraded = upgrade(&current, date(2025, 1, 15), &tier("Silver", 1.75), 1).unwrap();

        assert_eq!(upgraded.tier.name, "Silver");
        assert_eq!(upgraded.expires_at, Some(date(2025, 2, 24)));
    }

    #[test]
    fn test_same_tier_extension_converts_one_to_one() {
        let current = state(tier("Bronze", 1.0), Some(date(2025, 2, 1)));
        let extended = upgrade(&current, date(2025, 1, 15), &tier("Bronze", 1.0), 1).unwrap();

        // 17 remaining days carry over unchanged: Feb 15 + 17d = Mar 4.
        assert_eq!(extended.expires_at, Some(date(2025, 3, 4)));
    }

    #[test]
    fn test_downgrade_of_active_tier_is_rejected() {
        let current = state(tier("Gold", 2.5), Some(date(2025, 2, 1)));
        let err = upgrade(&current, date(2025, 1, 15), &tier("Bronze", 1.0), 1).unwrap_err();

        assert!(matches!(err, CoreError::TierConflict { .. }));
    }

    #[test]
    fn test_downgrade_after_expiry_is_a_fresh_start() {
        let current = state(tier("Gold", 2.5), Some(date(2025, 1, 1)));
        let now = date(2025, 1, 15);
        let renewed = upgrade(&current, now, &tier("Bronze", 1.0), 3).unwrap();

        assert_eq!(renewed.tier.name, "Bronze");
        assert_eq!(renewed.expires_at, Some(date(2025, 4, 15)));
    }

    #[test]
    fn test_fresh_start_with_no_prior_entitlement() {
        let current = state(tier("Bronze", 1.0), None);
        let now = date(2025, 1, 15);
        let started = upgrade(&current, now, &tier("Silver", 1.75), 6).unwrap();

        assert_eq!(started.expires_at, Some(date(2025, 7, 15)));
    }

    #[test]
    fn test_expiry_instant_counts_as_lapsed() {
        // now == expires_at: no remaining time, and a "downgrade" is fine.
        let now = date(2025, 1, 15);
        let current = state(tier("Gold", 2.5), Some(now));
        let renewed = upgrade(&current, now, &tier("Bronze", 1.0), 1).unwrap();

        assert_eq!(renewed.expires_at, Some(date(2025, 2, 15)));
    }

    #[test]
    fn test_upgrade_to_heavier_tier_shrinks_remaining_time() {
        // 20 remaining Bronze days at weight 1.0 → Gold weight 2.5 buys
        // 8 Gold days: 2025-02-10 + 1 month... now 2025-01-21,
        // base = 2025-02-21, + 8d = 2025-03-01.
        let current = state(tier("Bronze", 1.0), Some(date(2025, 2, 10)));
        let upgraded = upgrade(&current, date(2025, 1, 21), &tier("Gold", 2.5), 1).unwrap();

        assert_eq!(upgraded.expires_at, Some(date(2025, 3, 1)));
    }

    #[test]
    fn test_result_is_monotonic() {
        let now = date(2025, 1, 15);
        let cases = [
            state(tier("Bronze", 1.0), None),
            state(tier("Bronze", 1.0), Some(date(2024, 6, 1))),
            state(tier("Bronze", 1.0), Some(date(2025, 2, 1))),
        ];
        for current in cases {
            let upgraded = upgrade(&current, now, &tier("Silver", 1.75), 1).unwrap();
            assert!(upgraded.expires_at.unwrap() >= now);
        }
    }

    #[test]
    fn test_month_end_clamping() {
        // Jan 31 + 1 calendar month clamps to Feb 28 (chrono semantics).
        let current = state(tier("Bronze", 1.0), None);
        let started = upgrade(&current, date(2025, 1, 31), &tier("Bronze", 1.0), 1).unwrap();
        assert_eq!(started.expires_at, Some(date(2025, 2, 28)));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let current = state(tier("Bronze", 1.0), None);
        let now = date(2025, 1, 15);

        assert!(upgrade(&current, now, &tier("Silver", 1.75), 0).is_err());
        assert!(upgrade(&current, now, &tier("Broken", 0.0), 1).is_err());
        assert!(upgrade(&current, now, &tier("Broken", -1.0), 1).is_err());
    }
}
