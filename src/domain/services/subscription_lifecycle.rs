//! Price, date and status rules for a membership.
//!
//! Everything here is pure: callers pass `now`/`today` in explicitly so the
//! same inputs always give the same answer.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::domain::value_objects::enums::{
    categories::Category, subscription_durations::SubscriptionDuration,
    subscription_statuses::SubscriptionStatus,
};

pub const EXPIRING_SOON_DAYS: i64 = 7;
pub const CHILD_MIN_AGE: i32 = 3;
pub const CHILD_MAX_AGE: i32 = 15;

#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),
    #[error("unsupported subscription duration: {0} months")]
    InvalidDuration(u32),
    #[error("child age must be between 3 and 15 years, got {0}")]
    AgeOutOfRange(i32),
    #[error("date is out of the supported calendar range")]
    DateOutOfRange,
}

impl LifecycleError {
    fn missing(field: &str) -> Self {
        LifecycleError::Validation(format!("{field} is required"))
    }
}

pub type LifecycleResult<T> = std::result::Result<T, LifecycleError>;

/// Adds calendar months, clamping to the last day of a shorter target month.
pub fn add_calendar_months(date: NaiveDate, months: u32) -> LifecycleResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or(LifecycleError::DateOutOfRange)
}

/// Whole days left until `end_date` (taken at 00:00 UTC), rounded up.
pub fn days_remaining(end_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let remaining = end_date.and_time(NaiveTime::MIN).and_utc() - now;

    // num_days truncates toward zero, which is already the ceiling below zero.
    let days = remaining.num_days();
    if remaining > TimeDelta::days(days) {
        days + 1
    } else {
        days
    }
}

pub fn classify_days(days_remaining: i64) -> SubscriptionStatus {
    if days_remaining < 0 {
        SubscriptionStatus::Expired
    } else if days_remaining <= EXPIRING_SOON_DAYS {
        SubscriptionStatus::ExpiringSoon
    } else {
        SubscriptionStatus::Active
    }
}

pub fn classify(end_date: NaiveDate, now: DateTime<Utc>) -> SubscriptionStatus {
    classify_days(days_remaining(end_date, now))
}

pub fn total_price(base_price: Decimal, duration: SubscriptionDuration) -> Decimal {
    base_price * duration.multiplier()
}

/// Age in full years on `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}

pub fn child_age(birth_date: NaiveDate, today: NaiveDate) -> LifecycleResult<i32> {
    let age = age_on(birth_date, today);
    if (CHILD_MIN_AGE..=CHILD_MAX_AGE).contains(&age) {
        Ok(age)
    } else {
        Err(LifecycleError::AgeOutOfRange(age))
    }
}

/// Member fields as submitted by the desk, before validation.
#[derive(Debug, Clone, Default)]
pub struct MemberDraft {
    pub last_name: String,
    pub first_name: String,
    pub age: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub health_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberProfile {
    pub last_name: String,
    pub first_name: String,
    pub age: i32,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub health_notes: Option<String>,
}

pub fn validate_member(
    category: Category,
    draft: MemberDraft,
    today: NaiveDate,
) -> LifecycleResult<MemberProfile> {
    let last_name = required_text(draft.last_name, "last name")?;
    let first_name = required_text(draft.first_name, "first name")?;
    let phone = required_text(draft.phone, "phone")?;

    let (age, birth_date, health_notes) = match category {
        Category::Child => {
            let birth_date = draft
                .birth_date
                .ok_or_else(|| LifecycleError::missing("birth date"))?;
            let age = child_age(birth_date, today)?;
            let health_notes = draft
                .health_notes
                .map(|notes| notes.trim().to_string())
                .filter(|notes| !notes.is_empty());
            (age, Some(birth_date), health_notes)
        }
        Category::Woman | Category::Adult => {
            let age = draft.age.ok_or_else(|| LifecycleError::missing("age"))?;
            if age < 0 {
                return Err(LifecycleError::Validation(
                    "age must be a non-negative number".to_string(),
                ));
            }
            (age, None, None)
        }
    };

    Ok(MemberProfile {
        last_name,
        first_name,
        age,
        birth_date,
        phone,
        health_notes,
    })
}

fn required_text(value: String, field: &str) -> LifecycleResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::missing(field));
    }
    Ok(trimmed.to_string())
}

/// Dates and price of one enrolment period.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionTerms {
    pub duration: SubscriptionDuration,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<Decimal>,
}

/// Terms for a new or edited enrolment. `base_price` is `None` when no offer was picked.
pub fn enrolment_terms(
    base_price: Option<Decimal>,
    duration_months: Option<u32>,
    start_date: Option<NaiveDate>,
) -> LifecycleResult<SubscriptionTerms> {
    let base_price = base_price.ok_or_else(|| LifecycleError::missing("offer"))?;
    let duration_months = duration_months.ok_or_else(|| LifecycleError::missing("duration"))?;
    let start_date = start_date.ok_or_else(|| LifecycleError::missing("start date"))?;

    let duration = SubscriptionDuration::from_months(duration_months)?;
    let end_date = add_calendar_months(start_date, duration.months())?;

    Ok(SubscriptionTerms {
        duration,
        start_date,
        end_date,
        total_price: Some(total_price(base_price, duration)),
    })
}

/// The next period, starting the day after `previous_end`. Duration and price carry over.
pub fn renewal_terms(
    previous_end: NaiveDate,
    duration: SubscriptionDuration,
    total_price: Option<Decimal>,
) -> LifecycleResult<SubscriptionTerms> {
    let start_date = previous_end
        .checked_add_days(Days::new(1))
        .ok_or(LifecycleError::DateOutOfRange)?;
    let end_date = add_calendar_months(start_date, duration.months())?;

    Ok(SubscriptionTerms {
        duration,
        start_date,
        end_date,
        total_price,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProlongationQuote {
    pub start_date: NaiveDate,
    pub months: SubscriptionDuration,
    pub new_end_date: NaiveDate,
    pub price_per_month: Decimal,
    pub extension_total: Decimal,
}

/// Extension of an existing subscription. The per-month price is derived from what was
/// paid for the current period; a missing price counts as zero.
pub fn prolongation_quote(
    current_total: Option<Decimal>,
    current_duration: SubscriptionDuration,
    start_date: Option<NaiveDate>,
    months: Option<u32>,
) -> LifecycleResult<ProlongationQuote> {
    let start_date =
        start_date.ok_or_else(|| LifecycleError::missing("prolongation start date"))?;
    let months = months.ok_or_else(|| LifecycleError::missing("prolongation months"))?;
    let months = SubscriptionDuration::from_months(months)?;

    let new_end_date = add_calendar_months(start_date, months.months())?;
    let price_per_month = (current_total.unwrap_or(Decimal::ZERO)
        / Decimal::from(current_duration.months()))
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    Ok(ProlongationQuote {
        start_date,
        months,
        new_end_date,
        price_per_month,
        extension_total: price_per_month * Decimal::from(months.months()),
    })
}
