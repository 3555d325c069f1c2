use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::services::subscription_lifecycle::LifecycleError;

/// The enrolment lengths sold at the desk. Longer terms carry a volume discount,
/// so the price multiplier is not proportional to the month count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub enum SubscriptionDuration {
    OneMonth,
    TwoMonths,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl SubscriptionDuration {
    pub const ALL: [SubscriptionDuration; 5] = [
        SubscriptionDuration::OneMonth,
        SubscriptionDuration::TwoMonths,
        SubscriptionDuration::ThreeMonths,
        SubscriptionDuration::SixMonths,
        SubscriptionDuration::TwelveMonths,
    ];

    pub fn months(&self) -> u32 {
        match self {
            SubscriptionDuration::OneMonth => 1,
            SubscriptionDuration::TwoMonths => 2,
            SubscriptionDuration::ThreeMonths => 3,
            SubscriptionDuration::SixMonths => 6,
            SubscriptionDuration::TwelveMonths => 12,
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            SubscriptionDuration::OneMonth => Decimal::new(10, 1),
            SubscriptionDuration::TwoMonths => Decimal::new(20, 1),
            SubscriptionDuration::ThreeMonths => Decimal::new(28, 1),
            SubscriptionDuration::SixMonths => Decimal::new(55, 1),
            SubscriptionDuration::TwelveMonths => Decimal::new(100, 1),
        }
    }

    /// Label shown on the enrolment form.
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionDuration::OneMonth => "1 mois",
            SubscriptionDuration::TwoMonths => "2 mois",
            SubscriptionDuration::ThreeMonths => "3 mois",
            SubscriptionDuration::SixMonths => "6 mois",
            SubscriptionDuration::TwelveMonths => "1 an",
        }
    }

    pub fn from_months(months: u32) -> Result<Self, LifecycleError> {
        match months {
            1 => Ok(SubscriptionDuration::OneMonth),
            2 => Ok(SubscriptionDuration::TwoMonths),
            3 => Ok(SubscriptionDuration::ThreeMonths),
            6 => Ok(SubscriptionDuration::SixMonths),
            12 => Ok(SubscriptionDuration::TwelveMonths),
            other => Err(LifecycleError::InvalidDuration(other)),
        }
    }
}

impl TryFrom<u32> for SubscriptionDuration {
    type Error = LifecycleError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::from_months(months)
    }
}

impl From<SubscriptionDuration> for u32 {
    fn from(value: SubscriptionDuration) -> Self {
        value.months()
    }
}

impl Display for SubscriptionDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
