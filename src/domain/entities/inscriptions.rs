use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    domain::{
        services::subscription_lifecycle::LifecycleError,
        value_objects::enums::{
            categories::Category, subscription_durations::SubscriptionDuration,
        },
    },
    infrastructure::postgres::schema::inscriptions,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = inscriptions)]
pub struct InscriptionEntity {
    pub id: Uuid,
    pub category: String,
    pub last_name: String,
    pub first_name: String,
    pub age: i32,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub health_notes: Option<String>,
    pub offer_id: Option<Uuid>,
    pub offer_name: String,
    pub duration_months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InscriptionEntity {
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    pub fn duration(&self) -> Result<SubscriptionDuration, LifecycleError> {
        SubscriptionDuration::from_months(u32::try_from(self.duration_months).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = inscriptions)]
pub struct InsertInscriptionEntity {
    pub category: String,
    pub last_name: String,
    pub first_name: String,
    pub age: i32,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub health_notes: Option<String>,
    pub offer_id: Option<Uuid>,
    pub offer_name: String,
    pub duration_months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = inscriptions, treat_none_as_null = true)]
pub struct UpdateInscriptionEntity {
    pub last_name: String,
    pub first_name: String,
    pub age: i32,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub health_notes: Option<String>,
    pub offer_id: Option<Uuid>,
    pub offer_name: String,
    pub duration_months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}
