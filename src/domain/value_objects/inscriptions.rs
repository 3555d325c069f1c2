use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::inscriptions::InscriptionEntity,
    services::subscription_lifecycle::{self, MemberDraft, ProlongationQuote},
    value_objects::enums::{categories::Category, subscription_statuses::SubscriptionStatus},
};

/// Enrolment form payload, used for both creation and edits.
///
/// Required values are optional here so that a missing one is reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct InsertInscriptionModel {
    pub category: Option<Category>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    pub age: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone: String,
    pub health_notes: Option<String>,
    pub offer_id: Option<Uuid>,
    pub duration_months: Option<u32>,
    pub start_date: Option<NaiveDate>,
}

impl InsertInscriptionModel {
    pub fn member_draft(&self) -> MemberDraft {
        MemberDraft {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            age: self.age,
            birth_date: self.birth_date,
            phone: self.phone.clone(),
            health_notes: self.health_notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InscriptionDto {
    pub id: Uuid,
    pub category: Option<Category>,
    pub last_name: String,
    pub first_name: String,
    pub age: i32,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub health_notes: Option<String>,
    pub offer_id: Option<Uuid>,
    pub offer_name: String,
    pub duration_months: i32,
    pub duration_label: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<Decimal>,
    pub status: SubscriptionStatus,
    pub days_remaining: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InscriptionDto {
    pub fn from_entity(entity: InscriptionEntity, now: DateTime<Utc>) -> Self {
        let days_remaining = subscription_lifecycle::days_remaining(entity.end_date, now);
        let category = entity.category();
        let duration_label = entity
            .duration()
            .ok()
            .map(|duration| duration.label().to_string());

        Self {
            id: entity.id,
            category,
            last_name: entity.last_name,
            first_name: entity.first_name,
            age: entity.age,
            birth_date: entity.birth_date,
            phone: entity.phone,
            health_notes: entity.health_notes,
            offer_id: entity.offer_id,
            offer_name: entity.offer_name,
            duration_months: entity.duration_months,
            duration_label,
            start_date: entity.start_date,
            end_date: entity.end_date,
            total_price: entity.total_price,
            status: subscription_lifecycle::classify_days(days_remaining),
            days_remaining,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Explicit listing filters. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct InscriptionFilter {
    pub category: Option<Category>,
    pub offering: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProlongationRequest {
    pub start_date: Option<NaiveDate>,
    pub months: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProlongationQuoteDto {
    pub inscription_id: Uuid,
    pub current_end_date: NaiveDate,
    pub current_total_price: Option<Decimal>,
    pub start_date: NaiveDate,
    pub months: u32,
    pub months_label: String,
    pub new_end_date: NaiveDate,
    pub price_per_month: Decimal,
    pub extension_total: Decimal,
}

impl ProlongationQuoteDto {
    pub fn new(entity: &InscriptionEntity, quote: ProlongationQuote) -> Self {
        Self {
            inscription_id: entity.id,
            current_end_date: entity.end_date,
            current_total_price: entity.total_price,
            start_date: quote.start_date,
            months: quote.months.months(),
            months_label: quote.months.label().to_string(),
            new_end_date: quote.new_end_date,
            price_per_month: quote.price_per_month,
            extension_total: quote.extension_total,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProlongationDto {
    pub inscription: InscriptionDto,
    pub quote: ProlongationQuoteDto,
}
