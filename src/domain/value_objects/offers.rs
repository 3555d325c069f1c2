use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{entities::offers::OfferEntity, value_objects::enums::categories::Category};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct InsertOfferModel {
    #[serde(default)]
    pub name: String,
    pub coach: Option<String>,
    pub category: Option<Category>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfferDto {
    pub id: Uuid,
    pub name: String,
    pub coach: Option<String>,
    pub category: Option<Category>,
    pub price: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OfferEntity> for OfferDto {
    fn from(value: OfferEntity) -> Self {
        let category = value.category();
        Self {
            id: value.id,
            name: value.name,
            coach: value.coach,
            category,
            price: value.price,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferFilter {
    pub category: Option<Category>,
}
