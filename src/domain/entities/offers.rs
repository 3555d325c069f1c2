use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    domain::value_objects::enums::categories::Category,
    infrastructure::postgres::schema::offers,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = offers)]
pub struct OfferEntity {
    pub id: Uuid,
    pub name: String,
    pub coach: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OfferEntity {
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = offers)]
pub struct InsertOfferEntity {
    pub name: String,
    pub coach: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = offers, treat_none_as_null = true)]
pub struct UpdateOfferEntity {
    pub name: String,
    pub coach: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}
