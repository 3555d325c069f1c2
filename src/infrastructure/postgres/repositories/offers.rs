use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::offers::{InsertOfferEntity, OfferEntity, UpdateOfferEntity},
        repositories::offers::OfferRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::offers},
};

pub struct OfferPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OfferPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OfferRepository for OfferPostgres {
    async fn list_all(&self) -> Result<Vec<OfferEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = offers::table
            .order((offers::category.asc(), offers::name.asc()))
            .select(OfferEntity::as_select())
            .load::<OfferEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_category(&self, category: String) -> Result<Vec<OfferEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = offers::table
            .filter(offers::category.eq(category))
            .order(offers::name.asc())
            .select(OfferEntity::as_select())
            .load::<OfferEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, offer_id: Uuid) -> Result<Option<OfferEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = offers::table
            .filter(offers::id.eq(offer_id))
            .select(OfferEntity::as_select())
            .first::<OfferEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert(&self, insert_offer_entity: InsertOfferEntity) -> Result<OfferEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(offers::table)
            .values(&insert_offer_entity)
            .returning(OfferEntity::as_returning())
            .get_result::<OfferEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        offer_id: Uuid,
        update_offer_entity: UpdateOfferEntity,
    ) -> Result<Option<OfferEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(offers::table)
            .filter(offers::id.eq(offer_id))
            .set(&update_offer_entity)
            .returning(OfferEntity::as_returning())
            .get_result::<OfferEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, offer_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(offers::table)
            .filter(offers::id.eq(offer_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
