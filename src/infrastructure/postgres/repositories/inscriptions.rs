use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::inscriptions::{
            InscriptionEntity, InsertInscriptionEntity, UpdateInscriptionEntity,
        },
        repositories::inscriptions::InscriptionRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::inscriptions},
};

pub struct InscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InscriptionRepository for InscriptionPostgres {
    async fn list_all(&self) -> Result<Vec<InscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = inscriptions::table
            .order(inscriptions::created_at.desc())
            .select(InscriptionEntity::as_select())
            .load::<InscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, inscription_id: Uuid) -> Result<Option<InscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = inscriptions::table
            .filter(inscriptions::id.eq(inscription_id))
            .select(InscriptionEntity::as_select())
            .first::<InscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert(
        &self,
        insert_inscription_entity: InsertInscriptionEntity,
    ) -> Result<InscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(inscriptions::table)
            .values(&insert_inscription_entity)
            .returning(InscriptionEntity::as_returning())
            .get_result::<InscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        inscription_id: Uuid,
        update_inscription_entity: UpdateInscriptionEntity,
    ) -> Result<InscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(inscriptions::table)
            .filter(inscriptions::id.eq(inscription_id))
            .set(&update_inscription_entity)
            .returning(InscriptionEntity::as_returning())
            .get_result::<InscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update_end_date(
        &self,
        inscription_id: Uuid,
        end_date: NaiveDate,
    ) -> Result<InscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(inscriptions::table)
            .filter(inscriptions::id.eq(inscription_id))
            .set((
                inscriptions::end_date.eq(end_date),
                inscriptions::updated_at.eq(Utc::now()),
            ))
            .returning(InscriptionEntity::as_returning())
            .get_result::<InscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, inscription_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(inscriptions::table)
            .filter(inscriptions::id.eq(inscription_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
