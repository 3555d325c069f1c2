use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::inscriptions::{
    InscriptionEntity, InsertInscriptionEntity, UpdateInscriptionEntity,
};

#[automock]
#[async_trait]
pub trait InscriptionRepository {
    async fn list_all(&self) -> Result<Vec<InscriptionEntity>>;
    async fn find_by_id(&self, inscription_id: Uuid) -> Result<Option<InscriptionEntity>>;
    async fn insert(
        &self,
        insert_inscription_entity: InsertInscriptionEntity,
    ) -> Result<InscriptionEntity>;
    async fn update(
        &self,
        inscription_id: Uuid,
        update_inscription_entity: UpdateInscriptionEntity,
    ) -> Result<InscriptionEntity>;
    async fn update_end_date(
        &self,
        inscription_id: Uuid,
        end_date: NaiveDate,
    ) -> Result<InscriptionEntity>;
    async fn delete(&self, inscription_id: Uuid) -> Result<bool>;
}
