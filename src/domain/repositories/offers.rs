use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::offers::{InsertOfferEntity, OfferEntity, UpdateOfferEntity};

#[automock]
#[async_trait]
pub trait OfferRepository {
    async fn list_all(&self) -> Result<Vec<OfferEntity>>;
    async fn list_by_category(&self, category: String) -> Result<Vec<OfferEntity>>;
    async fn find_by_id(&self, offer_id: Uuid) -> Result<Option<OfferEntity>>;
    async fn insert(&self, insert_offer_entity: InsertOfferEntity) -> Result<OfferEntity>;
    async fn update(
        &self,
        offer_id: Uuid,
        update_offer_entity: UpdateOfferEntity,
    ) -> Result<Option<OfferEntity>>;
    async fn delete(&self, offer_id: Uuid) -> Result<bool>;
}
