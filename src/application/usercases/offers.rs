use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usercases::{UseCaseError, UseCaseResult},
    domain::{
        entities::offers::{InsertOfferEntity, UpdateOfferEntity},
        repositories::offers::OfferRepository,
        value_objects::{
            enums::categories::Category,
            offers::{InsertOfferModel, OfferDto},
        },
    },
};

/// Prices are in dinars, stored down to the millime.
const PRICE_SCALE: u32 = 3;

/// Offer fields after validation.
struct OfferFields {
    name: String,
    coach: Option<String>,
    category: Category,
    price: Decimal,
    description: Option<String>,
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn validate_offer(model: InsertOfferModel) -> UseCaseResult<OfferFields> {
    let name = model.name.trim().to_string();
    if name.is_empty() {
        return Err(UseCaseError::validation("offer name is required"));
    }
    let category = model
        .category
        .ok_or_else(|| UseCaseError::validation("offer category is required"))?;
    let price = model
        .price
        .ok_or_else(|| UseCaseError::validation("offer price is required"))?;
    if price.is_sign_negative() {
        return Err(UseCaseError::validation("offer price must not be negative"));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(UseCaseError::validation(
            "offer price cannot be finer than a millime",
        ));
    }

    Ok(OfferFields {
        name,
        coach: optional_text(model.coach),
        category,
        price,
        description: optional_text(model.description),
    })
}

pub struct OfferUseCase<O>
where
    O: OfferRepository + Send + Sync + 'static,
{
    offer_repository: Arc<O>,
}

impl<O> OfferUseCase<O>
where
    O: OfferRepository + Send + Sync + 'static,
{
    pub fn new(offer_repository: Arc<O>) -> Self {
        Self { offer_repository }
    }

    pub async fn list(&self, category: Option<Category>) -> UseCaseResult<Vec<OfferDto>> {
        let offers = match category {
            Some(category) => {
                self.offer_repository
                    .list_by_category(category.as_str().to_string())
                    .await
            }
            None => self.offer_repository.list_all().await,
        }
        .map_err(|err| {
            error!(db_error = ?err, "offers: failed to list offers");
            UseCaseError::Storage(err)
        })?;

        Ok(offers.into_iter().map(OfferDto::from).collect())
    }

    pub async fn get(&self, offer_id: Uuid) -> UseCaseResult<OfferDto> {
        self.offer_repository
            .find_by_id(offer_id)
            .await
            .map_err(|err| {
                error!(%offer_id, db_error = ?err, "offers: failed to load offer");
                UseCaseError::Storage(err)
            })?
            .map(OfferDto::from)
            .ok_or(UseCaseError::OfferNotFound)
    }

    pub async fn create(&self, model: InsertOfferModel) -> UseCaseResult<OfferDto> {
        let fields = validate_offer(model)
            .inspect_err(|err| warn!(error = %err, "offers: create rejected"))?;

        let insert_offer_entity = InsertOfferEntity {
            name: fields.name,
            coach: fields.coach,
            category: fields.category.as_str().to_string(),
            price: fields.price,
            description: fields.description,
        };

        let created = self
            .offer_repository
            .insert(insert_offer_entity)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "offers: failed to insert offer");
                UseCaseError::Storage(err)
            })?;

        info!(offer_id = %created.id, name = %created.name, "offers: offer created");
        Ok(OfferDto::from(created))
    }

    /// Inscriptions keep their own copy of the offer name and price, so edits never reach them.
    pub async fn update(
        &self,
        offer_id: Uuid,
        model: InsertOfferModel,
        now: DateTime<Utc>,
    ) -> UseCaseResult<OfferDto> {
        let fields = validate_offer(model)
            .inspect_err(|err| warn!(%offer_id, error = %err, "offers: update rejected"))?;

        let update_offer_entity = UpdateOfferEntity {
            name: fields.name,
            coach: fields.coach,
            category: fields.category.as_str().to_string(),
            price: fields.price,
            description: fields.description,
            updated_at: now,
        };

        let updated = self
            .offer_repository
            .update(offer_id, update_offer_entity)
            .await
            .map_err(|err| {
                error!(%offer_id, db_error = ?err, "offers: failed to update offer");
                UseCaseError::Storage(err)
            })?
            .ok_or(UseCaseError::OfferNotFound)?;

        info!(%offer_id, "offers: offer updated");
        Ok(OfferDto::from(updated))
    }

    pub async fn delete(&self, offer_id: Uuid) -> UseCaseResult<()> {
        let deleted = self.offer_repository.delete(offer_id).await.map_err(|err| {
            error!(%offer_id, db_error = ?err, "offers: failed to delete offer");
            UseCaseError::Storage(err)
        })?;

        if !deleted {
            return Err(UseCaseError::OfferNotFound);
        }

        info!(%offer_id, "offers: offer deleted");
        Ok(())
    }
}
