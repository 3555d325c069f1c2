use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usercases::{UseCaseError, UseCaseResult},
    domain::{
        entities::{
            inscriptions::{InscriptionEntity, InsertInscriptionEntity, UpdateInscriptionEntity},
            offers::OfferEntity,
        },
        repositories::{inscriptions::InscriptionRepository, offers::OfferRepository},
        services::{
            aggregation,
            subscription_lifecycle::{self, MemberProfile, SubscriptionTerms},
        },
        value_objects::{
            enums::categories::Category,
            inscriptions::{
                InscriptionDto, InscriptionFilter, InsertInscriptionModel, ProlongationDto,
                ProlongationQuoteDto, ProlongationRequest,
            },
        },
    },
};

pub struct InscriptionUseCase<I, O>
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    inscription_repository: Arc<I>,
    offer_repository: Arc<O>,
}

impl<I, O> InscriptionUseCase<I, O>
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    pub fn new(inscription_repository: Arc<I>, offer_repository: Arc<O>) -> Self {
        Self {
            inscription_repository,
            offer_repository,
        }
    }

    pub async fn list(
        &self,
        filter: InscriptionFilter,
        now: DateTime<Utc>,
    ) -> UseCaseResult<Vec<InscriptionDto>> {
        let records = self.inscription_repository.list_all().await.map_err(|err| {
            error!(db_error = ?err, "inscriptions: failed to list inscriptions");
            UseCaseError::Storage(err)
        })?;

        Ok(aggregation::filter_inscriptions(&records, &filter, now))
    }

    pub async fn get(
        &self,
        inscription_id: Uuid,
        now: DateTime<Utc>,
    ) -> UseCaseResult<InscriptionDto> {
        let inscription = self.find_inscription(inscription_id).await?;
        Ok(InscriptionDto::from_entity(inscription, now))
    }

    pub async fn create(
        &self,
        model: InsertInscriptionModel,
        now: DateTime<Utc>,
    ) -> UseCaseResult<InscriptionDto> {
        let category = model
            .category
            .ok_or_else(|| UseCaseError::validation("category is required"))?;
        let (profile, offer, terms) = self
            .prepare_enrolment(category, &model, now)
            .await
            .inspect_err(|err| warn!(%category, error = %err, "inscriptions: create rejected"))?;

        let insert_inscription_entity = InsertInscriptionEntity {
            category: category.as_str().to_string(),
            last_name: profile.last_name,
            first_name: profile.first_name,
            age: profile.age,
            birth_date: profile.birth_date,
            phone: profile.phone,
            health_notes: profile.health_notes,
            offer_id: Some(offer.id),
            offer_name: offer.name,
            duration_months: terms.duration.months() as i32,
            start_date: terms.start_date,
            end_date: terms.end_date,
            total_price: terms.total_price,
        };

        let created = self
            .inscription_repository
            .insert(insert_inscription_entity)
            .await
            .map_err(|err| {
                error!(%category, db_error = ?err, "inscriptions: failed to insert inscription");
                UseCaseError::Storage(err)
            })?;

        info!(
            inscription_id = %created.id,
            %category,
            end_date = %created.end_date,
            "inscriptions: inscription created"
        );

        Ok(InscriptionDto::from_entity(created, now))
    }

    /// Edits re-run the enrolment computation; the category of a record never changes.
    pub async fn update(
        &self,
        inscription_id: Uuid,
        model: InsertInscriptionModel,
        now: DateTime<Utc>,
    ) -> UseCaseResult<InscriptionDto> {
        let existing = self.find_inscription(inscription_id).await?;
        let category = match (existing.category(), model.category) {
            (Some(stored), Some(requested)) if stored != requested => {
                warn!(%inscription_id, "inscriptions: category change rejected");
                return Err(UseCaseError::validation(
                    "the category of an inscription cannot be changed",
                ));
            }
            (Some(stored), _) => stored,
            (None, Some(requested)) => requested,
            (None, None) => return Err(UseCaseError::validation("category is required")),
        };

        let (profile, offer, terms) = self
            .prepare_enrolment(category, &model, now)
            .await
            .inspect_err(|err| {
                warn!(%inscription_id, error = %err, "inscriptions: update rejected")
            })?;

        let update_inscription_entity = UpdateInscriptionEntity {
            last_name: profile.last_name,
            first_name: profile.first_name,
            age: profile.age,
            birth_date: profile.birth_date,
            phone: profile.phone,
            health_notes: profile.health_notes,
            offer_id: Some(offer.id),
            offer_name: offer.name,
            duration_months: terms.duration.months() as i32,
            start_date: terms.start_date,
            end_date: terms.end_date,
            total_price: terms.total_price,
            updated_at: now,
        };

        let updated = self
            .inscription_repository
            .update(inscription_id, update_inscription_entity)
            .await
            .map_err(|err| {
                error!(%inscription_id, db_error = ?err, "inscriptions: failed to update inscription");
                UseCaseError::Storage(err)
            })?;

        info!(%inscription_id, "inscriptions: inscription updated");

        Ok(InscriptionDto::from_entity(updated, now))
    }

    pub async fn delete(&self, inscription_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .inscription_repository
            .delete(inscription_id)
            .await
            .map_err(|err| {
                error!(%inscription_id, db_error = ?err, "inscriptions: failed to delete inscription");
                UseCaseError::Storage(err)
            })?;

        if !deleted {
            return Err(UseCaseError::InscriptionNotFound);
        }

        info!(%inscription_id, "inscriptions: inscription deleted");
        Ok(())
    }

    /// Creates the next period as a new row. The previous row is left as history.
    pub async fn renew(
        &self,
        inscription_id: Uuid,
        now: DateTime<Utc>,
    ) -> UseCaseResult<InscriptionDto> {
        let previous = self.find_inscription(inscription_id).await?;
        let duration = previous.duration()?;
        let terms = subscription_lifecycle::renewal_terms(
            previous.end_date,
            duration,
            previous.total_price,
        )?;

        let insert_inscription_entity = InsertInscriptionEntity {
            category: previous.category,
            last_name: previous.last_name,
            first_name: previous.first_name,
            age: previous.age,
            birth_date: previous.birth_date,
            phone: previous.phone,
            health_notes: previous.health_notes,
            offer_id: previous.offer_id,
            offer_name: previous.offer_name,
            duration_months: terms.duration.months() as i32,
            start_date: terms.start_date,
            end_date: terms.end_date,
            total_price: terms.total_price,
        };

        let renewed = self
            .inscription_repository
            .insert(insert_inscription_entity)
            .await
            .map_err(|err| {
                error!(%inscription_id, db_error = ?err, "inscriptions: failed to insert renewal");
                UseCaseError::Storage(err)
            })?;

        info!(
            %inscription_id,
            renewed_id = %renewed.id,
            start_date = %renewed.start_date,
            end_date = %renewed.end_date,
            "inscriptions: inscription renewed"
        );

        Ok(InscriptionDto::from_entity(renewed, now))
    }

    pub async fn quote_prolongation(
        &self,
        inscription_id: Uuid,
        request: ProlongationRequest,
    ) -> UseCaseResult<ProlongationQuoteDto> {
        let inscription = self.find_inscription(inscription_id).await?;
        Self::quote(&inscription, request)
    }

    /// Moves the end date only. The stored total price stays as it was.
    pub async fn prolong(
        &self,
        inscription_id: Uuid,
        request: ProlongationRequest,
        now: DateTime<Utc>,
    ) -> UseCaseResult<ProlongationDto> {
        let inscription = self.find_inscription(inscription_id).await?;
        let quote = Self::quote(&inscription, request)?;

        let prolonged = self
            .inscription_repository
            .update_end_date(inscription_id, quote.new_end_date)
            .await
            .map_err(|err| {
                error!(%inscription_id, db_error = ?err, "inscriptions: failed to prolong inscription");
                UseCaseError::Storage(err)
            })?;

        info!(
            %inscription_id,
            new_end_date = %quote.new_end_date,
            extension_total = %quote.extension_total,
            "inscriptions: inscription prolonged"
        );

        Ok(ProlongationDto {
            inscription: InscriptionDto::from_entity(prolonged, now),
            quote,
        })
    }

    fn quote(
        inscription: &InscriptionEntity,
        request: ProlongationRequest,
    ) -> UseCaseResult<ProlongationQuoteDto> {
        let inscription_id = inscription.id;
        let quote = inscription
            .duration()
            .and_then(|duration| {
                subscription_lifecycle::prolongation_quote(
                    inscription.total_price,
                    duration,
                    request.start_date,
                    request.months,
                )
            })
            .inspect_err(|err| {
                warn!(%inscription_id, error = %err, "inscriptions: prolongation rejected")
            })?;

        Ok(ProlongationQuoteDto::new(inscription, quote))
    }

    async fn find_inscription(&self, inscription_id: Uuid) -> UseCaseResult<InscriptionEntity> {
        self.inscription_repository
            .find_by_id(inscription_id)
            .await
            .map_err(|err| {
                error!(%inscription_id, db_error = ?err, "inscriptions: failed to load inscription");
                UseCaseError::Storage(err)
            })?
            .ok_or(UseCaseError::InscriptionNotFound)
    }

    async fn prepare_enrolment(
        &self,
        category: Category,
        model: &InsertInscriptionModel,
        now: DateTime<Utc>,
    ) -> UseCaseResult<(MemberProfile, OfferEntity, SubscriptionTerms)> {
        let profile = subscription_lifecycle::validate_member(
            category,
            model.member_draft(),
            now.date_naive(),
        )?;

        let offer = match model.offer_id {
            Some(offer_id) => Some(
                self.offer_repository
                    .find_by_id(offer_id)
                    .await
                    .map_err(|err| {
                        error!(%offer_id, db_error = ?err, "inscriptions: failed to load offer");
                        UseCaseError::Storage(err)
                    })?
                    .ok_or(UseCaseError::OfferNotFound)?,
            ),
            None => None,
        };

        let terms = subscription_lifecycle::enrolment_terms(
            offer.as_ref().map(|offer| offer.price),
            model.duration_months,
            model.start_date,
        )?;

        let offer = offer.ok_or_else(|| UseCaseError::validation("offer is required"))?;
        if offer.category() != Some(category) {
            return Err(UseCaseError::OfferCategoryMismatch);
        }

        Ok((profile, offer, terms))
    }
}
