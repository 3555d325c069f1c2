use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::usercases::inscriptions::InscriptionUseCase,
    domain::{
        repositories::{inscriptions::InscriptionRepository, offers::OfferRepository},
        value_objects::{
            admins::AdminModel,
            inscriptions::{InscriptionFilter, InsertInscriptionModel, ProlongationRequest},
        },
    },
    infrastructure::{
        axum_http::error_responses::{AppError, JsonBody, PathParam, QueryParams},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{inscriptions::InscriptionPostgres, offers::OfferPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let inscription_repository = InscriptionPostgres::new(Arc::clone(&db_pool));
    let offer_repository = OfferPostgres::new(Arc::clone(&db_pool));
    let inscription_usecase =
        InscriptionUseCase::new(Arc::new(inscription_repository), Arc::new(offer_repository));

    router(Arc::new(inscription_usecase))
}

pub fn router<I, O>(inscription_usecase: Arc<InscriptionUseCase<I, O>>) -> Router
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list::<I, O>).post(create::<I, O>))
        .route(
            "/:id",
            get(find::<I, O>).put(update::<I, O>).delete(remove::<I, O>),
        )
        .route("/:id/renewal", post(renew::<I, O>))
        .route("/:id/prolongation/quote", post(quote_prolongation::<I, O>))
        .route("/:id/prolongation", post(prolong::<I, O>))
        .with_state(inscription_usecase)
}

pub async fn list<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    WithRejection(Query(filter), _): QueryParams<InscriptionFilter>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    match inscription_usecase.list(filter, Utc::now()).await {
        Ok(inscriptions) => (StatusCode::OK, Json(inscriptions)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn find<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    WithRejection(Path(inscription_id), _): PathParam<Uuid>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    match inscription_usecase.get(inscription_id, Utc::now()).await {
        Ok(inscription) => (StatusCode::OK, Json(inscription)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn create<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Json(insert_inscription_model), _): JsonBody<InsertInscriptionModel>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, "inscriptions: create request received");
    match inscription_usecase
        .create(insert_inscription_model, Utc::now())
        .await
    {
        Ok(inscription) => (StatusCode::CREATED, Json(inscription)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Path(inscription_id), _): PathParam<Uuid>,
    WithRejection(Json(insert_inscription_model), _): JsonBody<InsertInscriptionModel>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, %inscription_id, "inscriptions: update request received");
    match inscription_usecase
        .update(inscription_id, insert_inscription_model, Utc::now())
        .await
    {
        Ok(inscription) => (StatusCode::OK, Json(inscription)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn remove<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Path(inscription_id), _): PathParam<Uuid>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, %inscription_id, "inscriptions: delete request received");
    match inscription_usecase.delete(inscription_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn renew<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Path(inscription_id), _): PathParam<Uuid>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, %inscription_id, "inscriptions: renewal request received");
    match inscription_usecase.renew(inscription_id, Utc::now()).await {
        Ok(inscription) => (StatusCode::CREATED, Json(inscription)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn quote_prolongation<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    WithRejection(Path(inscription_id), _): PathParam<Uuid>,
    WithRejection(Json(prolongation_request), _): JsonBody<ProlongationRequest>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    match inscription_usecase
        .quote_prolongation(inscription_id, prolongation_request)
        .await
    {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn prolong<I, O>(
    State(inscription_usecase): State<Arc<InscriptionUseCase<I, O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Path(inscription_id), _): PathParam<Uuid>,
    WithRejection(Json(prolongation_request), _): JsonBody<ProlongationRequest>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, %inscription_id, "inscriptions: prolongation request received");
    match inscription_usecase
        .prolong(inscription_id, prolongation_request, Utc::now())
        .await
    {
        Ok(prolongation) => (StatusCode::OK, Json(prolongation)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
