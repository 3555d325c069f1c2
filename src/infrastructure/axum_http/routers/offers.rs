use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::usercases::offers::OfferUseCase,
    domain::{
        repositories::offers::OfferRepository,
        value_objects::{
            admins::AdminModel,
            offers::{InsertOfferModel, OfferFilter},
        },
    },
    infrastructure::{
        axum_http::error_responses::{AppError, JsonBody, PathParam, QueryParams},
        postgres::{postgres_connection::PgPoolSquad, repositories::offers::OfferPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let offer_repository = OfferPostgres::new(Arc::clone(&db_pool));
    let offer_usecase = OfferUseCase::new(Arc::new(offer_repository));

    router(Arc::new(offer_usecase))
}

pub fn router<O>(offer_usecase: Arc<OfferUseCase<O>>) -> Router
where
    O: OfferRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list::<O>).post(create::<O>))
        .route("/:id", get(find::<O>).put(update::<O>).delete(remove::<O>))
        .with_state(offer_usecase)
}

pub async fn list<O>(
    State(offer_usecase): State<Arc<OfferUseCase<O>>>,
    WithRejection(Query(filter), _): QueryParams<OfferFilter>,
) -> impl IntoResponse
where
    O: OfferRepository + Send + Sync + 'static,
{
    match offer_usecase.list(filter.category).await {
        Ok(offers) => (StatusCode::OK, Json(offers)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn find<O>(
    State(offer_usecase): State<Arc<OfferUseCase<O>>>,
    WithRejection(Path(offer_id), _): PathParam<Uuid>,
) -> impl IntoResponse
where
    O: OfferRepository + Send + Sync + 'static,
{
    match offer_usecase.get(offer_id).await {
        Ok(offer) => (StatusCode::OK, Json(offer)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn create<O>(
    State(offer_usecase): State<Arc<OfferUseCase<O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Json(insert_offer_model), _): JsonBody<InsertOfferModel>,
) -> impl IntoResponse
where
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, "offers: create request received");
    match offer_usecase.create(insert_offer_model).await {
        Ok(offer) => (StatusCode::CREATED, Json(offer)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update<O>(
    State(offer_usecase): State<Arc<OfferUseCase<O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Path(offer_id), _): PathParam<Uuid>,
    WithRejection(Json(insert_offer_model), _): JsonBody<InsertOfferModel>,
) -> impl IntoResponse
where
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, %offer_id, "offers: update request received");
    match offer_usecase
        .update(offer_id, insert_offer_model, Utc::now())
        .await
    {
        Ok(offer) => (StatusCode::OK, Json(offer)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn remove<O>(
    State(offer_usecase): State<Arc<OfferUseCase<O>>>,
    Extension(admin): Extension<AdminModel>,
    WithRejection(Path(offer_id), _): PathParam<Uuid>,
) -> impl IntoResponse
where
    O: OfferRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.id, %offer_id, "offers: delete request received");
    match offer_usecase.delete(offer_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
