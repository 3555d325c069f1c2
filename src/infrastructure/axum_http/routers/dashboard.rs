use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use crate::{
    application::usercases::dashboard::DashboardUseCase,
    domain::{
        repositories::{inscriptions::InscriptionRepository, offers::OfferRepository},
        value_objects::dashboard::StatisticsQuery,
    },
    infrastructure::{
        axum_http::error_responses::{AppError, QueryParams},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{inscriptions::InscriptionPostgres, offers::OfferPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let inscription_repository = InscriptionPostgres::new(Arc::clone(&db_pool));
    let offer_repository = OfferPostgres::new(Arc::clone(&db_pool));
    let dashboard_usecase =
        DashboardUseCase::new(Arc::new(inscription_repository), Arc::new(offer_repository));

    router(Arc::new(dashboard_usecase))
}

pub fn router<I, O>(dashboard_usecase: Arc<DashboardUseCase<I, O>>) -> Router
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/overview", get(overview::<I, O>))
        .route("/statistics", get(statistics::<I, O>))
        .with_state(dashboard_usecase)
}

pub async fn overview<I, O>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<I, O>>>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    match dashboard_usecase.overview(Utc::now()).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn statistics<I, O>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<I, O>>>,
    WithRejection(Query(query), _): QueryParams<StatisticsQuery>,
) -> impl IntoResponse
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    match dashboard_usecase.statistics(query, Utc::now()).await {
        Ok(statistics) => (StatusCode::OK, Json(statistics)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
