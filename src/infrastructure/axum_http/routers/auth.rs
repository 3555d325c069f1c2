use axum::{Extension, Json, Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::domain::value_objects::admins::AdminModel;

pub fn routes() -> Router {
    Router::new().route("/me", get(me))
}

pub async fn me(Extension(admin): Extension<AdminModel>) -> impl IntoResponse {
    (StatusCode::OK, Json(admin)).into_response()
}
