use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::{
    domain::{repositories::admins::AdminRepository, value_objects::admins::AdminModel},
    infrastructure::axum_http::error_responses::AppError,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct SupabaseClaims {
    pub sub: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub email: Option<String>,
    pub exp: usize,
}

pub fn validate_supabase_jwt(token: &str, jwt_secret: &str) -> Result<SupabaseClaims> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["authenticated", "service_role"]);

    let token_data = decode::<SupabaseClaims>(token, &decoding_key, &validation)
        .context("JWT validation failed")?;

    Ok(token_data.claims)
}

/// Lets a request through only when its bearer token belongs to a registered admin.
pub struct AdminGuard<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    jwt_secret: String,
    admin_repository: Arc<A>,
}

impl<A> AdminGuard<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    pub fn new(jwt_secret: String, admin_repository: Arc<A>) -> Self {
        Self {
            jwt_secret,
            admin_repository,
        }
    }

    pub async fn authorize(&self, token: &str) -> Result<AdminModel, AppError> {
        let claims = validate_supabase_jwt(token, &self.jwt_secret).map_err(|err| {
            warn!(error = %err, "auth: token rejected");
            AppError::Unauthorized
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            warn!(sub = %claims.sub, "auth: token subject is not a user id");
            AppError::Unauthorized
        })?;

        let admin = self
            .admin_repository
            .find_by_user_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "auth: failed to load admin");
                AppError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%user_id, "auth: user is not an admin");
                AppError::Forbidden
            })?;

        Ok(AdminModel::from_entity(admin, claims.email))
    }
}

pub async fn require_admin<A>(
    State(guard): State<Arc<AdminGuard<A>>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Response
where
    A: AdminRepository + Send + Sync + 'static,
{
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return AppError::Unauthorized.into_response();
    };

    match guard.authorize(bearer.token()).await {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests;
