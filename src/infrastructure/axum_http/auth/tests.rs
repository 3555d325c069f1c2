use super::*;
use axum::{
    Extension, Router,
    body::Body,
    http::{StatusCode, header::AUTHORIZATION},
    middleware,
    routing::get,
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use mockall::predicate::eq;
use tower::ServiceExt;

use crate::domain::{entities::admins::AdminEntity, repositories::admins::MockAdminRepository};

const SECRET: &str = "supersecretjwtsecretforunittesting123";
const USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn claims(exp: usize) -> SupabaseClaims {
    SupabaseClaims {
        sub: USER_ID.to_string(),
        role: "authenticated".to_string(),
        aud: Some("authenticated".to_string()),
        email: Some("accueil@oxygene.tn".to_string()),
        exp,
    }
}

fn token(claims: &SupabaseClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn admin(user_id: Uuid) -> AdminEntity {
    AdminEntity {
        id: Uuid::new_v4(),
        user_id,
        first_name: "Salma".to_string(),
        last_name: "Jaziri".to_string(),
        created_at: Utc::now(),
    }
}

fn app(admin_repository: MockAdminRepository) -> Router {
    let guard = Arc::new(AdminGuard::new(
        SECRET.to_string(),
        Arc::new(admin_repository),
    ));

    Router::new()
        .route(
            "/me",
            get(|Extension(admin): Extension<AdminModel>| async move { admin.first_name }),
        )
        .route_layer(middleware::from_fn_with_state(
            guard,
            require_admin::<MockAdminRepository>,
        ))
}

async fn call(app: Router, bearer: Option<String>) -> StatusCode {
    let mut request = axum::http::Request::builder().uri("/me");
    if let Some(bearer) = bearer {
        request = request.header(AUTHORIZATION, format!("Bearer {bearer}"));
    }

    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[test]
fn test_validate_supabase_jwt_success() {
    let my_claims = claims(9999999999);

    let validated = validate_supabase_jwt(&token(&my_claims, SECRET), SECRET)
        .expect("Valid token should pass");

    assert_eq!(validated.sub, my_claims.sub);
    assert_eq!(validated.email, my_claims.email);
}

#[test]
fn test_validate_supabase_jwt_expired() {
    let result = validate_supabase_jwt(&token(&claims(1), SECRET), SECRET);
    assert!(result.is_err());
}

#[test]
fn test_validate_supabase_jwt_invalid_signature() {
    let result = validate_supabase_jwt(&token(&claims(9999999999), "wrongsecret"), SECRET);
    assert!(result.is_err());
}

#[test]
fn test_validate_supabase_jwt_wrong_audience() {
    let mut my_claims = claims(9999999999);
    my_claims.aud = Some("anon".to_string());

    let result = validate_supabase_jwt(&token(&my_claims, SECRET), SECRET);
    assert!(result.is_err());
}

#[tokio::test]
async fn admin_is_let_through() {
    let user_id = Uuid::parse_str(USER_ID).unwrap();
    let mut admin_repository = MockAdminRepository::new();
    admin_repository
        .expect_find_by_user_id()
        .with(eq(user_id))
        .times(1)
        .returning(|user_id| Ok(Some(admin(user_id))));

    let status = call(
        app(admin_repository),
        Some(token(&claims(9999999999), SECRET)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn non_admin_is_forbidden() {
    let mut admin_repository = MockAdminRepository::new();
    admin_repository
        .expect_find_by_user_id()
        .returning(|_| Ok(None));

    let status = call(
        app(admin_repository),
        Some(token(&claims(9999999999), SECRET)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_or_bad_token_is_unauthorized() {
    let mut admin_repository = MockAdminRepository::new();
    admin_repository.expect_find_by_user_id().never();
    let app = app(admin_repository);

    assert_eq!(call(app.clone(), None).await, StatusCode::UNAUTHORIZED);
    assert_eq!(
        call(app, Some(token(&claims(1), SECRET))).await,
        StatusCode::UNAUTHORIZED
    );
}
