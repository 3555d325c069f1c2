use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    config::config_model::{DotEnvyConfig, Server},
    infrastructure::{
        axum_http::{
            auth::{AdminGuard, require_admin},
            default_routers, routers,
        },
        postgres::{postgres_connection::PgPoolSquad, repositories::admins::AdminPostgres},
    },
};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let admin_guard = Arc::new(AdminGuard::new(
        config.supabase.jwt_secret.clone(),
        Arc::new(AdminPostgres::new(Arc::clone(&db_pool))),
    ));

    let api = Router::new()
        .nest("/auth", routers::auth::routes())
        .nest(
            "/inscriptions",
            routers::inscriptions::routes(Arc::clone(&db_pool)),
        )
        .nest("/offers", routers::offers::routes(Arc::clone(&db_pool)))
        .nest("/dashboard", routers::dashboard::routes(Arc::clone(&db_pool)))
        .route_layer(middleware::from_fn_with_state(
            admin_guard,
            require_admin::<AdminPostgres>,
        ));

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/api/v1", api)
        .route("/api/v1/health-check", get(default_routers::health_check));
    let app = with_server_layers(app, &config.server)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn with_server_layers(app: Router, server: &Server) -> Result<Router> {
    Ok(app
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.timeout),
        ))
        .layer(RequestBodyLimitLayer::new(
            (server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = ?err, "Failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    info!("Received ctrl+C signal");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    fn server(timeout: u64) -> Server {
        Server {
            port: 0,
            body_limit: 1,
            timeout,
        }
    }

    #[tokio::test]
    async fn slow_requests_time_out_with_408() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                "done"
            }),
        );
        let app = with_server_layers(app, &server(0)).unwrap();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/slow")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn fast_requests_pass_through() {
        let app = Router::new().route("/fast", get(|| async { "done" }));
        let app = with_server_layers(app, &server(5)).unwrap();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/fast")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
