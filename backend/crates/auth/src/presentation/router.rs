//! API Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_access_token;

/// Create the `/api/v1` router for any repository implementation
///
/// `/users/me` and `/auth/change-password` require a bearer token.
pub fn api_router<R>(repo: Arc<R>, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = AuthAppState {
        repo,
        config: config.clone(),
    };
    let bearer = middleware::from_fn_with_state(config, require_access_token);

    let protected = Router::new()
        .route("/auth/change-password", post(handlers::change_password::<R>))
        .route("/users/me", get(handlers::me::<R>))
        .route_layer(bearer);

    let auth = Router::new()
        .route("/auth/signup", post(handlers::sign_up::<R>))
        .route(
            "/auth/login/access-token",
            post(handlers::login_access_token::<R>),
        );

    let users = Router::new()
        .route(
            "/users/",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route("/users/{user_id}", get(handlers::get_user::<R>));

    Router::new()
        .merge(protected)
        .merge(auth)
        .merge(users)
        .route("/health/", get(handlers::health))
        .route("/health", get(handlers::health))
        .with_state(state)
}
