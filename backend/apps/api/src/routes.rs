//! Top-level router

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::{AuthConfig, PgUserRepository, api_router};
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

/// Database probe behind `GET /`
pub trait DatabaseProbe: Send + Sync + 'static {
    fn is_connected(&self) -> impl Future<Output = bool> + Send;
}

impl DatabaseProbe for PgUserRepository {
    async fn is_connected(&self) -> bool {
        self.ping().await
    }
}

/// `GET /` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub database: String,
}

/// GET /
pub async fn root<P: DatabaseProbe>(State(probe): State<Arc<P>>) -> Json<RootResponse> {
    let database = if probe.is_connected().await {
        "Connected"
    } else {
        tracing::warn!("Database probe failed");
        "Unavailable"
    };

    Json(RootResponse {
        message: "Welcome to AegisAI Backend".to_string(),
        database: database.to_string(),
    })
}

/// Build the application router
///
/// The repository doubles as the database probe for `GET /`.
pub fn app_router<R>(repo: Arc<R>, config: AuthConfig) -> Router
where
    R: UserRepository + DatabaseProbe,
{
    Router::new()
        .route("/", get(root::<R>))
        .with_state(repo.clone())
        .nest("/api/v1", api_router(repo, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    impl DatabaseProbe for InMemoryUserRepository {
        async fn is_connected(&self) -> bool {
            true
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app() -> Router {
        app_router(
            Arc::new(InMemoryUserRepository::new()),
            AuthConfig::development(),
        )
    }

    #[tokio::test]
    async fn test_root_reports_database() {
        let (status, body) = get_json(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to AegisAI Backend");
        assert_eq!(body["database"], "Connected");
    }

    #[tokio::test]
    async fn test_api_is_nested() {
        let (status, body) = get_json(app(), "/api/v1/health/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, _) = get_json(app(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
