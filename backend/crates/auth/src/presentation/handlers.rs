//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CreateUserInput, CreateUserUseCase,
    CurrentUserUseCase, GetUserUseCase, ListUsersInput, ListUsersUseCase, SignInInput,
    SignInUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, HealthResponse, ListUsersQuery, ProfileResponse, SignUpRequest,
    SignUpResponse, TokenResponse, UserCreateRequest, UserRead,
};
use crate::presentation::extract::{ApiJson, ApiPath, ApiQuery, LoginCredentials};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/v1/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
        user_name: req.username,
        full_name: req.full_name,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: output.user_id.into_uuid(),
            email: output.email.into_db(),
            created_at: output.created_at,
            jwt: output.jwt,
        }),
    ))
}

/// POST /api/v1/auth/login/access-token
pub async fn login_access_token<R>(
    State(state): State<AuthAppState<R>>,
    LoginCredentials(req): LoginCredentials,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(output.access_token)))
}

/// POST /api/v1/auth/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ChangePasswordInput {
            user_id: auth.user_id,
            current_password: req.current_password,
            new_password: req.new_password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/v1/users/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthenticatedUser,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(&auth.user_id)
        .await?;

    Ok(Json(user.into()))
}

/// POST /api/v1/users/
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<UserCreateRequest>,
) -> AuthResult<(StatusCode, Json<UserRead>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = CreateUserUseCase::new(state.repo.clone())
        .execute(CreateUserInput {
            email: req.email,
            user_name: req.username,
            full_name: req.full_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users/
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> AuthResult<Json<Vec<UserRead>>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let users = ListUsersUseCase::new(state.repo.clone())
        .execute(ListUsersInput {
            skip: query.skip,
            limit: query.limit,
        })
        .await?;

    Ok(Json(users.into_iter().map(UserRead::from).collect()))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> AuthResult<Json<UserRead>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = GetUserUseCase::new(state.repo.clone())
        .execute(user_id.into())
        .await?;

    Ok(Json(user.into()))
}

// ============================================================================
// Health
// ============================================================================

/// GET /api/v1/health/
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "API is healthy".to_string(),
    })
}
