//! Request Extractors
//!
//! Wrappers over axum extractors whose rejections render as problem bodies:
//! malformed JSON is 400, JSON that does not fit the target type is 422, and
//! a body without a JSON content type is 415.

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Form, FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::{header, request::Parts};
use kernel::error::app_error::AppError;
use serde::de::DeserializeOwned;

use crate::error::AuthError;
use crate::presentation::dto::{LoginForm, LoginRequest};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::unprocessable(e.body_text()),
        JsonRejection::JsonSyntaxError(e) => AppError::bad_request(e.body_text()),
        JsonRejection::MissingJsonContentType(e) => AppError::unsupported_media_type(e.body_text()),
        other => AppError::bad_request(other.body_text()),
    }
}

fn form_rejection(rejection: FormRejection) -> AppError {
    match rejection {
        FormRejection::FailedToDeserializeForm(e) => AppError::unprocessable(e.body_text()),
        FormRejection::FailedToDeserializeFormBody(e) => AppError::unprocessable(e.body_text()),
        FormRejection::InvalidFormContentType(e) => AppError::unsupported_media_type(e.body_text()),
        other => AppError::bad_request(other.body_text()),
    }
}

// ============================================================================
// JSON body
// ============================================================================

/// `Json<T>` with problem-body rejections
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection).into()),
        }
    }
}

// ============================================================================
// Query string / path
// ============================================================================

/// `Query<T>`; any parse failure is a 422
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection: QueryRejection| {
                AppError::unprocessable(rejection.body_text()).into()
            })
    }
}

/// `Path<T>`; a segment that does not parse is a 422
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(PathRejection::FailedToDeserializePathParams(e)) => {
                Err(AppError::unprocessable(e.body_text()).into())
            }
            Err(other) => Err(AuthError::Internal(other.body_text())),
        }
    }
}

// ============================================================================
// Login credentials
// ============================================================================

/// Login body, either an OAuth2 password form or JSON
///
/// The form's `username` field carries the email.
#[derive(Debug, Clone)]
pub struct LoginCredentials(pub LoginRequest);

impl<S> FromRequest<S> for LoginCredentials
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE));

        if is_form {
            let Form(form) = Form::<LoginForm>::from_request(req, state)
                .await
                .map_err(form_rejection)?;
            return Ok(LoginCredentials(form.into()));
        }

        let ApiJson(body) = ApiJson::<LoginRequest>::from_request(req, state).await?;
        Ok(LoginCredentials(body))
    }
}
