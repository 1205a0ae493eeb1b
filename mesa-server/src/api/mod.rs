//! API module
//!
//! One submodule per resource, each exposing a `router()` merged by
//! the server. Handlers stay thin; rules live in the booking services.

pub mod health;
pub mod reservations;
pub mod tables;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::utils::AppError;

/// `Json` extractor whose rejection uses the standard error envelope:
/// malformed or incomplete bodies become 400 Validation instead of
/// axum's bare 422.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}
