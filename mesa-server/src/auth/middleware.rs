//! Authentication middleware
//!
//! Axum middleware for JWT authentication and role checks

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService, Role};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Whether a request may pass without a token.
///
/// Browsing tables and checking availability is open to anonymous
/// guests; everything else under `/api/` requires authentication.
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    if path == "/api/health" {
        return true;
    }
    *method == http::Method::GET && (path == "/api/tables" || path.starts_with("/api/tables/"))
}

/// Authentication middleware - requires a valid bearer token
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success the [`CurrentUser`] is injected into request extensions.
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - `/api/health`
/// - `GET /api/tables` and everything below it
///
/// # Errors
///
/// | Failure | Response |
/// |---------|----------|
/// | missing Authorization header | 401 Unauthorized |
/// | expired token | 401 TokenExpired |
/// | invalid token | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight OPTIONS requests through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip auth (let them 404 normally)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Role-check middleware - requires at least the given role
///
/// Roles are ordered `customer < staff < admin`, so
/// `require_role(Role::Staff)` admits staff and admin callers.
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/tables", post(handler::create))
///     .layer(middleware::from_fn(require_role(Role::Admin)));
/// ```
///
/// # Errors
///
/// Insufficient role returns 403 Forbidden
pub fn require_role(
    min_role: Role,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if user.role < min_role {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    user_role = user.role.as_str(),
                    required_role = min_role.as_str()
                );
                return Err(AppError::forbidden(format!(
                    "Requires {} role",
                    min_role.as_str()
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Extension method for pulling the CurrentUser out of a request
pub trait CurrentUserExt {
    /// Returns 401 Unauthorized when no user is attached
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or(AppError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_skip_auth() {
        let get = http::Method::GET;
        let post = http::Method::POST;

        assert!(is_public_api_route(&get, "/api/health"));
        assert!(is_public_api_route(&get, "/api/tables"));
        assert!(is_public_api_route(&get, "/api/tables/availability"));
        assert!(is_public_api_route(
            &get,
            "/api/tables/restaurant_table:abc"
        ));

        assert!(!is_public_api_route(&post, "/api/tables"));
        assert!(!is_public_api_route(&get, "/api/reservations"));
    }
}
