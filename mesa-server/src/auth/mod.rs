//! Authentication module
//!
//! JWT authentication, role model and middleware:
//! - [`JwtService`] - token validation and minting
//! - [`CurrentUser`] - current caller context
//! - [`require_auth`] - authentication middleware
//! - [`require_role`] - role-check middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, Role};
pub use middleware::{CurrentUserExt, require_auth, require_role};
