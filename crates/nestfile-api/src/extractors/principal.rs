//! `Principal` extractor — reads the authenticated user key injected by
//! the fronting identity provider and builds the request context.
//!
//! Token validation is not this service's job: the identity provider
//! terminates authentication and forwards the stable user key in the
//! `x-principal` header. A request arriving without it was not
//! authenticated.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nestfile_core::error::AppError;
use nestfile_core::types::UserId;
use nestfile_service::context::RequestContext;

/// Header carrying the authenticated user key.
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// Extracted authenticated principal available in handlers.
#[derive(Debug, Clone)]
pub struct Principal(pub RequestContext);

impl Principal {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for Principal {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing x-principal header"))?;

        let user_id = header
            .parse::<UserId>()
            .map_err(|_| AppError::authentication("Malformed x-principal header"))?;

        Ok(Principal(RequestContext::new(user_id)))
    }
}
