use crate::error::{ServerError, ServerResult};
use axum::{extract::Request, http::header::HeaderMap, middleware::Next, response::Response};
use gallery_auth::{CallerIdentity, Claim};

/// Header the upstream authentication layer fills with the verified claims,
/// as a JSON array of `{"type", "value", "issuer"}` objects
pub const CLAIMS_HEADER: &str = "X-Verified-Claims";

/// Build the caller identity from the verified-claims header
pub fn extract_identity(headers: &HeaderMap) -> ServerResult<CallerIdentity> {
    let raw = headers
        .get(CLAIMS_HEADER)
        .ok_or_else(|| ServerError::Unauthorized("Missing X-Verified-Claims header".into()))?
        .to_str()
        .map_err(|_| ServerError::Unauthorized("Non-ASCII X-Verified-Claims header".into()))?;

    let claims: Vec<Claim> = serde_json::from_str(raw)
        .map_err(|_| ServerError::Unauthorized("Malformed X-Verified-Claims header".into()))?;

    Ok(CallerIdentity::new(claims))
}

/// Middleware that rejects requests without an identity and hands the
/// identity to handlers as a request extension
pub async fn require_identity(mut request: Request, next: Next) -> Result<Response, ServerError> {
    let identity = extract_identity(request.headers())?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
