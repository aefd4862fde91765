use axum::{Extension, Json};
use gallery_auth::CallerIdentity;

/// Issuer reported for claims that don't name one
const LOCAL_AUTHORITY: &str = "LOCAL AUTHORITY";

/// GET /info
/// Issuer of each claim on the caller's identity, in claim order
pub async fn get_info(Extension(identity): Extension<CallerIdentity>) -> Json<Vec<String>> {
    Json(
        identity
            .issuers()
            .into_iter()
            .map(|issuer| issuer.unwrap_or(LOCAL_AUTHORITY).to_string())
            .collect(),
    )
}
