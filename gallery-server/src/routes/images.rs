use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use gallery_auth::{CallerIdentity, Image};
use gallery_core::{ImageUpdate, NewImage};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateImageRequest {
    pub title: String,
    pub bytes: String, // base64
}

#[derive(Deserialize)]
pub struct UpdateImageRequest {
    pub title: String,
}

/// Public view of an image; the owner subject stays internal
#[derive(Serialize, Debug)]
pub struct ImageResponse {
    pub id: String,
    pub title: String,
    pub file_name: String,
}

impl From<&Image> for ImageResponse {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id.to_string(),
            title: image.title.clone(),
            file_name: image.file_name.clone(),
        }
    }
}

/// GET /api/images
pub async fn list_images(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
) -> ServerResult<Json<Vec<ImageResponse>>> {
    let images = state.images.list(&identity).await?;
    Ok(Json(images.iter().map(ImageResponse::from).collect()))
}

/// GET /api/images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    Path(id): Path<String>,
) -> ServerResult<Json<ImageResponse>> {
    let image = state.images.get(&identity, &id).await?;
    Ok(Json(ImageResponse::from(&image)))
}

/// POST /api/images
/// Body carries the title and base64 content; requires the creator role
pub async fn create_image(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    Json(body): Json<CreateImageRequest>,
) -> ServerResult<Response> {
    let bytes = BASE64
        .decode(body.bytes.as_bytes())
        .map_err(|_| ServerError::BadRequest("Invalid base64 in bytes".into()))?;

    let image = state
        .images
        .create(&identity, NewImage::new(body.title, bytes))
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/images/{}", image.id))],
        Json(ImageResponse::from(&image)),
    )
        .into_response())
}

/// PUT /api/images/{id}
pub async fn update_image(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateImageRequest>,
) -> ServerResult<StatusCode> {
    state
        .images
        .update(&identity, &id, ImageUpdate::new(body.title))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/images/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    state.images.delete(&identity, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
