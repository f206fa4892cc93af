//! Gallery and image handlers.
//!
//! Reads of a single gallery are public; everything that lists or changes
//! galleries is scoped to the signed-in owner.

use std::io;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use futures::TryStreamExt;
use serde::Deserialize;
use tokio_util::io::StreamReader;

use common::{AppError, AppResult};
use domain::{Gallery, GalleryResponse, Image, ImageResponse};
use gallery_service_lib::{GalleryRepository, GalleryService, ImageStore};

use crate::extractors::JsonBody;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Multipart field carrying uploaded image files
const IMAGES_FIELD: &str = "images";

/// Gallery create/update request
#[derive(Debug, Deserialize)]
pub struct GalleryRequest {
    pub title: String,
}

/// Create gallery routes. `max_upload_bytes` caps the image upload body.
pub fn gallery_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(list_galleries).post(create_gallery))
        .route(
            "/:id",
            get(show_gallery).put(update_gallery).delete(delete_gallery),
        )
        .route(
            "/:id/images",
            post(upload_images).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/:id/images/:filename", delete(delete_image))
}

async fn with_images(state: &AppState, mut gallery: Gallery) -> AppResult<Gallery> {
    gallery.images = state.services.images().by_gallery_id(gallery.id).await?;
    Ok(gallery)
}

/// Galleries owned by the current user
pub async fn list_galleries(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<GalleryResponse>>> {
    let galleries = state.services.galleries().by_user_id(user.id).await?;

    let mut response = Vec::with_capacity(galleries.len());
    for gallery in galleries {
        response.push(GalleryResponse::from(with_images(&state, gallery).await?));
    }
    Ok(Json(response))
}

pub async fn create_gallery(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<GalleryRequest>,
) -> AppResult<impl IntoResponse> {
    let gallery = state
        .services
        .galleries()
        .create(Gallery::new(user.id, req.title))
        .await?;
    tracing::info!(gallery_id = gallery.id, user_id = user.id, "Gallery created");

    Ok((StatusCode::CREATED, Json(GalleryResponse::from(gallery))))
}

/// Any gallery by ID, with its images
pub async fn show_gallery(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GalleryResponse>> {
    let gallery = state.services.galleries().by_id(id).await?;
    let gallery = with_images(&state, gallery).await?;
    Ok(Json(GalleryResponse::from(gallery)))
}

pub async fn update_gallery(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    JsonBody(req): JsonBody<GalleryRequest>,
) -> AppResult<Json<GalleryResponse>> {
    let galleries = state.services.galleries();

    let mut gallery = galleries.owned_by(id, user.id).await?;
    gallery.title = req.title;
    let gallery = galleries.update(gallery).await?;

    let gallery = with_images(&state, gallery).await?;
    Ok(Json(GalleryResponse::from(gallery)))
}

pub async fn delete_gallery(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let galleries = state.services.galleries();

    let gallery = galleries.owned_by(id, user.id).await?;
    galleries.delete(&gallery).await?;
    tracing::info!(gallery_id = id, user_id = user.id, "Gallery deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Store every file sent in the `images` multipart field.
pub async fn upload_images(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let gallery = state.services.galleries().owned_by(id, user.id).await?;
    let images = state.services.images();

    let mut stored = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::bad_request("Uploaded file has no filename."))?;

        // Stream the part to disk; read failures surface as InvalidData.
        let reader = StreamReader::new(
            field.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.body_text())),
        );
        tokio::pin!(reader);
        let image = images.create(gallery.id, &mut reader, &filename).await?;
        stored.push(ImageResponse::from(&image));
    }

    if stored.is_empty() {
        return Err(AppError::bad_request("No images were uploaded."));
    }
    tracing::info!(gallery_id = gallery.id, count = stored.len(), "Images uploaded");

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn delete_image(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, filename)): Path<(i32, String)>,
) -> AppResult<StatusCode> {
    let gallery = state.services.galleries().owned_by(id, user.id).await?;

    state
        .services
        .images()
        .delete(&Image::new(gallery.id, filename))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
