//! Gallery and image domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{GALLERIES_DIR, IMAGES_URL_PREFIX};

/// Gallery domain entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gallery {
    /// Surrogate key, 0 until the gallery is persisted
    pub id: i32,
    /// Owning user; not enforced by a foreign key
    pub user_id: i32,
    pub title: String,
    /// Populated from image storage on demand, never persisted
    #[serde(skip)]
    pub images: Vec<Image>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Gallery {
    pub fn new(user_id: i32, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// Split the images round-robin into `n` columns for display.
    ///
    /// Returns no columns when `n` is 0.
    pub fn image_columns(&self, n: usize) -> Vec<Vec<Image>> {
        if n == 0 {
            return Vec::new();
        }
        let mut columns = vec![Vec::new(); n];
        for (i, image) in self.images.iter().enumerate() {
            columns[i % n].push(image.clone());
        }
        columns
    }
}

/// A stored image, identified only by its gallery and filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub gallery_id: i32,
    pub filename: String,
}

impl Image {
    pub fn new(gallery_id: i32, filename: impl Into<String>) -> Self {
        Self {
            gallery_id,
            filename: filename.into(),
        }
    }

    /// Path relative to the image root: `galleries/{id}/{filename}`.
    pub fn relative_path(&self) -> String {
        format!("{}/{}/{}", GALLERIES_DIR, self.gallery_id, self.filename)
    }

    /// URL under which the image is served, with the filename percent-encoded.
    pub fn url_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            IMAGES_URL_PREFIX,
            GALLERIES_DIR,
            self.gallery_id,
            urlencoding::encode(&self.filename)
        )
    }

    /// Reduce an uploaded filename to a safe single path component.
    ///
    /// Directory parts are dropped and spaces removed; names that end up
    /// empty or refer to a directory are rejected.
    pub fn sanitize_filename(raw: &str) -> Option<String> {
        let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
        let name: String = base.chars().filter(|c| *c != ' ').collect();
        match name.as_str() {
            "" | "." | ".." => None,
            _ => Some(name),
        }
    }
}

/// Image as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub filename: String,
    pub url: String,
}

impl From<&Image> for ImageResponse {
    fn from(image: &Image) -> Self {
        Self {
            filename: image.filename.clone(),
            url: image.url_path(),
        }
    }
}

/// Gallery as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub images: Vec<ImageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Gallery> for GalleryResponse {
    fn from(gallery: &Gallery) -> Self {
        Self {
            id: gallery.id,
            user_id: gallery.user_id,
            title: gallery.title.clone(),
            images: gallery.images.iter().map(ImageResponse::from).collect(),
            created_at: gallery.created_at,
            updated_at: gallery.updated_at,
        }
    }
}

impl From<Gallery> for GalleryResponse {
    fn from(gallery: Gallery) -> Self {
        Self::from(&gallery)
    }
}
