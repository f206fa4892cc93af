//! Image storage on the local filesystem.
//!
//! Images have no rows of their own: a gallery's images are whatever files
//! live under `{root}/galleries/{gallery_id}/`.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWriteExt};

use common::{AppError, AppResult};
use domain::{Image, ModelError, GALLERIES_DIR};

/// Image storage consumed by the gallery handlers.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stream `reader` into a file named after the sanitized `filename`.
    ///
    /// A reader failing with `InvalidData` is reported as a bad request and
    /// the partial file is removed.
    async fn create(
        &self,
        gallery_id: i32,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        filename: &str,
    ) -> AppResult<Image>;

    /// All images of a gallery, sorted by filename. Empty when none exist.
    async fn by_gallery_id(&self, gallery_id: i32) -> AppResult<Vec<Image>>;

    /// Remove one image; NotFound when the file does not exist.
    async fn delete(&self, image: &Image) -> AppResult<()>;
}

/// Filesystem-backed image store
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn gallery_dir(&self, gallery_id: i32) -> PathBuf {
        self.root.join(GALLERIES_DIR).join(gallery_id.to_string())
    }

    fn image_path(&self, image: &Image) -> AppResult<PathBuf> {
        let filename = Image::sanitize_filename(&image.filename)
            .filter(|name| *name == image.filename)
            .ok_or_else(|| AppError::bad_request("Invalid image filename"))?;
        Ok(self.gallery_dir(image.gallery_id).join(filename))
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn create(
        &self,
        gallery_id: i32,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        filename: &str,
    ) -> AppResult<Image> {
        let filename = Image::sanitize_filename(filename)
            .ok_or_else(|| AppError::bad_request("Invalid image filename"))?;

        let dir = self.gallery_dir(gallery_id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(&filename);
        let mut file = tokio::fs::File::create(&path).await?;
        let written = match tokio::io::copy(reader, &mut file).await {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(
                        path = %path.display(),
                        "Could not remove partial upload: {}",
                        cleanup
                    );
                }
                // InvalidData marks a failed upload stream rather than a disk fault
                if e.kind() == ErrorKind::InvalidData {
                    return Err(AppError::BadRequest(format!("Upload could not be read: {e}")));
                }
                return Err(e.into());
            }
        };
        file.flush().await?;

        tracing::debug!(gallery_id, filename = %filename, bytes = written, "Stored image");
        Ok(Image::new(gallery_id, filename))
    }

    async fn by_gallery_id(&self, gallery_id: i32) -> AppResult<Vec<Image>> {
        let mut entries = match tokio::fs::read_dir(self.gallery_dir(gallery_id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut images = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                images.push(Image::new(gallery_id, name));
            }
        }
        images.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(images)
    }

    async fn delete(&self, image: &Image) -> AppResult<()> {
        match tokio::fs::remove_file(self.image_path(image)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ModelError::NotFound.into()),
            Err(e) => Err(e.into()),
        }
    }
}
