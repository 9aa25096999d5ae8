use actix_web::web::Bytes;
use object_store::{
    path::Path as ObjectPath, Attribute, Attributes, ObjectStore, PutOptions, PutPayload,
};
use std::sync::Arc;
use thiserror::Error;

use crate::models::RecipeKind;

/// Upper bound for an uploaded image.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const DEFAULT_FILENAME: &str = "imagen";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage setup failed: {0}")]
    Setup(String),

    #[error("object storage error: {0}")]
    Backend(#[from] object_store::Error),
}

/// An image received in a multipart form, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Recipe images in the bucket, laid out as `recetas/{type}/{userId}/{filename}`.
#[derive(Clone)]
pub struct ImageStore {
    store: Arc<dyn ObjectStore>,
    public_url: String,
}

impl ImageStore {
    pub fn new(store: Arc<dyn ObjectStore>, public_url: impl Into<String>) -> Self {
        Self {
            store,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Google Cloud Storage bucket authenticated with a service-account file.
    pub fn google_cloud(
        bucket: &str,
        credentials_path: &str,
        public_url: &str,
    ) -> Result<Self, StorageError> {
        let store = object_store::gcp::GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket)
            .with_service_account_path(credentials_path)
            .build()
            .map_err(|e| StorageError::Setup(format!("Failed to create GCS store: {}", e)))?;

        Ok(Self::new(Arc::new(store), public_url))
    }

    pub fn object_path(kind: RecipeKind, user_id: &str, filename: &str) -> ObjectPath {
        ObjectPath::from(format!(
            "recetas/{}/{}/{}",
            kind,
            user_id,
            sanitize_filename(filename)
        ))
    }

    pub fn public_url(&self, path: &ObjectPath) -> String {
        format!("{}/{}", self.public_url, path)
    }

    /// Writes the image and returns the URL it is served from.
    pub async fn upload(
        &self,
        image: &UploadedImage,
        kind: RecipeKind,
        user_id: &str,
    ) -> Result<String, StorageError> {
        let path = Self::object_path(kind, user_id, &image.filename);

        let mut attributes = Attributes::new();
        if let Some(content_type) = &image.content_type {
            attributes.insert(Attribute::ContentType, content_type.clone().into());
        }

        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&path, PutPayload::from(image.data.clone()), options)
            .await?;

        log::info!("🖼️  Uploaded image {} ({} bytes)", path, image.data.len());
        Ok(self.public_url(&path))
    }
}

/// Keeps only the final path segment of a client-supplied filename.
fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return DEFAULT_FILENAME.to_string();
    }

    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn image(filename: &str) -> UploadedImage {
        UploadedImage {
            filename: filename.to_string(),
            content_type: Some("image/png".to_string()),
            data: Bytes::from_static(b"\x89PNG fake"),
        }
    }

    #[test]
    fn test_object_path_layout() {
        let path = ImageStore::object_path(RecipeKind::Vegetariana, "user1", "foto.png");
        assert_eq!(path.as_ref(), "recetas/vegetariana/user1/foto.png");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("foto.png"), "foto.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\fotos\\mi plato.jpg"), "mi_plato.jpg");
        assert_eq!(sanitize_filename(""), "imagen");
        assert_eq!(sanitize_filename("dir/"), "imagen");
        assert_eq!(sanitize_filename(".."), "imagen");
    }

    #[actix_web::test]
    async fn test_upload_stores_bytes_and_returns_url() {
        let memory = Arc::new(InMemory::new());
        let images = ImageStore::new(memory.clone(), "https://cdn.example.com/bucket/");

        let url = images
            .upload(&image("tarta.png"), RecipeKind::Novegetariana, "u42")
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.example.com/bucket/recetas/novegetariana/u42/tarta.png"
        );

        let stored = memory
            .get(&ObjectPath::from("recetas/novegetariana/u42/tarta.png"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(&stored[..], b"\x89PNG fake");
    }
}
