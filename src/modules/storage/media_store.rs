use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::core::config::MediaConfig;

/// Subdirectory under the media root that ad images land in
const IMAGES_DIR: &str = "images";

/// Local filesystem store for uploaded ad images.
///
/// Stored files get a UUID-prefixed name so repeated uploads of the same
/// filename never clobber each other. The returned value is the URL path the
/// file is served under (the media root is mounted as static files).
pub struct MediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStore {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            root: PathBuf::from(config.root),
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the media directory tree if it does not exist yet.
    pub async fn ensure_root_exists(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(self.root.join(IMAGES_DIR)).await
    }

    /// Persist an image payload and return its URL path.
    pub async fn save_image(&self, file_name: &str, data: &[u8]) -> std::io::Result<String> {
        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(file_name));
        let path = self.root.join(IMAGES_DIR).join(&stored_name);

        tokio::fs::create_dir_all(self.root.join(IMAGES_DIR)).await?;
        tokio::fs::write(&path, data).await?;

        tracing::debug!("Stored image {} ({} bytes)", path.display(), data.len());

        Ok(format!("{}/{}/{}", self.url_prefix, IMAGES_DIR, stored_name))
    }
}

/// Strip any path components from a client-supplied filename.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();

    if base.is_empty() {
        "unnamed".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> MediaStore {
        let root = std::env::temp_dir().join(format!("adboard-media-{}", Uuid::new_v4()));
        MediaStore::new(MediaConfig {
            root: root.to_string_lossy().into_owned(),
            url_prefix: "/media".to_string(),
        })
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("c:\\temp\\shot.jpg"), "shot.jpg");
        assert_eq!(sanitize_file_name(""), "unnamed");
    }

    #[tokio::test]
    async fn save_image_writes_file_and_returns_url() {
        let store = temp_store();
        let url = store.save_image("bike.png", b"fake image bytes").await.unwrap();

        assert!(url.starts_with("/media/images/"));
        assert!(url.ends_with("_bike.png"));

        let stored_name = url.rsplit('/').next().unwrap();
        let on_disk = store.root().join("images").join(stored_name);
        let contents = tokio::fs::read(&on_disk).await.unwrap();
        assert_eq!(contents, b"fake image bytes");

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn repeated_uploads_do_not_collide() {
        let store = temp_store();
        let first = store.save_image("same.png", b"one").await.unwrap();
        let second = store.save_image("same.png", b"two").await.unwrap();
        assert_ne!(first, second);

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }
}
