use std::collections::HashMap;
use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::errors::CatalogError;

/// A named, read-only collection of decoded images, standing in for a
/// platform asset bundle. Lookups never mutate it, so concurrent fetches can
/// share one catalog behind an `Arc` with no coordination.
#[derive(Default)]
pub struct AssetCatalog {
    images: HashMap<String, DynamicImage>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: DynamicImage) {
        self.images.insert(name.into(), image);
    }

    pub fn named(&self, name: &str) -> Option<&DynamicImage> {
        self.images.get(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Builds a catalog from every regular file in a directory, keyed by file
    /// name. A file that cannot be read or decoded fails construction.
    pub async fn from_dir(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let mut images = HashMap::new();

        let mut entries = tokio::fs::read_dir(path)
            .await
            .map_err(|e| read_failed(path, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| read_failed(path, e))?
        {
            let entry_path = entry.path();

            let file_type = entry
                .file_type()
                .await
                .map_err(|e| read_failed(&entry_path, e))?;
            if !file_type.is_file() {
                continue;
            }

            let bytes = tokio::fs::read(&entry_path)
                .await
                .map_err(|e| read_failed(&entry_path, e))?;

            let image =
                image::load_from_memory(&bytes).map_err(|e| CatalogError::DecodeFailed {
                    path: entry_path.clone(),
                    error: e,
                })?;

            let name = entry.file_name().to_string_lossy().into_owned();
            debug!("Loaded catalog asset \"{name}\" from {entry_path:?}");
            images.insert(name, image);
        }

        Ok(Self { images })
    }
}

fn read_failed(path: &Path, error: std::io::Error) -> CatalogError {
    CatalogError::ReadFailed {
        path: path.to_path_buf(),
        error,
    }
}

#[cfg(test)]
mod test {
    use image::RgbaImage;

    use super::*;

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(4, 4, |x, y| {
            image::Rgba([x as u8 * 60, y as u8 * 60, 0, 255])
        }))
    }

    #[test]
    fn it_should_look_up_inserted_assets_by_name() {
        let mut catalog = AssetCatalog::new();
        catalog.insert("locallogo.jpg", sample_image());

        assert!(catalog.named("locallogo.jpg").is_some());
        assert!(catalog.named("missing.jpg").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn it_should_load_a_catalog_from_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        sample_image().save(dir.path().join("locallogo.png")).unwrap();
        sample_image().save(dir.path().join("otherlogo.png")).unwrap();

        let catalog = AssetCatalog::from_dir(dir.path()).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.named("locallogo.png").is_some());
        assert!(catalog.named("otherlogo.png").is_some());
    }

    #[tokio::test]
    async fn it_should_fail_for_undecodable_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();

        let result = AssetCatalog::from_dir(dir.path()).await;

        assert!(matches!(result, Err(CatalogError::DecodeFailed { .. })));
    }

    #[tokio::test]
    async fn it_should_fail_for_a_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = AssetCatalog::from_dir(&missing).await;

        assert!(matches!(result, Err(CatalogError::ReadFailed { .. })));
    }
}
