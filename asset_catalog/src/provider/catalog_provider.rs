use std::io::Cursor;
use std::sync::Arc;

use image::ImageFormat;
use tracing::debug;

use crate::catalog::AssetCatalog;
use crate::errors::FetchError;
use crate::parse::url::AssetReference;

use super::{FetchHandler, FetchResult, ImageDataProvider};

/// Supplies the PNG-encoded bytes of a named catalog asset, after an
/// optional artificial delay.
pub struct CatalogImageDataProvider {
    catalog: Arc<AssetCatalog>,
    reference: AssetReference,
}

impl CatalogImageDataProvider {
    pub fn new(catalog: Arc<AssetCatalog>, reference: AssetReference) -> Self {
        Self { catalog, reference }
    }

    /// Waits out the delay, then looks up and encodes the asset. The result
    /// is never produced before the requested delay has elapsed.
    pub async fn fetch(&self) -> FetchResult {
        fetch_with_delay(Arc::clone(&self.catalog), self.reference.clone()).await
    }
}

impl ImageDataProvider for CatalogImageDataProvider {
    fn cache_key(&self) -> String {
        self.reference.cache_key()
    }

    fn data(&self, handler: FetchHandler) {
        let catalog = Arc::clone(&self.catalog);
        let reference = self.reference.clone();

        // The task outlives the provider, so a consumer torn down mid-delay
        // still gets its handler invoked; the handler owns the problem of
        // discarding a late result.
        tokio::spawn(async move {
            handler(fetch_with_delay(catalog, reference).await);
        });
    }
}

async fn fetch_with_delay(catalog: Arc<AssetCatalog>, reference: AssetReference) -> FetchResult {
    let delay = reference.delay();
    if !delay.is_zero() {
        debug!("Delaying fetch of \"{}\" by {delay:?}", reference.name());
        tokio::time::sleep(delay).await;
    }

    encode_asset(&catalog, reference.name())
}

fn encode_asset(catalog: &AssetCatalog, name: &str) -> FetchResult {
    let image = catalog.named(name).ok_or_else(|| FetchError::AssetNotFound {
        name: name.to_string(),
    })?;

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| FetchError::EncodeFailed {
            name: name.to_string(),
            error: e,
        })?;

    Ok(buffer.into_inner())
}
