mod catalog_provider;

use std::sync::Arc;

use tracing::debug;
use url::Url;

pub use catalog_provider::CatalogImageDataProvider;

use crate::catalog::AssetCatalog;
use crate::errors::FetchError;
use crate::parse::url::{ResolvedImageUrl, resolve_image_url};

pub type FetchResult = Result<Vec<u8>, FetchError>;

/// Single-use result callback. `FnOnce` makes exactly-once delivery
/// structural: the fetcher cannot call it twice.
pub type FetchHandler = Box<dyn FnOnce(FetchResult) + Send + 'static>;

/// The capability an external image-rendering component consumes in place of
/// a network fetch: a stable cache key plus a one-shot byte fetch.
pub trait ImageDataProvider: Send + Sync {
    fn cache_key(&self) -> String;

    /// Starts the fetch without blocking the caller and invokes `handler`
    /// with the outcome exactly once. Must be called within a tokio runtime.
    fn data(&self, handler: FetchHandler);
}

/// What the image loader should be given for a URL: either the URL itself
/// for its default network path, or a registered data provider.
pub enum ImageSource {
    Network(Url),
    Provider(Arc<dyn ImageDataProvider>),
}

impl ImageSource {
    /// Resolves an optional URL against the catalog. `None` in, `None` out;
    /// the loader decides what an absent URL means (typically a placeholder).
    pub fn resolve(url: Option<Url>, catalog: &Arc<AssetCatalog>) -> Option<ImageSource> {
        let url = url?;

        match resolve_image_url(&url) {
            ResolvedImageUrl::Catalog(reference) => {
                debug!("Resolved \"{url}\" to catalog asset \"{}\"", reference.name());
                Some(ImageSource::Provider(Arc::new(
                    CatalogImageDataProvider::new(Arc::clone(catalog), reference),
                )))
            }
            ResolvedImageUrl::PassThrough(url) => Some(ImageSource::Network(url)),
        }
    }
}
