pub use catalog::AssetCatalog;
pub use errors::{CatalogError, FetchError};
pub use parse::url::{
    ASSET_CATALOG_SCHEME, AssetReference, ResolvedImageUrl, resolve_image_url,
    resolve_image_url_str,
};
pub use provider::{
    CatalogImageDataProvider, FetchHandler, FetchResult, ImageDataProvider, ImageSource,
};

mod catalog;
pub mod errors;
mod parse;
mod provider;
