use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

/// The failure branch of a fetch result. Resolution problems never surface
/// here; they degrade to pass-through handling before a fetch exists.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Asset \"{name}\" was not found in the catalog.")]
    AssetNotFound { name: String },

    #[error("Asset \"{name}\" could not be encoded.\n{error}")]
    EncodeFailed { name: String, error: ImageError },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog entry at {path:?}.\n{error}")]
    ReadFailed { path: PathBuf, error: std::io::Error },

    #[error("Failed to decode catalog entry at {path:?}.\n{error}")]
    DecodeFailed { path: PathBuf, error: ImageError },
}
