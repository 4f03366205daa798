use std::time::Duration;

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

/// Scheme marking a URL as a reference into the local asset catalog rather
/// than a network resource.
pub const ASSET_CATALOG_SCHEME: &str = "asset-catalog";

const DELAY_PARAM: &str = "delay";

/// A reference to a named catalog asset, plus an artificial delay to apply
/// before its bytes are delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReference {
    name: String,
    delay_seconds: f64,
}

impl AssetReference {
    /// Delays that cannot be represented as a `Duration` (negative,
    /// non-finite, or out of range) are treated as no delay.
    pub fn new(name: impl Into<String>, delay_seconds: f64) -> Self {
        let delay_seconds = if Duration::try_from_secs_f64(delay_seconds).is_ok() {
            delay_seconds
        } else {
            0.0
        };

        Self {
            name: name.into(),
            delay_seconds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_seconds)
    }

    /// The string the external image loader caches this reference under.
    /// Equal (name, delay) pairs always produce identical keys.
    pub fn cache_key(&self) -> String {
        format!(
            "{ASSET_CATALOG_SCHEME}://{}?{DELAY_PARAM}={:?}",
            self.name, self.delay_seconds
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedImageUrl {
    /// The URL used the asset catalog scheme and named an asset.
    Catalog(AssetReference),

    /// The URL should be handed unchanged to the loader's default
    /// (network-backed) path.
    PassThrough(Url),
}

/// Classifies a URL as either a catalog reference or a pass-through.
///
/// Anything that fails to parse as a catalog reference, including a matching
/// scheme with no host segment, degrades silently to pass-through. Only the
/// reserved scheme ever has its host and query inspected.
pub fn resolve_image_url(url: &Url) -> ResolvedImageUrl {
    if url.scheme() != ASSET_CATALOG_SCHEME {
        return ResolvedImageUrl::PassThrough(url.clone());
    }

    let name = match url.host_str() {
        Some(host) if !host.is_empty() => match percent_decode_str(host).decode_utf8() {
            Ok(name) => name.into_owned(),
            Err(e) => {
                debug!("Asset name in \"{url}\" is not valid UTF-8, passing through: {e}");
                return ResolvedImageUrl::PassThrough(url.clone());
            }
        },
        _ => {
            debug!("No asset name found in \"{url}\", passing through.");
            return ResolvedImageUrl::PassThrough(url.clone());
        }
    };

    ResolvedImageUrl::Catalog(AssetReference::new(name, parse_delay(url)))
}

/// Convenience for callers holding a raw string. Returns `None` when the
/// string is not a URL at all, so the caller can fall back to whatever its
/// default handling of the original string is.
pub fn resolve_image_url_str(url_str: &str) -> Option<ResolvedImageUrl> {
    match Url::parse(url_str) {
        Ok(url) => Some(resolve_image_url(&url)),
        Err(e) => {
            debug!("Failed to parse url \"{url_str}\": {e}");
            None
        }
    }
}

fn parse_delay(url: &Url) -> f64 {
    let Some((_, value)) = url.query_pairs().find(|(name, _)| name == DELAY_PARAM) else {
        return 0.0;
    };

    match value.parse::<f64>() {
        Ok(delay) if Duration::try_from_secs_f64(delay).is_ok() => delay,
        _ => {
            debug!("Ignoring malformed {DELAY_PARAM} value \"{value}\" in \"{url}\".");
            0.0
        }
    }
}
