use std::sync::Arc;
use std::time::{Duration, Instant};

use asset_catalog::{AssetCatalog, ImageSource};
use image::{DynamicImage, RgbaImage};
use url::Url;

fn catalog() -> Arc<AssetCatalog> {
    let logo = DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 16, |x, y| {
        image::Rgba([x as u8 * 15, y as u8 * 15, 200, 255])
    }));

    let mut catalog = AssetCatalog::new();
    catalog.insert("locallogo.jpg", logo);
    Arc::new(catalog)
}

#[test_log::test(tokio::test)]
async fn it_should_fetch_a_delayed_catalog_asset_end_to_end() {
    let catalog = catalog();
    let url = Url::parse("asset-catalog://locallogo.jpg?delay=0.25").unwrap();

    let Some(ImageSource::Provider(provider)) = ImageSource::resolve(Some(url), &catalog) else {
        panic!("expected a provider source");
    };

    assert_eq!(
        provider.cache_key(),
        "asset-catalog://locallogo.jpg?delay=0.25"
    );

    let (tx, rx) = tokio::sync::oneshot::channel();
    let started = Instant::now();
    provider.data(Box::new(move |result| {
        let _ = tx.send(result);
    }));

    let bytes = tokio::time::timeout(Duration::from_secs(5), rx)
        .await
        .expect("handler should be invoked")
        .expect("result should be delivered")
        .expect("fetch should succeed");

    assert!(started.elapsed() >= Duration::from_millis(250));
    assert!(!bytes.is_empty());
    image::load_from_memory(&bytes).expect("bytes should decode as an image");
}

#[test_log::test(tokio::test)]
async fn it_should_pass_remote_urls_through_to_the_network_path() {
    let catalog = catalog();
    let url = Url::parse("https://example.com/x.png").unwrap();

    let Some(ImageSource::Network(resolved)) = ImageSource::resolve(Some(url.clone()), &catalog)
    else {
        panic!("expected a network source");
    };

    assert_eq!(resolved, url);
}
