use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::state::data::Item;

/// Size of cached thumbnails (longest edge)
const THUMBNAIL_SIZE: u32 = 256;

/// Get the thumbnail cache directory for an album
/// Returns ~/.cache/video-studio/thumbnails/{album} on Linux
pub fn cache_dir(album_code: &str) -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(|| dirs_next::home_dir())
        .unwrap_or_else(|| PathBuf::from("."));

    path.push("video-studio");
    path.push("thumbnails");
    path.push(safe_file_stem(album_code));
    path
}

/// Where an item's thumbnail lives once cached
pub fn cached_path(album_code: &str, id: &str) -> PathBuf {
    cache_dir(album_code).join(format!("{}.jpg", safe_file_stem(id)))
}

/// Album keys are opaque; keep only filesystem-safe characters
fn safe_file_stem(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Fetch an item's image, downscale it and hand it to the UI
///
/// A cached thumbnail skips the network. Any failure degrades to `None`
/// and the grid shows a placeholder; a missing image never takes the
/// screen down.
pub async fn load_thumbnail(http: reqwest::Client, album_code: String, item: Item) -> Option<Handle> {
    let path = cached_path(&album_code, &item.id);
    if path.exists() {
        return Some(Handle::from_path(path));
    }

    let bytes = match fetch_bytes(&http, &item.url).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(id = %item.id, %err, "image fetch failed");
            return None;
        }
    };

    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(id = %item.id, %err, "image decode failed");
            return None;
        }
    };

    let thumbnail = decoded
        .resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    // Cache for the next visit; a full or read-only cache is not fatal
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_ok() {
            let flattened = image::DynamicImage::ImageRgba8(thumbnail.clone()).to_rgb8();
            if let Err(err) = flattened.save(&path) {
                warn!(id = %item.id, %err, "thumbnail cache write failed");
            }
        }
    }

    let (width, height) = thumbnail.dimensions();
    Some(Handle::from_rgba(width, height, thumbnail.into_raw()))
}

async fn fetch_bytes(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let bytes = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn item(id: &str, url: String) -> Item {
        Item {
            id: id.to_string(),
            url,
            title: format!("Image {id}"),
            index: 1,
        }
    }

    #[test]
    fn test_safe_file_stem_keeps_opaque_keys_on_disk() {
        assert_eq!(safe_file_stem("282853GMQB"), "282853GMQB");
        assert_eq!(safe_file_stem("a/b..c"), "a_b__c");
    }

    #[test]
    fn test_cached_path_is_per_album() {
        let a = cached_path("ALBUM-A", "12");
        let b = cached_path("ALBUM-B", "12");
        assert_ne!(a, b);
        assert!(a.ends_with("ALBUM-A/12.jpg"));
    }

    #[tokio::test]
    async fn test_load_thumbnail_decodes_served_image() {
        let mut png = Vec::new();
        let pixels = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 10, 10]));
        image::DynamicImage::ImageRgb8(pixels)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/img.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(png)
            .create_async()
            .await;

        let handle = load_thumbnail(
            reqwest::Client::new(),
            "THUMBTEST".to_string(),
            item("probe", format!("{}/img.png", server.url())),
        )
        .await;

        assert!(handle.is_some());
    }

    #[tokio::test]
    async fn test_load_thumbnail_degrades_on_missing_image() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone.jpg")
            .with_status(404)
            .create_async()
            .await;

        let handle = load_thumbnail(
            reqwest::Client::new(),
            "THUMBTEST".to_string(),
            item("gone", format!("{}/gone.jpg", server.url())),
        )
        .await;

        assert!(handle.is_none());
    }
}
