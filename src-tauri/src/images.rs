//! Image Store
//!
//! Admin uploads arrive as base64 data URLs. They are written under the app
//! data directory, named by content hash, and served back through the `asset`
//! URI scheme.

use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const IMAGES_DIR: &str = "images";

/// Everything but unreserved characters and the path separator
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[cfg(windows)]
const ASSET_PREFIX: &str = "http://asset.localhost/";
#[cfg(not(windows))]
const ASSET_PREFIX: &str = "asset://localhost/";

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("not an image data URL")]
    InvalidDataUrl,
    #[error("image data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("image store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A served file
#[derive(Debug, PartialEq)]
pub struct Asset {
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ImageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode `data:image/<type>;base64,<payload>` and store it.
    /// Returns the asset URL the webview can load.
    pub fn save_data_url(&self, data: &str) -> Result<String, ImageError> {
        let (header, payload) = data
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or(ImageError::InvalidDataUrl)?;
        let mime = header.strip_suffix(";base64").ok_or(ImageError::InvalidDataUrl)?;
        if !mime.starts_with("image/") {
            return Err(ImageError::InvalidDataUrl);
        }

        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        let subtype = &mime["image/".len()..];
        let extension = mime_guess::get_mime_extensions_str(mime)
            .and_then(|exts| exts.iter().find(|ext| **ext == subtype).or(exts.first()))
            .copied()
            .unwrap_or("png");

        let hash = blake3::hash(&bytes);
        let path = self.dir.join(format!("{}.{}", &hash.to_hex()[..32], extension));
        if !path.exists() {
            std::fs::write(&path, &bytes)?;
            log::info!("Stored image {} ({} bytes)", path.display(), bytes.len());
        }

        Ok(self.asset_url(&path))
    }

    pub fn asset_url(&self, path: &Path) -> String {
        let path = path.to_string_lossy().replace('\\', "/");
        let path = path.trim_start_matches('/');
        format!("{}{}", ASSET_PREFIX, utf8_percent_encode(path, PATH_SEGMENT))
    }

    /// Map an image reference back to a stored file, if it is one of ours
    pub fn resolve(&self, image: &str) -> Option<PathBuf> {
        let encoded = image.strip_prefix(ASSET_PREFIX)?;
        self.resolve_uri_path(encoded)
    }

    /// Resolve the path component of an `asset` request
    fn resolve_uri_path(&self, uri_path: &str) -> Option<PathBuf> {
        let decoded = percent_decode_str(uri_path).decode_utf8_lossy().to_string();
        let decoded = decoded.trim_start_matches('/');

        // Windows drive paths keep their letter, others are absolute from root
        let path = if decoded.chars().nth(1) == Some(':') {
            PathBuf::from(decoded)
        } else {
            PathBuf::from(format!("/{}", decoded))
        };

        path.file_name()?;
        (path.parent() == Some(self.dir.as_path())).then_some(path)
    }

    /// Delete a stored image. External URLs and unknown files are ignored.
    pub fn remove(&self, image: &str) -> Result<bool, ImageError> {
        let Some(path) = self.resolve(image) else {
            return Ok(false);
        };
        match std::fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Removed image {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Serve an `asset` request; only files inside the store are readable
    pub fn serve(&self, uri_path: &str) -> Option<Asset> {
        let path = self.resolve_uri_path(uri_path)?;
        let bytes = std::fs::read(&path).ok()?;
        let mime = mime_guess::from_path(&path).first_or_octet_stream().to_string();
        Some(Asset { mime, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::open(dir.path().join(IMAGES_DIR)).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_and_serve() {
        let (_dir, store) = store();
        let url = store.save_data_url(&format!("data:image/png;base64,{}", PIXEL)).unwrap();
        assert!(url.starts_with(ASSET_PREFIX));
        assert!(url.ends_with(".png"));

        let path = store.resolve(&url).expect("url maps back to the store");
        assert!(path.exists());

        let encoded = url.strip_prefix(ASSET_PREFIX).unwrap();
        let asset = store.serve(&format!("/{}", encoded)).unwrap();
        assert_eq!(asset.mime, "image/png");
        assert!(!asset.bytes.is_empty());
    }

    #[test]
    fn test_same_content_same_file() {
        let (_dir, store) = store();
        let data = format!("data:image/png;base64,{}", PIXEL);
        assert_eq!(store.save_data_url(&data).unwrap(), store.save_data_url(&data).unwrap());
        assert_eq!(std::fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_rejects_non_image_data() {
        let (_dir, store) = store();
        assert!(matches!(store.save_data_url("hello"), Err(ImageError::InvalidDataUrl)));
        assert!(matches!(
            store.save_data_url("data:text/plain;base64,aGk="),
            Err(ImageError::InvalidDataUrl)
        ));
        assert!(matches!(
            store.save_data_url("data:image/png;base64,@@@"),
            Err(ImageError::Decode(_))
        ));
    }

    #[test]
    fn test_remove_only_touches_store() {
        let (_dir, store) = store();
        let url = store.save_data_url(&format!("data:image/png;base64,{}", PIXEL)).unwrap();

        assert!(!store.remove("https://example.com/bottle.png").unwrap());
        assert!(store.remove(&url).unwrap());
        assert!(!store.remove(&url).unwrap());
        assert!(store.resolve(&url).map(|p| !p.exists()).unwrap_or(false));
    }

    #[test]
    fn test_serve_refuses_outside_files() {
        let (dir, store) = store();
        let outside = dir.path().join("secret.txt");
        std::fs::write(&outside, "nope").unwrap();

        let url = store.asset_url(&outside);
        let encoded = url.strip_prefix(ASSET_PREFIX).unwrap();
        assert!(store.serve(encoded).is_none());
    }
}
