use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use actix_web::web::Bytes;
use chrono::Utc;
use futures_util::{Stream, StreamExt};
use uuid::Uuid;

use crate::error::ApiError;

/// Disk-backed store for uploaded images, rooted at the configured
/// upload directory.
#[derive(Clone)]
pub struct ImageStorage {
    upload_dir: PathBuf,
}

/// Outcome of a successful write: the generated name, where the bytes
/// landed, and how many were written.
#[derive(Debug)]
pub struct StoredImage {
    pub stored_name: String,
    pub path: PathBuf,
    pub size: i64,
}

impl ImageStorage {
    pub fn new(upload_dir: impl AsRef<Path>) -> Self {
        Self {
            upload_dir: upload_dir.as_ref().to_path_buf(),
        }
    }

    /// Streams a chunked upload to disk under a freshly generated storage
    /// name, enforcing `limit` as it goes.
    ///
    /// A stream error or an over-limit body removes the partial file before
    /// returning; the metadata insert only happens after this has returned,
    /// so every recorded file has its bytes flushed to disk.
    pub async fn save_stream<S, E>(
        &self,
        original_name: &str,
        mut stream: S,
        limit: u64,
    ) -> Result<StoredImage, ApiError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: Display,
    {
        self.ensure_upload_dir_exists()?;

        let stored_name = unique_name(original_name);
        let path = self.upload_dir.join(&stored_name);

        let mut file = std::fs::File::create(&path)?;
        let mut size: i64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(file);
                    let _ = std::fs::remove_file(&path);
                    return Err(ApiError::Multipart(e.to_string()));
                }
            };

            size += chunk.len() as i64;
            if size as u64 > limit {
                drop(file);
                let _ = std::fs::remove_file(&path);
                return Err(ApiError::FileTooLarge(limit));
            }

            file.write_all(&chunk)?;
        }

        file.sync_all()?;

        Ok(StoredImage {
            stored_name,
            path,
            size,
        })
    }

    /// Maps a storage name back to a path inside the upload directory.
    /// Rejects anything that could escape it.
    pub fn resolve(&self, stored_name: &str) -> Option<PathBuf> {
        if stored_name.is_empty() {
            return None;
        }

        let candidate = Path::new(stored_name);
        let mut components = candidate.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.upload_dir.join(candidate)),
            _ => None,
        }
    }

    pub fn ensure_upload_dir_exists(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)
    }
}

/// Generates a collision-resistant storage name: millisecond timestamp plus
/// a random hex suffix, preserving the original extension when present.
fn unique_name(original_name: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    let suffix = &random[..8];

    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{timestamp}-{suffix}.{ext}"),
        _ => format!("{timestamp}-{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<Bytes, Infallible>> + Unpin {
        stream::iter(
            parts
                .iter()
                .copied()
                .map(|p| Ok(Bytes::from_static(p)))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn unique_name_preserves_extension() {
        let name = unique_name("holiday photo.JPG");
        assert!(name.ends_with(".JPG"), "got {name}");
    }

    #[test]
    fn unique_name_without_extension_has_no_trailing_dot() {
        let name = unique_name("README");
        assert!(!name.contains('.'), "got {name}");
    }

    #[test]
    fn unique_names_do_not_collide() {
        let a = unique_name("cat.png");
        let b = unique_name("cat.png");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_rejects_traversal_and_separators() {
        let storage = ImageStorage::new("uploads");
        assert!(storage.resolve("../etc/passwd").is_none());
        assert!(storage.resolve("a/b.png").is_none());
        assert!(storage.resolve("..").is_none());
        assert!(storage.resolve("").is_none());
        assert!(storage.resolve("1749718800000-a1b2c3d4.png").is_some());
    }

    #[tokio::test]
    async fn save_stream_writes_all_chunks_and_counts_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());

        let stored = storage
            .save_stream("pic.png", chunks(&[b"hello ", b"world"]), 1024)
            .await
            .unwrap();

        assert_eq!(stored.size, 11);
        assert!(stored.stored_name.ends_with(".png"));
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn save_stream_over_limit_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());

        let err = storage
            .save_stream("big.png", chunks(&[b"0123456789", b"0123456789"]), 15)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::FileTooLarge(15)));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn concurrent_saves_produce_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());

        let (a, b) = tokio::join!(
            storage.save_stream("same.png", chunks(&[b"first"]), 1024),
            storage.save_stream("same.png", chunks(&[b"second"]), 1024),
        );

        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.stored_name, b.stored_name);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
