//! File storage service
//!
//! A key→blob store over a configured upload directory. Stored names are
//! server-derived: the client file name is sanitized and prefixed with a
//! UUID so concurrent uploads of the same name never collide.

use crate::error::ApiError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// File storage over a single upload directory
#[derive(Debug, Clone)]
pub struct FileStorageService {
    upload_dir: PathBuf,
}

impl FileStorageService {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Create the upload directory. Called once at startup.
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .with_context(|| format!("Failed to create upload dir {:?}", self.upload_dir))?;
        info!(dir = ?self.upload_dir, "Upload directory ready");
        Ok(())
    }

    /// Store a blob under a server-derived name and return that name
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, ApiError> {
        let clean = sanitize_file_name(original_name)?;
        let stored_name = format!("{}_{}", Uuid::new_v4(), clean);

        tokio::fs::write(self.upload_dir.join(&stored_name), bytes)
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to store file: {}", e)))?;

        info!(file = %stored_name, size = bytes.len(), "Stored uploaded file");
        Ok(stored_name)
    }

    /// Load a previously stored blob by its stored name
    pub async fn load(&self, file_name: &str) -> Result<Vec<u8>, ApiError> {
        let clean = sanitize_file_name(file_name)?;

        match tokio::fs::read(self.upload_dir.join(&clean)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ApiError::NotFound(format!(
                "File not found: {}",
                file_name
            ))),
            Err(e) => Err(ApiError::Internal(anyhow::anyhow!(
                "Failed to read file: {}",
                e
            ))),
        }
    }

    /// Best-effort content type from the file extension
    pub fn content_type(file_name: &str) -> String {
        mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    }
}

/// Reject empty names and anything that could escape the upload directory.
fn sanitize_file_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("File name is required".to_string()));
    }
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ApiError::Validation(format!(
            "File name contains an invalid path sequence: {}",
            name
        )));
    }
    // Belt and braces: a sanitized name must stay a single path component.
    if Path::new(name).components().count() != 1 {
        return Err(ApiError::Validation(format!(
            "File name contains an invalid path sequence: {}",
            name
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert!(sanitize_file_name("../etc/passwd").is_err());
        assert!(sanitize_file_name("..\\secret").is_err());
        assert!(sanitize_file_name("a/b.txt").is_err());
        assert!(sanitize_file_name("").is_err());
        assert!(sanitize_file_name("   ").is_err());
    }

    #[test]
    fn test_sanitize_accepts_plain_names() {
        assert_eq!(sanitize_file_name("report.pdf").unwrap(), "report.pdf");
        assert_eq!(sanitize_file_name("no_extension").unwrap(), "no_extension");
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(FileStorageService::content_type("a.png"), "image/png");
        assert_eq!(FileStorageService::content_type("a.txt"), "text/plain");
        assert_eq!(
            FileStorageService::content_type("mystery.blob"),
            "application/octet-stream"
        );
        assert_eq!(
            FileStorageService::content_type("no_extension"),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_store_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = FileStorageService::new(dir.path());
        service.init().await.unwrap();

        let stored = service.store("hello.txt", b"hello world").await.unwrap();
        assert!(stored.ends_with("_hello.txt"));

        let bytes = service.load(&stored).await.unwrap();
        assert_eq!(bytes, b"hello world");
    }

    #[tokio::test]
    async fn test_stored_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let service = FileStorageService::new(dir.path());
        service.init().await.unwrap();

        let a = service.store("same.txt", b"a").await.unwrap();
        let b = service.store("same.txt", b"b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let service = FileStorageService::new(dir.path());
        service.init().await.unwrap();

        let err = service.load("absent.bin").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
