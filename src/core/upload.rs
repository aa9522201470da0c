//! Resume file validation and encoding
//!
//! A selection is checked for size first, then type, and only then read
//! from disk and base64-encoded.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;
use tokio::fs;

use crate::roast::UploadedFile;

/// 5 MiB
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types the model accepts as inline data
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
];

const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("File is too large (Max 5MB). Please compress it.")]
    FileTooLarge { size: u64 },

    #[error("Invalid file type. Please upload PDF or Images.")]
    UnsupportedType { mime_type: String },

    #[error("Failed to read file.")]
    ReadError(#[source] std::io::Error),
}

/// A file the user picked, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl SelectedFile {
    /// Describe a file on disk, taking its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).await.map_err(ValidationError::ReadError)?;

        if !metadata.is_file() {
            return Err(ValidationError::ReadError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            size: metadata.len(),
            mime_type: mime_type_for(path).to_string(),
        })
    }
}

/// MIME type for the extensions the picker accepts
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => UNKNOWN_MIME_TYPE,
    }
}

/// Check size and type without touching the file contents
pub fn check(file: &SelectedFile) -> Result<(), ValidationError> {
    if file.size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge { size: file.size });
    }

    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ValidationError::UnsupportedType {
            mime_type: file.mime_type.clone(),
        });
    }

    Ok(())
}

/// Validate a selection and read it into an upload payload
pub async fn validate(file: SelectedFile) -> Result<UploadedFile, ValidationError> {
    check(&file)?;

    let bytes = fs::read(&file.path).await.map_err(ValidationError::ReadError)?;

    // the file may have changed since it was selected
    let size = bytes.len() as u64;
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge { size });
    }

    tracing::debug!(name = %file.name, mime_type = %file.mime_type, size, "Resume file encoded");

    Ok(UploadedFile {
        name: file.name,
        base64: STANDARD.encode(&bytes),
        mime_type: file.mime_type,
        size,
    })
}
