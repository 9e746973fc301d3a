use partsdb::{
    Error, ErrorKind, ErrorOrigin,
    core::{
        traits::{SanitizeAuto, SanitizeCustom, ValidateAuto, ValidateCustom, Visitable},
        types::Ulid,
    },
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ImageError
///

#[derive(Debug, ThisError)]
pub enum ImageError {
    #[error("image io error: {0}")]
    Io(String),

    #[error("image not found: {0}")]
    NotFound(String),
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Self::new(ErrorKind::Storage, ErrorOrigin::Image, err.to_string())
    }
}

///
/// ImageName
///
/// Generated filename of a staged image, relative to the store root.
/// Owned exclusively by one Item.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(transparent)]
pub struct ImageName(String);

impl ImageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Visitable for ImageName {}
impl SanitizeAuto for ImageName {}
impl SanitizeCustom for ImageName {}
impl ValidateAuto for ImageName {}
impl ValidateCustom for ImageName {}

///
/// ImageUpload
///
/// An uploaded file as received from the request: the client's original
/// name (used only to recover the extension) and the raw bytes.
///

#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes,
        }
    }
}

///
/// ImageStore
///
/// Durable storage for item images. Staging happens before record
/// validation; deletes are best-effort cleanup.
///

pub trait ImageStore {
    /// Persist the upload under a collision-resistant generated name.
    fn stage(&self, upload: &ImageUpload) -> Result<ImageName, ImageError>;

    /// Remove a stored image.
    fn delete(&self, name: &ImageName) -> Result<(), ImageError>;

    /// True when the named image is present.
    fn exists(&self, name: &ImageName) -> bool;
}

///
/// DirImageStore
///
/// Filesystem-backed image store rooted at one directory.
///

#[derive(Clone, Debug)]
pub struct DirImageStore {
    root: PathBuf,
}

impl DirImageStore {
    /// Open (and create if missing) the store root.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ImageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| ImageError::Io(e.to_string()))?;

        Ok(Self { root })
    }

    #[must_use]
    pub fn path_of(&self, name: &ImageName) -> PathBuf {
        self.root.join(name.as_str())
    }

    // ULID plus the sanitized original extension. The client-supplied
    // name never reaches the filesystem.
    fn generated_name(original_name: &str) -> ImageName {
        let stem = Ulid::generate().to_string();

        let ext: String = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ext.chars()
                    .filter(char::is_ascii_alphanumeric)
                    .collect::<String>()
                    .to_ascii_lowercase()
            })
            .unwrap_or_default();

        if ext.is_empty() {
            ImageName(stem)
        } else {
            ImageName(format!("{stem}.{ext}"))
        }
    }
}

impl ImageStore for DirImageStore {
    fn stage(&self, upload: &ImageUpload) -> Result<ImageName, ImageError> {
        let name = Self::generated_name(&upload.original_name);

        fs::write(self.path_of(&name), &upload.bytes).map_err(|e| ImageError::Io(e.to_string()))?;

        Ok(name)
    }

    fn delete(&self, name: &ImageName) -> Result<(), ImageError> {
        match fs::remove_file(self.path_of(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ImageError::NotFound(name.to_string()))
            }
            Err(e) => Err(ImageError::Io(e.to_string())),
        }
    }

    fn exists(&self, name: &ImageName) -> bool {
        self.path_of(name).exists()
    }
}

///
/// TESTS
///
