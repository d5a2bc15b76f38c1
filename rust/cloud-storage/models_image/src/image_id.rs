use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The object key does not contain a usable image id
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unable to derive an image id from key {0:?}")]
pub struct InvalidImageKey(pub String);

/// The partition key of an image metadata record.
///
/// Uploads are stored as `images/<image_id>.<ext>`, so the id is the file name of the
/// object key up to its first `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn from_object_key(key: &str) -> Result<Self, InvalidImageKey> {
        let file_name = key.rsplit('/').next().unwrap_or(key);
        let id = file_name.split('.').next().unwrap_or(file_name);

        if id.is_empty() {
            return Err(InvalidImageKey(key.to_string()));
        }

        Ok(Self(id.to_string()))
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
