use std::str::FromStr;
use thiserror::Error;

/// The given extension is not an image format we label
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} is not a supported image file type")]
pub struct UnsupportedFileType(String);

/// The image formats that are sent to label detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFileType {
    Jpg,
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
}

impl ImageFileType {
    /// return the file extension as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFileType::Jpg => "jpg",
            ImageFileType::Jpeg => "jpeg",
            ImageFileType::Png => "png",
            ImageFileType::Gif => "gif",
            ImageFileType::Bmp => "bmp",
            ImageFileType::Webp => "webp",
        }
    }

    /// return all possible values as a slice
    pub fn all() -> &'static [ImageFileType] {
        &[
            ImageFileType::Jpg,
            ImageFileType::Jpeg,
            ImageFileType::Png,
            ImageFileType::Gif,
            ImageFileType::Bmp,
            ImageFileType::Webp,
        ]
    }

    /// Returns the image type named by the extension of an object key, if any.
    /// Matching is case insensitive, so `IMG.JPG` is a [ImageFileType::Jpg].
    pub fn from_key(key: &str) -> Option<Self> {
        let (_, extension) = key.rsplit_once('.')?;
        extension.parse().ok()
    }
}

impl FromStr for ImageFileType {
    type Err = UnsupportedFileType;

    fn from_str(file_type: &str) -> Result<Self, Self::Err> {
        let lowercase = file_type.trim_start_matches('.').to_ascii_lowercase();

        ImageFileType::all()
            .iter()
            .find(|t| t.as_str() == lowercase)
            .copied()
            .ok_or(UnsupportedFileType(lowercase))
    }
}

impl std::fmt::Display for ImageFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
