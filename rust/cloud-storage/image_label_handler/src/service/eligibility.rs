use models_image::ImageFileType;

/// Whether the object is an image we run label detection on
pub fn is_eligible(key: &str) -> bool {
    ImageFileType::from_key(key).is_some()
}
