use models_image::InvalidImageKey;
use thiserror::Error;

/// A message of the batch could not be unwrapped into storage events
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("sqs message {index} has no body")]
    MissingBody { index: usize },
    #[error("sqs message {index} is not an sns notification: {source}")]
    Envelope {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("sns message in sqs message {index} is not an s3 event: {source}")]
    StorageEvent {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Label detection failed. Never fails a batch, the image is stored without labels instead
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("rekognition request failed: {0}")]
    Rekognition(#[from] aws_sdk_rekognition::Error),
}

/// The metadata record of an image could not be updated
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    InvalidKey(#[from] InvalidImageKey),
    /// The update is conditional on the record created at upload time
    #[error("no metadata record exists for image {image_id}")]
    RecordNotFound { image_id: String },
    #[error("dynamodb update failed: {0}")]
    Store(#[from] aws_sdk_dynamodb::Error),
}

/// Fails the whole batch so that sqs redelivers its messages
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("unable to decode batch: {0}")]
    Decode(#[from] DecodeError),
    #[error("unable to update metadata for {key}: {source}")]
    Update {
        key: String,
        #[source]
        source: UpdateError,
    },
}
