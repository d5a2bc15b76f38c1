use serde::{Deserialize, Serialize};

/// The sns notification delivered as the body of each sqs message
#[derive(Debug, Deserialize)]
pub struct SnsEnvelope {
    /// The serialized [S3EventNotification]
    #[serde(rename = "Message")]
    pub message: String,
}

/// The s3 event published to the sns topic.
/// S3 test events carry no records.
#[derive(Debug, Deserialize)]
pub struct S3EventNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    pub event_name: Option<String>,
    pub event_time: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Object {
    /// Url encoded with `+` for spaces
    pub key: String,
    pub size: Option<i64>,
    pub e_tag: Option<String>,
    pub version_id: Option<String>,
}

/// A single object created in a bucket, with its key decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChangeRecord {
    pub bucket: String,
    pub key: String,
    pub metadata: EventMetadata,
}

/// Event details that are carried along for logging only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMetadata {
    pub event_name: Option<String>,
    pub event_time: Option<String>,
    pub size: Option<i64>,
    pub e_tag: Option<String>,
    pub version_id: Option<String>,
}

/// What the lambda returns once every record of the batch was handled
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub status_code: u16,
    pub body: BatchSummary,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub message: String,
    /// The number of sqs messages in the handled batch
    pub processed_count: usize,
}

impl BatchResponse {
    pub fn success(processed_count: usize) -> Self {
        Self {
            status_code: 200,
            body: BatchSummary {
                message: "Successfully processed images".to_string(),
                processed_count,
            },
        }
    }
}
