use lambda_runtime::tracing;

use crate::{
    error::DecodeError,
    model::{EventMetadata, S3EventNotification, S3EventRecord, SnsEnvelope, StorageChangeRecord},
};

/// Unwraps every sqs message body (sqs -> sns -> s3 event) into the storage change records it
/// carries, in message order. Any malformed message fails the whole batch.
#[tracing::instrument(skip(bodies))]
pub fn decode_batch<'a, I>(bodies: I) -> Result<Vec<StorageChangeRecord>, DecodeError>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut records = Vec::new();

    for (index, body) in bodies.into_iter().enumerate() {
        let body = body.ok_or(DecodeError::MissingBody { index })?;

        let envelope: SnsEnvelope = serde_json::from_str(body)
            .map_err(|source| DecodeError::Envelope { index, source })?;

        let notification: S3EventNotification = serde_json::from_str(&envelope.message)
            .map_err(|source| DecodeError::StorageEvent { index, source })?;

        if notification.records.is_empty() {
            tracing::info!(index, "sns message contains no s3 records");
        }

        records.extend(notification.records.into_iter().map(StorageChangeRecord::from));
    }

    Ok(records)
}

impl From<S3EventRecord> for StorageChangeRecord {
    fn from(record: S3EventRecord) -> Self {
        let object = record.s3.object;
        Self {
            bucket: record.s3.bucket.name,
            key: unquote_plus(&object.key),
            metadata: EventMetadata {
                event_name: record.event_name,
                event_time: record.event_time,
                size: object.size,
                e_tag: object.e_tag,
                version_id: object.version_id,
            },
        }
    }
}

/// S3 keys in event notifications are form encoded. Invalid utf-8 is replaced rather than
/// rejected so that a badly named object cannot poison the queue.
fn unquote_plus(key: &str) -> String {
    let spaced = key.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
