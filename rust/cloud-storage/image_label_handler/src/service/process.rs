use lambda_runtime::tracing;
use models_image::ImageId;

use crate::{
    context::Context,
    error::ProcessError,
    model::StorageChangeRecord,
    service::{detect, eligibility, envelope, metadata},
};

#[derive(Debug, PartialEq, Eq)]
enum RecordOutcome {
    Skipped,
    Processed { image_id: ImageId },
}

/// Totals for a batch where every record was handled
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub processed: usize,
    pub skipped: usize,
}

/// Decodes the batch and labels every image it references, one record at a time.
///
/// There is no partial success: the first record whose metadata cannot be updated fails the
/// batch and sqs redelivers all of its messages. Records updated before the failure are updated
/// again on redelivery, which leaves them in the same state.
#[tracing::instrument(skip(ctx, bodies))]
pub async fn process_batch<'a, I>(ctx: &Context, bodies: I) -> Result<BatchOutcome, ProcessError>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let records = envelope::decode_batch(bodies)?;

    tracing::info!(record_count = records.len(), "decoded storage records");

    let mut outcome = BatchOutcome::default();

    for record in records {
        // boxed to keep the nested instrumented futures within the compiler's layout depth
        match Box::pin(process_record(ctx, &record)).await? {
            RecordOutcome::Skipped => outcome.skipped += 1,
            RecordOutcome::Processed { image_id } => {
                tracing::trace!(image_id=%image_id, "record complete");
                outcome.processed += 1;
            }
        }
    }

    tracing::info!(
        processed = outcome.processed,
        skipped = outcome.skipped,
        "batch complete"
    );

    Ok(outcome)
}

#[tracing::instrument(skip(ctx, record), fields(bucket=%record.bucket, key=%record.key))]
async fn process_record(
    ctx: &Context,
    record: &StorageChangeRecord,
) -> Result<RecordOutcome, ProcessError> {
    if !eligibility::is_eligible(&record.key) {
        tracing::info!("skipping non-image file");
        return Ok(RecordOutcome::Skipped);
    }

    let event = &record.metadata;
    tracing::info!(
        event_name = event.event_name.as_deref(),
        event_time = event.event_time.as_deref(),
        size = event.size,
        e_tag = event.e_tag.as_deref(),
        version_id = event.version_id.as_deref(),
        "processing image"
    );

    let labels = detect::detect_labels(ctx, &record.bucket, &record.key).await;

    let image_id = metadata::update_metadata(ctx, &record.bucket, &record.key, labels)
        .await
        .map_err(|source| ProcessError::Update {
            key: record.key.clone(),
            source,
        })?;

    tracing::info!(image_id=%image_id, "successfully processed image");

    Ok(RecordOutcome::Processed { image_id })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use mockall::predicate::eq;
    use models_image::{DetectedLabel, ImageMetadataUpdate, ImageStatus};

    use super::*;
    use crate::{
        config::{Config, Environment},
        error::{DecodeError, DetectionError, UpdateError},
        service::{dynamodb::Dynamodb, envelope::tests::sqs_body, rekognition::Rekognition},
    };

    pub(crate) fn context(rekognition: Rekognition, dynamodb: Dynamodb) -> Context {
        Context {
            rekognition: Arc::new(rekognition),
            dynamodb: Arc::new(dynamodb),
            config: Config {
                dynamodb_table_name: "image-recognition-test".to_string(),
                aws_region: "us-east-1".to_string(),
                max_labels: 10,
                min_confidence: 75.0,
                environment: Environment::Local,
            },
        }
    }

    fn detection_failure() -> DetectionError {
        DetectionError::Rekognition(aws_sdk_rekognition::Error::InvalidS3ObjectException(
            aws_sdk_rekognition::types::error::InvalidS3ObjectException::builder()
                .message("Unable to get object metadata from S3")
                .build(),
        ))
    }

    /// Records every update the mock receives as (image id, update)
    fn recording_dynamodb() -> (Dynamodb, Arc<Mutex<Vec<(String, ImageMetadataUpdate)>>>) {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let recorded = updates.clone();

        let mut dynamodb = Dynamodb::default();
        dynamodb
            .expect_update_image_metadata()
            .returning(move |image_id, update| {
                recorded
                    .lock()
                    .unwrap()
                    .push((image_id.to_string(), update.clone()));
                Ok(())
            });

        (dynamodb, updates)
    }

    #[tokio::test]
    async fn labels_and_marks_an_uploaded_png() {
        let mut rekognition = Rekognition::default();
        rekognition
            .expect_detect_labels()
            .with(
                eq("image-uploads"),
                eq("images/img_1700000000.png"),
                eq(10),
                eq(75.0_f32),
            )
            .times(1)
            .returning(|_, _, _, _| {
                Ok(vec![
                    DetectedLabel::new("Cat", 91.2),
                    DetectedLabel::new("Animal", 80.0),
                ])
            });
        let (dynamodb, updates) = recording_dynamodb();
        let ctx = context(rekognition, dynamodb);

        let body = sqs_body(&[("image-uploads", "images/img_1700000000.png")]);
        let outcome = process_batch(&ctx, [Some(body.as_str())]).await.unwrap();

        assert_eq!(
            outcome,
            BatchOutcome {
                processed: 1,
                skipped: 0
            }
        );

        let updates = updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        let (image_id, update) = &updates[0];
        assert_eq!(image_id, "img_1700000000");
        assert_eq!(update.status, ImageStatus::Processed);
        assert_eq!(update.label_value, "Cat");
        assert_eq!(
            update.labels,
            vec![
                DetectedLabel::new("Cat", 91.2),
                DetectedLabel::new("Animal", 80.0)
            ]
        );
    }

    #[tokio::test]
    async fn skips_non_image_objects_without_calling_aws() {
        // no expectations: any call on either mock panics
        let ctx = context(Rekognition::default(), Dynamodb::default());

        let body = sqs_body(&[("image-uploads", "docs/readme.txt")]);
        let outcome = process_batch(&ctx, [Some(body.as_str())]).await.unwrap();

        assert_eq!(
            outcome,
            BatchOutcome {
                processed: 0,
                skipped: 1
            }
        );
    }

    #[tokio::test]
    async fn failed_detection_still_marks_processed() {
        let mut rekognition = Rekognition::default();
        rekognition
            .expect_detect_labels()
            .times(1)
            .returning(|_, _, _, _| Err(detection_failure()));
        let (dynamodb, updates) = recording_dynamodb();
        let ctx = context(rekognition, dynamodb);

        let body = sqs_body(&[("image-uploads", "images/img_1.jpg")]);
        let outcome = process_batch(&ctx, [Some(body.as_str())]).await.unwrap();

        assert_eq!(outcome.processed, 1);

        let updates = updates.lock().unwrap();
        let (image_id, update) = &updates[0];
        assert_eq!(image_id, "img_1");
        assert_eq!(update.status, ImageStatus::Processed);
        assert!(update.labels.is_empty());
        assert_eq!(update.label_value, "unknown");
    }

    #[tokio::test]
    async fn failed_update_fails_the_batch() {
        let mut rekognition = Rekognition::default();
        rekognition
            .expect_detect_labels()
            .returning(|_, _, _, _| Ok(vec![DetectedLabel::new("Dog", 95.0)]));

        let mut dynamodb = Dynamodb::default();
        dynamodb
            .expect_update_image_metadata()
            .withf(|image_id, _| image_id.to_string() == "img_2")
            .times(1)
            .returning(|image_id, _| {
                Err(UpdateError::RecordNotFound {
                    image_id: image_id.to_string(),
                })
            });
        dynamodb
            .expect_update_image_metadata()
            .withf(|image_id, _| image_id.to_string() != "img_2")
            .returning(|_, _| Ok(()));
        let ctx = context(rekognition, dynamodb);

        let body = sqs_body(&[
            ("image-uploads", "images/img_1.png"),
            ("image-uploads", "images/img_2.png"),
            ("image-uploads", "images/img_3.png"),
        ]);
        let err = process_batch(&ctx, [Some(body.as_str())])
            .await
            .unwrap_err();

        match err {
            ProcessError::Update { key, source } => {
                assert_eq!(key, "images/img_2.png");
                assert!(matches!(source, UpdateError::RecordNotFound { image_id } if image_id == "img_2"));
            }
            other => panic!("expected an update error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_update_in_a_later_message_fails_the_batch() {
        let mut rekognition = Rekognition::default();
        rekognition
            .expect_detect_labels()
            .returning(|_, _, _, _| Ok(vec![]));

        let mut dynamodb = Dynamodb::default();
        let mut calls = 0;
        dynamodb
            .expect_update_image_metadata()
            .times(3)
            .returning(move |image_id, _| {
                calls += 1;
                if calls == 3 {
                    Err(UpdateError::RecordNotFound {
                        image_id: image_id.to_string(),
                    })
                } else {
                    Ok(())
                }
            });
        let ctx = context(rekognition, dynamodb);

        let first = sqs_body(&[("image-uploads", "images/a.png")]);
        let second = sqs_body(&[("image-uploads", "images/b.png")]);
        let third = sqs_body(&[("image-uploads", "images/c.png")]);

        let result = process_batch(
            &ctx,
            [
                Some(first.as_str()),
                Some(second.as_str()),
                Some(third.as_str()),
            ],
        )
        .await;

        assert!(matches!(result, Err(ProcessError::Update { key, .. }) if key == "images/c.png"));
    }

    #[tokio::test]
    async fn invalid_image_key_fails_the_batch() {
        let mut rekognition = Rekognition::default();
        rekognition
            .expect_detect_labels()
            .returning(|_, _, _, _| Ok(vec![]));
        let ctx = context(rekognition, Dynamodb::default());

        let body = sqs_body(&[("image-uploads", "images/.png")]);
        let err = process_batch(&ctx, [Some(body.as_str())])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessError::Update {
                source: UpdateError::InvalidKey(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn undecodable_message_fails_before_any_call() {
        let ctx = context(Rekognition::default(), Dynamodb::default());

        let good = sqs_body(&[("image-uploads", "images/img_1.png")]);
        let err = process_batch(&ctx, [Some(good.as_str()), Some("{\"Message\": 42}")])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessError::Decode(DecodeError::Envelope { index: 1, .. })
        ));
    }

    #[tokio::test]
    async fn mixed_batch_counts_processed_and_skipped() {
        let mut rekognition = Rekognition::default();
        rekognition
            .expect_detect_labels()
            .times(2)
            .returning(|_, _, _, _| Ok(vec![DetectedLabel::new("Tree", 88.0)]));
        let (dynamodb, updates) = recording_dynamodb();
        let ctx = context(rekognition, dynamodb);

        let body = sqs_body(&[
            ("image-uploads", "images/one.JPG"),
            ("image-uploads", "notes/todo.md"),
            ("image-uploads", "images/two.webp"),
        ]);
        let outcome = process_batch(&ctx, [Some(body.as_str())]).await.unwrap();

        assert_eq!(
            outcome,
            BatchOutcome {
                processed: 2,
                skipped: 1
            }
        );
        let ids: Vec<String> = updates
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        assert_eq!(ids, vec!["one".to_string(), "two".to_string()]);
    }
}
