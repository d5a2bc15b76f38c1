use aws_sdk_rekognition as rekognition;
use aws_sdk_rekognition::types::{Image, Label, S3Object};
use lambda_runtime::tracing;
use models_image::DetectedLabel;

use crate::error::DetectionError;

#[tracing::instrument(skip(client))]
pub(super) async fn detect_labels(
    client: &rekognition::Client,
    bucket: &str,
    key: &str,
    max_labels: i32,
    min_confidence: f32,
) -> Result<Vec<DetectedLabel>, DetectionError> {
    let image = Image::builder()
        .s3_object(S3Object::builder().bucket(bucket).name(key).build())
        .build();

    let output = client
        .detect_labels()
        .image(image)
        .max_labels(max_labels)
        .min_confidence(min_confidence)
        .send()
        .await
        .map_err(rekognition::Error::from)?;

    Ok(to_detected_labels(output.labels()))
}

/// Keeps the order rekognition ranked the labels in. Unnamed labels are dropped.
/// Confidence arrives as an `f32` and is rounded from its widened value, so a score that sits
/// exactly on a half hundredth (`87.455`) may round up where a decimal parse would round down.
fn to_detected_labels(labels: &[Label]) -> Vec<DetectedLabel> {
    labels
        .iter()
        .filter_map(|label| {
            let name = label.name()?;
            let confidence = label.confidence().map(f64::from).unwrap_or_default();
            Some(DetectedLabel::new(name, confidence))
        })
        .collect()
}
