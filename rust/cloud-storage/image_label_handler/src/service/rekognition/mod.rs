mod detect_labels;

use aws_sdk_rekognition as rekognition;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;
use models_image::DetectedLabel;

use crate::error::DetectionError;

#[cfg(test)]
pub use MockRekognitionClient as Rekognition;
#[cfg(not(test))]
pub use RekognitionClient as Rekognition;

#[derive(Clone, Debug)]
pub struct RekognitionClient {
    /// Inner rekognition client
    inner: rekognition::Client,
}

#[cfg_attr(test, automock)]
impl RekognitionClient {
    pub fn new(inner: rekognition::Client) -> Self {
        Self { inner }
    }

    /// Detects the labels of the image stored at `bucket/key`, most confident first
    #[tracing::instrument(skip(self))]
    pub async fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
        min_confidence: f32,
    ) -> Result<Vec<DetectedLabel>, DetectionError> {
        detect_labels::detect_labels(&self.inner, bucket, key, max_labels, min_confidence).await
    }
}
