use lambda_runtime::tracing;
use models_image::DetectedLabel;

use crate::context::Context;

/// Runs label detection for the image. A failed detection is logged and yields no labels so the
/// image is still marked processed.
#[tracing::instrument(skip(ctx))]
pub async fn detect_labels(ctx: &Context, bucket: &str, key: &str) -> Vec<DetectedLabel> {
    match ctx
        .rekognition
        .detect_labels(
            bucket,
            key,
            ctx.config.max_labels,
            ctx.config.min_confidence,
        )
        .await
    {
        Ok(labels) => {
            tracing::info!(label_count = labels.len(), "detected labels");
            labels
        }
        Err(e) => {
            tracing::error!(error=?e, "unable to detect labels, continuing without labels");
            Vec::new()
        }
    }
}
