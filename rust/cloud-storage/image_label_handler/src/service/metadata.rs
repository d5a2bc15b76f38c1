use lambda_runtime::tracing;
use models_image::{DetectedLabel, ImageId, ImageMetadataUpdate};

use crate::{context::Context, error::UpdateError};

/// Marks the image stored at `key` as processed and attaches its labels
#[tracing::instrument(skip(ctx, labels), fields(label_count = labels.len()))]
pub async fn update_metadata(
    ctx: &Context,
    bucket: &str,
    key: &str,
    labels: Vec<DetectedLabel>,
) -> Result<ImageId, UpdateError> {
    let image_id = ImageId::from_object_key(key)?;
    let update = ImageMetadataUpdate::processed(labels, chrono::Utc::now());

    ctx.dynamodb
        .update_image_metadata(&image_id, &update)
        .await
        .inspect_err(|e| {
            tracing::error!(error=?e, image_id=%image_id, "unable to update metadata");
        })?;

    tracing::info!(image_id=%image_id, label_value=%update.label_value, "updated metadata");

    Ok(image_id)
}
