use std::collections::HashMap;

use aws_sdk_dynamodb as dynamodb;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use lambda_runtime::tracing;
use models_image::{
    DetectedLabel, IMAGE_ID_ATTRIBUTE, ImageId, ImageMetadataUpdate, METADATA_SORT_KEY,
    SORT_KEY_ATTRIBUTE,
};

use crate::error::UpdateError;

const UPDATE_EXPRESSION: &str = "SET #status = :status, #labels = :labels, #labelValue = :labelValue, #processedAt = :processedAt";

/// Only update records written at upload time, never insert a new one
const CONDITION_EXPRESSION: &str = "attribute_exists(#imageId)";

#[tracing::instrument(skip(client, update))]
pub(super) async fn update_image_metadata(
    client: &dynamodb::Client,
    table: &str,
    image_id: &ImageId,
    update: &ImageMetadataUpdate,
) -> Result<(), UpdateError> {
    let result = client
        .update_item()
        .table_name(table)
        .key(IMAGE_ID_ATTRIBUTE, AttributeValue::S(image_id.to_string()))
        .key(SORT_KEY_ATTRIBUTE, AttributeValue::S(METADATA_SORT_KEY.to_string()))
        .update_expression(UPDATE_EXPRESSION)
        .condition_expression(CONDITION_EXPRESSION)
        .set_expression_attribute_names(Some(attribute_names()))
        .set_expression_attribute_values(Some(attribute_values(update)))
        .return_values(ReturnValue::UpdatedNew)
        .send()
        .await;

    let output = result.map_err(|err| classify(image_id, err))?;

    tracing::trace!(attributes=?output.attributes(), "updated image metadata");

    Ok(())
}

/// A failed `attribute_exists` condition means the upload never wrote the record
fn classify(image_id: &ImageId, err: SdkError<UpdateItemError, HttpResponse>) -> UpdateError {
    if err
        .as_service_error()
        .is_some_and(UpdateItemError::is_conditional_check_failed_exception)
    {
        return UpdateError::RecordNotFound {
            image_id: image_id.to_string(),
        };
    }

    UpdateError::Store(dynamodb::Error::from(err))
}

fn attribute_names() -> HashMap<String, String> {
    [
        ("#imageId", IMAGE_ID_ATTRIBUTE),
        ("#status", "status"),
        ("#labels", "labels"),
        ("#labelValue", "LabelValue"),
        ("#processedAt", "ProcessedAt"),
    ]
    .into_iter()
    .map(|(placeholder, name)| (placeholder.to_string(), name.to_string()))
    .collect()
}

fn attribute_values(update: &ImageMetadataUpdate) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            ":status".to_string(),
            AttributeValue::S(update.status.to_string()),
        ),
        (
            ":labels".to_string(),
            AttributeValue::L(update.labels.iter().map(label_to_attribute).collect()),
        ),
        (
            ":labelValue".to_string(),
            AttributeValue::S(update.label_value.clone()),
        ),
        (
            ":processedAt".to_string(),
            AttributeValue::S(update.processed_at_iso()),
        ),
    ])
}

/// Labels are stored as `{Name, Confidence}` maps, the format the serving api reads
fn label_to_attribute(label: &DetectedLabel) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        ("Name".to_string(), AttributeValue::S(label.name.clone())),
        (
            "Confidence".to_string(),
            AttributeValue::N(label.confidence.to_string()),
        ),
    ]))
}
