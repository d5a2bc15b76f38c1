mod update_image_metadata;

use aws_sdk_dynamodb as dynamodb;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;
use models_image::{ImageId, ImageMetadataUpdate};

use crate::error::UpdateError;

#[cfg(test)]
pub use MockDynamodbClient as Dynamodb;
#[cfg(not(test))]
pub use DynamodbClient as Dynamodb;

#[derive(Clone, Debug)]
pub struct DynamodbClient {
    /// Inner dynamodb client
    inner: dynamodb::Client,
    /// The image metadata table
    table: String,
}

#[cfg_attr(test, automock)]
impl DynamodbClient {
    pub fn new(inner: dynamodb::Client, table: String) -> Self {
        Self { inner, table }
    }

    /// Applies the update to the metadata record of the image.
    /// Fails with [UpdateError::RecordNotFound] instead of creating the record.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_image_metadata(
        &self,
        image_id: &ImageId,
        update: &ImageMetadataUpdate,
    ) -> Result<(), UpdateError> {
        update_image_metadata::update_image_metadata(&self.inner, &self.table, image_id, update)
            .await
    }
}
