use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{Error, LambdaEvent, tracing};

use crate::{context::Context, model::BatchResponse, service};

/// Handles the SQS event.
/// Each message is an sns notification wrapping the s3 events of newly uploaded objects.
/// Returning an error fails the whole batch so that every message is redelivered.
#[tracing::instrument(skip(ctx, event))]
pub async fn handler(ctx: Context, event: LambdaEvent<SqsEvent>) -> Result<BatchResponse, Error> {
    let message_count = event.payload.records.len();

    tracing::info!(message_count, "processing sqs records");

    let bodies = event
        .payload
        .records
        .iter()
        .map(|record| record.body.as_deref());

    let outcome = service::process::process_batch(&ctx, bodies)
        .await
        .inspect_err(|e| tracing::error!(error=?e, "error processing images"))?;

    tracing::debug!(
        message_count,
        processed = outcome.processed,
        skipped = outcome.skipped,
        "handled sqs records"
    );

    Ok(BatchResponse::success(message_count))
}
