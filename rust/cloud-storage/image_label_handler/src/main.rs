#![recursion_limit = "256"]

mod config;
mod context;
mod error;
mod handler;
mod model;
mod service;

use std::sync::Arc;

use anyhow::Context as _;
use aws_config::Region;
use aws_lambda_events::sqs::SqsEvent;
use entrypoint::Entrypoint;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};

use crate::{config::Config, context::Context};

#[tokio::main]
async fn main() -> Result<(), Error> {
    Entrypoint::from_env()
        .context("ENVIRONMENT should name a known environment")?
        .init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!(environment=%config.environment, config=?config, "initialized config");

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;

    let rekognition =
        service::rekognition::Rekognition::new(aws_sdk_rekognition::Client::new(&aws_config));

    tracing::trace!("initialized rekognition client");

    let dynamodb = service::dynamodb::Dynamodb::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.dynamodb_table_name.clone(),
    );

    tracing::trace!("initialized dynamodb client");

    let ctx = Context {
        rekognition: Arc::new(rekognition),
        dynamodb: Arc::new(dynamodb),
        config,
    };

    let func = service_fn(move |event: LambdaEvent<SqsEvent>| {
        let ctx = ctx.clone();
        async move { handler(ctx, event).await }
    });

    run(func).await
}
