use std::sync::Arc;

use crate::{config::Config, service};

#[derive(Clone)]
pub struct Context {
    pub rekognition: Arc<service::rekognition::Rekognition>,
    pub dynamodb: Arc<service::dynamodb::Dynamodb>,
    pub config: Config,
}
