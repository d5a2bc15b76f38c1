use anyhow::Context;
pub use entrypoint::Environment;

const DEFAULT_AWS_REGION: &str = "us-east-1";
const DEFAULT_MAX_LABELS: i32 = 10;
const DEFAULT_MIN_CONFIDENCE: f32 = 75.0;

/// The configuration parameters for the lambda.
///
/// These are pulled from the environment variables set on the function.
#[derive(Debug, Clone)]
pub struct Config {
    /// The table holding one metadata record per uploaded image
    pub dynamodb_table_name: String,

    /// The region the rekognition and dynamodb clients talk to
    pub aws_region: String,

    /// The maximum number of labels requested per image
    pub max_labels: i32,

    /// Labels below this confidence are not returned by detection
    pub min_confidence: f32,

    /// The environment we are in
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let dynamodb_table_name = lookup("DYNAMODB_TABLE_NAME")
            .filter(|v| !v.is_empty())
            .context("DYNAMODB_TABLE_NAME must be provided")?;

        let aws_region = lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string());

        let max_labels = match lookup("MAX_LABELS") {
            Some(v) => v
                .parse::<i32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("MAX_LABELS must be a positive integer, got {v:?}"))?,
            None => DEFAULT_MAX_LABELS,
        };

        let min_confidence = match lookup("MIN_CONFIDENCE") {
            Some(v) => v
                .parse::<f32>()
                .ok()
                .filter(|n| (0.0..=100.0).contains(n))
                .with_context(|| {
                    format!("MIN_CONFIDENCE must be a number between 0 and 100, got {v:?}")
                })?,
            None => DEFAULT_MIN_CONFIDENCE,
        };

        let environment = Environment::from_var(lookup(Environment::VAR).as_deref())
            .context("ENVIRONMENT is not a known environment")?;

        Ok(Config {
            dynamodb_table_name,
            aws_region,
            max_labels,
            min_confidence,
            environment,
        })
    }
}
