#![deny(missing_docs)]
//! This crate provides the initialization process shared by the binaries of the image pipeline.
//! It gives every binary the same tracing configuration for the environment it runs in

mod environment;

pub use environment::Environment;

use tracing_subscriber::EnvFilter;

/// defines the behaviour for initializing a binary
#[derive(Debug)]
pub struct Entrypoint {
    env: Environment,
}

/// sentinel struct which guarantees that we called [Entrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl Entrypoint {
    /// load `.env` if present and read the [Environment] from [Environment::VAR]
    pub fn from_env() -> Result<Self, strum::ParseError> {
        dotenv::dotenv().ok();
        let env = Environment::from_var(std::env::var(Environment::VAR).ok().as_deref())?;
        Ok(Self { env })
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                // cloudwatch does not render ansi and indexes flattened json fields
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        tracing::trace!(environment=%self.env, "initialized tracing");

        InitializedEntrypoint(())
    }
}

