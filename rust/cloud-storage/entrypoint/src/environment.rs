use strum::{Display, EnumString};

/// Where the binary runs, which decides how its logs are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum Environment {
    /// Deployed to the production account
    #[default]
    #[strum(serialize = "prod")]
    Production,
    /// Deployed to the dev account
    #[strum(serialize = "dev")]
    Develop,
    /// Running on a developer machine
    #[strum(serialize = "local")]
    Local,
}

impl Environment {
    /// The variable holding the environment name
    pub const VAR: &'static str = "ENVIRONMENT";

    /// Parses the value of [Environment::VAR]. An unset variable means production,
    /// an unrecognized name is an error.
    pub fn from_var(value: Option<&str>) -> Result<Self, strum::ParseError> {
        value.map_or(Ok(Self::default()), str::parse)
    }
}
