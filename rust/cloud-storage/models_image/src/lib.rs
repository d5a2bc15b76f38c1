//! Types shared by everything that reads or writes the image metadata table

mod file_type;
mod image_id;
mod label;
mod update;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use file_type::*;
pub use image_id::*;
pub use label::*;
pub use update::*;

/// Name of the partition key attribute of the image metadata table
pub const IMAGE_ID_ATTRIBUTE: &str = "ImageId";

/// Name of the sort key attribute of the image metadata table
pub const SORT_KEY_ATTRIBUTE: &str = "CreatedAt";

/// Sort key value of the item holding an image's metadata
pub const METADATA_SORT_KEY: &str = "METADATA";

/// Stored as `LabelValue` when detection produced no labels
pub const UNKNOWN_LABEL_VALUE: &str = "unknown";

/// The processing status of an image metadata record
#[derive(Debug, Serialize, Deserialize, Clone, Copy, EnumString, Display, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    /// The record was written at upload time and has not been labelled yet
    Uploaded,
    /// Label detection ran and its result was attached to the record
    Processed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_as_lowercase() {
        assert_eq!(ImageStatus::Processed.to_string(), "processed");
        assert_eq!(
            ImageStatus::from_str("uploaded").unwrap(),
            ImageStatus::Uploaded
        );
        assert_eq!(
            serde_json::to_string(&ImageStatus::Processed).unwrap(),
            "\"processed\""
        );
    }
}
