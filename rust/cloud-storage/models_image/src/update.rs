use chrono::{DateTime, SecondsFormat, Utc};

use crate::{DetectedLabel, ImageStatus, UNKNOWN_LABEL_VALUE};

/// The fields written to an existing image metadata record once labelling has run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadataUpdate {
    pub status: ImageStatus,
    pub labels: Vec<DetectedLabel>,
    /// Name of the highest ranked label, indexed for label lookups
    pub label_value: String,
    pub processed_at: DateTime<Utc>,
}

impl ImageMetadataUpdate {
    pub fn processed(labels: Vec<DetectedLabel>, processed_at: DateTime<Utc>) -> Self {
        let label_value = labels
            .first()
            .map(|label| label.name.clone())
            .unwrap_or_else(|| UNKNOWN_LABEL_VALUE.to_string());

        Self {
            status: ImageStatus::Processed,
            labels,
            label_value,
            processed_at,
        }
    }

    /// `ProcessedAt` as an ISO-8601 UTC timestamp
    pub fn processed_at_iso(&self) -> String {
        self.processed_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}
