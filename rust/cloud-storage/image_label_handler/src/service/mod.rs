pub mod detect;
pub mod dynamodb;
pub mod eligibility;
pub mod envelope;
pub mod metadata;
pub mod process;
pub mod rekognition;
