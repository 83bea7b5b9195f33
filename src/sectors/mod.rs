// Sector tagging: an ordered keyword table and a first-match classifier.

pub mod classifier;
pub mod table;

/// Label for documents that match no sector's keywords.
pub const UNKNOWN_SECTOR: &str = "unknown";
