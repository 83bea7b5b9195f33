// policylens: topic trends by sector and year for climate policy documents
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline.

pub mod aggregate;
pub mod config;
pub mod corpus;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod sectors;
