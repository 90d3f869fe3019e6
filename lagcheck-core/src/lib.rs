//! Burrow payload decoding and consumer-lag evaluation.
//!
//! This crate contains everything lagcheck decides with, free of any
//! transport concerns:
//! - serde models for Burrow's consumer list and consumer status payloads
//! - strict parsers that turn raw response bodies into those models
//! - the lag evaluator that applies whitelist and tolerance policy
//!
//! The server crate feeds it bytes fetched from Burrow and serves the
//! verdicts it produces.

pub mod error;
pub mod evaluate;
pub mod models;
pub mod parse;

pub use error::CheckError;
pub use evaluate::{check_consumer_group, evaluate};
pub use models::{
    ConsumerGroupStatus, EvaluationStatus, OffsetPoint, PartitionLag, Verdict,
};
pub use parse::{parse_consumer_list, parse_consumer_status};
