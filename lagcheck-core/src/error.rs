//! Error type shared by the parsers, the evaluator and the server.

use thiserror::Error;

/// Everything that can go wrong while checking one consumer group.
///
/// The display strings are part of the health-report contract: they are
/// surfaced verbatim as the `reason` of an unhealthy verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// Burrow returned JSON that does not match the expected shape.
    #[error("{0}")]
    MalformedPayload(String),

    /// Burrow flagged its own response as an error.
    #[error("{0}")]
    UpstreamReportedError(String),

    /// Network or timeout failure reaching Burrow.
    #[error("{0}")]
    Transport(String),

    /// Policy violation: the group's total lag exceeds the tolerance.
    #[error("{group} consumer group is lagging behind with {lag} messages")]
    LagExceeded {
        /// Consumer group name
        group: String,
        /// Total lag in messages across all partitions
        lag: u64,
    },
}
