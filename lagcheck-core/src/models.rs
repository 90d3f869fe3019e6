//! Serde models for Burrow's consumer endpoints.
//!
//! Field names mirror Burrow's wire format exactly. The `error`
//! discriminator is mandatory on both top-level responses so that an
//! empty object fails decoding instead of silently passing; collection
//! and nested fields that may legitimately be absent are `Option` so
//! that "absent" and "present but empty" stay distinguishable.

use serde::{Deserialize, Serialize};

/// Top-level response of Burrow's "list consumer groups" endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerListResponse {
    /// Burrow's own error flag; when true the rest is not authoritative
    pub error: bool,

    #[serde(default)]
    pub message: String,

    /// Consumer group names, order as reported. `None` when the key is
    /// missing entirely, which is a contract violation on a non-error
    /// response.
    pub consumers: Option<Vec<String>>,
}

/// Top-level response of Burrow's "consumer group status" endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerStatusResponse {
    pub error: bool,

    #[serde(default)]
    pub message: String,

    /// Present and well-formed whenever `error` is false and the
    /// evaluation completed.
    pub status: Option<ConsumerGroupStatus>,
}

/// Burrow's verdict classes for a consumer group or partition.
///
/// Only carried for reporting; the evaluator never branches on it
/// (local policy is the numeric lag against our own tolerance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvaluationStatus {
    NotFound,
    Ok,
    Warning,
    Err,
    Stop,
    Stall,
    #[serde(other)]
    Unknown,
}

/// Evaluated lag state of one consumer group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerGroupStatus {
    pub cluster: String,
    pub group: String,
    pub status: EvaluationStatus,
    pub complete: bool,

    #[serde(default)]
    pub partitions: Vec<PartitionLag>,

    pub partition_count: u32,

    /// The single partition with the worst lag, or `None` when no lag
    /// was reported at all.
    #[serde(rename = "maxlag")]
    pub max_lag: Option<PartitionLag>,

    /// Sum of lag across all partitions; this is the quantity compared
    /// against the configured tolerance.
    #[serde(rename = "totallag")]
    pub total_lag: u64,
}

/// Lag window of a single topic partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionLag {
    pub topic: String,
    pub partition: i32,
    pub status: String,
    pub start: OffsetPoint,
    pub end: OffsetPoint,
}

/// One committed-offset observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OffsetPoint {
    pub offset: i64,
    /// Milliseconds since the epoch
    pub timestamp: i64,
    pub lag: u64,
}

/// Pass/fail outcome for one consumer group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Consumer group name
    pub group: String,

    pub healthy: bool,

    /// Why the group is unhealthy; absent on a pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Verdict {
    /// A passing verdict for `group`.
    pub fn pass(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            healthy: true,
            reason: None,
        }
    }

    /// A failing verdict for `group` with the given reason.
    pub fn fail(group: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            healthy: false,
            reason: Some(reason.into()),
        }
    }
}
