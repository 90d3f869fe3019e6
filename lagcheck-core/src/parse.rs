//! Strict decoding of Burrow response bodies.
//!
//! Both parsers reject payloads that are missing the mandatory `error`
//! discriminator, so an empty `{}` body fails instead of decoding into
//! a default that would pass the health check.

use crate::error::CheckError;
use crate::models::{ConsumerGroupStatus, ConsumerListResponse, ConsumerStatusResponse};

/// Decode a consumer-group status body into its `ConsumerGroupStatus`.
///
/// Fails when the body does not decode, when Burrow flags the response
/// as an error, or when the nested status object is absent on a
/// non-error response.
pub fn parse_consumer_status(body: &[u8]) -> Result<ConsumerGroupStatus, CheckError> {
    let response: ConsumerStatusResponse = serde_json::from_slice(body).map_err(|_| {
        CheckError::MalformedPayload("Couldn't unmarshall consumer status.".to_string())
    })?;

    if response.error {
        return Err(CheckError::UpstreamReportedError(
            "Consumer status response is an error.".to_string(),
        ));
    }

    response.status.ok_or_else(|| {
        CheckError::MalformedPayload("Couldn't unmarshall consumer status.".to_string())
    })
}

/// Decode a consumer-list body into the group names, order preserved.
///
/// An empty `consumers` array is a valid empty list; a missing
/// `consumers` key on a non-error response is a malformed payload.
pub fn parse_consumer_list(body: &[u8]) -> Result<Vec<String>, CheckError> {
    let response: ConsumerListResponse = serde_json::from_slice(body).map_err(|_| {
        CheckError::MalformedPayload("Couldn't unmarshall consumer list response".to_string())
    })?;

    if response.error {
        return Err(CheckError::UpstreamReportedError(
            "Consumer list response is an error".to_string(),
        ));
    }

    response.consumers.ok_or_else(|| {
        CheckError::MalformedPayload(
            "Couldn't unmarshall consumer list: missing field `consumers`".to_string(),
        )
    })
}
