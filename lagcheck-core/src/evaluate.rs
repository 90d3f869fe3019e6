//! Lag policy: whitelist and tolerance applied to a decoded status.
//!
//! Burrow's own OK/WARNING/ERR verdict reflects its evaluation rules
//! (https://github.com/linkedin/Burrow/wiki/Consumer-Lag-Evaluation-Rules)
//! and is deliberately ignored here. Local policy cares only about the
//! numeric lag against the configured tolerance, and the whitelist.

use std::collections::HashSet;

use crate::error::CheckError;
use crate::models::{ConsumerGroupStatus, Verdict};
use crate::parse::parse_consumer_status;

/// Apply whitelist and tolerance policy to a decoded group status.
///
/// Policy, in order:
/// 1. No `max_lag` reported at all means no lag: healthy, whatever
///    Burrow's own status says. A stopped consumer with zero lag has
///    simply drained its topic.
/// 2. A whitelisted `max_lag` topic is exempt from lag checks entirely.
/// 3. Otherwise the group passes iff `total_lag <= tolerance`.
pub fn evaluate(
    status: &ConsumerGroupStatus,
    group: &str,
    whitelist: &HashSet<String>,
    tolerance: u64,
) -> Verdict {
    let max_lag = match &status.max_lag {
        Some(max_lag) => max_lag,
        None => return Verdict::pass(group),
    };

    if whitelist.contains(&max_lag.topic) {
        return Verdict::pass(group);
    }

    if status.total_lag <= tolerance {
        return Verdict::pass(group);
    }

    let reason = CheckError::LagExceeded {
        group: group.to_string(),
        lag: status.total_lag,
    };
    Verdict::fail(group, reason.to_string())
}

/// Parse a raw status body and evaluate it in one step.
///
/// Parse failures and upstream-reported errors come back as `Err`;
/// the lag policy outcome is carried in the returned verdict.
pub fn check_consumer_group(
    body: &[u8],
    group: &str,
    whitelist: &HashSet<String>,
    tolerance: u64,
) -> Result<Verdict, CheckError> {
    let status = parse_consumer_status(body)?;
    Ok(evaluate(&status, group, whitelist, tolerance))
}
