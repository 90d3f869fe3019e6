//! Aggregation of per-group lag checks into one health report.

use std::collections::HashSet;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use lagcheck_core::{check_consumer_group, parse_consumer_list, CheckError, Verdict};

use crate::burrow::LagReporter;

/// Aggregated outcome of checking every known consumer group.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// True iff every individual check passed
    pub healthy: bool,
    /// One verdict per consumer group, in the order Burrow listed them
    pub checks: Vec<Verdict>,
}

/// Stateless fetch-evaluate-aggregate pass over all consumer groups.
///
/// Holds no results between invocations; every call fetches fresh
/// state from Burrow.
pub struct Healthcheck<C> {
    client: C,
    whitelist: HashSet<String>,
    tolerance: u64,
}

impl<C: LagReporter> Healthcheck<C> {
    pub fn new(client: C, whitelist: HashSet<String>, tolerance: u64) -> Self {
        Self {
            client,
            whitelist,
            tolerance,
        }
    }

    /// Check every consumer group Burrow knows about.
    ///
    /// Returns `Err` only when the consumer list itself cannot be
    /// fetched or parsed; failures on individual groups become that
    /// group's unhealthy verdict and never abort the others. Status
    /// fetches run concurrently.
    pub async fn check_all(&self) -> Result<HealthReport, CheckError> {
        let body = self.client.fetch_consumer_list().await?;
        let consumers = parse_consumer_list(&body)?;
        debug!("Checking {} consumer groups", consumers.len());

        let checks = join_all(consumers.iter().map(|group| self.check_group(group))).await;
        let healthy = checks.iter().all(|verdict| verdict.healthy);

        Ok(HealthReport { healthy, checks })
    }

    /// Binary readiness: true iff the whole report would be healthy.
    pub async fn good_to_go(&self) -> bool {
        match self.check_all().await {
            Ok(report) => report.healthy,
            Err(e) => {
                warn!("Good-to-go check failed: {}", e);
                false
            }
        }
    }

    async fn check_group(&self, group: &str) -> Verdict {
        let outcome = match self.client.fetch_consumer_status(group).await {
            Ok(body) => check_consumer_group(&body, group, &self.whitelist, self.tolerance),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(verdict) => {
                if let Some(reason) = &verdict.reason {
                    warn!("Consumer group {} is unhealthy: {}", group, reason);
                }
                verdict
            }
            Err(e) => {
                warn!("Couldn't check consumer group {}: {}", group, e);
                Verdict::fail(group, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use async_trait::async_trait;

    /// Scripted reporter: a canned list body plus one body per group.
    struct ScriptedReporter {
        list: Result<Vec<u8>, CheckError>,
        statuses: HashMap<String, Result<Vec<u8>, CheckError>>,
    }

    #[async_trait]
    impl LagReporter for ScriptedReporter {
        async fn fetch_consumer_list(&self) -> Result<Vec<u8>, CheckError> {
            self.list.clone()
        }

        async fn fetch_consumer_status(&self, group: &str) -> Result<Vec<u8>, CheckError> {
            self.statuses
                .get(group)
                .cloned()
                .unwrap_or_else(|| Err(CheckError::Transport(format!("no script for {group}"))))
        }
    }

    fn list_body(groups: &[&str]) -> Vec<u8> {
        let names: Vec<String> = groups.iter().map(|g| format!("\"{g}\"")).collect();
        format!(
            r#"{{"error": false, "message": "ok", "consumers": [{}]}}"#,
            names.join(",")
        )
        .into_bytes()
    }

    fn status_body(group: &str, topic: &str, total_lag: u64) -> Vec<u8> {
        format!(
            r#"{{
                "error": false,
                "message": "consumer group status returned",
                "status": {{
                    "cluster": "local",
                    "group": "{group}",
                    "status": "OK",
                    "complete": true,
                    "partitions": [],
                    "partition_count": 1,
                    "maxlag": {{
                        "topic": "{topic}",
                        "partition": 0,
                        "status": "OK",
                        "start": {{"offset": 2779051, "timestamp": 1474992081559, "lag": 8}},
                        "end": {{"offset": 2779316, "timestamp": 1474992621559, "lag": {total_lag}}}
                    }},
                    "totallag": {total_lag}
                }}
            }}"#
        )
        .into_bytes()
    }

    fn whitelist(topics: &[&str]) -> HashSet<String> {
        topics.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_lagging_group_fails_the_report() {
        let reporter = ScriptedReporter {
            list: Ok(list_body(&["xp-notifications-push-2"])),
            statuses: HashMap::from([(
                "xp-notifications-push-2".to_string(),
                Ok(status_body(
                    "xp-notifications-push-2",
                    "CmsPublicationEvents",
                    31,
                )),
            )]),
        };

        let check = Healthcheck::new(reporter, whitelist(&["Concept"]), 30);
        let report = check.check_all().await.unwrap();

        assert!(!report.healthy);
        assert_eq!(report.checks.len(), 1);
        assert_eq!(
            report.checks[0].reason.as_deref(),
            Some("xp-notifications-push-2 consumer group is lagging behind with 31 messages")
        );
        assert!(!check.good_to_go().await);
    }

    #[tokio::test]
    async fn test_whitelisted_topic_passes_the_report() {
        let reporter = ScriptedReporter {
            list: Ok(list_body(&["xp-notifications-push-2"])),
            statuses: HashMap::from([(
                "xp-notifications-push-2".to_string(),
                Ok(status_body("xp-notifications-push-2", "Concept", 31)),
            )]),
        };

        let check = Healthcheck::new(reporter, whitelist(&["Concept"]), 30);
        let report = check.check_all().await.unwrap();

        assert!(report.healthy);
        assert!(report.checks[0].healthy);
        assert!(check.good_to_go().await);
    }

    #[tokio::test]
    async fn test_one_unreachable_group_does_not_suppress_the_rest() {
        let reporter = ScriptedReporter {
            list: Ok(list_body(&["reachable", "unreachable"])),
            statuses: HashMap::from([
                (
                    "reachable".to_string(),
                    Ok(status_body("reachable", "SomeTopic", 5)),
                ),
                (
                    "unreachable".to_string(),
                    Err(CheckError::Transport(
                        "Timed out reaching Burrow at http://burrow:8080".to_string(),
                    )),
                ),
            ]),
        };

        let check = Healthcheck::new(reporter, whitelist(&[]), 30);
        let report = check.check_all().await.unwrap();

        assert!(!report.healthy);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.checks[0].group, "reachable");
        assert!(report.checks[0].healthy);
        assert_eq!(report.checks[1].group, "unreachable");
        assert!(!report.checks[1].healthy);
        assert!(report.checks[1]
            .reason
            .as_deref()
            .unwrap()
            .contains("Timed out"));
    }

    #[tokio::test]
    async fn test_malformed_status_fails_only_that_group() {
        let reporter = ScriptedReporter {
            list: Ok(list_body(&["good", "garbled"])),
            statuses: HashMap::from([
                ("good".to_string(), Ok(status_body("good", "SomeTopic", 0))),
                ("garbled".to_string(), Ok(b"{}".to_vec())),
            ]),
        };

        let check = Healthcheck::new(reporter, whitelist(&[]), 30);
        let report = check.check_all().await.unwrap();

        assert!(!report.healthy);
        assert!(report.checks[0].healthy);
        assert_eq!(
            report.checks[1].reason.as_deref(),
            Some("Couldn't unmarshall consumer status.")
        );
    }

    #[tokio::test]
    async fn test_empty_consumer_list_is_healthy() {
        let reporter = ScriptedReporter {
            list: Ok(list_body(&[])),
            statuses: HashMap::new(),
        };

        let check = Healthcheck::new(reporter, whitelist(&[]), 0);
        let report = check.check_all().await.unwrap();

        assert!(report.healthy);
        assert!(report.checks.is_empty());
        assert!(check.good_to_go().await);
    }

    #[tokio::test]
    async fn test_report_serializes_reason_only_on_failures() {
        let reporter = ScriptedReporter {
            list: Ok(list_body(&["good", "slow"])),
            statuses: HashMap::from([
                ("good".to_string(), Ok(status_body("good", "SomeTopic", 0))),
                ("slow".to_string(), Ok(status_body("slow", "SomeTopic", 7))),
            ]),
        };

        let check = Healthcheck::new(reporter, whitelist(&[]), 0);
        let report = check.check_all().await.unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["healthy"], false);
        assert!(json["checks"][0].get("reason").is_none());
        assert_eq!(
            json["checks"][1]["reason"],
            "slow consumer group is lagging behind with 7 messages"
        );
    }

    #[tokio::test]
    async fn test_list_failure_surfaces_as_error() {
        let reporter = ScriptedReporter {
            list: Err(CheckError::Transport(
                "Couldn't reach Burrow at http://burrow:8080: connection refused".to_string(),
            )),
            statuses: HashMap::new(),
        };

        let check = Healthcheck::new(reporter, whitelist(&[]), 0);
        let err = check.check_all().await.unwrap_err();
        assert!(matches!(err, CheckError::Transport(_)));
        assert!(!check.good_to_go().await);
    }
}
