//! Slack notifier
//!
//! Drives one report cycle: resolve each configured selector against the
//! webhook registry, apply the fail-only gate, format the message, and
//! POST it. One slow or broken target never touches the others, and
//! [`SlackNotifier::report`] never returns an error — the host run must
//! not fail because its notifier did.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{HandlerConfig, WebhookRegistry};
use crate::message;
use crate::payload::SlackPayload;
use crate::status::RunStatus;
use crate::{Error, Result};

/// What happened to a single webhook target during a report cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Message was POSTed to the endpoint
    Sent,
    /// Run succeeded and the target is fail-only; nothing was sent
    Skipped,
    /// Resolution or delivery failed; the cycle continued regardless
    Failed(String),
}

/// Per-target record from a report cycle
#[derive(Debug, Clone)]
pub struct TargetReport {
    /// Selector name from the configuration
    pub webhook: String,
    pub outcome: DeliveryOutcome,
}

/// Result of a full report cycle.
///
/// Failures live here as data instead of propagating; the caller decides
/// whether a partially-delivered cycle is worth acting on.
#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    pub outcomes: Vec<TargetReport>,
}

impl ReportSummary {
    /// Number of targets that received a message
    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, DeliveryOutcome::Sent))
    }

    /// Number of targets skipped by the fail-only gate
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, DeliveryOutcome::Skipped))
    }

    /// Number of targets that failed resolution or delivery
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DeliveryOutcome::Failed(_)))
    }

    /// Did every target either send or legitimately skip?
    pub fn all_delivered(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&DeliveryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Post-run Slack notification handler
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    config: HandlerConfig,
    client: reqwest::Client,
}

impl SlackNotifier {
    /// Create a notifier; builds the HTTP client once, honoring
    /// [`HandlerConfig::verify_ssl`].
    pub fn new(config: HandlerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| Error::HttpError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Handler configuration this notifier was built with
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Report a finished run to every configured webhook, sequentially.
    ///
    /// Infallible by contract: each per-target error is logged as a
    /// warning, recorded in the summary, and the cycle moves on.
    pub async fn report(&self, status: &RunStatus, registry: &WebhookRegistry) -> ReportSummary {
        let mut summary = ReportSummary::default();

        for name in &self.config.webhooks {
            debug!(webhook = %name, "Sending handler report to webhook");

            let outcome = match self.report_to(name, status, registry).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(webhook = %name, error = %e, "Failed to send message to Slack");
                    DeliveryOutcome::Failed(e.to_string())
                }
            };

            summary.outcomes.push(TargetReport {
                webhook: name.clone(),
                outcome,
            });
        }

        summary
    }

    async fn report_to(
        &self,
        name: &str,
        status: &RunStatus,
        registry: &WebhookRegistry,
    ) -> Result<DeliveryOutcome> {
        let target = registry
            .resolve(name)
            .ok_or_else(|| Error::UnknownWebhook(name.to_string()))?;

        let url = target
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::MissingUrl(name.to_string()))?;

        if status.success && target.effective_fail_only(&self.config) {
            debug!(webhook = %name, "Run succeeded and target is fail-only; skipping");
            return Ok(DeliveryOutcome::Skipped);
        }

        let text = message::notification_text(
            status,
            target.effective_message_detail(&self.config),
            target.effective_cookbook_detail(&self.config),
        );

        // Failed runs always carry the exception as an attachment.
        let attachment = if status.success {
            None
        } else {
            status.exception.clone()
        };

        let payload = SlackPayload::build(&self.config, text, attachment);

        match self.config.timeout {
            Some(secs) => {
                // Negative or non-finite timeouts come straight from user
                // configuration; they fail the target, never the handler.
                let budget = Duration::try_from_secs_f64(secs)
                    .map_err(|_| Error::ConfigError(format!("Invalid timeout value: {}", secs)))?;
                tokio::time::timeout(budget, self.deliver(url, &payload))
                    .await
                    .map_err(|_| Error::Timeout {
                        webhook: name.to_string(),
                        secs,
                    })??
            }
            None => self.deliver(url, &payload).await?,
        }

        info!(webhook = %name, url = %url, "Sent report to Slack webhook");
        Ok(DeliveryOutcome::Sent)
    }

    /// POST the payload. Delivery is attempted, not confirmed: only
    /// connection-level failures count, the response status does not.
    async fn deliver(&self, url: &str, payload: &SlackPayload) -> Result<()> {
        self.client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::HttpError(format!("Webhook request failed: {}", e)))?;

        Ok(())
    }
}
