//! Post-run Slack notification handler for Chef client runs
//!
//! Given the status of a finished provisioning run and a registry of
//! webhook targets, formats a message per target and delivers it over
//! HTTPS, best-effort. A failing or hanging webhook is contained to that
//! target and the handler itself never errors out of a report cycle.

pub mod config;
pub mod error;
pub mod message;
pub mod notifier;
pub mod payload;
pub mod status;

// Re-exports
pub use config::{CookbookDetail, HandlerConfig, MessageDetail, WebhookRegistry, WebhookTarget};
pub use error::{Error, Result};
pub use notifier::{DeliveryOutcome, ReportSummary, SlackNotifier, TargetReport};
pub use payload::{Attachment, SlackPayload};
pub use status::{Cookbook, RunStatus};
