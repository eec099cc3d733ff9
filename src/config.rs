//! Handler configuration and webhook registry

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Error, Result};

/// How much run detail is appended to the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDetail {
    /// Elapsed time and updated-resource count
    Elapsed,
    /// Elapsed line plus the full updated-resource list
    Resources,
}

/// How much cookbook detail is appended to the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookbookDetail {
    /// Every cookbook name and version from the run
    All,
}

/// Handler configuration
///
/// Constructed once at handler initialization and immutable afterwards.
/// The detail-level and fail-only defaults are `Option` on purpose: a
/// per-target override that is explicitly `false` must win over these
/// defaults, so absence has to be distinguishable from falsity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Ordered selector names, resolved against the webhook registry
    #[serde(default)]
    pub webhooks: Vec<String>,

    /// Bot username included in the payload when set
    pub username: Option<String>,

    /// Icon URL; takes precedence over `icon_emoji`
    pub icon_url: Option<String>,

    /// Icon emoji (e.g. ":fork_and_knife:"), used only when no icon URL is set
    pub icon_emoji: Option<String>,

    /// Default fail-only flag: suppress success notifications
    pub fail_only: Option<bool>,

    /// Default message detail level
    pub message_detail_level: Option<MessageDetail>,

    /// Default cookbook detail level
    pub cookbook_detail_level: Option<CookbookDetail>,

    /// Per-attempt delivery budget in seconds; unbounded when unset
    pub timeout: Option<f64>,

    /// Verify TLS certificates on delivery. Defaults to `false`, matching
    /// the historical handler behavior of trusting arbitrary internal
    /// webhook endpoints; enable this wherever the endpoints carry real
    /// certificates.
    #[serde(default)]
    pub verify_ssl: bool,
}

/// A resolved webhook registry entry.
///
/// Every override is `Option`: `None` falls back to the [`HandlerConfig`]
/// default, while an explicit value (including `false`) applies as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookTarget {
    /// Delivery endpoint; an entry without a url is skipped with a warning
    pub url: Option<String>,

    /// Per-target fail-only override
    pub fail_only: Option<bool>,

    /// Per-target message detail override
    pub message_detail_level: Option<MessageDetail>,

    /// Per-target cookbook detail override
    pub cookbook_detail_level: Option<CookbookDetail>,
}

impl WebhookTarget {
    /// Create a target pointing at `url` with no overrides
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Effective fail-only flag for this target
    pub fn effective_fail_only(&self, config: &HandlerConfig) -> bool {
        self.fail_only.or(config.fail_only).unwrap_or(false)
    }

    /// Effective message detail level for this target
    pub fn effective_message_detail(&self, config: &HandlerConfig) -> Option<MessageDetail> {
        self.message_detail_level.or(config.message_detail_level)
    }

    /// Effective cookbook detail level for this target
    pub fn effective_cookbook_detail(&self, config: &HandlerConfig) -> Option<CookbookDetail> {
        self.cookbook_detail_level.or(config.cookbook_detail_level)
    }
}

/// Webhook registry
///
/// The external key-value source the configured selector names index into,
/// usually a subtree of the node's wider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookRegistry {
    entries: BTreeMap<String, WebhookTarget>,
}

impl WebhookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target under `name`
    pub fn insert(&mut self, name: impl Into<String>, target: WebhookTarget) {
        self.entries.insert(name.into(), target);
    }

    /// Look up a target by selector name
    pub fn resolve(&self, name: &str) -> Option<&WebhookTarget> {
        self.entries.get(name)
    }

    /// Number of registered targets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk layout: handler defaults at the top level, registry entries
/// under `[registry.<name>]` tables.
#[derive(Debug, Deserialize)]
struct HandlerFile {
    #[serde(flatten)]
    config: HandlerConfig,
    #[serde(default)]
    registry: WebhookRegistry,
}

impl HandlerConfig {
    /// Load the handler configuration and webhook registry from a TOML file
    pub fn load(path: &str) -> Result<(HandlerConfig, WebhookRegistry)> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read config: {}", e)))?;

        let file: HandlerFile = toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))?;

        Ok((file.config, file.registry))
    }
}
