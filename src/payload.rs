//! Outgoing Slack payload

use serde::{Deserialize, Serialize};

use crate::config::HandlerConfig;

/// One attachment, carrying the failure exception text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub text: String,
}

/// JSON body POSTed to a webhook.
///
/// Optional fields are omitted entirely rather than sent as null, and the
/// two icon fields are mutually exclusive with `icon_url` winning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl SlackPayload {
    /// Build a payload from the configured identity, the formatted message
    /// text, and an optional attachment body.
    pub fn build(config: &HandlerConfig, text: String, attachment: Option<String>) -> Self {
        // icon_url takes precedence over icon_emoji
        let (icon_url, icon_emoji) = if config.icon_url.is_some() {
            (config.icon_url.clone(), None)
        } else {
            (None, config.icon_emoji.clone())
        };

        Self {
            username: config.username.clone(),
            text,
            icon_url,
            icon_emoji,
            attachments: attachment.map(|text| vec![Attachment { text }]),
        }
    }
}
