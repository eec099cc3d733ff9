//! Message formatting
//!
//! Pure functions from a [`RunStatus`] and the effective detail levels to
//! the message text. The cookbook collection travels inside the status so
//! nothing here reads ambient run state.

use crate::config::{CookbookDetail, MessageDetail};
use crate::status::RunStatus;

/// Emoji prefix for a successful run
pub const SUCCESS_INDICATOR: &str = ":white_check_mark:";

/// Emoji prefix for a failed run
pub const FAILURE_INDICATOR: &str = ":skull:";

/// Full notification text: outcome indicator followed by the message body
pub fn notification_text(
    status: &RunStatus,
    message_detail: Option<MessageDetail>,
    cookbook_detail: Option<CookbookDetail>,
) -> String {
    let indicator = if status.success {
        SUCCESS_INDICATOR
    } else {
        FAILURE_INDICATOR
    };
    format!(
        " {} {}",
        indicator,
        format_message(status, message_detail, cookbook_detail)
    )
}

/// Message body: base sentence plus the requested detail suffixes
pub fn format_message(
    status: &RunStatus,
    message_detail: Option<MessageDetail>,
    cookbook_detail: Option<CookbookDetail>,
) -> String {
    format!(
        "Chef client run {} on {}{}{}",
        status.human_readable(),
        status.node_name,
        cookbook_detail_text(status, cookbook_detail),
        message_detail_text(status, message_detail),
    )
}

fn cookbook_detail_text(status: &RunStatus, level: Option<CookbookDetail>) -> String {
    match level {
        Some(CookbookDetail::All) => {
            let pairs: Vec<String> = status
                .cookbooks
                .iter()
                .map(|c| format!("{} {}", c.name, c.version))
                .collect();
            format!(" using cookbooks {}", pairs.join(", "))
        }
        None => String::new(),
    }
}

fn message_detail_text(status: &RunStatus, level: Option<MessageDetail>) -> String {
    // Both branches need the resource list; a run that died before the
    // resource collection existed gets no detail suffix at all.
    let resources = match &status.updated_resources {
        Some(r) => r,
        None => return String::new(),
    };

    match level {
        Some(MessageDetail::Elapsed) => format!(
            " ({} seconds). {} resources updated",
            status.elapsed_time,
            resources.len()
        ),
        Some(MessageDetail::Resources) => format!(
            " ({} seconds). {} resources updated \n {}",
            status.elapsed_time,
            resources.len(),
            resources.join(", ")
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Cookbook;

    fn success_status() -> RunStatus {
        RunStatus::succeeded("web01", 12.0)
            .with_updated_resources(vec!["pkg_a".to_string(), "pkg_b".to_string()])
    }

    #[test]
    fn test_base_message_without_detail() {
        let msg = format_message(&success_status(), None, None);
        assert_eq!(msg, "Chef client run succeeded on web01");
    }

    #[test]
    fn test_elapsed_detail() {
        let msg = format_message(&success_status(), Some(MessageDetail::Elapsed), None);
        assert_eq!(
            msg,
            "Chef client run succeeded on web01 (12 seconds). 2 resources updated"
        );
    }

    #[test]
    fn test_resources_detail_appends_resource_list() {
        let msg = format_message(&success_status(), Some(MessageDetail::Resources), None);
        assert_eq!(
            msg,
            "Chef client run succeeded on web01 (12 seconds). 2 resources updated \n pkg_a, pkg_b"
        );
    }

    #[test]
    fn test_detail_suppressed_when_resources_absent() {
        let status = RunStatus::failed("db02", 3.0, "connection refused");
        let msg = format_message(&status, Some(MessageDetail::Resources), None);
        assert_eq!(msg, "Chef client run failed on db02");
    }

    #[test]
    fn test_cookbook_detail_joins_name_version_pairs() {
        let status = RunStatus::succeeded("web01", 5.0).with_cookbooks(vec![
            Cookbook::new("nginx", "2.7.4"),
            Cookbook::new("apt", "7.5.22"),
        ]);
        let msg = format_message(&status, None, Some(CookbookDetail::All));
        assert_eq!(
            msg,
            "Chef client run succeeded on web01 using cookbooks nginx 2.7.4, apt 7.5.22"
        );
    }

    #[test]
    fn test_cookbook_detail_precedes_message_detail() {
        let status = success_status().with_cookbooks(vec![Cookbook::new("nginx", "2.7.4")]);
        let msg = format_message(
            &status,
            Some(MessageDetail::Elapsed),
            Some(CookbookDetail::All),
        );
        assert_eq!(
            msg,
            "Chef client run succeeded on web01 using cookbooks nginx 2.7.4 (12 seconds). 2 resources updated"
        );
    }

    #[test]
    fn test_notification_text_indicators() {
        let ok = notification_text(&RunStatus::succeeded("web01", 1.0), None, None);
        assert_eq!(ok, " :white_check_mark: Chef client run succeeded on web01");

        let bad = notification_text(&RunStatus::failed("db02", 1.0, "boom"), None, None);
        assert_eq!(bad, " :skull: Chef client run failed on db02");
    }

    #[test]
    fn test_fractional_elapsed_time() {
        let status = RunStatus::succeeded("web01", 12.5)
            .with_updated_resources(vec!["pkg_a".to_string()]);
        let msg = format_message(&status, Some(MessageDetail::Elapsed), None);
        assert_eq!(
            msg,
            "Chef client run succeeded on web01 (12.5 seconds). 1 resources updated"
        );
    }
}
