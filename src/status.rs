//! Run status contract

use serde::{Deserialize, Serialize};

/// A cookbook name/version pair from the run's cookbook collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookbook {
    pub name: String,
    pub version: String,
}

impl Cookbook {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Outcome of a single client run, as handed over by the run orchestrator.
///
/// Read-only from the handler's point of view; one instance is shared by
/// every webhook target in a report cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatus {
    /// Did the run converge without error?
    pub success: bool,
    /// Name of the node the run executed on
    pub node_name: String,
    /// Wall-clock run duration in seconds
    pub elapsed_time: f64,
    /// Identifiers of updated resources, in application order; `None` when
    /// the run failed before the resource collection existed
    pub updated_resources: Option<Vec<String>>,
    /// Exception description, present iff the run failed
    pub exception: Option<String>,
    /// Cookbooks used by the run, in the collection's natural order
    #[serde(default)]
    pub cookbooks: Vec<Cookbook>,
}

impl RunStatus {
    /// Status for a successful run
    pub fn succeeded(node_name: impl Into<String>, elapsed_time: f64) -> Self {
        Self {
            success: true,
            node_name: node_name.into(),
            elapsed_time,
            updated_resources: None,
            exception: None,
            cookbooks: Vec::new(),
        }
    }

    /// Status for a failed run
    pub fn failed(
        node_name: impl Into<String>,
        elapsed_time: f64,
        exception: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            node_name: node_name.into(),
            elapsed_time,
            updated_resources: None,
            exception: Some(exception.into()),
            cookbooks: Vec::new(),
        }
    }

    /// Attach the updated-resource list
    pub fn with_updated_resources(mut self, resources: Vec<String>) -> Self {
        self.updated_resources = Some(resources);
        self
    }

    /// Attach the cookbook collection
    pub fn with_cookbooks(mut self, cookbooks: Vec<Cookbook>) -> Self {
        self.cookbooks = cookbooks;
        self
    }

    /// Human-readable outcome word used in the message text
    pub fn human_readable(&self) -> &'static str {
        if self.success {
            "succeeded"
        } else {
            "failed"
        }
    }
}
