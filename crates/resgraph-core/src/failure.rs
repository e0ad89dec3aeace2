use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a requested dependency could not be resolved.
///
/// Stored by value on unresolved edges; it is data, not a propagated error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResolveFailure {
    /// No repository had a matching component.
    #[error("Could not find {selector}{}", searched_suffix(.searched))]
    #[diagnostic(help("Check the coordinates and the configured repositories"))]
    NotFound {
        selector: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        searched: Vec<String>,
    },

    /// Every candidate was rejected by a rule or constraint.
    #[error("Rejected {selector}: {reason}")]
    Rejected { selector: String, reason: String },

    /// Requested versions could not be reconciled.
    #[error("Conflict on {module} between versions {}", .versions.join(", "))]
    Conflict {
        module: String,
        versions: Vec<String>,
    },

    /// Any other failure reported by the resolution engine.
    #[error("{message}")]
    Other { message: String },
}

impl ResolveFailure {
    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::NotFound {
            selector: selector.into(),
            searched: Vec::new(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

fn searched_suffix(searched: &[String]) -> String {
    if searched.is_empty() {
        String::new()
    } else {
        format!(" (searched: {})", searched.join(", "))
    }
}
