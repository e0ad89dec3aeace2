//! Serializable description of an already-resolved dependency graph.
//!
//! A snapshot plays the role a lockfile plays for packages: it records which
//! components were selected and every edge between them, in discovery order,
//! so a graph can be rebuilt without running the resolution engine again.

use serde::{Deserialize, Serialize};

use resgraph_util::errors::{ResGraphError, ResGraphResult};

use crate::attributes::AttributeContainer;
use crate::coordinate::{ComponentIdentifier, ComponentSelector, ModuleVersion};
use crate::failure::ResolveFailure;
use crate::reason::SelectionDescriptor;
use crate::variant::ResolvedVariant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSnapshot {
    /// Identifier of the root component; must name one of `components`.
    pub root: ComponentIdentifier,
    #[serde(default)]
    pub attributes: AttributeContainer,
    #[serde(default, rename = "component")]
    pub components: Vec<SnapshotComponent>,
}

/// One selected component and its outgoing dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotComponent {
    pub id: ComponentIdentifier,
    /// Module coordinates for project components that publish under one.
    #[serde(default, rename = "module-version", skip_serializing_if = "Option::is_none")]
    pub module_version: Option<ModuleVersion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<SelectionDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ResolvedVariant>,
    #[serde(default)]
    pub dependencies: Vec<SnapshotDependency>,
}

/// A requested dependency; exactly one of `selected` and `failure` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDependency {
    pub requested: ComponentSelector,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub constraint: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<ComponentIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted: Option<ComponentSelector>,
    #[serde(default, rename = "attempted-reasons", skip_serializing_if = "Vec::is_empty")]
    pub attempted_reasons: Vec<SelectionDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ResolveFailure>,
}

impl SnapshotDependency {
    pub fn resolved(requested: ComponentSelector, selected: ComponentIdentifier) -> Self {
        Self {
            requested,
            constraint: false,
            selected: Some(selected),
            variant: None,
            attempted: None,
            attempted_reasons: Vec::new(),
            failure: None,
        }
    }

    pub fn unresolved(requested: ComponentSelector, failure: ResolveFailure) -> Self {
        Self {
            requested,
            constraint: false,
            selected: None,
            variant: None,
            attempted: None,
            attempted_reasons: Vec::new(),
            failure: Some(failure),
        }
    }
}

impl ResolutionSnapshot {
    /// Parse a snapshot from TOML.
    pub fn parse_toml(content: &str) -> ResGraphResult<Self> {
        toml::from_str(content).map_err(|e| {
            ResGraphError::Snapshot {
                message: format!("Failed to parse snapshot: {e}"),
            }
            .into()
        })
    }

    /// Serialize the snapshot to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(content: &str) -> ResGraphResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            ResGraphError::Snapshot {
                message: format!("Failed to parse snapshot JSON: {e}"),
            }
            .into()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up a component entry by identifier.
    pub fn component(&self, id: &ComponentIdentifier) -> Option<&SnapshotComponent> {
        self.components.iter().find(|c| &c.id == id)
    }
}
