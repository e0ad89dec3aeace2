//! Component identifiers and the selectors used to request them.

use std::fmt;
use std::str::FromStr;

use resgraph_util::errors::ResGraphError;
use serde::{Deserialize, Serialize};

const PROJECT_PREFIX: &str = "project ";

/// `group:name:version` of a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleVersion {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleVersion {
    pub fn new(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// `group:name` identifier (without version).
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl FromStr for ModuleVersion {
    type Err = ResGraphError;

    /// Parse `"group:name:version"`; every part must be non-empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, name, version]
                if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *name, *version))
            }
            _ => Err(ResGraphError::Coordinate {
                input: s.to_string(),
                message: "expected group:name:version".to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ModuleVersion {
    type Error = ResGraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModuleVersion> for String {
    fn from(value: ModuleVersion) -> Self {
        value.to_string()
    }
}

/// Identity of a resolved component as reported by the resolution engine.
///
/// Written as `group:name:version` for external modules and `project :path`
/// for components built from the current build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentIdentifier {
    Module(ModuleVersion),
    Project { path: String },
}

impl ComponentIdentifier {
    pub fn module(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::Module(ModuleVersion::new(group, name, version))
    }

    pub fn project(path: impl Into<String>) -> Self {
        Self::Project { path: path.into() }
    }

    /// Module coordinates, if this is a module component.
    pub fn module_version(&self) -> Option<&ModuleVersion> {
        match self {
            Self::Module(mv) => Some(mv),
            Self::Project { .. } => None,
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project { .. })
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(mv) => write!(f, "{mv}"),
            Self::Project { path } => write!(f, "{PROJECT_PREFIX}{path}"),
        }
    }
}

impl FromStr for ComponentIdentifier {
    type Err = ResGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix(PROJECT_PREFIX) {
            return parse_project_path(s, path).map(Self::project);
        }
        s.parse().map(Self::Module)
    }
}

impl TryFrom<String> for ComponentIdentifier {
    type Error = ResGraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentIdentifier> for String {
    fn from(value: ComponentIdentifier) -> Self {
        value.to_string()
    }
}

/// What a dependency declaration asked for.
///
/// Module selectors carry a version constraint rather than a concrete
/// version; an empty constraint means "any version".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentSelector {
    Module {
        group: String,
        name: String,
        version: String,
    },
    Project {
        path: String,
    },
}

impl ComponentSelector {
    pub fn module(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::Module {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn project(path: impl Into<String>) -> Self {
        Self::Project { path: path.into() }
    }

    /// Whether `id` satisfies this selector, ignoring version ranges:
    /// group and name must match and a non-empty constraint must equal the
    /// selected version exactly.
    pub fn matches(&self, id: &ComponentIdentifier) -> bool {
        match (self, id) {
            (Self::Module { group, name, version }, ComponentIdentifier::Module(mv)) => {
                *group == mv.group
                    && *name == mv.name
                    && (version.is_empty() || *version == mv.version)
            }
            (Self::Project { path }, ComponentIdentifier::Project { path: id_path }) => {
                path == id_path
            }
            _ => false,
        }
    }
}

impl fmt::Display for ComponentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module { group, name, version } if version.is_empty() => {
                write!(f, "{group}:{name}")
            }
            Self::Module { group, name, version } => write!(f, "{group}:{name}:{version}"),
            Self::Project { path } => write!(f, "{PROJECT_PREFIX}{path}"),
        }
    }
}

impl FromStr for ComponentSelector {
    type Err = ResGraphError;

    /// Parse `"group:name"`, `"group:name:constraint"` or `"project :path"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix(PROJECT_PREFIX) {
            return parse_project_path(s, path).map(Self::project);
        }
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, name] if !group.is_empty() && !name.is_empty() => {
                Ok(Self::module(*group, *name, ""))
            }
            [group, name, version] if !group.is_empty() && !name.is_empty() => {
                Ok(Self::module(*group, *name, *version))
            }
            _ => Err(ResGraphError::Coordinate {
                input: s.to_string(),
                message: "expected group:name[:version]".to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ComponentSelector {
    type Error = ResGraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentSelector> for String {
    fn from(value: ComponentSelector) -> Self {
        value.to_string()
    }
}

impl From<&ComponentIdentifier> for ComponentSelector {
    /// The selector that asks for exactly this component.
    fn from(id: &ComponentIdentifier) -> Self {
        match id {
            ComponentIdentifier::Module(mv) => {
                Self::module(mv.group.clone(), mv.name.clone(), mv.version.clone())
            }
            ComponentIdentifier::Project { path } => Self::project(path.clone()),
        }
    }
}

fn parse_project_path(input: &str, path: &str) -> Result<String, ResGraphError> {
    if path.starts_with(':') {
        Ok(path.to_string())
    } else {
        Err(ResGraphError::Coordinate {
            input: input.to_string(),
            message: "project paths start with `:`".to_string(),
        })
    }
}
