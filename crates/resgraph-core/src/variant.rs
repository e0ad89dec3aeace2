use serde::{Deserialize, Serialize};

use crate::attributes::AttributeContainer;

/// A variant of a component that the resolution engine selected,
/// for example `runtimeElements` of a Java library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    pub name: String,
    #[serde(default)]
    pub attributes: AttributeContainer,
}

impl ResolvedVariant {
    pub fn new(name: impl Into<String>, attributes: AttributeContainer) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

impl std::fmt::Display for ResolvedVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.attributes)
    }
}
