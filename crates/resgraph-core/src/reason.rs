//! Why a component ended up in the resolved graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of event that contributed to selecting a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionCause {
    /// The component is the root of the resolution.
    Root,
    /// A dependency declaration asked for it.
    Requested,
    /// It won a version conflict.
    ConflictResolution,
    /// A forced version pinned it.
    Forced,
    /// A substitution or selection rule picked it.
    SelectedByRule,
    /// It was substituted by a component of an included build.
    CompositeBuild,
    /// A dependency constraint contributed to it.
    ByConstraint,
    /// Other candidates were rejected in its favour.
    Rejection,
}

impl SelectionCause {
    fn label(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Requested => "requested",
            Self::ConflictResolution => "conflict resolution",
            Self::Forced => "forced",
            Self::SelectedByRule => "selected by rule",
            Self::CompositeBuild => "composite build substitution",
            Self::ByConstraint => "by constraint",
            Self::Rejection => "rejection",
        }
    }
}

impl fmt::Display for SelectionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cause plus an optional human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    pub cause: SelectionCause,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SelectionDescriptor {
    pub fn new(cause: SelectionCause) -> Self {
        Self {
            cause,
            detail: None,
        }
    }

    pub fn with_detail(cause: SelectionCause, detail: impl Into<String>) -> Self {
        Self {
            cause,
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for SelectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.cause),
            None => write!(f, "{}", self.cause),
        }
    }
}

/// Ordered list of everything that contributed to a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionReason {
    descriptions: Vec<SelectionDescriptor>,
}

impl SelectionReason {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reason carried by the root component.
    pub fn root() -> Self {
        Self::new().with(SelectionDescriptor::new(SelectionCause::Root))
    }

    /// Reason for a component selected because it was asked for.
    pub fn requested() -> Self {
        Self::new().with(SelectionDescriptor::new(SelectionCause::Requested))
    }

    pub fn with(mut self, descriptor: SelectionDescriptor) -> Self {
        self.descriptions.push(descriptor);
        self
    }

    pub fn add(&mut self, descriptor: SelectionDescriptor) {
        self.descriptions.push(descriptor);
    }

    pub fn descriptions(&self) -> &[SelectionDescriptor] {
        &self.descriptions
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    pub fn has(&self, cause: SelectionCause) -> bool {
        self.descriptions.iter().any(|d| d.cause == cause)
    }

    pub fn is_forced(&self) -> bool {
        self.has(SelectionCause::Forced)
    }

    pub fn is_conflict_resolution(&self) -> bool {
        self.has(SelectionCause::ConflictResolution)
    }

    pub fn is_selected_by_rule(&self) -> bool {
        self.has(SelectionCause::SelectedByRule)
    }

    /// True when nothing beyond the root/requested path influenced the
    /// selection.
    pub fn is_expected(&self) -> bool {
        self.descriptions
            .iter()
            .all(|d| matches!(d.cause, SelectionCause::Root | SelectionCause::Requested))
    }
}

impl From<Vec<SelectionDescriptor>> for SelectionReason {
    fn from(descriptions: Vec<SelectionDescriptor>) -> Self {
        Self { descriptions }
    }
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, descriptor) in self.descriptions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{descriptor}")?;
        }
        Ok(())
    }
}
