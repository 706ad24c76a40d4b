use serde::Serialize;
use std::collections::BTreeMap;

use crate::resource::Resource;

/// How a task chooses the subset of rows it works on.
///
/// Sibling tasks are stored by value, as they were after their resource was
/// resolved. Their own criteria are left unresolved in these copies, which
/// keeps mutually referencing tasks finite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SelectionCriteria {
    /// A literal predicate, opaque to the builder.
    Custom { criteria: String },
    /// Lookup through a named index of the task's resource, keyed by the
    /// values of the sibling tasks.
    Indexed { index: String, tasks: Vec<Task> },
    /// Rows related to the sibling tasks through the relationship graph.
    Related { tasks: Vec<Task> },
}

impl SelectionCriteria {
    /// Sibling tasks this criteria depends on.
    pub fn tasks(&self) -> &[Task] {
        match self {
            SelectionCriteria::Custom { .. } => &[],
            SelectionCriteria::Indexed { tasks, .. } => tasks,
            SelectionCriteria::Related { tasks } => tasks,
        }
    }

    /// Short label for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionCriteria::Custom { .. } => "Custom",
            SelectionCriteria::Indexed { .. } => "Indexed",
            SelectionCriteria::Related { .. } => "Related",
        }
    }
}

/// A task binds one resource to an optional selection criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub name: String,
    pub resource: Resource,
    /// Whether rows produced by this task may be shared with other tasks.
    pub shares: bool,
    pub selection_criteria: Option<SelectionCriteria>,
}

/// A named group of tasks inside an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub description: String,
    pub tasks: BTreeMap<String, Task>,
}

/// A named unit of generation work made of phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub description: String,
    pub phases: BTreeMap<String, Phase>,
}

impl Entity {
    /// Total number of tasks across all phases.
    pub fn task_count(&self) -> usize {
        self.phases.values().map(|p| p.tasks.len()).sum()
    }
}
