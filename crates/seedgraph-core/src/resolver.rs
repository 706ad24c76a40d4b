//! Two-pass resolution of a phase's tasks and their selection criteria.
//!
//! Criteria may name sibling tasks declared anywhere in the same phase, so
//! resolution runs in two passes over the whole phase:
//!
//! 1. **Materialize** -- build every [`Task`] with its resource resolved and
//!    its criteria left as `None`. This closes the name index.
//! 2. **Resolve** -- turn each declared criteria into a [`SelectionCriteria`]
//!    by looking siblings up in the closed index.
//!
//! Pass 2 never starts before pass 1 has finished for the whole phase.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::relationship::Relationships;
use crate::resource::Resource;
use crate::schema::{PhaseSchema, SelectionCriteriaSchema};
use crate::task::{SelectionCriteria, Task};

/// Where a phase lives, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct PhaseLocation<'a> {
    pub entity: &'a str,
    pub phase: &'a str,
}

impl PhaseLocation<'_> {
    fn missing_sibling(&self, task: &str, sibling: &str) -> ConfigError {
        ConfigError::MissingSiblingReference {
            entity: self.entity.to_string(),
            phase: self.phase.to_string(),
            task: task.to_string(),
            sibling: sibling.to_string(),
        }
    }
}

/// Resolve all tasks of one phase.
pub fn resolve_phase(
    resources: &BTreeMap<String, Resource>,
    relationships: &Relationships,
    location: PhaseLocation<'_>,
    phase: &PhaseSchema,
) -> Result<BTreeMap<String, Task>, ConfigError> {
    let index = materialize_tasks(resources, location, phase)?;

    let mut tasks = BTreeMap::new();
    for (name, declared) in &phase.tasks {
        let mut task = lookup_sibling(&index, location, name, name)?.clone();
        if let Some(criteria) = &declared.selection_criteria {
            task.selection_criteria = Some(resolve_criteria(
                &index,
                relationships,
                location,
                &task,
                criteria,
            )?);
        }
        tasks.insert(name.clone(), task);
    }

    debug!(
        entity = location.entity,
        phase = location.phase,
        tasks = tasks.len(),
        "resolved phase"
    );
    Ok(tasks)
}

/// Pass 1: build every task with its resource and no criteria.
pub fn materialize_tasks(
    resources: &BTreeMap<String, Resource>,
    location: PhaseLocation<'_>,
    phase: &PhaseSchema,
) -> Result<BTreeMap<String, Task>, ConfigError> {
    phase
        .tasks
        .iter()
        .map(|(name, declared)| {
            let resource = resources.get(&declared.resource).ok_or_else(|| {
                ConfigError::UnknownTaskResource {
                    entity: location.entity.to_string(),
                    phase: location.phase.to_string(),
                    task: name.clone(),
                    resource: declared.resource.clone(),
                }
            })?;
            let task = Task {
                name: name.clone(),
                resource: resource.clone(),
                shares: declared.shares,
                selection_criteria: None,
            };
            Ok((name.clone(), task))
        })
        .collect()
}

/// Pass 2: resolve one declared criteria against the closed task index.
pub fn resolve_criteria(
    index: &BTreeMap<String, Task>,
    relationships: &Relationships,
    location: PhaseLocation<'_>,
    task: &Task,
    declared: &SelectionCriteriaSchema,
) -> Result<SelectionCriteria, ConfigError> {
    match declared {
        SelectionCriteriaSchema::Custom { criteria } => Ok(SelectionCriteria::Custom {
            criteria: criteria.clone(),
        }),
        SelectionCriteriaSchema::Indexed {
            index: index_name,
            tasks,
        } => {
            if task.resource.index_columns(index_name).is_none() {
                return Err(ConfigError::UnknownIndex {
                    entity: location.entity.to_string(),
                    phase: location.phase.to_string(),
                    task: task.name.clone(),
                    index: index_name.clone(),
                    resource: task.resource.name.clone(),
                });
            }
            Ok(SelectionCriteria::Indexed {
                index: index_name.clone(),
                tasks: lookup_siblings(index, location, &task.name, tasks)?,
            })
        }
        SelectionCriteriaSchema::Related { tasks } => {
            let siblings = lookup_siblings(index, location, &task.name, tasks)?;
            for sibling in &siblings {
                if !relationships.are_related(&task.resource.name, &sibling.resource.name) {
                    warn!(
                        entity = location.entity,
                        phase = location.phase,
                        task = %task.name,
                        sibling = %sibling.name,
                        "related task has no relation to its sibling's resource"
                    );
                }
            }
            Ok(SelectionCriteria::Related { tasks: siblings })
        }
    }
}

fn lookup_siblings(
    index: &BTreeMap<String, Task>,
    location: PhaseLocation<'_>,
    task: &str,
    names: &[String],
) -> Result<Vec<Task>, ConfigError> {
    names
        .iter()
        .map(|name| lookup_sibling(index, location, task, name).cloned())
        .collect()
}

fn lookup_sibling<'a>(
    index: &'a BTreeMap<String, Task>,
    location: PhaseLocation<'_>,
    task: &str,
    sibling: &str,
) -> Result<&'a Task, ConfigError> {
    index
        .get(sibling)
        .ok_or_else(|| location.missing_sibling(task, sibling))
}

// ===========================================================================
// Tests
// ===========================================================================
