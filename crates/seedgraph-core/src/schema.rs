//! Serde structs for the decoded schema document.
//!
//! These structs mirror the on-disk document shape (PascalCase keys) and are
//! deserialized by `seedgraph-data` from YAML, JSON, RON, or TOML. Names in
//! here are plain strings; the builder resolves them into linked model types.

use serde::Deserialize;
use std::collections::BTreeMap;

// ===========================================================================
// Document root
// ===========================================================================

/// A fully decoded schema document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSchema>,
    #[serde(default)]
    pub entities: BTreeMap<String, EntitySchema>,
}

// ===========================================================================
// Resources
// ===========================================================================

/// A resource (table) declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceSchema {
    pub table_name: String,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub index: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeySchema>,
}

/// A foreign key, declared on the referencing side only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForeignKeySchema {
    #[serde(rename = "Type")]
    pub key_type: String,
    pub key: String,
    pub resource_name: String,
    pub foreign_key: String,
}

// ===========================================================================
// Entities / phases / tasks
// ===========================================================================

/// An entity declaration: a named unit of generation work.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntitySchema {
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "Components")]
    pub phases: BTreeMap<String, PhaseSchema>,
}

/// A phase declaration (also written as a component).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhaseSchema {
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "Elements", alias = "Parts")]
    pub tasks: BTreeMap<String, TaskSchema>,
}

/// A task declaration (also written as an element or part).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskSchema {
    pub resource: String,
    #[serde(default)]
    pub shares: bool,
    #[serde(default)]
    pub selection_criteria: Option<SelectionCriteriaSchema>,
}

/// Selection criteria as declared, tagged by its `Type` field.
///
/// Sibling tasks are referenced by name and resolved by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "Type")]
pub enum SelectionCriteriaSchema {
    Custom {
        #[serde(rename = "Criteria", default)]
        criteria: String,
    },
    #[serde(rename = "Index", alias = "Indexed")]
    Indexed {
        #[serde(rename = "Index")]
        index: String,
        #[serde(rename = "Tasks", alias = "Elements", default)]
        tasks: Vec<String>,
    },
    Related {
        #[serde(rename = "Tasks", alias = "Elements", default)]
        tasks: Vec<String>,
    },
}

impl SelectionCriteriaSchema {
    /// Names of the sibling tasks this criteria refers to.
    pub fn sibling_names(&self) -> &[String] {
        match self {
            SelectionCriteriaSchema::Custom { .. } => &[],
            SelectionCriteriaSchema::Indexed { tasks, .. } => tasks,
            SelectionCriteriaSchema::Related { tasks } => tasks,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
