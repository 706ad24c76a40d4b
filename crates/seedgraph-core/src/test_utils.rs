//! Shared test helpers for unit tests, integration tests, and downstream
//! crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use std::collections::BTreeMap;

use crate::schema::*;

// ===========================================================================
// Schema constructors
// ===========================================================================

/// A resource declaration with primary key `{table}.id` and auto-increment.
pub fn resource_schema(
    table: &str,
    index: Vec<(&str, Vec<&str>)>,
    foreign_keys: Vec<ForeignKeySchema>,
) -> ResourceSchema {
    ResourceSchema {
        table_name: table.to_string(),
        primary_key: vec![format!("{table}.id")],
        auto_increment: true,
        index: index
            .into_iter()
            .map(|(name, cols)| {
                (
                    name.to_string(),
                    cols.into_iter().map(str::to_string).collect(),
                )
            })
            .collect(),
        foreign_keys,
    }
}

pub fn foreign_key_schema(
    key_type: &str,
    key: &str,
    resource_name: &str,
    foreign_key: &str,
) -> ForeignKeySchema {
    ForeignKeySchema {
        key_type: key_type.to_string(),
        key: key.to_string(),
        resource_name: resource_name.to_string(),
        foreign_key: foreign_key.to_string(),
    }
}

pub fn task_schema(resource: &str, criteria: Option<SelectionCriteriaSchema>) -> TaskSchema {
    TaskSchema {
        resource: resource.to_string(),
        shares: false,
        selection_criteria: criteria,
    }
}

pub fn phase_schema(tasks: Vec<(&str, TaskSchema)>) -> PhaseSchema {
    PhaseSchema {
        description: String::new(),
        tasks: tasks
            .into_iter()
            .map(|(name, task)| (name.to_string(), task))
            .collect(),
    }
}

// ===========================================================================
// Criteria constructors
// ===========================================================================

pub fn custom(criteria: &str) -> SelectionCriteriaSchema {
    SelectionCriteriaSchema::Custom {
        criteria: criteria.to_string(),
    }
}

pub fn indexed(index: &str, tasks: &[&str]) -> SelectionCriteriaSchema {
    SelectionCriteriaSchema::Indexed {
        index: index.to_string(),
        tasks: tasks.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn related(tasks: &[&str]) -> SelectionCriteriaSchema {
    SelectionCriteriaSchema::Related {
        tasks: tasks.iter().map(|t| t.to_string()).collect(),
    }
}

// ===========================================================================
// Fixture documents
// ===========================================================================

/// `MyTestResource` (table `my_test_table`) with a `NORMAL` foreign key
/// `my_test_table.fk1` to `MyTestResource2` (`my_test_table2.id`).
pub fn two_resource_document() -> SchemaDocument {
    let mut resources = BTreeMap::new();
    resources.insert(
        "MyTestResource".to_string(),
        resource_schema(
            "my_test_table",
            vec![
                ("IDX1", vec!["my_test_table.idx1"]),
                ("IDX2", vec!["my_test_table.idx1", "my_test_table.idx2"]),
            ],
            vec![foreign_key_schema(
                "NORMAL",
                "my_test_table.fk1",
                "MyTestResource2",
                "my_test_table2.id",
            )],
        ),
    );
    resources.insert(
        "MyTestResource2".to_string(),
        resource_schema(
            "my_test_table2",
            vec![
                ("IDX1", vec!["my_test_table2.idx1"]),
                ("IDX2", vec!["my_test_table2.idx1", "my_test_table2.idx2"]),
            ],
            vec![],
        ),
    );

    SchemaDocument {
        name: "Example".to_string(),
        description: "Example configuration".to_string(),
        resources,
        entities: BTreeMap::new(),
    }
}

/// [`two_resource_document`] plus one entity with one phase holding a task
/// of each criteria kind (`PartA` none, `PartB` custom, `PartC` indexed,
/// `PartD` related).
pub fn entities_document() -> SchemaDocument {
    let mut doc = two_resource_document();

    let mut phase = phase_schema(vec![
        ("PartA", task_schema("MyTestResource", None)),
        ("PartB", task_schema("MyTestResource2", Some(custom("1 = 1\n")))),
        (
            "PartC",
            task_schema("MyTestResource2", Some(indexed("IDX1", &["PartA"]))),
        ),
        (
            "PartD",
            task_schema("MyTestResource", Some(related(&["PartB"]))),
        ),
    ]);
    phase.description = "This is a test component".to_string();

    let mut phases = BTreeMap::new();
    phases.insert("MyTestComponent1".to_string(), phase);
    doc.entities.insert(
        "MyTestEntity".to_string(),
        EntitySchema {
            description: "This is my test entity".to_string(),
            phases,
        },
    );
    doc
}
