use serde::Serialize;
use std::collections::BTreeMap;

use crate::schema::{ForeignKeySchema, ResourceSchema};

/// A foreign key carried by the resource that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub key_type: String,
    pub key: String,
    /// Name of the referenced resource.
    pub resource_name: String,
    /// Key on the referenced resource.
    pub foreign_key: String,
}

impl From<&ForeignKeySchema> for ForeignKey {
    fn from(fk: &ForeignKeySchema) -> Self {
        Self {
            key_type: fk.key_type.clone(),
            key: fk.key.clone(),
            resource_name: fk.resource_name.clone(),
            foreign_key: fk.foreign_key.clone(),
        }
    }
}

/// A named data resource backed by one storage table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub name: String,
    pub table_name: String,
    pub primary_key: Vec<String>,
    pub auto_increment: bool,
    pub index: BTreeMap<String, Vec<String>>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Resource {
    /// Build a resource from its declaration. Foreign keys are copied as-is;
    /// their targets are checked when relationships are derived.
    pub fn from_schema(name: &str, schema: &ResourceSchema) -> Self {
        Self {
            name: name.to_string(),
            table_name: schema.table_name.clone(),
            primary_key: schema.primary_key.clone(),
            auto_increment: schema.auto_increment,
            index: schema.index.clone(),
            foreign_keys: schema.foreign_keys.iter().map(ForeignKey::from).collect(),
        }
    }

    /// Columns of a named index, if declared.
    pub fn index_columns(&self, index: &str) -> Option<&[String]> {
        self.index.get(index).map(Vec::as_slice)
    }
}

/// One resolved, directed edge between two resources' tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub from_table: String,
    pub from_key: String,
    pub to_table: String,
    pub to_key: String,
    pub key_type: String,
}

impl Relation {
    /// Resolve a foreign key declared on `from` and pointing at `to`.
    pub fn new(from: &Resource, fk: &ForeignKey, to: &Resource) -> Self {
        Self {
            from_table: from.table_name.clone(),
            from_key: fk.key.clone(),
            to_table: to.table_name.clone(),
            to_key: fk.foreign_key.clone(),
            key_type: fk.key_type.clone(),
        }
    }
}
