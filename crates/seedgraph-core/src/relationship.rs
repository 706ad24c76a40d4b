//! Bidirectional relationship index derived from foreign-key declarations.
//!
//! Foreign keys are declared on the referencing side only. This module turns
//! them into two independent maps, one per direction, so a relation can be
//! looked up from either endpoint without back-pointers between resources.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::ConfigError;
use crate::resource::{Relation, Resource};

/// Relations keyed by the resource at the other end.
pub type Relations = BTreeMap<String, Relation>;

/// Outgoing relations of one resource, keyed by target resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FromRelationship {
    pub to: Relations,
}

/// Incoming relations of one resource, keyed by source resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToRelationship {
    pub from: Relations,
}

/// The relationship index: `from[a].to[b]` and `to[b].from[a]` hold the
/// same [`Relation`] for every foreign key declared on `a` pointing at `b`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Relationships {
    pub from: BTreeMap<String, FromRelationship>,
    pub to: BTreeMap<String, ToRelationship>,
}

impl Relationships {
    /// The relation declared on `from` pointing at `to`, if any.
    pub fn relation(&self, from: &str, to: &str) -> Option<&Relation> {
        self.from.get(from).and_then(|r| r.to.get(to))
    }

    /// Whether two resources are linked in either direction.
    pub fn are_related(&self, a: &str, b: &str) -> bool {
        self.relation(a, b).is_some() || self.relation(b, a).is_some()
    }

    /// Total number of derived relations.
    pub fn relation_count(&self) -> usize {
        self.from.values().map(|r| r.to.len()).sum()
    }
}

/// Derive the relationship index for a complete resource map.
///
/// Every declared resource gets an entry in both maps, empty when it has no
/// relations in that direction.
pub fn derive_relationships(
    resources: &BTreeMap<String, Resource>,
) -> Result<Relationships, ConfigError> {
    let mut relationships = Relationships {
        from: resources
            .keys()
            .map(|name| (name.clone(), FromRelationship::default()))
            .collect(),
        to: resources
            .keys()
            .map(|name| (name.clone(), ToRelationship::default()))
            .collect(),
    };

    for (name, resource) in resources {
        for fk in &resource.foreign_keys {
            let target = resources.get(&fk.resource_name).ok_or_else(|| {
                ConfigError::UnknownForeignResource {
                    resource: name.clone(),
                    target: fk.resource_name.clone(),
                }
            })?;
            let relation = Relation::new(resource, fk, target);
            debug!(
                from = %name,
                to = %fk.resource_name,
                key = %relation.from_key,
                "derived relation"
            );

            let outgoing = &mut relationships
                .from
                .entry(name.clone())
                .or_default()
                .to;
            if outgoing.contains_key(&fk.resource_name) {
                return Err(ConfigError::DuplicateRelation {
                    resource: name.clone(),
                    target: fk.resource_name.clone(),
                });
            }
            outgoing.insert(fk.resource_name.clone(), relation.clone());

            relationships
                .to
                .entry(fk.resource_name.clone())
                .or_default()
                .from
                .insert(name.clone(), relation);
        }
    }

    Ok(relationships)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn resources_of(doc: &crate::schema::SchemaDocument) -> BTreeMap<String, Resource> {
        doc.resources
            .iter()
            .map(|(name, schema)| (name.clone(), Resource::from_schema(name, schema)))
            .collect()
    }

    #[test]
    fn outgoing_relation_matches_declaration() {
        let rels = derive_relationships(&resources_of(&two_resource_document())).unwrap();
        let rel = &rels.from["MyTestResource"].to["MyTestResource2"];
        assert_eq!(rel.from_table, "my_test_table");
        assert_eq!(rel.from_key, "my_test_table.fk1");
        assert_eq!(rel.to_table, "my_test_table2");
        assert_eq!(rel.to_key, "my_test_table2.id");
        assert_eq!(rel.key_type, "NORMAL");
    }

    #[test]
    fn incoming_relation_mirrors_outgoing() {
        let rels = derive_relationships(&resources_of(&two_resource_document())).unwrap();
        assert_eq!(
            rels.to["MyTestResource2"].from["MyTestResource"],
            rels.from["MyTestResource"].to["MyTestResource2"]
        );
        assert_eq!(rels.relation_count(), 1);
    }

    #[test]
    fn every_resource_has_both_entries() {
        let rels = derive_relationships(&resources_of(&two_resource_document())).unwrap();
        assert!(rels.from["MyTestResource2"].to.is_empty());
        assert!(rels.to["MyTestResource"].from.is_empty());
        assert_eq!(rels.from.len(), 2);
        assert_eq!(rels.to.len(), 2);
    }

    #[test]
    fn are_related_either_direction() {
        let rels = derive_relationships(&resources_of(&two_resource_document())).unwrap();
        assert!(rels.are_related("MyTestResource", "MyTestResource2"));
        assert!(rels.are_related("MyTestResource2", "MyTestResource"));
        assert!(!rels.are_related("MyTestResource", "MyTestResource"));
    }

    #[test]
    fn self_reference() {
        let mut doc = crate::schema::SchemaDocument::default();
        doc.resources.insert(
            "Employee".to_string(),
            resource_schema(
                "employees",
                vec![],
                vec![foreign_key_schema(
                    "NORMAL",
                    "employees.manager_id",
                    "Employee",
                    "employees.id",
                )],
            ),
        );
        let rels = derive_relationships(&resources_of(&doc)).unwrap();
        assert_eq!(
            rels.relation("Employee", "Employee").unwrap().to_table,
            "employees"
        );
        assert!(rels.to["Employee"].from.contains_key("Employee"));
    }

    #[test]
    fn unknown_target_fails() {
        let mut doc = two_resource_document();
        doc.resources.remove("MyTestResource2");
        let result = derive_relationships(&resources_of(&doc));
        assert_eq!(
            result,
            Err(ConfigError::UnknownForeignResource {
                resource: "MyTestResource".to_string(),
                target: "MyTestResource2".to_string(),
            })
        );
    }

    #[test]
    fn duplicate_pair_fails() {
        let mut doc = two_resource_document();
        doc.resources
            .get_mut("MyTestResource")
            .unwrap()
            .foreign_keys
            .push(foreign_key_schema(
                "NORMAL",
                "my_test_table.fk2",
                "MyTestResource2",
                "my_test_table2.id",
            ));
        let result = derive_relationships(&resources_of(&doc));
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateRelation { ref target, .. }) if target == "MyTestResource2"
        ));
    }

    #[test]
    fn empty_input() {
        let rels = derive_relationships(&BTreeMap::new()).unwrap();
        assert!(rels.from.is_empty());
        assert!(rels.to.is_empty());
        assert_eq!(rels.relation_count(), 0);
    }
}
