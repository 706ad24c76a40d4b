use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::error::ConfigError;
use crate::relationship::{Relationships, derive_relationships};
use crate::resolver::{PhaseLocation, resolve_phase};
use crate::resource::Resource;
use crate::schema::SchemaDocument;
use crate::task::{Entity, Phase};

/// The fully linked configuration graph. Frozen after build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    name: String,
    description: String,
    resources: BTreeMap<String, Resource>,
    relationships: Relationships,
    entities: BTreeMap<String, Entity>,
}

impl Configuration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn entities(&self) -> &BTreeMap<String, Entity> {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Look up a phase by entity and phase name.
    pub fn phase(&self, entity: &str, phase: &str) -> Option<&Phase> {
        self.entities.get(entity).and_then(|e| e.phases.get(phase))
    }
}

/// Builder that owns a decoded schema until it is turned into a
/// [`Configuration`].
///
/// Build order: resources -> relationships -> entities. Nothing is visible
/// to callers until every step has succeeded.
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    schema: SchemaDocument,
}

impl ConfigurationBuilder {
    pub fn new(schema: SchemaDocument) -> Self {
        Self { schema }
    }

    /// Finalize and build the immutable configuration.
    pub fn build(self) -> Result<Configuration, ConfigError> {
        build_configuration(&self.schema)
    }
}

/// Build a configuration from a decoded schema document.
pub fn build_configuration(schema: &SchemaDocument) -> Result<Configuration, ConfigError> {
    // 1. Resources, foreign keys copied as declared
    let resources = build_resources(schema);

    // 2. Relationships, both directions
    let relationships = derive_relationships(&resources)?;

    // 3. Entities; every phase resolves its own tasks
    let entities = build_entities(schema, &resources, &relationships)?;

    info!(
        name = %schema.name,
        resources = resources.len(),
        relations = relationships.relation_count(),
        entities = entities.len(),
        "configuration built"
    );

    Ok(Configuration {
        name: schema.name.clone(),
        description: schema.description.clone(),
        resources,
        relationships,
        entities,
    })
}

fn build_resources(schema: &SchemaDocument) -> BTreeMap<String, Resource> {
    schema
        .resources
        .iter()
        .map(|(name, declared)| (name.clone(), Resource::from_schema(name, declared)))
        .collect()
}

fn build_entities(
    schema: &SchemaDocument,
    resources: &BTreeMap<String, Resource>,
    relationships: &Relationships,
) -> Result<BTreeMap<String, Entity>, ConfigError> {
    let mut entities = BTreeMap::new();
    for (entity_name, declared) in &schema.entities {
        let mut phases = BTreeMap::new();
        for (phase_name, phase) in &declared.phases {
            let location = PhaseLocation {
                entity: entity_name,
                phase: phase_name,
            };
            let tasks = resolve_phase(resources, relationships, location, phase)?;
            phases.insert(
                phase_name.clone(),
                Phase {
                    description: phase.description.clone(),
                    tasks,
                },
            );
        }
        entities.insert(
            entity_name.clone(),
            Entity {
                description: declared.description.clone(),
                phases,
            },
        );
    }
    Ok(entities)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::SelectionCriteria;
    use crate::test_utils::*;

    #[test]
    fn builds_name_and_description() {
        let config = build_configuration(&entities_document()).unwrap();
        assert_eq!(config.name(), "Example");
        assert_eq!(config.description(), "Example configuration");
    }

    #[test]
    fn builds_resources_verbatim() {
        let doc = entities_document();
        let config = build_configuration(&doc).unwrap();
        assert_eq!(config.resources().len(), doc.resources.len());
        for (name, declared) in &doc.resources {
            let res = config.resource(name).unwrap();
            assert_eq!(res.table_name, declared.table_name);
            assert_eq!(res.primary_key, declared.primary_key);
            assert_eq!(res.auto_increment, declared.auto_increment);
            assert_eq!(res.index, declared.index);
        }
    }

    #[test]
    fn builds_relationships() {
        let config = build_configuration(&entities_document()).unwrap();
        let rels = config.relationships();
        let rel = rels.relation("MyTestResource", "MyTestResource2").unwrap();
        assert_eq!(rel.from_table, "my_test_table");
        assert_eq!(rel, &rels.to["MyTestResource2"].from["MyTestResource"]);
    }

    #[test]
    fn builds_entities_phases_and_tasks() {
        let config = build_configuration(&entities_document()).unwrap();
        let entity = config.entity("MyTestEntity").unwrap();
        assert_eq!(entity.description, "This is my test entity");
        assert_eq!(entity.task_count(), 4);

        let phase = config.phase("MyTestEntity", "MyTestComponent1").unwrap();
        assert_eq!(phase.description, "This is a test component");

        let part_a = &phase.tasks["PartA"];
        assert_eq!(part_a.resource.table_name, "my_test_table");
        assert!(part_a.selection_criteria.is_none());

        assert!(matches!(
            phase.tasks["PartB"].selection_criteria,
            Some(SelectionCriteria::Custom { .. })
        ));
        assert!(matches!(
            phase.tasks["PartC"].selection_criteria,
            Some(SelectionCriteria::Indexed { .. })
        ));
        assert!(matches!(
            phase.tasks["PartD"].selection_criteria,
            Some(SelectionCriteria::Related { .. })
        ));
    }

    #[test]
    fn builder_matches_free_function() {
        let doc = entities_document();
        let via_builder = ConfigurationBuilder::new(doc.clone()).build().unwrap();
        let via_fn = build_configuration(&doc).unwrap();
        assert_eq!(via_builder, via_fn);
    }

    #[test]
    fn build_is_deterministic() {
        let doc = entities_document();
        assert_eq!(
            build_configuration(&doc).unwrap(),
            build_configuration(&doc).unwrap()
        );
    }

    #[test]
    fn dangling_reference_aborts_build() {
        let mut doc = entities_document();
        doc.entities
            .get_mut("MyTestEntity")
            .unwrap()
            .phases
            .get_mut("MyTestComponent1")
            .unwrap()
            .tasks
            .insert(
                "PartE".to_string(),
                task_schema("MyTestResource", Some(related(&["Missing"]))),
            );
        let result = build_configuration(&doc);
        assert!(matches!(
            result,
            Err(ConfigError::MissingSiblingReference { ref sibling, .. }) if sibling == "Missing"
        ));
    }

    #[test]
    fn empty_document_builds() {
        let doc = SchemaDocument {
            name: "Empty".to_string(),
            ..Default::default()
        };
        let config = build_configuration(&doc).unwrap();
        assert!(config.resources().is_empty());
        assert!(config.entities().is_empty());
        assert_eq!(config.relationships().relation_count(), 0);
    }
}
