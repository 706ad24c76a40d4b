/// Errors raised while building a configuration from a decoded schema.
///
/// Every variant names the dangling reference and where it was declared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A foreign key points at a resource that was never declared.
    #[error("resource '{resource}' has a foreign key to unknown resource '{target}'")]
    UnknownForeignResource { resource: String, target: String },

    /// More than one foreign key links the same pair of resources.
    #[error("resource '{resource}' declares more than one foreign key to '{target}'")]
    DuplicateRelation { resource: String, target: String },

    /// A task binds a resource that was never declared.
    #[error("task '{entity}.{phase}.{task}' references unknown resource '{resource}'")]
    UnknownTaskResource {
        entity: String,
        phase: String,
        task: String,
        resource: String,
    },

    /// A selection criteria names a sibling task missing from its phase.
    #[error("missing sibling reference '{sibling}' from task '{task}' in phase '{entity}.{phase}'")]
    MissingSiblingReference {
        entity: String,
        phase: String,
        task: String,
        sibling: String,
    },

    /// An indexed selection criteria names an index the task's resource lacks.
    #[error("task '{entity}.{phase}.{task}' uses index '{index}' not declared on resource '{resource}'")]
    UnknownIndex {
        entity: String,
        phase: String,
        task: String,
        index: String,
        resource: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = ConfigError::UnknownForeignResource {
            resource: "orders".to_string(),
            target: "customers".to_string(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("orders"));
        assert!(msg.contains("customers"));

        let e = ConfigError::DuplicateRelation {
            resource: "orders".to_string(),
            target: "customers".to_string(),
        };
        assert!(format!("{e}").contains("more than one"));

        let e = ConfigError::UnknownTaskResource {
            entity: "E".to_string(),
            phase: "P".to_string(),
            task: "T".to_string(),
            resource: "R".to_string(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("E.P.T"));
        assert!(msg.contains("'R'"));

        let e = ConfigError::MissingSiblingReference {
            entity: "E".to_string(),
            phase: "P".to_string(),
            task: "T".to_string(),
            sibling: "Ghost".to_string(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("Ghost"));
        assert!(msg.contains("E.P"));

        let e = ConfigError::UnknownIndex {
            entity: "E".to_string(),
            phase: "P".to_string(),
            task: "T".to_string(),
            index: "IDX9".to_string(),
            resource: "R".to_string(),
        };
        assert!(format!("{e}").contains("IDX9"));
    }
}
