pub mod loader;
pub mod settings;

pub use loader::{DataLoadError, Format, load_configuration_file, load_document};
pub use settings::LoaderSettings;

use seedgraph_core::Configuration;

/// Load and build the configuration document `name` from the settings'
/// base directory. `name` may carry an extension or be a bare base name.
pub fn load_configuration(
    settings: &LoaderSettings,
    name: &str,
) -> Result<Configuration, DataLoadError> {
    let path = loader::resolve_document_path(settings, name)?;
    load_configuration_file(&path)
}
