//! Registry resolution and validation.
//!
//! This module locates the registry document (a local file in
//! development mode, a fixed remote URL in production), validates it
//! against the command schema, and caches the validated result for the
//! lifetime of a loader.

mod error;
mod loader;
mod locator;
mod schema;

pub use error::{HttpStatus, RegistryError, RequiredField, ValidationError, ValueAt};
pub use loader::{DEFAULT_REGISTRY_URL, RegistryLoader};
pub use locator::{
    REGISTRY_PATH_ENV, local_registry_available, registry_command_source, registry_path,
};
pub use schema::{Registry, RegistryCommand, validate_command, validate_registry};
