//! Registry data model and schema validation.
//!
//! The validator turns an untyped parsed document into a typed
//! [`Registry`] without performing any I/O.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

use super::error::{RegistryError, RequiredField, ValidationError, ValueAt};

/// A single installable command, discriminated by its `type` tag.
///
/// `registry_entry` commands are hosted by the registry itself; `github`
/// commands point at an arbitrary external URL, which is required for
/// that variant only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryCommand {
    RegistryEntry {
        name: String,
        author: String,
        description: String,
    },
    Github {
        name: String,
        author: String,
        description: String,
        url: String,
    },
}

impl RegistryCommand {
    pub fn name(&self) -> &str {
        match self {
            RegistryCommand::RegistryEntry { name, .. } => name,
            RegistryCommand::Github { name, .. } => name,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            RegistryCommand::RegistryEntry { author, .. } => author,
            RegistryCommand::Github { author, .. } => author,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            RegistryCommand::RegistryEntry { description, .. } => description,
            RegistryCommand::Github { description, .. } => description,
        }
    }

    /// The wire value of the `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            RegistryCommand::RegistryEntry { .. } => "registry_entry",
            RegistryCommand::Github { .. } => "github",
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            RegistryCommand::RegistryEntry { .. } => None,
            RegistryCommand::Github { url, .. } => Some(url),
        }
    }
}

/// The validated collection of known commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub commands: Vec<RegistryCommand>,
}

fn non_empty_string(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Some(value.to_string()),
        _ => None,
    }
}

/// Validate a single command entry. `index` is set when the entry sits
/// inside a `commands` sequence and only affects the error prefix.
pub fn validate_command(
    raw: &Value,
    index: Option<usize>,
) -> Result<RegistryCommand, ValidationError> {
    let at = ValueAt::Command(index);

    if !raw.is_mapping() {
        return Err(ValidationError::InvalidShape(at));
    }

    let name = non_empty_string(raw, "name").ok_or(ValidationError::MissingField {
        at,
        field: RequiredField::Name,
    })?;
    let author = non_empty_string(raw, "author").ok_or(ValidationError::MissingField {
        at,
        field: RequiredField::Author,
    })?;
    let description = non_empty_string(raw, "description").ok_or(ValidationError::MissingField {
        at,
        field: RequiredField::Description,
    })?;

    let command_type =
        raw.get("type")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingField {
                at,
                field: RequiredField::Type,
            })?;

    match command_type {
        // An extra url field on a registry entry is ignored, not an error.
        "registry_entry" => Ok(RegistryCommand::RegistryEntry {
            name,
            author,
            description,
        }),
        "github" => {
            let url = non_empty_string(raw, "url").ok_or(ValidationError::MissingField {
                at,
                field: RequiredField::Url,
            })?;
            Ok(RegistryCommand::Github {
                name,
                author,
                description,
                url,
            })
        }
        other => Err(ValidationError::InvalidType {
            at,
            value: other.to_string(),
        }),
    }
}

/// Validate a whole registry document. `descriptor` names the source
/// (path or URL) and is carried on every failure.
pub fn validate_registry(raw: &Value, descriptor: &str) -> Result<Registry, RegistryError> {
    let wrap = |error: ValidationError| RegistryError::Validation {
        descriptor: descriptor.to_string(),
        error,
    };

    if !raw.is_mapping() {
        return Err(wrap(ValidationError::InvalidShape(ValueAt::Registry)));
    }

    let Some(entries) = raw.get("commands").and_then(Value::as_sequence) else {
        return Err(wrap(ValidationError::MissingCommandsArray));
    };

    let mut commands = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        commands.push(validate_command(entry, Some(index)).map_err(wrap)?);
    }

    // Each duplicated name is reported once, in first-occurrence order.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for command in &commands {
        *counts.entry(command.name()).or_default() += 1;
    }
    let mut duplicates: Vec<String> = Vec::new();
    for command in &commands {
        if let Some(count) = counts.remove(command.name())
            && count > 1
        {
            duplicates.push(command.name().to_string());
        }
    }
    if !duplicates.is_empty() {
        return Err(wrap(ValidationError::DuplicateNames { names: duplicates }));
    }

    Ok(Registry { commands })
}
